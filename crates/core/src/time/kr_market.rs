use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use std::collections::HashSet;

const KST_OFFSET_SECS: i32 = 9 * 3600;

// Scans are published after the KRX close (~15:30 KST). Before this cutoff
// the latest complete session is the previous business day.
const SESSION_CUTOFF_KST: (u32, u32) = (16, 0);

/// Scan date for an evaluation run: an explicit `YYYY-MM-DD` argument wins,
/// otherwise the last completed KRX session relative to `now_utc`. The
/// clock is always passed in; nothing in the core reads ambient time.
pub fn resolve_scan_date(
    scan_date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = scan_date_arg {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid scan date {s:?}, expected YYYY-MM-DD"));
    }
    last_completed_session(now_utc)
}

pub fn last_completed_session(now_utc: DateTime<Utc>) -> anyhow::Result<NaiveDate> {
    let kst = chrono::FixedOffset::east_opt(KST_OFFSET_SECS).context("invalid KST offset")?;
    let now_kst = now_utc.with_timezone(&kst);

    let mut date = now_kst.date_naive();
    if (now_kst.hour(), now_kst.minute()) < SESSION_CUTOFF_KST {
        date -= Duration::days(1);
    }

    let holidays = configured_holidays();
    while !is_session_day(date, &holidays) {
        date -= Duration::days(1);
    }

    Ok(date)
}

fn is_session_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    let weekend = matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun);
    !weekend && !holidays.contains(&date)
}

// Fixed-date holidays only; lunar-calendar closures come in via
// KR_MARKET_HOLIDAYS="YYYY-MM-DD,YYYY-MM-DD".
fn configured_holidays() -> HashSet<NaiveDate> {
    let mut out = HashSet::new();
    for y in 2024..=2030 {
        out.extend(NaiveDate::from_ymd_opt(y, 1, 1));
        out.extend(NaiveDate::from_ymd_opt(y, 12, 25));
    }

    if let Ok(s) = std::env::var("KR_MARKET_HOLIDAYS") {
        out.extend(
            s.split(',')
                .filter_map(|p| NaiveDate::parse_from_str(p.trim(), "%Y-%m-%d").ok()),
        );
    }

    out
}
