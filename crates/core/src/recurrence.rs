use crate::domain::returns::{BaselineAttribution, RecurrenceInfo};
use chrono::NaiveDate;

/// Gap (in days) since the last appearance at or under which a recurrence
/// is flagged urgent. Product wording is "3일 이내"; override per run via
/// URGENCY_WINDOW_DAYS.
pub const URGENCY_WINDOW_DAYS: i64 = 3;

/// Decides which date/price anchors a recommendation's return.
///
/// A ticker seen before is measured from its original appearance, not the
/// latest one; the caller supplies the first-seen price, this function
/// never fetches history. Only the baseline shifts — the latest scan's
/// score, score label, and strategy tag are untouched by recurrence.
pub fn resolve_baseline(
    recurrence: Option<&RecurrenceInfo>,
    current_scan_date: NaiveDate,
    current_scan_price: f64,
    first_seen_price: Option<f64>,
) -> BaselineAttribution {
    resolve_baseline_with_window(
        recurrence,
        current_scan_date,
        current_scan_price,
        first_seen_price,
        URGENCY_WINDOW_DAYS,
    )
}

pub fn resolve_baseline_with_window(
    recurrence: Option<&RecurrenceInfo>,
    current_scan_date: NaiveDate,
    current_scan_price: f64,
    first_seen_price: Option<f64>,
    window_days: i64,
) -> BaselineAttribution {
    let Some(recurrence) = recurrence.filter(|r| r.appeared_before) else {
        return BaselineAttribution {
            baseline_date: current_scan_date,
            baseline_price: current_scan_price,
            is_urgent_reappearance: false,
        };
    };

    let baseline_date = recurrence.first_as_of.unwrap_or(current_scan_date);
    let baseline_price = first_seen_price
        .filter(|p| p.is_finite())
        .unwrap_or(current_scan_price);

    let is_urgent_reappearance = recurrence
        .days_since_last
        .map(|days| days <= window_days)
        .unwrap_or(false);

    BaselineAttribution {
        baseline_date,
        baseline_price,
        is_urgent_reappearance,
    }
}
