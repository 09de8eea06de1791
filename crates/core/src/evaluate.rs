use crate::domain::returns::{finite, BaselineAttribution};
use crate::domain::scan::ScanRecord;
use crate::outcome::message::{self, OutcomeMessages};
use crate::outcome::{classify, OutcomeClassification};
use crate::recurrence;
use chrono::NaiveDate;
use serde::Serialize;

/// Fully evaluated view of one scan record: baseline attribution,
/// classification, and the rendered message block. Computed fresh per call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedRecommendation {
    pub ticker: String,
    pub name: String,

    // Always the latest scan's values, regardless of baseline shifts.
    pub score: Option<f64>,
    pub score_label: Option<String>,
    pub strategy_tag: Option<String>,
    pub holding_period_label: Option<String>,

    pub baseline: BaselineAttribution,
    pub classification: OutcomeClassification,
    pub messages: OutcomeMessages,
    pub reappearance_badge: Option<String>,
}

/// Evaluates one record against the given scan date.
///
/// A snapshot that violates the `max >= current >= min` invariant is
/// reported via `tracing::warn!` and treated as absent, so a single bad
/// row degrades to `NO_DATA` instead of failing the batch.
pub fn evaluate_record(
    record: &ScanRecord,
    scan_date: NaiveDate,
    urgency_window_days: i64,
) -> EvaluatedRecommendation {
    let current_price = finite(record.current_price).unwrap_or(0.0);
    let baseline = recurrence::resolve_baseline_with_window(
        record.recurrence.as_ref(),
        scan_date,
        current_price,
        record.first_seen_price,
        urgency_window_days,
    );

    let snapshot = record.returns.sanitized();
    let snapshot = match snapshot.validate() {
        Ok(()) => Some(snapshot),
        Err(err) => {
            tracing::warn!(ticker = %record.ticker, error = %err, "inconsistent return snapshot; treating as missing");
            None
        }
    };

    let classification = classify(snapshot.as_ref(), &record.thresholds);
    let messages = message::render(&classification, snapshot.as_ref());

    let reappearance_badge = record
        .recurrence
        .as_ref()
        .and_then(|r| message::reappearance_badge(r, &baseline));

    EvaluatedRecommendation {
        ticker: record.ticker.clone(),
        name: record.name.clone(),
        score: record.score,
        score_label: record.score_label.clone(),
        strategy_tag: record.strategy_tag.clone(),
        holding_period_label: record.thresholds.holding_period_label.clone(),
        baseline,
        classification,
        messages,
        reappearance_badge,
    }
}

/// Evaluates a whole scan result. Each record is independent; this is a
/// plain map with no ordering dependency between calls.
pub fn evaluate_scan(
    records: &[ScanRecord],
    scan_date: NaiveDate,
    urgency_window_days: i64,
) -> Vec<EvaluatedRecommendation> {
    records
        .iter()
        .map(|r| evaluate_record(r, scan_date, urgency_window_days))
        .collect()
}
