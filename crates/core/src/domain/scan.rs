use crate::domain::returns::{RecurrenceInfo, ReturnSnapshot, ThresholdConfig};
use serde::{Deserialize, Serialize};

/// One recommendation row of a scan result, as delivered by the scan
/// backend. Return and threshold fields sit flat on the record; the
/// recurrence block is nested under `recurrence` when the ticker has a
/// history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub ticker: String,
    pub name: String,

    // Latest-scan presentation fields. These always reflect the most recent
    // scan, regardless of where the return baseline ends up.
    pub score: Option<f64>,
    pub score_label: Option<String>,
    pub strategy_tag: Option<String>,

    pub current_price: Option<f64>,
    /// Price recorded at the ticker's first appearance, supplied by the
    /// backend. The core never fetches historical prices itself.
    pub first_seen_price: Option<f64>,

    #[serde(flatten)]
    pub returns: ReturnSnapshot,
    #[serde(flatten)]
    pub thresholds: ThresholdConfig,

    pub recurrence: Option<RecurrenceInfo>,
}
