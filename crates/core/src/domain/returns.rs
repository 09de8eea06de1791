use anyhow::ensure;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Return trajectory of one recommendation since its baseline date.
/// All percentages are already scaled (`5.0` means 5%).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSnapshot {
    pub current_return_pct: Option<f64>,
    pub max_return_pct: Option<f64>,
    pub min_return_pct: Option<f64>,
    pub days_elapsed: Option<i64>,
}

impl ReturnSnapshot {
    /// Coerces non-finite fields to `None` so downstream logic never sees
    /// NaN or infinity. Presence is resolved once, here, at the boundary.
    pub fn sanitized(&self) -> Self {
        Self {
            current_return_pct: finite(self.current_return_pct),
            max_return_pct: finite(self.max_return_pct),
            min_return_pct: finite(self.min_return_pct),
            days_elapsed: self.days_elapsed,
        }
    }

    /// Checks `max >= current >= min` where all three are present.
    /// A violation is reported, never silently repaired.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let (Some(max), Some(current)) = (
            finite(self.max_return_pct),
            finite(self.current_return_pct),
        ) {
            ensure!(
                max >= current,
                "maxReturnPct {max} is below currentReturnPct {current}"
            );
        }
        if let (Some(current), Some(min)) = (
            finite(self.current_return_pct),
            finite(self.min_return_pct),
        ) {
            ensure!(
                current >= min,
                "currentReturnPct {current} is below minReturnPct {min}"
            );
        }
        Ok(())
    }
}

/// Trading thresholds attached to a recommendation. An absent threshold
/// disables the branch of classification logic that depends on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    /// Percentage-scaled, e.g. `5.0`.
    pub target_profit_pct: Option<f64>,
    /// Negative, e.g. `-3.0`.
    pub stop_loss_pct: Option<f64>,
    pub holding_period_label: Option<String>,
}

/// Whether and how often a ticker reappeared across scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceInfo {
    pub appeared_before: bool,
    #[serde(default)]
    pub appear_count: u32,
    pub first_as_of: Option<NaiveDate>,
    pub last_as_of: Option<NaiveDate>,
    pub days_since_last: Option<i64>,
}

/// Which date/price the reported return is measured against.
/// Derived per evaluation call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineAttribution {
    pub baseline_date: NaiveDate,
    pub baseline_price: f64,
    pub is_urgent_reappearance: bool,
}

pub(crate) fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}
