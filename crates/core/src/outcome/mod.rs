use crate::domain::returns::{finite, ReturnSnapshot, ThresholdConfig};
use serde::Serialize;

pub mod message;

/// Current situation of a recommendation relative to its thresholds.
///
/// Variants are listed in evaluation-priority order: the classifier checks
/// them top to bottom and the first match wins. A stop-loss breach in
/// particular outranks any prior target achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeState {
    NoData,
    StopLossReached,
    TargetAchievedThenDeclined,
    TargetAchieved,
    InProgress,
}

/// Result of one classification call. A computed view over the snapshot,
/// created fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeClassification {
    pub state: OutcomeState,
    /// How far above target, present only when the target is met.
    pub excess_pct: Option<f64>,
    /// Distance from the observed peak. Decisive for
    /// `TargetAchievedThenDeclined`, informational for `TargetAchieved`.
    pub decline_from_peak_pct: Option<f64>,
    /// Distance still to go, present only while in progress with a target.
    pub remaining_to_target_pct: Option<f64>,
    /// Progress toward target, clamped to 0..=100. Zero when no target is
    /// configured or no return data exists.
    pub progress_pct: f64,
}

impl OutcomeClassification {
    fn bare(state: OutcomeState) -> Self {
        Self {
            state,
            excess_pct: None,
            decline_from_peak_pct: None,
            remaining_to_target_pct: None,
            progress_pct: 0.0,
        }
    }
}

/// Classifies a recommendation's current situation.
///
/// Pure and infallible: unparsable or non-finite fields are treated as
/// absent, which degrades toward `NoData` or disables the branch that
/// needed the field. The mandatory evaluation order is:
///
/// 1. `NoData` — no current return at all.
/// 2. `StopLossReached` — `current <= stopLoss` (boundary inclusive).
/// 3. `TargetAchievedThenDeclined` — peak met the target, current is below.
/// 4. `TargetAchieved` — `current >= target` (boundary inclusive).
/// 5. `InProgress` — everything else.
pub fn classify(
    snapshot: Option<&ReturnSnapshot>,
    thresholds: &ThresholdConfig,
) -> OutcomeClassification {
    let Some(current) = snapshot.and_then(|s| finite(s.current_return_pct)) else {
        return OutcomeClassification::bare(OutcomeState::NoData);
    };

    let max = snapshot.and_then(|s| finite(s.max_return_pct));
    let target = finite(thresholds.target_profit_pct);
    let stop = finite(thresholds.stop_loss_pct);

    if let Some(stop) = stop {
        if current <= stop {
            return OutcomeClassification {
                progress_pct: progress(current, target),
                ..OutcomeClassification::bare(OutcomeState::StopLossReached)
            };
        }
    }

    if let Some(target) = target {
        if let Some(max) = max {
            if max >= target && current < target {
                return OutcomeClassification {
                    decline_from_peak_pct: Some(max - current),
                    progress_pct: progress(current, Some(target)),
                    ..OutcomeClassification::bare(OutcomeState::TargetAchievedThenDeclined)
                };
            }
        }

        if current >= target {
            // A pullback that stays above target is reported but does not
            // change the state.
            let decline = max.filter(|m| *m > current).map(|m| m - current);
            return OutcomeClassification {
                excess_pct: Some(current - target),
                decline_from_peak_pct: decline,
                progress_pct: 100.0,
                ..OutcomeClassification::bare(OutcomeState::TargetAchieved)
            };
        }

        return OutcomeClassification {
            remaining_to_target_pct: Some(target - current),
            progress_pct: progress(current, Some(target)),
            ..OutcomeClassification::bare(OutcomeState::InProgress)
        };
    }

    OutcomeClassification::bare(OutcomeState::InProgress)
}

fn progress(current: f64, target: Option<f64>) -> f64 {
    match target {
        Some(target) if target > 0.0 => (current / target * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current: f64, max: f64, min: f64) -> ReturnSnapshot {
        ReturnSnapshot {
            current_return_pct: Some(current),
            max_return_pct: Some(max),
            min_return_pct: Some(min),
            days_elapsed: Some(5),
        }
    }

    fn thresholds(target: Option<f64>, stop: Option<f64>) -> ThresholdConfig {
        ThresholdConfig {
            target_profit_pct: target,
            stop_loss_pct: stop,
            holding_period_label: Some("단기 (1~2주)".to_string()),
        }
    }

    #[test]
    fn no_snapshot_is_no_data() {
        let out = classify(None, &thresholds(Some(5.0), Some(-3.0)));
        assert_eq!(out.state, OutcomeState::NoData);
        assert_eq!(out.progress_pct, 0.0);
    }

    #[test]
    fn missing_current_return_is_no_data() {
        let s = ReturnSnapshot {
            current_return_pct: None,
            max_return_pct: Some(4.0),
            min_return_pct: Some(-1.0),
            days_elapsed: Some(3),
        };
        let out = classify(Some(&s), &thresholds(Some(5.0), Some(-3.0)));
        assert_eq!(out.state, OutcomeState::NoData);
    }

    #[test]
    fn nan_current_return_is_no_data() {
        let s = snapshot(f64::NAN, 4.0, -1.0);
        let out = classify(Some(&s), &thresholds(Some(5.0), Some(-3.0)));
        assert_eq!(out.state, OutcomeState::NoData);
    }

    #[test]
    fn exact_target_counts_as_achieved_with_zero_excess() {
        // Scenario 1: target=5.0, current=5.0, max=5.0, min=2.0.
        let out = classify(Some(&snapshot(5.0, 5.0, 2.0)), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::TargetAchieved);
        assert_eq!(out.excess_pct, Some(0.0));
        assert_eq!(out.decline_from_peak_pct, None);
        assert_eq!(out.progress_pct, 100.0);
    }

    #[test]
    fn reports_excess_above_target() {
        // Scenario 2: target=5.0, current=7.5, max=7.5.
        let out = classify(Some(&snapshot(7.5, 7.5, 1.0)), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::TargetAchieved);
        assert_eq!(out.excess_pct, Some(2.5));
        assert_eq!(out.decline_from_peak_pct, None);
    }

    #[test]
    fn pullback_above_target_stays_achieved() {
        // Scenario 3: target=5.0, current=5.5, max=7.0.
        let out = classify(Some(&snapshot(5.5, 7.0, 1.0)), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::TargetAchieved);
        assert_eq!(out.excess_pct, Some(0.5));
        assert_eq!(out.decline_from_peak_pct, Some(1.5));
    }

    #[test]
    fn drop_below_target_after_peak_is_achieved_then_declined() {
        // Scenario 4: target=5.0, current=3.0, max=6.0.
        let out = classify(Some(&snapshot(3.0, 6.0, 1.0)), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::TargetAchievedThenDeclined);
        assert_eq!(out.decline_from_peak_pct, Some(3.0));
        assert_eq!(out.excess_pct, None);
    }

    #[test]
    fn stop_loss_boundary_is_inclusive() {
        // Scenario 5.
        let cfg = thresholds(None, Some(-3.0));
        let hit = classify(Some(&snapshot(-3.0, 1.0, -3.0)), &cfg);
        assert_eq!(hit.state, OutcomeState::StopLossReached);

        let near = classify(Some(&snapshot(-2.5, 1.0, -2.5)), &cfg);
        assert_ne!(near.state, OutcomeState::StopLossReached);
    }

    #[test]
    fn stop_loss_overrides_prior_target_achievement() {
        // Scenario 6: hit +6% on a 5% target, then fell to -3.5% with -3% stop.
        let out = classify(
            Some(&snapshot(-3.5, 6.0, -3.5)),
            &thresholds(Some(5.0), Some(-3.0)),
        );
        assert_eq!(out.state, OutcomeState::StopLossReached);
        assert_eq!(out.decline_from_peak_pct, None);
    }

    #[test]
    fn in_progress_reports_remaining_and_progress() {
        // Scenario 7: target=5.0, current=2.0, max=4.0 (peak never met target).
        let out = classify(Some(&snapshot(2.0, 4.0, 0.5)), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::InProgress);
        assert_eq!(out.remaining_to_target_pct, Some(3.0));
        assert_eq!(out.decline_from_peak_pct, None);
        assert!((out.progress_pct - 40.0).abs() < 1e-9);
    }

    #[test]
    fn progress_is_clamped_to_zero_for_negative_returns() {
        let out = classify(Some(&snapshot(-1.0, 0.5, -1.5)), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::InProgress);
        assert_eq!(out.progress_pct, 0.0);
    }

    #[test]
    fn no_target_still_classifies_in_progress_without_metrics() {
        let out = classify(Some(&snapshot(2.0, 4.0, 0.5)), &thresholds(None, None));
        assert_eq!(out.state, OutcomeState::InProgress);
        assert_eq!(out.remaining_to_target_pct, None);
        assert_eq!(out.excess_pct, None);
        assert_eq!(out.progress_pct, 0.0);
    }

    #[test]
    fn missing_stop_loss_disables_that_branch() {
        let out = classify(Some(&snapshot(-8.0, 1.0, -8.0)), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::InProgress);
    }

    #[test]
    fn non_finite_peak_disables_decline_branch_only() {
        let s = ReturnSnapshot {
            current_return_pct: Some(3.0),
            max_return_pct: Some(f64::NAN),
            min_return_pct: Some(1.0),
            days_elapsed: Some(2),
        };
        let out = classify(Some(&s), &thresholds(Some(5.0), None));
        assert_eq!(out.state, OutcomeState::InProgress);
        assert_eq!(out.remaining_to_target_pct, Some(2.0));
    }

    #[test]
    fn classify_is_idempotent() {
        let s = snapshot(3.0, 6.0, 1.0);
        let cfg = thresholds(Some(5.0), Some(-3.0));
        assert_eq!(classify(Some(&s), &cfg), classify(Some(&s), &cfg));
    }
}
