use crate::domain::returns::{finite, BaselineAttribution, RecurrenceInfo, ReturnSnapshot};
use crate::outcome::{OutcomeClassification, OutcomeState};
use serde::Serialize;

/// Excess over target at which the celebratory note is added.
const LARGE_EXCESS_PCT: f64 = 3.0;

/// User-facing text for one classification. The exact wording is a
/// compatibility surface consumed verbatim by the presentation layer;
/// change it only together with the frontend.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeMessages {
    /// Badge-level status line, absent while simply in progress.
    pub headline: Option<String>,
    /// Supporting peak/current figures, where the state warrants them.
    pub detail: Option<String>,
    /// Action guidance ("how far to go" / "consider selling").
    pub guidance: Option<String>,
    /// Secondary celebratory note for a large excess over target.
    pub note: Option<String>,
}

/// Renders the message block for a classification. Two-decimal rounding
/// happens here and only here; the classifier works on raw figures.
pub fn render(
    classification: &OutcomeClassification,
    snapshot: Option<&ReturnSnapshot>,
) -> OutcomeMessages {
    let current = snapshot.and_then(|s| finite(s.current_return_pct));
    let max = snapshot.and_then(|s| finite(s.max_return_pct));

    match classification.state {
        OutcomeState::NoData => OutcomeMessages::default(),

        OutcomeState::StopLossReached => OutcomeMessages {
            headline: Some("⚠️ 손절 기준 도달".to_string()),
            guidance: Some("🛑 손절 기준 도달 - 매도 고려 권장".to_string()),
            ..OutcomeMessages::default()
        },

        OutcomeState::TargetAchievedThenDeclined => {
            let detail = match (max, current) {
                (Some(max), Some(current)) => {
                    Some(format!("최고 {max:.2}% → 현재 {current:.2}%"))
                }
                _ => None,
            };
            OutcomeMessages {
                headline: Some("⚠️ 목표 달성했으나 수익률 하락".to_string()),
                detail,
                ..OutcomeMessages::default()
            }
        }

        OutcomeState::TargetAchieved => {
            let excess = classification.excess_pct.unwrap_or(0.0);
            let mut headline = if excess > 0.0 {
                format!("✅ 목표 달성 (+{excess:.2}% 초과)")
            } else {
                "✅ 목표 달성".to_string()
            };

            if let (Some(decline), Some(max)) = (classification.decline_from_peak_pct, max) {
                headline.push_str(&format!(" (최고 {max:.2}%에서 {decline:.2}% 하락)"));
            }

            let note = (excess >= LARGE_EXCESS_PCT)
                .then(|| "🎉 목표 수익률을 크게 초과 달성했습니다!".to_string());

            OutcomeMessages {
                headline: Some(headline),
                note,
                ..OutcomeMessages::default()
            }
        }

        OutcomeState::InProgress => {
            let guidance = classification
                .remaining_to_target_pct
                .map(|remaining| format!("목표까지 {remaining:.2}%"));
            OutcomeMessages {
                guidance,
                ..OutcomeMessages::default()
            }
        }
    }
}

/// Badge for a ticker that reappeared after a short gap. `None` unless the
/// reappearance was flagged urgent and the gap is known.
pub fn reappearance_badge(
    recurrence: &RecurrenceInfo,
    attribution: &BaselineAttribution,
) -> Option<String> {
    if !attribution.is_urgent_reappearance {
        return None;
    }
    recurrence
        .days_since_last
        .map(|days| format!("⚡ {days}일 만에 재등장"))
}
