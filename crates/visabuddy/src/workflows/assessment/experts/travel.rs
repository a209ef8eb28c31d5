use serde::{Deserialize, Serialize};

use super::super::questionnaire::domain::QuestionnaireSummary;

/// Qualitative reading of the travel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelHistoryLabel {
    None,
    Limited,
    Good,
    Strong,
}

impl TravelHistoryLabel {
    pub const fn label(self) -> &'static str {
        match self {
            TravelHistoryLabel::None => "none",
            TravelHistoryLabel::Limited => "limited",
            TravelHistoryLabel::Good => "good",
            TravelHistoryLabel::Strong => "strong",
        }
    }
}

/// Strength of the applicant's prior travel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelHistoryStrength {
    pub score: f64,
    pub label: TravelHistoryLabel,
}

const TRAVELED_CLEAN_SCORE: f64 = 0.4;
const TRAVELED_BASE_WITH_REFUSALS: f64 = 0.3;
const REFUSAL_PENALTY: f64 = 0.2;
const OVERSTAY_SCORE: f64 = 0.1;
const REFUSAL_LIMITED_FLOOR: f64 = 0.2;

/// Conservative travel-history score. Trip frequency is not counted yet, so a
/// clean traveler tops out at 0.4. Labels are assigned per case: the score
/// alone cannot distinguish an overstay from a refusal-damped record.
pub fn assess_travel_history(summary: &QuestionnaireSummary) -> TravelHistoryStrength {
    let traveled = summary.has_traveled();
    let refusals = summary.visa_refusal_count;

    if refusals > 0 {
        let base = if traveled {
            TRAVELED_BASE_WITH_REFUSALS
        } else {
            0.0
        };
        let score = (base - REFUSAL_PENALTY * refusals as f64).max(0.0);
        let label = if score >= REFUSAL_LIMITED_FLOOR {
            TravelHistoryLabel::Limited
        } else {
            TravelHistoryLabel::None
        };
        return TravelHistoryStrength { score, label };
    }

    if summary.has_overstayed {
        return TravelHistoryStrength {
            score: OVERSTAY_SCORE,
            label: TravelHistoryLabel::Limited,
        };
    }

    if traveled {
        return TravelHistoryStrength {
            score: TRAVELED_CLEAN_SCORE,
            label: TravelHistoryLabel::Good,
        };
    }

    TravelHistoryStrength {
        score: 0.0,
        label: TravelHistoryLabel::None,
    }
}
