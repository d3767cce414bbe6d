//! Good/Poor Human Representation classification.
//!
//! Rules run in order and the first match decides. Only responses with a
//! human figure among their contents are classified.

use super::domain::{ScoredResponse, SpecialScore};
use super::tables::{GHR_POPULAR_CARDS, HUMAN_CONTENT_CODES};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HumanRepresentation {
    #[serde(rename = "GHR")]
    Good,
    #[serde(rename = "PHR")]
    Poor,
}

impl HumanRepresentation {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Good => "GHR",
            Self::Poor => "PHR",
        }
    }
}

/// Outcome plus the 1-based rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanClassification {
    pub outcome: HumanRepresentation,
    pub rule: u8,
}

struct HumanRule {
    outcome: HumanRepresentation,
    applies: fn(&ScoredResponse) -> bool,
}

const RULES: [HumanRule; 7] = [
    HumanRule {
        outcome: HumanRepresentation::Good,
        applies: pure_h_without_distortion,
    },
    HumanRule {
        outcome: HumanRepresentation::Poor,
        applies: poor_form_or_serious_slippage,
    },
    HumanRule {
        outcome: HumanRepresentation::Good,
        applies: cooperative_without_aggression,
    },
    HumanRule {
        outcome: HumanRepresentation::Poor,
        applies: fabulized_morbid_or_anatomy,
    },
    HumanRule {
        outcome: HumanRepresentation::Good,
        applies: popular_on_human_cards,
    },
    HumanRule {
        outcome: HumanRepresentation::Poor,
        applies: aggressive_incongruous_or_partial,
    },
    HumanRule {
        outcome: HumanRepresentation::Good,
        applies: remaining_human,
    },
];

pub fn is_eligible(response: &ScoredResponse) -> bool {
    HUMAN_CONTENT_CODES
        .iter()
        .any(|code| response.has_content(code))
}

pub fn classify(response: &ScoredResponse) -> Option<HumanClassification> {
    if !is_eligible(response) {
        return None;
    }

    RULES
        .iter()
        .zip(1u8..)
        .find(|(rule, _)| (rule.applies)(response))
        .map(|(rule, step)| HumanClassification {
            outcome: rule.outcome,
            rule: step,
        })
}

fn pure_h_without_distortion(response: &ScoredResponse) -> bool {
    response.has_content("H")
        && response.fq.is_appropriate()
        && !response
            .special_scores
            .iter()
            .any(|score| score.is_cognitive() && *score != SpecialScore::Dv)
        && !response.has_special(SpecialScore::Ag)
        && !response.has_special(SpecialScore::Mor)
}

fn poor_form_or_serious_slippage(response: &ScoredResponse) -> bool {
    if !response.fq.is_appropriate() {
        return true;
    }
    response.has_special(SpecialScore::Alog)
        || response.has_special(SpecialScore::Con)
        || response.special_scores.iter().any(|score| score.is_level2())
}

fn cooperative_without_aggression(response: &ScoredResponse) -> bool {
    response.has_special(SpecialScore::Cop) && !response.has_special(SpecialScore::Ag)
}

fn fabulized_morbid_or_anatomy(response: &ScoredResponse) -> bool {
    response.has_special(SpecialScore::Fab)
        || response.has_special(SpecialScore::Mor)
        || response.has_content("An")
}

fn popular_on_human_cards(response: &ScoredResponse) -> bool {
    response.popular
        && response
            .card
            .map(|card| GHR_POPULAR_CARDS.contains(&card))
            .unwrap_or(false)
}

fn aggressive_incongruous_or_partial(response: &ScoredResponse) -> bool {
    response.has_special(SpecialScore::Ag)
        || response.has_special(SpecialScore::Inc)
        || response.has_special(SpecialScore::Dr)
        || response.has_content("Hd")
}

fn remaining_human(_: &ScoredResponse) -> bool {
    true
}
