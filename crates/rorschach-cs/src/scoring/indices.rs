//! Special Indices: PTI, DEPI, CDI, S-CON, HVI and OBS.
//!
//! Each index is a fixed table of `{ id, test }` criteria evaluated against the
//! tabulation and derived scores, followed by the index's positivity rule. A
//! criterion that depends on an undefined ratio evaluates to `false`.

use super::domain::SpecialScore;
use super::ratios::DerivedScores;
use super::summary::KeyedValues;
use super::tabulate::Tabulation;

/// Values a criterion may read.
pub struct IndexInputs<'a> {
    pub tab: &'a Tabulation,
    pub scores: &'a DerivedScores,
}

impl IndexInputs<'_> {
    fn special(&self, score: SpecialScore) -> usize {
        self.tab.special(score)
    }

    fn content(&self, code: &str) -> usize {
        self.tab.content(code)
    }

    fn determinant(&self, code: &str) -> usize {
        self.tab.determinant(code)
    }
}

pub struct Criterion {
    pub id: &'static str,
    pub test: fn(&IndexInputs<'_>) -> bool,
}

fn below(value: Option<f64>, limit: f64) -> bool {
    value.map(|v| v < limit).unwrap_or(false)
}

fn above(value: Option<f64>, limit: f64) -> bool {
    value.map(|v| v > limit).unwrap_or(false)
}

pub const PTI: [Criterion; 5] = [
    Criterion {
        id: "c1",
        test: |i| below(i.scores.xa, 0.70) && below(i.scores.wda, 0.75),
    },
    Criterion {
        id: "c2",
        test: |i| above(i.scores.x_minus, 0.29),
    },
    Criterion {
        id: "c3",
        test: |i| i.scores.level2 > 2 && i.special(SpecialScore::Fab2) > 0,
    },
    Criterion {
        id: "c4",
        test: |i| {
            (i.tab.r < 17 && i.scores.wsum6 > 12) || (i.tab.r > 16 && i.scores.wsum6 > 17)
        },
    },
    Criterion {
        id: "c5",
        test: |i| i.tab.m_minus > 1 || above(i.scores.x_minus, 0.40),
    },
];

pub const DEPI: [Criterion; 7] = [
    Criterion {
        id: "c1",
        test: |i| i.scores.sum_vista > 0 || i.determinant("FD") > 2,
    },
    Criterion {
        id: "c2",
        test: |i| i.tab.color_shading_blends > 0 || i.tab.s > 2,
    },
    Criterion {
        id: "c3",
        test: |i| {
            (above(i.scores.egocentricity, 0.44) && i.scores.reflections == 0)
                || below(i.scores.egocentricity, 0.33)
        },
    },
    Criterion {
        id: "c4",
        test: |i| below(i.scores.afr, 0.46) || i.tab.blends.len() < 4,
    },
    Criterion {
        id: "c5",
        test: |i| {
            i.scores.sum_shading > i.scores.nonhuman_movement() || i.scores.sum_achromatic > 2
        },
    },
    Criterion {
        id: "c6",
        test: |i| i.special(SpecialScore::Mor) > 2 || i.scores.intellectualization > 3,
    },
    Criterion {
        id: "c7",
        test: |i| i.special(SpecialScore::Cop) < 2 || above(i.scores.isolation, 0.24),
    },
];

pub const CDI: [Criterion; 5] = [
    Criterion {
        id: "c1",
        test: |i| i.scores.ea < 6.0 || i.scores.adj_d < 0,
    },
    Criterion {
        id: "c2",
        test: |i| i.special(SpecialScore::Cop) < 2 && i.special(SpecialScore::Ag) < 2,
    },
    Criterion {
        id: "c3",
        test: |i| i.scores.wsumc < 2.5 || below(i.scores.afr, 0.46),
    },
    Criterion {
        id: "c4",
        test: |i| {
            i.tab.all_movement.passive > i.tab.all_movement.active + 1 || i.scores.pure_h < 2
        },
    },
    Criterion {
        id: "c5",
        test: |i| {
            i.scores.sum_texture > 1 || above(i.scores.isolation, 0.24) || i.content("Fd") > 0
        },
    },
];

pub const SCON: [Criterion; 12] = [
    Criterion {
        id: "c1",
        test: |i| i.scores.sum_vista + i.determinant("FD") > 2,
    },
    Criterion {
        id: "c2",
        test: |i| i.tab.color_shading_blends > 0,
    },
    Criterion {
        id: "c3",
        test: |i| below(i.scores.egocentricity, 0.31) || above(i.scores.egocentricity, 0.44),
    },
    Criterion {
        id: "c4",
        test: |i| i.special(SpecialScore::Mor) > 3,
    },
    Criterion {
        id: "c5",
        test: |i| above(i.scores.zd, 3.5) || below(i.scores.zd, -3.5),
    },
    Criterion {
        id: "c6",
        test: |i| i.scores.es as f64 > i.scores.ea,
    },
    Criterion {
        id: "c7",
        test: |i| i.scores.color_dominant() > i.scores.fc,
    },
    Criterion {
        id: "c8",
        test: |i| below(i.scores.x_plus, 0.70),
    },
    Criterion {
        id: "c9",
        test: |i| i.tab.s > 3,
    },
    Criterion {
        id: "c10",
        test: |i| i.tab.popular < 3 || i.tab.popular > 8,
    },
    Criterion {
        id: "c11",
        test: |i| i.scores.pure_h < 2,
    },
    Criterion {
        id: "c12",
        test: |i| i.tab.r < 17,
    },
];

pub const HVI: [Criterion; 8] = [
    Criterion {
        id: "c1",
        test: |i| i.scores.sum_texture == 0,
    },
    Criterion {
        id: "c2",
        test: |i| i.tab.zf > 12,
    },
    Criterion {
        id: "c3",
        test: |i| above(i.scores.zd, 3.5),
    },
    Criterion {
        id: "c4",
        test: |i| i.tab.s > 3,
    },
    Criterion {
        id: "c5",
        test: |i| i.scores.human_content > 6,
    },
    Criterion {
        id: "c6",
        test: |i| i.scores.parenthesized > 3,
    },
    Criterion {
        id: "c7",
        test: |i| below(i.scores.whole_to_partial(), 4.0),
    },
    Criterion {
        id: "c8",
        test: |i| i.content("Cg") > 3,
    },
];

pub const OBS: [Criterion; 5] = [
    Criterion {
        id: "c1",
        test: |i| i.tab.dd > 3,
    },
    Criterion {
        id: "c2",
        test: |i| i.tab.zf > 12,
    },
    Criterion {
        id: "c3",
        test: |i| above(i.scores.zd, 3.0),
    },
    Criterion {
        id: "c4",
        test: |i| i.tab.popular > 7,
    },
    Criterion {
        id: "c5",
        test: |i| i.tab.fq_all.superior > 1,
    },
];

pub fn evaluate(criteria: &[Criterion], inputs: &IndexInputs<'_>) -> KeyedValues<bool> {
    criteria
        .iter()
        .map(|criterion| (criterion.id, (criterion.test)(inputs)))
        .collect()
}

fn satisfied(results: &KeyedValues<bool>) -> usize {
    results.iter().filter(|(_, met)| **met).count()
}

/// Score, positivity, and the criterion map of one index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOutcome {
    pub score: usize,
    /// `None` for PTI, which reports only its count.
    pub positive: Option<bool>,
    pub criteria: KeyedValues<bool>,
}

impl IndexOutcome {
    fn threshold(criteria: KeyedValues<bool>, minimum: usize) -> Self {
        let score = satisfied(&criteria);
        Self {
            score,
            positive: Some(score >= minimum),
            criteria,
        }
    }

    pub fn render(&self) -> String {
        match self.positive {
            None => self.score.to_string(),
            Some(true) => format!("{}, Positive", self.score),
            Some(false) => format!("{}, Negative", self.score),
        }
    }
}

/// OBS additionally reports which composite rule fired.
#[derive(Debug, Clone, PartialEq)]
pub struct ObsOutcome {
    pub index: IndexOutcome,
    pub rules: KeyedValues<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecialIndexOutcomes {
    pub pti: IndexOutcome,
    pub depi: IndexOutcome,
    pub cdi: IndexOutcome,
    pub scon: IndexOutcome,
    pub hvi: IndexOutcome,
    pub obs: ObsOutcome,
}

pub fn evaluate_all(tab: &Tabulation, scores: &DerivedScores) -> SpecialIndexOutcomes {
    let inputs = IndexInputs { tab, scores };

    let pti_criteria = evaluate(&PTI, &inputs);
    let pti = IndexOutcome {
        score: satisfied(&pti_criteria),
        positive: None,
        criteria: pti_criteria,
    };

    SpecialIndexOutcomes {
        pti,
        depi: IndexOutcome::threshold(evaluate(&DEPI, &inputs), 5),
        cdi: IndexOutcome::threshold(evaluate(&CDI, &inputs), 4),
        scon: IndexOutcome::threshold(evaluate(&SCON, &inputs), 8),
        hvi: hvi_outcome(evaluate(&HVI, &inputs)),
        obs: obs_outcome(evaluate(&OBS, &inputs), &inputs),
    }
}

/// c1 is mandatory; four of the remaining seven complete the index.
fn hvi_outcome(criteria: KeyedValues<bool>) -> IndexOutcome {
    let mandatory = criteria.get("c1").copied().unwrap_or(false);
    let optional = criteria
        .iter()
        .filter(|(id, met)| *id != "c1" && **met)
        .count();
    IndexOutcome {
        score: satisfied(&criteria),
        positive: Some(mandatory && optional >= 4),
        criteria,
    }
}

fn obs_outcome(criteria: KeyedValues<bool>, inputs: &IndexInputs<'_>) -> ObsOutcome {
    let first_four = criteria
        .iter()
        .take(4)
        .filter(|(_, met)| **met)
        .count();
    let all_five = criteria.iter().all(|(_, met)| *met);
    let superior = inputs.tab.fq_all.superior;
    let x_plus_high = above(inputs.scores.x_plus, 0.89);

    let rules: KeyedValues<bool> = [
        ("r1", all_five),
        ("r2", first_four >= 2 && superior > 3),
        ("r3", first_four >= 3 && x_plus_high),
        ("r4", superior > 3 && x_plus_high),
    ]
    .into_iter()
    .collect();
    let positive = rules.iter().any(|(_, fired)| *fired);

    ObsOutcome {
        index: IndexOutcome {
            score: satisfied(&criteria),
            positive: Some(positive),
            criteria,
        },
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{Response, ScoredResponse};
    use crate::scoring::tabulate::{tabulate, MovementCounts};

    fn outcomes(responses: &[Response]) -> SpecialIndexOutcomes {
        let scored: Vec<ScoredResponse> = responses.iter().map(ScoredResponse::parse).collect();
        let tab = tabulate(&scored);
        let scores = DerivedScores::compute(&tab);
        evaluate_all(&tab, &scores)
    }

    /// Inputs under which no PTI, DEPI, CDI or S-CON criterion is met.
    fn quiet() -> (Tabulation, DerivedScores) {
        let mut tab = Tabulation {
            r: 20,
            popular: 5,
            blends: vec!["M.FC".to_string(); 4],
            ..Tabulation::default()
        };
        set_special(&mut tab, SpecialScore::Cop, 2);

        let mut scores = DerivedScores::compute(&tab);
        scores.ea = 6.0;
        scores.wsumc = 2.5;
        scores.pure_h = 2;
        scores.egocentricity = Some(0.38);
        scores.x_plus = Some(0.80);
        (tab, scores)
    }

    fn set_special(tab: &mut Tabulation, score: SpecialScore, count: usize) {
        let idx = SpecialScore::ALL
            .iter()
            .position(|candidate| *candidate == score)
            .expect("listed special score");
        tab.special_scores[idx] = count;
    }

    fn met(criteria: &[Criterion], id: &str, tab: &Tabulation, scores: &DerivedScores) -> bool {
        let results = evaluate(criteria, &IndexInputs { tab, scores });
        *results.get(id).expect("criterion id")
    }

    type Adjust = fn(&mut Tabulation, &mut DerivedScores);

    /// Applies the first `count` adjustments to a quiet protocol.
    fn adjusted(adjustments: &[Adjust], count: usize) -> SpecialIndexOutcomes {
        let (mut tab, mut scores) = quiet();
        for adjust in &adjustments[..count] {
            adjust(&mut tab, &mut scores);
        }
        evaluate_all(&tab, &scores)
    }

    #[test]
    fn quiet_inputs_meet_no_criteria() {
        let results = adjusted(&[], 0);
        assert_eq!(results.pti.score, 0);
        assert_eq!(results.depi.score, 0);
        assert_eq!(results.cdi.score, 0);
        assert_eq!(results.scon.score, 0);
    }

    #[test]
    fn pti_perceptual_accuracy_boundaries() {
        let (tab, mut scores) = quiet();
        scores.xa = Some(0.69);
        scores.wda = Some(0.74);
        assert!(met(&PTI, "c1", &tab, &scores));
        scores.xa = Some(0.70);
        assert!(!met(&PTI, "c1", &tab, &scores));
        scores.xa = Some(0.69);
        scores.wda = Some(0.75);
        assert!(!met(&PTI, "c1", &tab, &scores));

        scores.x_minus = Some(0.29);
        assert!(!met(&PTI, "c2", &tab, &scores));
        scores.x_minus = Some(0.30);
        assert!(met(&PTI, "c2", &tab, &scores));
    }

    #[test]
    fn pti_cognitive_slippage_boundaries() {
        let (mut tab, mut scores) = quiet();
        scores.level2 = 3;
        assert!(!met(&PTI, "c3", &tab, &scores));
        set_special(&mut tab, SpecialScore::Fab2, 1);
        assert!(met(&PTI, "c3", &tab, &scores));
        scores.level2 = 2;
        assert!(!met(&PTI, "c3", &tab, &scores));

        tab.r = 16;
        scores.wsum6 = 12;
        assert!(!met(&PTI, "c4", &tab, &scores));
        scores.wsum6 = 13;
        assert!(met(&PTI, "c4", &tab, &scores));
        tab.r = 17;
        assert!(!met(&PTI, "c4", &tab, &scores));
        scores.wsum6 = 17;
        assert!(!met(&PTI, "c4", &tab, &scores));
        scores.wsum6 = 18;
        assert!(met(&PTI, "c4", &tab, &scores));
    }

    #[test]
    fn pti_distorted_movement_boundaries() {
        let (mut tab, mut scores) = quiet();
        tab.m_minus = 1;
        assert!(!met(&PTI, "c5", &tab, &scores));
        tab.m_minus = 2;
        assert!(met(&PTI, "c5", &tab, &scores));
        tab.m_minus = 1;
        scores.x_minus = Some(0.40);
        assert!(!met(&PTI, "c5", &tab, &scores));
        scores.x_minus = Some(0.41);
        assert!(met(&PTI, "c5", &tab, &scores));
    }

    #[test]
    fn pti_reports_its_count_without_positivity() {
        let (mut tab, mut scores) = quiet();
        scores.x_minus = Some(0.45);
        tab.m_minus = 2;
        let results = evaluate_all(&tab, &scores);
        assert_eq!(results.pti.score, 2);
        assert_eq!(results.pti.positive, None);
        assert_eq!(results.pti.render(), "2");
    }

    const DEPI_ADJUSTMENTS: [Adjust; 7] = [
        |_, s| s.sum_vista = 1,
        |t, _| t.s = 3,
        |_, s| s.egocentricity = Some(0.20),
        |_, s| s.afr = Some(0.40),
        |_, s| s.sum_achromatic = 3,
        |t, _| set_special(t, SpecialScore::Mor, 3),
        |_, s| s.isolation = Some(0.30),
    ];

    #[test]
    fn depi_adjustments_meet_one_criterion_each() {
        for (position, adjust) in DEPI_ADJUSTMENTS.iter().enumerate() {
            let (mut tab, mut scores) = quiet();
            adjust(&mut tab, &mut scores);
            let results = evaluate(&DEPI, &IndexInputs { tab: &tab, scores: &scores });
            let fired: Vec<&str> = results
                .iter()
                .filter(|(_, met)| **met)
                .map(|(id, _)| id)
                .collect();
            assert_eq!(fired, vec![DEPI[position].id]);
        }
    }

    #[test]
    fn depi_turns_positive_at_five() {
        let four = adjusted(&DEPI_ADJUSTMENTS, 4);
        assert_eq!(four.depi.render(), "4, Negative");
        let five = adjusted(&DEPI_ADJUSTMENTS, 5);
        assert_eq!(five.depi.render(), "5, Positive");
        let all = adjusted(&DEPI_ADJUSTMENTS, 7);
        assert_eq!(all.depi.render(), "7, Positive");
    }

    const CDI_ADJUSTMENTS: [Adjust; 5] = [
        |_, s| s.adj_d = -1,
        |t, _| set_special(t, SpecialScore::Cop, 1),
        |_, s| s.wsumc = 2.0,
        |_, s| s.pure_h = 1,
        |_, s| s.sum_texture = 2,
    ];

    #[test]
    fn cdi_turns_positive_at_four() {
        let three = adjusted(&CDI_ADJUSTMENTS, 3);
        assert_eq!(three.cdi.render(), "3, Negative");
        let four = adjusted(&CDI_ADJUSTMENTS, 4);
        assert_eq!(four.cdi.render(), "4, Positive");
    }

    #[test]
    fn cdi_criterion_boundaries() {
        let (mut tab, mut scores) = quiet();
        scores.ea = 5.5;
        assert!(met(&CDI, "c1", &tab, &scores));

        set_special(&mut tab, SpecialScore::Cop, 1);
        set_special(&mut tab, SpecialScore::Ag, 2);
        assert!(!met(&CDI, "c2", &tab, &scores));

        tab.all_movement = MovementCounts { active: 1, passive: 2 };
        assert!(!met(&CDI, "c4", &tab, &scores));
        tab.all_movement.passive = 3;
        assert!(met(&CDI, "c4", &tab, &scores));

        scores.sum_texture = 1;
        assert!(!met(&CDI, "c5", &tab, &scores));
        scores.isolation = Some(0.25);
        assert!(met(&CDI, "c5", &tab, &scores));
    }

    const SCON_ADJUSTMENTS: [Adjust; 8] = [
        |_, s| s.sum_vista = 3,
        |t, _| t.color_shading_blends = 1,
        |_, s| s.egocentricity = Some(0.50),
        |t, _| set_special(t, SpecialScore::Mor, 4),
        |_, s| s.zd = Some(-4.0),
        |_, s| s.es = 7,
        |_, s| s.cf = 1,
        |_, s| s.x_plus = Some(0.60),
    ];

    #[test]
    fn scon_turns_positive_at_eight() {
        let seven = adjusted(&SCON_ADJUSTMENTS, 7);
        assert_eq!(seven.scon.render(), "7, Negative");
        let eight = adjusted(&SCON_ADJUSTMENTS, 8);
        assert_eq!(eight.scon.render(), "8, Positive");
    }

    #[test]
    fn scon_organization_gap_is_strictly_beyond_three_and_a_half() {
        let (tab, mut scores) = quiet();
        for (zd, expected) in [(3.5, false), (3.6, true), (-3.5, false), (-3.6, true), (0.0, false)] {
            scores.zd = Some(zd);
            assert_eq!(met(&SCON, "c5", &tab, &scores), expected, "Zd {zd}");
        }
    }

    #[test]
    fn scon_popular_and_response_count_boundaries() {
        let (mut tab, scores) = quiet();
        for (popular, expected) in [(2, true), (3, false), (8, false), (9, true)] {
            tab.popular = popular;
            assert_eq!(met(&SCON, "c10", &tab, &scores), expected, "P {popular}");
        }
        tab.r = 16;
        assert!(met(&SCON, "c12", &tab, &scores));
        tab.r = 17;
        assert!(!met(&SCON, "c12", &tab, &scores));
    }

    #[test]
    fn hvi_needs_four_optional_criteria_with_texture_absent() {
        let (mut tab, mut scores) = quiet();
        tab.zf = 13;
        tab.s = 4;
        scores.parenthesized = 4;
        let three = evaluate_all(&tab, &scores);
        assert_eq!(three.hvi.positive, Some(false));

        scores.zd = Some(4.0);
        let four = evaluate_all(&tab, &scores);
        assert_eq!(four.hvi.render(), "5, Positive");
    }

    #[test]
    fn criteria_ids_are_sequential() {
        for (table, len) in [
            (&PTI[..], 5),
            (&DEPI[..], 7),
            (&CDI[..], 5),
            (&SCON[..], 12),
            (&HVI[..], 8),
            (&OBS[..], 5),
        ] {
            assert_eq!(table.len(), len);
            for (position, criterion) in table.iter().enumerate() {
                assert_eq!(criterion.id, format!("c{}", position + 1));
            }
        }
    }

    #[test]
    fn render_formats_positivity() {
        let criteria: KeyedValues<bool> = [("c1", true)].into_iter().collect();
        let positive = IndexOutcome::threshold(criteria.clone(), 1);
        assert_eq!(positive.render(), "1, Positive");
        let negative = IndexOutcome::threshold(criteria.clone(), 2);
        assert_eq!(negative.render(), "1, Negative");
        let count_only = IndexOutcome {
            score: 1,
            positive: None,
            criteria,
        };
        assert_eq!(count_only.render(), "1");
    }

    #[test]
    fn undefined_ratios_leave_dependent_criteria_false() {
        // No organized answers and no human or animal content: Zd and H+A:Hd+Ad are undefined.
        let results = outcomes(&[
            Response::new("I", "W").determinants(&["F"]).fq("o"),
            Response::new("V", "W").determinants(&["F"]).fq("o"),
        ]);
        assert_eq!(results.scon.criteria.get("c5"), Some(&false));
        assert_eq!(results.hvi.criteria.get("c7"), Some(&false));
        // DEPI c4 still fires through its blend clause.
        assert_eq!(results.depi.criteria.get("c4"), Some(&true));
    }

    #[test]
    fn hvi_mandatory_texture_criterion_blocks_positivity() {
        let mut protocol = vec![Response::new("VI", "W").determinants(&["FT"]).fq("o").z("ZW")];
        for _ in 0..13 {
            protocol.push(
                Response::new("X", "DS")
                    .determinants(&["F"])
                    .fq("o")
                    .contents(&["(H)", "Cg"])
                    .z("ZS"),
            );
        }
        let results = outcomes(&protocol);
        let optional_met = results
            .hvi
            .criteria
            .iter()
            .filter(|(id, met)| *id != "c1" && **met)
            .count();
        assert!(optional_met >= 4);
        assert_eq!(results.hvi.criteria.get("c1"), Some(&false));
        assert_eq!(results.hvi.positive, Some(false));
    }
}
