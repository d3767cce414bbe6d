use super::domain::{Card, DevQuality, FormQuality, Response, ScoredResponse, SpecialScore};
use super::format;
use super::human::{self, HumanRepresentation};
use super::indices::{self, SpecialIndexOutcomes};
use super::ratios::DerivedScores;
use super::summary::{
    AffectCluster, DeterminantEntry, DqEntry, FormQualityRow, IdeationCluster,
    InterpersonalCluster, KeyedValues, LowerSection, MediationCluster, ProcessingCluster,
    RowCalculation, SelfPerceptionCluster, SpecialIndices, StructuralSummary, UpperSection,
};
use super::tables::{self, CONTENT_CODES, DETERMINANT_CODES};
use super::tabulate::{tabulate, Tabulation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    #[error("at least one response with a card is required to compute a structural summary")]
    NoValidResponses,
}

impl CalculationError {
    pub const fn field(&self) -> &'static str {
        match self {
            CalculationError::NoValidResponses => "responses",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl From<CalculationError> for ValidationError {
    fn from(value: CalculationError) -> Self {
        Self {
            field: value.field().to_string(),
            message: value.to_string(),
        }
    }
}

/// Success/error envelope returned by [`calculate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<StructuralSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl CalculationResult {
    fn succeeded(summary: StructuralSummary) -> Self {
        Self {
            success: true,
            data: Some(summary),
            errors: Vec::new(),
        }
    }

    fn failed(error: CalculationError) -> Self {
        Self {
            success: false,
            data: None,
            errors: vec![error.into()],
        }
    }

    pub fn into_result(self) -> Result<StructuralSummary, Vec<ValidationError>> {
        match self.data {
            Some(summary) if self.success => Ok(summary),
            _ => Err(self.errors),
        }
    }
}

/// Computes the structural summary for one protocol.
///
/// Responses without a card are dropped first; if none remain the result is
/// a failure envelope and no other stage runs.
pub fn calculate(responses: &[Response]) -> CalculationResult {
    let scored: Vec<ScoredResponse> = responses
        .iter()
        .filter(|response| response.has_card())
        .map(ScoredResponse::parse)
        .collect();

    debug!(
        received = responses.len(),
        valid = scored.len(),
        "calculating structural summary"
    );

    if scored.is_empty() {
        warn!(
            received = responses.len(),
            "no responses with a card; structural summary skipped"
        );
        return CalculationResult::failed(CalculationError::NoValidResponses);
    }

    CalculationResult::succeeded(summarize(&scored))
}

fn summarize(responses: &[ScoredResponse]) -> StructuralSummary {
    let tab = tabulate(responses);
    let scores = DerivedScores::compute(&tab);
    let rows = row_calculations(responses);
    let ghr = count_representation(&rows, HumanRepresentation::Good);
    let phr = count_representation(&rows, HumanRepresentation::Poor);
    let outcomes = indices::evaluate_all(&tab, &scores);

    debug!(
        r = tab.r,
        zf = tab.zf,
        pti = outcomes.pti.score,
        depi = outcomes.depi.score,
        cdi = outcomes.cdi.score,
        scon = outcomes.scon.score,
        "structural summary assembled"
    );

    StructuralSummary {
        upper_section: upper_section(&tab, &scores, ghr, phr),
        lower_section: lower_section(&tab, &scores, ghr, phr),
        special_indices: special_indices(outcomes, ghr, phr),
        row_calculations: rows,
    }
}

fn count_representation(rows: &[RowCalculation], outcome: HumanRepresentation) -> usize {
    rows.iter()
        .filter(|row| row.human_representation == Some(outcome))
        .count()
}

fn row_calculations(responses: &[ScoredResponse]) -> Vec<RowCalculation> {
    responses
        .iter()
        .enumerate()
        .map(|(idx, response)| {
            let classification = human::classify(response);
            let z_value = match (response.card, response.z) {
                (Some(card), Some(z)) => Some(tables::z_value(card, z)),
                _ => None,
            };
            let blend = response.is_blend().then(|| {
                response
                    .determinants
                    .iter()
                    .map(|determinant| determinant.notation())
                    .collect::<Vec<_>>()
                    .join(".")
            });

            RowCalculation {
                response: idx + 1,
                card: response.card_label.clone(),
                location: response.location_code.clone(),
                z_value,
                blend,
                wsum6: response
                    .special_scores
                    .iter()
                    .map(|score| tables::wsum6_weight(*score))
                    .sum(),
                human_representation: classification.map(|c| c.outcome),
                human_rule: classification.map(|c| c.rule),
            }
        })
        .collect()
}

fn upper_section(tab: &Tabulation, scores: &DerivedScores, ghr: usize, phr: usize) -> UpperSection {
    let dq = DevQuality::ordered()
        .into_iter()
        .map(|level| {
            let entry = tab.dq.get(level);
            (
                level.code(),
                DqEntry {
                    count: entry.count,
                    fq_minus: entry.minus,
                },
            )
        })
        .collect();

    let form_quality = FormQuality::ordered()
        .into_iter()
        .map(|fq| {
            (
                fq.code(),
                FormQualityRow {
                    fqx: tab.fq_all.get(fq),
                    mqual: tab.fq_human_movement.get(fq),
                    whole_common: tab.fq_whole_common.get(fq),
                },
            )
        })
        .collect();

    let determinants = DETERMINANT_CODES
        .iter()
        .map(|code| {
            let detail = tab.determinant_detail(code);
            (
                *code,
                DeterminantEntry {
                    single: detail.single,
                    blend: detail.blend,
                    primary: detail.primary,
                },
            )
        })
        .collect();

    let contents = CONTENT_CODES
        .iter()
        .map(|code| (*code, tab.content(code)))
        .collect();

    let approach = Card::ordered()
        .into_iter()
        .filter_map(|card| {
            tab.approach
                .iter()
                .find(|(seen, _)| *seen == card)
                .map(|(_, locations)| (card.label(), locations.join(".")))
        })
        .collect();

    let special_scores: KeyedValues<usize> = SpecialScore::ALL
        .into_iter()
        .map(|score| (score.code(), tab.special(score)))
        .collect();

    UpperSection {
        zf: tab.zf,
        zsum: format::tenths(tab.zsum),
        zest: scores
            .zest
            .map(format::tenths)
            .unwrap_or_else(|| format::UNDEFINED.to_string()),
        zd: format::signed_tenths(scores.zd),
        w: tab.w,
        d: tab.d,
        dd: tab.dd,
        s: tab.s,
        dq,
        form_quality,
        determinants,
        blends: tab.blends.clone(),
        contents,
        approach,
        special_scores,
        popular: tab.popular,
        pairs: tab.pairs,
        sum6: scores.sum6,
        wsum6: scores.wsum6,
        ghr,
        phr,
    }
}

fn lower_section(tab: &Tabulation, scores: &DerivedScores, ghr: usize, phr: usize) -> LowerSection {
    let mor = tab.special(SpecialScore::Mor);
    let active_to_passive = format::counts(tab.all_movement.active, tab.all_movement.passive);

    LowerSection {
        r: tab.r,
        lambda: format::decimal(scores.lambda),
        eb_balance: format::count_to_weighted(scores.m, scores.wsumc),
        ea: format::tenths(scores.ea),
        ebper: format::decimal(scores.ebper),
        eb_style: scores.style.label().to_string(),
        eb: format::counts(scores.nonhuman_movement(), scores.sum_shading),
        es: scores.es,
        d: scores.d,
        adj_es: scores.adj_es,
        adj_d: scores.adj_d,
        fm: scores.fm,
        inanimate: scores.inanimate,
        sum_achromatic: scores.sum_achromatic,
        sum_texture: scores.sum_texture,
        sum_vista: scores.sum_vista,
        sum_diffuse: scores.sum_diffuse,
        affect: AffectCluster {
            fc_to_cf_c: format::counts(scores.fc, scores.color_dominant()),
            pure_c: scores.pure_color(),
            achromatic_to_chromatic: format::count_to_weighted(
                scores.sum_achromatic,
                scores.wsumc,
            ),
            afr: format::decimal(scores.afr),
            s: tab.s,
            blends_to_r: format::counts(tab.blends.len(), tab.r),
            cp: tab.special(SpecialScore::Cp),
            color_shading_blends: tab.color_shading_blends,
        },
        interpersonal: InterpersonalCluster {
            cop: tab.special(SpecialScore::Cop),
            ag: tab.special(SpecialScore::Ag),
            ghr_to_phr: format::counts(ghr, phr),
            active_to_passive: active_to_passive.clone(),
            food: tab.content("Fd"),
            sum_texture: scores.sum_texture,
            human_content: scores.human_content,
            pure_h: scores.pure_h,
            per: tab.special(SpecialScore::Per),
            isolation_index: format::decimal(scores.isolation),
        },
        ideation: IdeationCluster {
            active_to_passive,
            human_active_to_passive: format::counts(
                tab.human_movement.active,
                tab.human_movement.passive,
            ),
            intellectualization: scores.intellectualization,
            mor,
            sum6: scores.sum6,
            level2: scores.level2,
            wsum6: scores.wsum6,
            m_minus: tab.m_minus,
            m_none: tab.m_none,
        },
        mediation: MediationCluster {
            xa: format::decimal(scores.xa),
            wda: format::decimal(scores.wda),
            x_minus: format::decimal(scores.x_minus),
            space_minus: tab.space_minus,
            popular: tab.popular,
            x_plus: format::decimal(scores.x_plus),
            xu: format::decimal(scores.xu),
        },
        processing: ProcessingCluster {
            zf: tab.zf,
            w_d_dd: format::series(&[tab.w, tab.d, tab.dd]),
            w_to_m: format::counts(tab.w, scores.m),
            zd: format::signed_tenths(scores.zd),
            psv: tab.special(SpecialScore::Psv),
            dq_plus: tab.dq.get(DevQuality::Synthesized).count,
            dq_v: tab.dq.get(DevQuality::Vague).count,
        },
        self_perception: SelfPerceptionCluster {
            egocentricity: format::decimal(scores.egocentricity),
            reflections: scores.reflections,
            sum_vista: scores.sum_vista,
            fd: tab.determinant("FD"),
            an_xy: tab.content_sum(&["An", "Xy"]),
            mor,
            pure_to_other_human: format::counts(
                scores.pure_h,
                scores.human_content - scores.pure_h,
            ),
        },
    }
}

fn special_indices(outcomes: SpecialIndexOutcomes, ghr: usize, phr: usize) -> SpecialIndices {
    SpecialIndices {
        pti: outcomes.pti.render(),
        depi: outcomes.depi.render(),
        cdi: outcomes.cdi.render(),
        scon: outcomes.scon.render(),
        hvi: outcomes.hvi.render(),
        obs: outcomes.obs.index.render(),
        pti_criteria: outcomes.pti.criteria,
        depi_criteria: outcomes.depi.criteria,
        cdi_criteria: outcomes.cdi.criteria,
        scon_criteria: outcomes.scon.criteria,
        hvi_criteria: outcomes.hvi.criteria,
        obs_criteria: outcomes.obs.index.criteria,
        obs_rules: outcomes.obs.rules,
        ghr,
        phr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_fails_with_responses_field() {
        let result = calculate(&[]);
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "responses");
    }

    #[test]
    fn responses_without_cards_are_filtered_out() {
        let result = calculate(&[Response::new("  ", "W"), Response::default()]);
        assert!(!result.success);

        let result = calculate(&[Response::new("", "W"), Response::new("I", "W").fq("o")]);
        let summary = result.into_result().expect("one valid response");
        assert_eq!(summary.lower_section.r, 1);
        assert_eq!(summary.row_calculations.len(), 1);
        assert_eq!(summary.row_calculations[0].card, "I");
    }

    #[test]
    fn failure_envelope_omits_data_when_serialised() {
        let json = serde_json::to_value(calculate(&[])).expect("serialises");
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["errors"][0]["field"], "responses");
    }

    #[test]
    fn ghr_and_phr_totals_appear_in_both_sections() {
        let summary = calculate(&[
            Response::new("III", "D")
                .determinants(&["Ma"])
                .fq("o")
                .contents(&["H"])
                .popular(),
            Response::new("VI", "D").fq("-").contents(&["Hd"]),
        ])
        .into_result()
        .expect("valid protocol");

        assert_eq!(summary.upper_section.ghr, 1);
        assert_eq!(summary.upper_section.phr, 1);
        assert_eq!(summary.special_indices.ghr, 1);
        assert_eq!(summary.special_indices.phr, 1);
        assert_eq!(summary.lower_section.interpersonal.ghr_to_phr, "1:1");
        assert_eq!(
            summary.row_calculations[1].human_representation,
            Some(HumanRepresentation::Poor)
        );
    }
}
