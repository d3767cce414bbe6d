use super::domain::{
    Area, Card, DevQuality, Determinant, FormQuality, MovementKind, Polarity, ScoredResponse,
    SpecialScore,
};
use super::tables::{self, CONTENT_CODES, DETERMINANT_CODES};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormQualityCounts {
    pub superior: usize,
    pub ordinary: usize,
    pub unusual: usize,
    pub minus: usize,
    pub none: usize,
}

impl FormQualityCounts {
    fn record(&mut self, fq: FormQuality) {
        match fq {
            FormQuality::Superior => self.superior += 1,
            FormQuality::Ordinary => self.ordinary += 1,
            FormQuality::Unusual => self.unusual += 1,
            FormQuality::Minus => self.minus += 1,
            FormQuality::None => self.none += 1,
        }
    }

    pub fn get(&self, fq: FormQuality) -> usize {
        match fq {
            FormQuality::Superior => self.superior,
            FormQuality::Ordinary => self.ordinary,
            FormQuality::Unusual => self.unusual,
            FormQuality::Minus => self.minus,
            FormQuality::None => self.none,
        }
    }

    pub fn appropriate(&self) -> usize {
        self.superior + self.ordinary + self.unusual
    }

    pub fn conventional(&self) -> usize {
        self.superior + self.ordinary
    }

    pub fn total(&self) -> usize {
        self.appropriate() + self.minus + self.none
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DqCount {
    pub count: usize,
    pub minus: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DqCounts {
    counts: [DqCount; 4],
}

impl DqCounts {
    pub fn get(&self, dq: DevQuality) -> DqCount {
        self.counts[dq as usize]
    }
}

/// Occurrences of one determinant across the protocol.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeterminantCount {
    /// Responses scored with this determinant alone.
    pub single: usize,
    /// Occurrences inside blends.
    pub blend: usize,
    /// Responses where this determinant is listed first.
    pub primary: usize,
}

impl DeterminantCount {
    pub fn total(&self) -> usize {
        self.single + self.blend
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementCounts {
    pub active: usize,
    pub passive: usize,
}

/// Exact counts over the filtered protocol; every ratio is derived from here.
#[derive(Debug, Clone, Default)]
pub struct Tabulation {
    pub r: usize,
    pub w: usize,
    pub d: usize,
    pub dd: usize,
    pub s: usize,
    pub space_minus: usize,
    pub dq: DqCounts,
    pub fq_all: FormQualityCounts,
    pub fq_human_movement: FormQualityCounts,
    pub fq_whole_common: FormQualityCounts,
    pub determinants: [DeterminantCount; DETERMINANT_CODES.len()],
    pub human_movement: MovementCounts,
    pub all_movement: MovementCounts,
    pub blends: Vec<String>,
    pub color_shading_blends: usize,
    pub pure_form: usize,
    pub contents: [usize; CONTENT_CODES.len()],
    pub special_scores: [usize; SpecialScore::ALL.len()],
    pub popular: usize,
    pub pairs: usize,
    pub zf: usize,
    pub zsum: f64,
    pub approach: Vec<(Card, Vec<String>)>,
    pub chromatic_cards: usize,
    pub achromatic_cards: usize,
    pub m_minus: usize,
    pub m_none: usize,
}

impl Tabulation {
    /// Total occurrences of a determinant code such as `"FC"` or `"M"`.
    pub fn determinant(&self, code: &str) -> usize {
        tables::determinant_index(code)
            .map(|idx| self.determinants[idx].total())
            .unwrap_or(0)
    }

    pub fn determinant_detail(&self, code: &str) -> DeterminantCount {
        tables::determinant_index(code)
            .map(|idx| self.determinants[idx])
            .unwrap_or_default()
    }

    pub fn content(&self, code: &str) -> usize {
        tables::content_index(code)
            .map(|idx| self.contents[idx])
            .unwrap_or(0)
    }

    pub fn special(&self, score: SpecialScore) -> usize {
        SpecialScore::ALL
            .iter()
            .position(|candidate| *candidate == score)
            .map(|idx| self.special_scores[idx])
            .unwrap_or(0)
    }

    pub fn determinant_sum(&self, codes: &[&str]) -> usize {
        codes.iter().map(|code| self.determinant(code)).sum()
    }

    pub fn content_sum(&self, codes: &[&str]) -> usize {
        codes.iter().map(|code| self.content(code)).sum()
    }
}

pub fn tabulate(responses: &[ScoredResponse]) -> Tabulation {
    let mut tab = Tabulation {
        r: responses.len(),
        ..Tabulation::default()
    };

    for response in responses {
        tally_location(&mut tab, response);
        tally_quality(&mut tab, response);
        tally_determinants(&mut tab, response);
        tally_contents(&mut tab, response);
        tally_organization(&mut tab, response);
        tally_card(&mut tab, response);

        if response.popular {
            tab.popular += 1;
        }
        if response.pair {
            tab.pairs += 1;
        }
    }

    tab
}

fn tally_location(tab: &mut Tabulation, response: &ScoredResponse) {
    match response.area() {
        Some(Area::Whole) => tab.w += 1,
        Some(Area::Common) => tab.d += 1,
        Some(Area::Unusual) => tab.dd += 1,
        None => {}
    }
    if response.is_space() {
        tab.s += 1;
        if response.fq == FormQuality::Minus {
            tab.space_minus += 1;
        }
    }
}

fn tally_quality(tab: &mut Tabulation, response: &ScoredResponse) {
    if let Some(dq) = response.dq {
        let entry = &mut tab.dq.counts[dq as usize];
        entry.count += 1;
        if response.fq == FormQuality::Minus {
            entry.minus += 1;
        }
    }

    tab.fq_all.record(response.fq);
    if matches!(response.area(), Some(Area::Whole | Area::Common)) {
        tab.fq_whole_common.record(response.fq);
    }
    if response.has_determinant(Determinant::is_human_movement) {
        tab.fq_human_movement.record(response.fq);
        match response.fq {
            FormQuality::Minus => tab.m_minus += 1,
            FormQuality::None => tab.m_none += 1,
            _ => {}
        }
    }
}

fn tally_determinants(tab: &mut Tabulation, response: &ScoredResponse) {
    let blend = response.is_blend();

    for (position, determinant) in response.determinants.iter().enumerate() {
        if let Some(idx) = tables::determinant_index(determinant.code()) {
            let entry = &mut tab.determinants[idx];
            if blend {
                entry.blend += 1;
            } else {
                entry.single += 1;
            }
            if position == 0 {
                entry.primary += 1;
            }
        }

        if let Determinant::Movement { kind, polarity } = *determinant {
            tally_movement(&mut tab.all_movement, polarity);
            if kind == MovementKind::Human {
                tally_movement(&mut tab.human_movement, polarity);
            }
        }
    }

    if blend {
        let notation: Vec<String> = response
            .determinants
            .iter()
            .map(|determinant| determinant.notation())
            .collect();
        tab.blends.push(notation.join("."));

        if response.has_determinant(Determinant::is_chromatic)
            && response.has_determinant(Determinant::is_shading)
        {
            tab.color_shading_blends += 1;
        }
    }

    if response.is_pure_form() {
        tab.pure_form += 1;
    }
}

fn tally_movement(counts: &mut MovementCounts, polarity: Polarity) {
    if polarity.is_active() {
        counts.active += 1;
    }
    if polarity.is_passive() {
        counts.passive += 1;
    }
}

fn tally_contents(tab: &mut Tabulation, response: &ScoredResponse) {
    for code in &response.contents {
        if let Some(idx) = tables::content_index(code) {
            tab.contents[idx] += 1;
        }
    }
    for score in &response.special_scores {
        if let Some(idx) = SpecialScore::ALL.iter().position(|candidate| candidate == score) {
            tab.special_scores[idx] += 1;
        }
    }
}

fn tally_organization(tab: &mut Tabulation, response: &ScoredResponse) {
    if let Some(z) = response.z {
        tab.zf += 1;
        if let Some(card) = response.card {
            tab.zsum += tables::z_value(card, z);
        }
    }
}

fn tally_card(tab: &mut Tabulation, response: &ScoredResponse) {
    let Some(card) = response.card else {
        return;
    };

    if card.is_chromatic() {
        tab.chromatic_cards += 1;
    } else {
        tab.achromatic_cards += 1;
    }

    match tab.approach.iter_mut().find(|(seen, _)| *seen == card) {
        Some((_, locations)) => locations.push(response.location_code.clone()),
        None => tab
            .approach
            .push((card, vec![response.location_code.clone()])),
    }
}
