use super::human::HumanRepresentation;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered key/value pairs serialised as a JSON object in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedValues<V>(Vec<(&'static str, V)>);

impl<V> KeyedValues<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &V)> {
        self.0.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(&'static str, V)> for KeyedValues<V> {
    fn from_iter<I: IntoIterator<Item = (&'static str, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for KeyedValues<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralSummary {
    pub upper_section: UpperSection,
    pub lower_section: LowerSection,
    pub special_indices: SpecialIndices,
    pub row_calculations: Vec<RowCalculation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DqEntry {
    pub count: usize,
    #[serde(rename = "FQ-")]
    pub fq_minus: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormQualityRow {
    #[serde(rename = "FQx")]
    pub fqx: usize,
    #[serde(rename = "MQual")]
    pub mqual: usize,
    #[serde(rename = "W+D")]
    pub whole_common: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeterminantEntry {
    pub single: usize,
    pub blend: usize,
    pub primary: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpperSection {
    #[serde(rename = "Zf")]
    pub zf: usize,
    #[serde(rename = "ZSum")]
    pub zsum: String,
    #[serde(rename = "ZEst")]
    pub zest: String,
    #[serde(rename = "Zd")]
    pub zd: String,
    #[serde(rename = "W")]
    pub w: usize,
    #[serde(rename = "D")]
    pub d: usize,
    #[serde(rename = "Dd")]
    pub dd: usize,
    #[serde(rename = "S")]
    pub s: usize,
    #[serde(rename = "DQ")]
    pub dq: KeyedValues<DqEntry>,
    pub form_quality: KeyedValues<FormQualityRow>,
    pub determinants: KeyedValues<DeterminantEntry>,
    pub blends: Vec<String>,
    pub contents: KeyedValues<usize>,
    pub approach: KeyedValues<String>,
    pub special_scores: KeyedValues<usize>,
    #[serde(rename = "P")]
    pub popular: usize,
    #[serde(rename = "(2)")]
    pub pairs: usize,
    #[serde(rename = "Sum6")]
    pub sum6: usize,
    #[serde(rename = "WSum6")]
    pub wsum6: u32,
    #[serde(rename = "GHR")]
    pub ghr: usize,
    #[serde(rename = "PHR")]
    pub phr: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowerSection {
    #[serde(rename = "R")]
    pub r: usize,
    #[serde(rename = "Lambda")]
    pub lambda: String,
    #[serde(rename = "EB")]
    pub eb_balance: String,
    #[serde(rename = "EA")]
    pub ea: String,
    #[serde(rename = "EBPer")]
    pub ebper: String,
    #[serde(rename = "EB_style")]
    pub eb_style: String,
    #[serde(rename = "eb")]
    pub eb: String,
    #[serde(rename = "es")]
    pub es: usize,
    #[serde(rename = "D")]
    pub d: i32,
    #[serde(rename = "AdjEs")]
    pub adj_es: usize,
    #[serde(rename = "AdjD")]
    pub adj_d: i32,
    #[serde(rename = "FM")]
    pub fm: usize,
    #[serde(rename = "m")]
    pub inanimate: usize,
    #[serde(rename = "SumC'")]
    pub sum_achromatic: usize,
    #[serde(rename = "SumT")]
    pub sum_texture: usize,
    #[serde(rename = "SumV")]
    pub sum_vista: usize,
    #[serde(rename = "SumY")]
    pub sum_diffuse: usize,
    pub affect: AffectCluster,
    pub interpersonal: InterpersonalCluster,
    pub ideation: IdeationCluster,
    pub mediation: MediationCluster,
    pub processing: ProcessingCluster,
    pub self_perception: SelfPerceptionCluster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectCluster {
    #[serde(rename = "FC:CF+C")]
    pub fc_to_cf_c: String,
    #[serde(rename = "PureC")]
    pub pure_c: usize,
    #[serde(rename = "SumC':WSumC")]
    pub achromatic_to_chromatic: String,
    #[serde(rename = "Afr")]
    pub afr: String,
    #[serde(rename = "S")]
    pub s: usize,
    #[serde(rename = "Blends:R")]
    pub blends_to_r: String,
    #[serde(rename = "CP")]
    pub cp: usize,
    #[serde(rename = "ColShdBlends")]
    pub color_shading_blends: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpersonalCluster {
    #[serde(rename = "COP")]
    pub cop: usize,
    #[serde(rename = "AG")]
    pub ag: usize,
    #[serde(rename = "GHR:PHR")]
    pub ghr_to_phr: String,
    #[serde(rename = "a:p")]
    pub active_to_passive: String,
    #[serde(rename = "Food")]
    pub food: usize,
    #[serde(rename = "SumT")]
    pub sum_texture: usize,
    #[serde(rename = "HumanCont")]
    pub human_content: usize,
    #[serde(rename = "PureH")]
    pub pure_h: usize,
    #[serde(rename = "PER")]
    pub per: usize,
    #[serde(rename = "IsolationIndex")]
    pub isolation_index: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeationCluster {
    #[serde(rename = "a:p")]
    pub active_to_passive: String,
    #[serde(rename = "Ma:Mp")]
    pub human_active_to_passive: String,
    #[serde(rename = "2AB+(Art+Ay)")]
    pub intellectualization: usize,
    #[serde(rename = "MOR")]
    pub mor: usize,
    #[serde(rename = "Sum6")]
    pub sum6: usize,
    #[serde(rename = "Lvl2")]
    pub level2: usize,
    #[serde(rename = "WSum6")]
    pub wsum6: u32,
    #[serde(rename = "M-")]
    pub m_minus: usize,
    #[serde(rename = "Mnone")]
    pub m_none: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediationCluster {
    #[serde(rename = "XA%")]
    pub xa: String,
    #[serde(rename = "WDA%")]
    pub wda: String,
    #[serde(rename = "X-%")]
    pub x_minus: String,
    #[serde(rename = "S-")]
    pub space_minus: usize,
    #[serde(rename = "P")]
    pub popular: usize,
    #[serde(rename = "X+%")]
    pub x_plus: String,
    #[serde(rename = "Xu%")]
    pub xu: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingCluster {
    #[serde(rename = "Zf")]
    pub zf: usize,
    #[serde(rename = "W:D:Dd")]
    pub w_d_dd: String,
    #[serde(rename = "W:M")]
    pub w_to_m: String,
    #[serde(rename = "Zd")]
    pub zd: String,
    #[serde(rename = "PSV")]
    pub psv: usize,
    #[serde(rename = "DQ+")]
    pub dq_plus: usize,
    #[serde(rename = "DQv")]
    pub dq_v: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfPerceptionCluster {
    #[serde(rename = "3r+(2)/R")]
    pub egocentricity: String,
    #[serde(rename = "Fr+rF")]
    pub reflections: usize,
    #[serde(rename = "SumV")]
    pub sum_vista: usize,
    #[serde(rename = "FD")]
    pub fd: usize,
    #[serde(rename = "An+Xy")]
    pub an_xy: usize,
    #[serde(rename = "MOR")]
    pub mor: usize,
    #[serde(rename = "H:(H)+Hd+(Hd)")]
    pub pure_to_other_human: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialIndices {
    #[serde(rename = "PTI")]
    pub pti: String,
    #[serde(rename = "DEPI")]
    pub depi: String,
    #[serde(rename = "CDI")]
    pub cdi: String,
    #[serde(rename = "S-CON")]
    pub scon: String,
    #[serde(rename = "HVI")]
    pub hvi: String,
    #[serde(rename = "OBS")]
    pub obs: String,
    #[serde(rename = "PTI_criteria")]
    pub pti_criteria: KeyedValues<bool>,
    #[serde(rename = "DEPI_criteria")]
    pub depi_criteria: KeyedValues<bool>,
    #[serde(rename = "CDI_criteria")]
    pub cdi_criteria: KeyedValues<bool>,
    #[serde(rename = "SCON_criteria")]
    pub scon_criteria: KeyedValues<bool>,
    #[serde(rename = "HVI_criteria")]
    pub hvi_criteria: KeyedValues<bool>,
    #[serde(rename = "OBS_criteria")]
    pub obs_criteria: KeyedValues<bool>,
    #[serde(rename = "OBS_rules")]
    pub obs_rules: KeyedValues<bool>,
    #[serde(rename = "GHR")]
    pub ghr: usize,
    #[serde(rename = "PHR")]
    pub phr: usize,
}

/// Per-response values behind the totals, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowCalculation {
    pub response: usize,
    pub card: String,
    pub location: String,
    pub z_value: Option<f64>,
    pub blend: Option<String>,
    pub wsum6: u32,
    pub human_representation: Option<HumanRepresentation>,
    pub human_rule: Option<u8>,
}
