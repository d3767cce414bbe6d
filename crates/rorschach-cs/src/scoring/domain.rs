use serde::{Deserialize, Serialize};

/// One scored answer as delivered by the intake validator.
///
/// Codes stay as text so the record round-trips through JSON and CSV exactly
/// as the caller supplied it; [`ScoredResponse::parse`] turns them into typed
/// codes once per calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub card: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub dq: String,
    #[serde(default)]
    pub determinants: Vec<String>,
    #[serde(default)]
    pub fq: String,
    #[serde(default)]
    pub pair: String,
    #[serde(default)]
    pub contents: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub z: String,
    #[serde(default)]
    pub special_scores: Vec<String>,
}

impl Response {
    pub fn new(card: &str, location: &str) -> Self {
        Self {
            card: card.to_string(),
            location: location.to_string(),
            ..Self::default()
        }
    }

    pub fn dq(mut self, dq: &str) -> Self {
        self.dq = dq.to_string();
        self
    }

    pub fn determinants(mut self, codes: &[&str]) -> Self {
        self.determinants = codes.iter().map(|code| code.to_string()).collect();
        self
    }

    pub fn fq(mut self, fq: &str) -> Self {
        self.fq = fq.to_string();
        self
    }

    pub fn pair(mut self) -> Self {
        self.pair = "(2)".to_string();
        self
    }

    pub fn contents(mut self, codes: &[&str]) -> Self {
        self.contents = codes.iter().map(|code| code.to_string()).collect();
        self
    }

    pub fn popular(mut self) -> Self {
        self.popular = true;
        self
    }

    pub fn z(mut self, z: &str) -> Self {
        self.z = z.to_string();
        self
    }

    pub fn special_scores(mut self, codes: &[&str]) -> Self {
        self.special_scores = codes.iter().map(|code| code.to_string()).collect();
        self
    }

    /// Responses without a card are placeholders from the entry form.
    pub fn has_card(&self) -> bool {
        !self.card.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Card {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    IX,
    X,
}

impl Card {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::I,
            Self::II,
            Self::III,
            Self::IV,
            Self::V,
            Self::VI,
            Self::VII,
            Self::VIII,
            Self::IX,
            Self::X,
        ]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let card = match raw.trim().to_ascii_uppercase().as_str() {
            "I" | "1" => Self::I,
            "II" | "2" => Self::II,
            "III" | "3" => Self::III,
            "IV" | "4" => Self::IV,
            "V" | "5" => Self::V,
            "VI" | "6" => Self::VI,
            "VII" | "7" => Self::VII,
            "VIII" | "8" => Self::VIII,
            "IX" | "9" => Self::IX,
            "X" | "10" => Self::X,
            _ => return None,
        };
        Some(card)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
            Self::VI => "VI",
            Self::VII => "VII",
            Self::VIII => "VIII",
            Self::IX => "IX",
            Self::X => "X",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Cards VIII through X are the fully chromatic plates used by Afr.
    pub const fn is_chromatic(self) -> bool {
        matches!(self, Self::VIII | Self::IX | Self::X)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Whole,
    Common,
    Unusual,
}

impl Area {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Whole => "W",
            Self::Common => "D",
            Self::Unusual => "Dd",
        }
    }
}

/// Location area plus the white-space modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub area: Area,
    pub space: bool,
}

impl Location {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (base, space) = match trimmed.strip_suffix(['S', 's']) {
            Some(base) => (base, true),
            None => (trimmed, false),
        };
        let area = match base {
            "W" | "w" => Area::Whole,
            "D" | "d" => Area::Common,
            "Dd" | "DD" | "dd" => Area::Unusual,
            _ => return None,
        };
        Some(Self { area, space })
    }

    pub fn code(self) -> String {
        if self.space {
            format!("{}S", self.area.code())
        } else {
            self.area.code().to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevQuality {
    Synthesized,
    Ordinary,
    VagueSynthesized,
    Vague,
}

impl DevQuality {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Synthesized,
            Self::Ordinary,
            Self::VagueSynthesized,
            Self::Vague,
        ]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "+" => Some(Self::Synthesized),
            "o" | "O" => Some(Self::Ordinary),
            "v/+" | "V/+" => Some(Self::VagueSynthesized),
            "v" | "V" => Some(Self::Vague),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Synthesized => "+",
            Self::Ordinary => "o",
            Self::VagueSynthesized => "v/+",
            Self::Vague => "v",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormQuality {
    Superior,
    Ordinary,
    Unusual,
    Minus,
    None,
}

impl FormQuality {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Superior,
            Self::Ordinary,
            Self::Unusual,
            Self::Minus,
            Self::None,
        ]
    }

    /// Anything other than the four graded levels is treated as formless.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "+" => Self::Superior,
            "o" | "O" => Self::Ordinary,
            "u" | "U" => Self::Unusual,
            "-" => Self::Minus,
            _ => Self::None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Superior => "+",
            Self::Ordinary => "o",
            Self::Unusual => "u",
            Self::Minus => "-",
            Self::None => "none",
        }
    }

    /// `+`, `o` and `u` are the levels that count as adequate form.
    pub const fn is_appropriate(self) -> bool {
        matches!(self, Self::Superior | Self::Ordinary | Self::Unusual)
    }

    pub const fn is_conventional(self) -> bool {
        matches!(self, Self::Superior | Self::Ordinary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Human,
    Animal,
    Inanimate,
}

impl MovementKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Human => "M",
            Self::Animal => "FM",
            Self::Inanimate => "m",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Active,
    Passive,
    ActivePassive,
    Unspecified,
}

impl Polarity {
    fn parse(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Self::Unspecified),
            "a" => Some(Self::Active),
            "p" => Some(Self::Passive),
            "a-p" | "ap" | "a/p" => Some(Self::ActivePassive),
            _ => None,
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::ActivePassive)
    }

    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Passive | Self::ActivePassive)
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::Active => "a",
            Self::Passive => "p",
            Self::ActivePassive => "a-p",
            Self::Unspecified => "",
        }
    }
}

/// Determinant codes of the Comprehensive System.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Determinant {
    Movement {
        kind: MovementKind,
        polarity: Polarity,
    },
    FormColor,
    ColorForm,
    PureColor,
    ColorNaming,
    FormAchromatic,
    AchromaticForm,
    PureAchromatic,
    FormTexture,
    TextureForm,
    PureTexture,
    FormVista,
    VistaForm,
    PureVista,
    FormDiffuse,
    DiffuseForm,
    PureDiffuse,
    FormReflection,
    ReflectionForm,
    FormDimension,
    PureForm,
}

impl Determinant {
    /// Codes are case-sensitive: `m`/`M` and `Fr`/`rF` are distinct scores.
    pub fn parse(raw: &str) -> Option<Self> {
        let code: String = raw
            .trim()
            .chars()
            .filter(|ch| *ch != '^')
            .map(|ch| if ch == '\u{2019}' { '\'' } else { ch })
            .collect();

        if let Some(suffix) = code.strip_prefix("FM") {
            return Polarity::parse(suffix).map(|polarity| Self::Movement {
                kind: MovementKind::Animal,
                polarity,
            });
        }
        if let Some(suffix) = code.strip_prefix('M') {
            return Polarity::parse(suffix).map(|polarity| Self::Movement {
                kind: MovementKind::Human,
                polarity,
            });
        }
        if let Some(suffix) = code.strip_prefix('m') {
            return Polarity::parse(suffix).map(|polarity| Self::Movement {
                kind: MovementKind::Inanimate,
                polarity,
            });
        }

        let determinant = match code.as_str() {
            "FC" => Self::FormColor,
            "CF" => Self::ColorForm,
            "C" => Self::PureColor,
            "Cn" => Self::ColorNaming,
            "FC'" => Self::FormAchromatic,
            "C'F" => Self::AchromaticForm,
            "C'" => Self::PureAchromatic,
            "FT" => Self::FormTexture,
            "TF" => Self::TextureForm,
            "T" => Self::PureTexture,
            "FV" => Self::FormVista,
            "VF" => Self::VistaForm,
            "V" => Self::PureVista,
            "FY" => Self::FormDiffuse,
            "YF" => Self::DiffuseForm,
            "Y" => Self::PureDiffuse,
            "Fr" => Self::FormReflection,
            "rF" => Self::ReflectionForm,
            "FD" => Self::FormDimension,
            "F" => Self::PureForm,
            _ => return None,
        };
        Some(determinant)
    }

    /// Tabulation key; movement polarity is dropped.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Movement { kind, .. } => kind.code(),
            Self::FormColor => "FC",
            Self::ColorForm => "CF",
            Self::PureColor => "C",
            Self::ColorNaming => "Cn",
            Self::FormAchromatic => "FC'",
            Self::AchromaticForm => "C'F",
            Self::PureAchromatic => "C'",
            Self::FormTexture => "FT",
            Self::TextureForm => "TF",
            Self::PureTexture => "T",
            Self::FormVista => "FV",
            Self::VistaForm => "VF",
            Self::PureVista => "V",
            Self::FormDiffuse => "FY",
            Self::DiffuseForm => "YF",
            Self::PureDiffuse => "Y",
            Self::FormReflection => "Fr",
            Self::ReflectionForm => "rF",
            Self::FormDimension => "FD",
            Self::PureForm => "F",
        }
    }

    /// Display form used in blend listings, keeping movement polarity.
    pub fn notation(self) -> String {
        match self {
            Self::Movement { kind, polarity } => format!("{}{}", kind.code(), polarity.suffix()),
            other => other.code().to_string(),
        }
    }

    pub const fn is_chromatic(self) -> bool {
        matches!(
            self,
            Self::FormColor | Self::ColorForm | Self::PureColor | Self::ColorNaming
        )
    }

    /// Achromatic color, texture, vista and diffuse shading.
    pub const fn is_shading(self) -> bool {
        matches!(
            self,
            Self::FormAchromatic
                | Self::AchromaticForm
                | Self::PureAchromatic
                | Self::FormTexture
                | Self::TextureForm
                | Self::PureTexture
                | Self::FormVista
                | Self::VistaForm
                | Self::PureVista
                | Self::FormDiffuse
                | Self::DiffuseForm
                | Self::PureDiffuse
        )
    }

    pub const fn is_human_movement(self) -> bool {
        matches!(
            self,
            Self::Movement {
                kind: MovementKind::Human,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZType {
    Whole,
    Adjacent,
    Distant,
    Space,
}

impl ZType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ZW" | "W" => Some(Self::Whole),
            "ZA" | "A" => Some(Self::Adjacent),
            "ZD" | "D" => Some(Self::Distant),
            "ZS" | "S" => Some(Self::Space),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialScore {
    Dv,
    Dv2,
    Inc,
    Inc2,
    Dr,
    Dr2,
    Fab,
    Fab2,
    Alog,
    Con,
    Ab,
    Ag,
    Cop,
    Cp,
    Mor,
    Per,
    Psv,
}

impl SpecialScore {
    pub const ALL: [Self; 17] = [
        Self::Dv,
        Self::Dv2,
        Self::Inc,
        Self::Inc2,
        Self::Dr,
        Self::Dr2,
        Self::Fab,
        Self::Fab2,
        Self::Alog,
        Self::Con,
        Self::Ab,
        Self::Ag,
        Self::Cop,
        Self::Cp,
        Self::Mor,
        Self::Per,
        Self::Psv,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|score| score.code().eq_ignore_ascii_case(&upper))
            .or(match upper.as_str() {
                "CONTAM" => Some(Self::Con),
                "FABCOM" => Some(Self::Fab),
                "FABCOM2" => Some(Self::Fab2),
                _ => None,
            })
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Dv => "DV",
            Self::Dv2 => "DV2",
            Self::Inc => "INC",
            Self::Inc2 => "INC2",
            Self::Dr => "DR",
            Self::Dr2 => "DR2",
            Self::Fab => "FAB",
            Self::Fab2 => "FAB2",
            Self::Alog => "ALOG",
            Self::Con => "CON",
            Self::Ab => "AB",
            Self::Ag => "AG",
            Self::Cop => "COP",
            Self::Cp => "CP",
            Self::Mor => "MOR",
            Self::Per => "PER",
            Self::Psv => "PSV",
        }
    }

    /// The six critical cognitive special scores that feed Sum6/WSum6.
    pub const fn is_cognitive(self) -> bool {
        matches!(
            self,
            Self::Dv
                | Self::Dv2
                | Self::Inc
                | Self::Inc2
                | Self::Dr
                | Self::Dr2
                | Self::Fab
                | Self::Fab2
                | Self::Alog
                | Self::Con
        )
    }

    pub const fn is_level2(self) -> bool {
        matches!(self, Self::Dv2 | Self::Inc2 | Self::Dr2 | Self::Fab2)
    }
}

/// A [`Response`] with every code resolved. Unknown codes are dropped.
#[derive(Debug, Clone)]
pub struct ScoredResponse {
    pub card_label: String,
    pub card: Option<Card>,
    pub location: Option<Location>,
    pub location_code: String,
    pub dq: Option<DevQuality>,
    pub determinants: Vec<Determinant>,
    pub fq: FormQuality,
    pub pair: bool,
    pub contents: Vec<&'static str>,
    pub popular: bool,
    pub z: Option<ZType>,
    pub special_scores: Vec<SpecialScore>,
}

impl ScoredResponse {
    pub fn parse(response: &Response) -> Self {
        let location = Location::parse(&response.location);
        let determinants = response
            .determinants
            .iter()
            .filter(|code| !code.trim().is_empty())
            .filter_map(|code| Determinant::parse(code))
            .collect();

        let mut contents: Vec<&'static str> = Vec::new();
        for code in &response.contents {
            if let Some(canonical) = super::tables::canonical_content(code) {
                if !contents.contains(&canonical) {
                    contents.push(canonical);
                }
            }
        }

        let mut special_scores: Vec<SpecialScore> = Vec::new();
        for code in &response.special_scores {
            if let Some(score) = SpecialScore::parse(code) {
                if !special_scores.contains(&score) {
                    special_scores.push(score);
                }
            }
        }

        Self {
            card_label: response.card.trim().to_string(),
            card: Card::parse(&response.card),
            location,
            location_code: location
                .map(Location::code)
                .unwrap_or_else(|| response.location.trim().to_string()),
            dq: DevQuality::parse(&response.dq),
            determinants,
            fq: FormQuality::parse(&response.fq),
            pair: response.pair.trim() == "(2)" || response.pair.trim() == "2",
            contents,
            popular: response.popular,
            z: ZType::parse(&response.z),
            special_scores,
        }
    }

    pub fn has_content(&self, code: &str) -> bool {
        self.contents.contains(&code)
    }

    pub fn has_special(&self, score: SpecialScore) -> bool {
        self.special_scores.contains(&score)
    }

    pub fn has_determinant(&self, predicate: impl Fn(Determinant) -> bool) -> bool {
        self.determinants.iter().any(|det| predicate(*det))
    }

    pub fn is_blend(&self) -> bool {
        self.determinants.len() > 1
    }

    pub fn is_pure_form(&self) -> bool {
        self.determinants.len() == 1 && self.determinants[0] == Determinant::PureForm
    }

    pub fn area(&self) -> Option<Area> {
        self.location.map(|location| location.area)
    }

    pub fn is_space(&self) -> bool {
        self.location.map(|location| location.space).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_keeps_space_modifier_apart_from_area() {
        let dds = Location::parse("DdS").expect("DdS parses");
        assert_eq!(dds.area, Area::Unusual);
        assert!(dds.space);
        assert_eq!(dds.code(), "DdS");

        let dd = Location::parse("Dd").expect("Dd parses");
        assert_eq!(dd.area, Area::Unusual);
        assert!(!dd.space);

        assert!(Location::parse("Q").is_none());
    }

    #[test]
    fn movement_determinants_carry_polarity() {
        assert_eq!(
            Determinant::parse("FMa"),
            Some(Determinant::Movement {
                kind: MovementKind::Animal,
                polarity: Polarity::Active,
            })
        );
        assert_eq!(
            Determinant::parse("ma-p"),
            Some(Determinant::Movement {
                kind: MovementKind::Inanimate,
                polarity: Polarity::ActivePassive,
            })
        );
        let human = Determinant::parse("M^p").expect("superscript notation accepted");
        assert!(human.is_human_movement());
        assert_eq!(human.notation(), "Mp");
    }

    #[test]
    fn determinant_codes_are_case_sensitive() {
        assert_eq!(Determinant::parse("Fr"), Some(Determinant::FormReflection));
        assert_eq!(Determinant::parse("rF"), Some(Determinant::ReflectionForm));
        assert_eq!(Determinant::parse("C\u{2019}F"), Some(Determinant::AchromaticForm));
        assert!(Determinant::parse("fc").is_none());
    }

    #[test]
    fn special_scores_accept_long_forms() {
        assert_eq!(SpecialScore::parse("fabcom2"), Some(SpecialScore::Fab2));
        assert_eq!(SpecialScore::parse("contam"), Some(SpecialScore::Con));
        assert_eq!(SpecialScore::parse(" cop "), Some(SpecialScore::Cop));
        assert!(SpecialScore::parse("GHR").is_none());
    }

    #[test]
    fn parsed_response_deduplicates_codes() {
        let response = Response::new("viii", "D")
            .contents(&["a", "A", "Bt", "unknown"])
            .special_scores(&["DV", "dv"])
            .pair();
        let scored = ScoredResponse::parse(&response);
        assert_eq!(scored.card, Some(Card::VIII));
        assert_eq!(scored.contents, vec!["A", "Bt"]);
        assert_eq!(scored.special_scores, vec![SpecialScore::Dv]);
        assert!(scored.pair);
        assert_eq!(scored.fq, FormQuality::None);
    }
}
