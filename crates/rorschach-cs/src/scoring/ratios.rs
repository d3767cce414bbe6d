use super::domain::SpecialScore;
use super::format::{count_proportion, proportion};
use super::tables::{self, CF_WEIGHT, C_WEIGHT, FC_WEIGHT, ISOLATION_WEIGHTS};
use super::tabulate::Tabulation;
use serde::Serialize;

const ACHROMATIC: [&str; 3] = ["FC'", "C'F", "C'"];
const TEXTURE: [&str; 3] = ["FT", "TF", "T"];
const VISTA: [&str; 3] = ["FV", "VF", "V"];
const DIFFUSE: [&str; 3] = ["FY", "YF", "Y"];
const REFLECTION: [&str; 2] = ["Fr", "rF"];

/// Experience Balance style derived from EB and Lambda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErlebnisStyle {
    Introversive,
    Extratensive,
    Ambitent,
    Avoidant,
}

impl ErlebnisStyle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Introversive => "Introversive",
            Self::Extratensive => "Extratensive",
            Self::Ambitent => "Ambitent",
            Self::Avoidant => "Avoidant",
        }
    }
}

/// Numeric lower-section values. Ratios are `None` when undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedScores {
    pub m: usize,
    pub fm: usize,
    pub inanimate: usize,
    pub fc: usize,
    pub cf: usize,
    pub c: usize,
    pub cn: usize,
    pub wsumc: f64,
    pub ea: f64,
    pub sum_achromatic: usize,
    pub sum_texture: usize,
    pub sum_vista: usize,
    pub sum_diffuse: usize,
    pub sum_shading: usize,
    pub es: usize,
    pub adj_es: usize,
    pub d: i32,
    pub adj_d: i32,
    pub lambda: Option<f64>,
    pub style: ErlebnisStyle,
    pub ebper: Option<f64>,
    pub afr: Option<f64>,
    pub reflections: usize,
    pub egocentricity: Option<f64>,
    pub isolation: Option<f64>,
    pub xa: Option<f64>,
    pub wda: Option<f64>,
    pub x_minus: Option<f64>,
    pub x_plus: Option<f64>,
    pub xu: Option<f64>,
    pub zest: Option<f64>,
    pub zd: Option<f64>,
    pub sum6: usize,
    pub level2: usize,
    pub wsum6: u32,
    pub human_content: usize,
    pub pure_h: usize,
    pub intellectualization: usize,
    pub whole_human_animal: usize,
    pub partial_human_animal: usize,
    pub parenthesized: usize,
}

impl DerivedScores {
    pub fn compute(tab: &Tabulation) -> Self {
        let m = tab.determinant("M");
        let fm = tab.determinant("FM");
        let inanimate = tab.determinant("m");
        let fc = tab.determinant("FC");
        let cf = tab.determinant("CF");
        let c = tab.determinant("C");
        let cn = tab.determinant("Cn");

        let wsumc = FC_WEIGHT * fc as f64 + CF_WEIGHT * cf as f64 + C_WEIGHT * c as f64;
        let ea = m as f64 + wsumc;

        let sum_achromatic = tab.determinant_sum(&ACHROMATIC);
        let sum_texture = tab.determinant_sum(&TEXTURE);
        let sum_vista = tab.determinant_sum(&VISTA);
        let sum_diffuse = tab.determinant_sum(&DIFFUSE);
        let sum_shading = sum_achromatic + sum_texture + sum_vista + sum_diffuse;
        let es = fm + inanimate + sum_shading;

        // Situational stress: only the first m and the first Y stay in Adj es.
        let adj_es = es - inanimate.saturating_sub(1) - sum_diffuse.saturating_sub(1);

        let d = tables::d_score(ea - es as f64);
        let adj_d = tables::d_score(ea - adj_es as f64);

        let lambda = count_proportion(tab.pure_form, tab.r - tab.pure_form);
        // An all-F protocol leaves Lambda undefined but is the extreme high case.
        let high_lambda = lambda.map(|l| l > 0.99).unwrap_or(tab.pure_form > 0);
        let style = erlebnis_style(m as f64, wsumc, ea, high_lambda);
        let ebper = pervasive_ratio(m as f64, wsumc, ea, lambda);

        let reflections = tab.determinant_sum(&REFLECTION);
        let egocentricity = count_proportion(3 * reflections + tab.pairs, tab.r);

        let isolation_numerator: usize = ISOLATION_WEIGHTS
            .iter()
            .map(|(code, weight)| tab.content(code) * weight)
            .sum();
        let isolation = count_proportion(isolation_numerator, tab.r);

        let zest = tables::zest(tab.zf);
        let zd = zest.map(|estimate| tab.zsum - estimate);

        let mut sum6 = 0;
        let mut level2 = 0;
        let mut wsum6 = 0;
        for score in SpecialScore::ALL.into_iter().filter(|s| s.is_cognitive()) {
            let count = tab.special(score);
            sum6 += count;
            if score.is_level2() {
                level2 += count;
            }
            wsum6 += tables::wsum6_weight(score) * count as u32;
        }

        let human_content = tab.content_sum(&tables::HUMAN_CONTENT_CODES);
        let intellectualization =
            2 * tab.special(SpecialScore::Ab) + tab.content("Art") + tab.content("Ay");

        Self {
            m,
            fm,
            inanimate,
            fc,
            cf,
            c,
            cn,
            wsumc,
            ea,
            sum_achromatic,
            sum_texture,
            sum_vista,
            sum_diffuse,
            sum_shading,
            es,
            adj_es,
            d,
            adj_d,
            lambda,
            style,
            ebper,
            afr: count_proportion(tab.chromatic_cards, tab.achromatic_cards),
            reflections,
            egocentricity,
            isolation,
            xa: count_proportion(tab.fq_all.appropriate(), tab.r),
            wda: count_proportion(
                tab.fq_whole_common.appropriate(),
                tab.fq_whole_common.total(),
            ),
            x_minus: count_proportion(tab.fq_all.minus, tab.r),
            x_plus: count_proportion(tab.fq_all.conventional(), tab.r),
            xu: count_proportion(tab.fq_all.unusual, tab.r),
            zest,
            zd,
            sum6,
            level2,
            wsum6,
            human_content,
            pure_h: tab.content("H"),
            intellectualization,
            whole_human_animal: tab.content_sum(&["H", "(H)", "A", "(A)"]),
            partial_human_animal: tab.content_sum(&["Hd", "(Hd)", "Ad", "(Ad)"]),
            parenthesized: tab.content_sum(&["(H)", "(A)", "(Hd)", "(Ad)"]),
        }
    }

    /// FM + m, the left side of eb.
    pub fn nonhuman_movement(&self) -> usize {
        self.fm + self.inanimate
    }

    /// CF + C + Cn, the right side of FC:CF+C.
    pub fn color_dominant(&self) -> usize {
        self.cf + self.c + self.cn
    }

    pub fn pure_color(&self) -> usize {
        self.c + self.cn
    }

    /// H+A : Hd+Ad as a single quotient; undefined with no partial figures.
    pub fn whole_to_partial(&self) -> Option<f64> {
        count_proportion(self.whole_human_animal, self.partial_human_animal)
    }
}

/// Side-by-side gap needed for a dominant EB style at this level of EA.
fn style_margin(ea: f64) -> f64 {
    if ea > 10.0 {
        2.5
    } else {
        2.0
    }
}

fn erlebnis_style(m: f64, wsumc: f64, ea: f64, high_lambda: bool) -> ErlebnisStyle {
    if high_lambda {
        return ErlebnisStyle::Avoidant;
    }
    let margin = style_margin(ea);
    if m - wsumc >= margin {
        ErlebnisStyle::Introversive
    } else if wsumc - m >= margin {
        ErlebnisStyle::Extratensive
    } else {
        ErlebnisStyle::Ambitent
    }
}

/// EBPer is reported only for a dominant style with EA >= 4 and Lambda < 1.
fn pervasive_ratio(m: f64, wsumc: f64, ea: f64, lambda: Option<f64>) -> Option<f64> {
    let lambda_ok = lambda.map(|l| l < 1.0).unwrap_or(false);
    if ea < 4.0 || !lambda_ok {
        return None;
    }
    if (m - wsumc).abs() < style_margin(ea) {
        return None;
    }
    proportion(m.max(wsumc), m.min(wsumc))
}
