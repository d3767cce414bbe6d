//! Published Comprehensive System constants.
//!
//! Values follow Exner, *The Rorschach: A Comprehensive System* (2003). All
//! tables are immutable statics so concurrent calculations share them freely.

use super::domain::{Card, SpecialScore, ZType};

/// Edition tag for the lookup tables below.
pub const TABLE_EDITION: &str = "exner-cs-2003";

/// Weighted sum of chromatic color: FC counts half, CF one, C one and a half.
pub const FC_WEIGHT: f64 = 0.5;
pub const CF_WEIGHT: f64 = 1.0;
pub const C_WEIGHT: f64 = 1.5;

/// Organizational activity values by card, columns ZW, ZA, ZD, ZS.
const Z_VALUES: [[f64; 4]; 10] = [
    [1.0, 4.0, 6.0, 3.5],
    [4.5, 3.0, 5.5, 4.5],
    [5.5, 3.0, 4.0, 4.5],
    [2.0, 4.0, 3.5, 5.0],
    [1.0, 2.5, 5.0, 4.0],
    [2.5, 2.5, 6.0, 6.5],
    [2.5, 1.0, 3.0, 4.0],
    [4.5, 3.0, 3.0, 4.0],
    [5.5, 2.5, 4.5, 5.0],
    [5.5, 4.0, 4.5, 6.0],
];

pub fn z_value(card: Card, z: ZType) -> f64 {
    Z_VALUES[card.index()][z.index()]
}

/// Expected ZSum for Zf = 2 through Zf = 50.
const ZEST_BY_ZF: [f64; 49] = [
    2.5, 6.0, 10.0, 13.5, 17.0, 20.5, 24.0, 27.5, 31.0, 34.5, 38.0, 41.5, 45.5, 49.0, 52.5,
    56.0, 59.5, 63.0, 66.5, 70.0, 73.5, 77.0, 81.0, 84.5, 88.0, 91.5, 95.0, 98.5, 102.5, 105.5,
    109.5, 112.5, 116.5, 120.0, 123.5, 127.0, 130.5, 134.0, 137.5, 141.0, 144.5, 148.0, 152.0,
    155.5, 159.0, 162.5, 166.0, 169.5, 173.0,
];

const ZEST_FIRST_ZF: usize = 2;
const ZEST_EXTRAPOLATION_STEP: f64 = 3.5;

/// ZEst for a given Zf. Zf below 2 has no published estimate.
pub fn zest(zf: usize) -> Option<f64> {
    if zf < ZEST_FIRST_ZF {
        return None;
    }
    let offset = zf - ZEST_FIRST_ZF;
    match ZEST_BY_ZF.get(offset) {
        Some(value) => Some(*value),
        None => {
            let last = ZEST_BY_ZF[ZEST_BY_ZF.len() - 1];
            let beyond = (offset + 1 - ZEST_BY_ZF.len()) as f64;
            Some(last + beyond * ZEST_EXTRAPOLATION_STEP)
        }
    }
}

/// D-score conversion bands for the absolute difference, as (upper bound, step).
const D_SCORE_BANDS: [(f64, i32); 6] = [
    (2.5, 0),
    (5.0, 1),
    (7.5, 2),
    (10.0, 3),
    (12.5, 4),
    (15.0, 5),
];

const D_SCORE_BAND_WIDTH: f64 = 2.5;

/// Converts `EA - es` (or `EA - Adj es`) into the signed D step.
pub fn d_score(difference: f64) -> i32 {
    let magnitude = difference.abs();
    let step = D_SCORE_BANDS
        .iter()
        .find(|(upper, _)| magnitude <= *upper + f64::EPSILON)
        .map(|(_, step)| *step)
        .unwrap_or_else(|| {
            let (last_upper, last_step) = D_SCORE_BANDS[D_SCORE_BANDS.len() - 1];
            last_step + ((magnitude - last_upper) / D_SCORE_BAND_WIDTH).ceil() as i32
        });

    if difference < 0.0 {
        -step
    } else {
        step
    }
}

/// WSum6 weight of a cognitive special score; zero for the rest.
pub const fn wsum6_weight(score: SpecialScore) -> u32 {
    match score {
        SpecialScore::Dv => 1,
        SpecialScore::Dv2 => 2,
        SpecialScore::Inc => 2,
        SpecialScore::Inc2 => 4,
        SpecialScore::Dr => 3,
        SpecialScore::Dr2 => 6,
        SpecialScore::Fab => 4,
        SpecialScore::Fab2 => 7,
        SpecialScore::Alog => 5,
        SpecialScore::Con => 7,
        _ => 0,
    }
}

/// Content categories in structural summary order.
pub const CONTENT_CODES: [&str; 27] = [
    "H", "(H)", "Hd", "(Hd)", "Hx", "A", "(A)", "Ad", "(Ad)", "An", "Art", "Ay", "Bl", "Bt", "Cg",
    "Cl", "Ex", "Fd", "Fi", "Ge", "Hh", "Ls", "Na", "Sc", "Sx", "Xy", "Id",
];

/// Human figures used for GHR/PHR and the human content sums.
pub const HUMAN_CONTENT_CODES: [&str; 4] = ["H", "(H)", "Hd", "(Hd)"];

/// Isolation Index numerator weights.
pub const ISOLATION_WEIGHTS: [(&str, usize); 5] =
    [("Bt", 1), ("Cl", 2), ("Ge", 1), ("Ls", 1), ("Na", 2)];

/// Cards whose Popular human answers score GHR.
pub const GHR_POPULAR_CARDS: [Card; 4] = [Card::III, Card::IV, Card::VII, Card::IX];

/// Determinant rows of the summary, movement first, pure form last.
pub const DETERMINANT_CODES: [&str; 23] = [
    "M", "FM", "m", "FC", "CF", "C", "Cn", "FC'", "C'F", "C'", "FT", "TF", "T", "FV", "VF", "V",
    "FY", "YF", "Y", "Fr", "rF", "FD", "F",
];

pub fn canonical_content(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    CONTENT_CODES
        .iter()
        .copied()
        .find(|code| code.eq_ignore_ascii_case(trimmed))
}

pub fn content_index(code: &str) -> Option<usize> {
    CONTENT_CODES.iter().position(|candidate| *candidate == code)
}

pub fn determinant_index(code: &str) -> Option<usize> {
    DETERMINANT_CODES
        .iter()
        .position(|candidate| *candidate == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_values_follow_card_rows() {
        assert_eq!(z_value(Card::I, ZType::Whole), 1.0);
        assert_eq!(z_value(Card::VI, ZType::Space), 6.5);
        assert_eq!(z_value(Card::X, ZType::Adjacent), 4.0);
    }

    #[test]
    fn zest_covers_published_range_and_extrapolates() {
        assert_eq!(zest(0), None);
        assert_eq!(zest(1), None);
        assert_eq!(zest(2), Some(2.5));
        assert_eq!(zest(12), Some(38.0));
        assert_eq!(zest(50), Some(173.0));
        assert_eq!(zest(52), Some(180.0));
    }

    #[test]
    fn d_score_bands_are_symmetric_steps() {
        assert_eq!(d_score(0.0), 0);
        assert_eq!(d_score(2.5), 0);
        assert_eq!(d_score(-2.5), 0);
        assert_eq!(d_score(3.0), 1);
        assert_eq!(d_score(5.0), 1);
        assert_eq!(d_score(5.5), 2);
        assert_eq!(d_score(-8.0), -3);
        assert_eq!(d_score(15.0), 5);
        assert_eq!(d_score(16.0), 6);
        assert_eq!(d_score(-17.5), -6);
        assert_eq!(d_score(18.0), 7);
    }

    #[test]
    fn content_lookup_is_case_insensitive() {
        assert_eq!(canonical_content("(hd)"), Some("(Hd)"));
        assert_eq!(canonical_content(" cg "), Some("Cg"));
        assert_eq!(canonical_content("Zz"), None);
    }
}
