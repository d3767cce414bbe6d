//! Bundled fifteen-response protocol used by the demo endpoints and the
//! end-to-end regression tests.

use super::domain::Response;

/// The reference protocol: R 15, Zf 12, W 10, D 4, Dd 1, S 1.
pub fn sample_data() -> Vec<Response> {
    vec![
        Response::new("I", "W")
            .dq("o")
            .determinants(&["F"])
            .fq("o")
            .contents(&["A"])
            .popular()
            .z("ZW"),
        Response::new("I", "WS")
            .dq("o")
            .determinants(&["FC'"])
            .fq("o")
            .contents(&["(Hd)"])
            .z("ZS"),
        Response::new("II", "D")
            .dq("+")
            .determinants(&["FMa", "FC"])
            .fq("o")
            .pair()
            .contents(&["A"])
            .popular()
            .z("ZA"),
        Response::new("II", "W")
            .dq("+")
            .determinants(&["Ma", "CF"])
            .fq("o")
            .pair()
            .contents(&["H", "Bl"])
            .z("ZA")
            .special_scores(&["COP"]),
        Response::new("III", "D")
            .dq("+")
            .determinants(&["Mp"])
            .fq("o")
            .pair()
            .contents(&["H", "Hh"])
            .popular()
            .z("ZA"),
        Response::new("III", "D")
            .dq("o")
            .determinants(&["FC"])
            .fq("o")
            .contents(&["Cg"]),
        Response::new("IV", "W")
            .dq("o")
            .determinants(&["FT"])
            .fq("o")
            .contents(&["(H)"])
            .popular()
            .z("ZW"),
        Response::new("V", "W")
            .dq("o")
            .determinants(&["F"])
            .fq("o")
            .contents(&["A"])
            .popular()
            .z("ZW"),
        Response::new("VI", "W")
            .dq("o")
            .determinants(&["FY"])
            .fq("u")
            .contents(&["Ad"])
            .z("ZW")
            .special_scores(&["MOR"]),
        Response::new("VII", "W")
            .dq("+")
            .determinants(&["Ma"])
            .fq("o")
            .pair()
            .contents(&["Hd"])
            .popular()
            .z("ZA")
            .special_scores(&["DV"]),
        Response::new("VIII", "W")
            .dq("+")
            .determinants(&["FMa", "FC"])
            .fq("o")
            .pair()
            .contents(&["A", "Bt"])
            .popular()
            .z("ZA"),
        Response::new("IX", "W")
            .dq("o")
            .determinants(&["CF"])
            .fq("u")
            .contents(&["Fi"])
            .z("ZW"),
        Response::new("X", "D")
            .dq("o")
            .determinants(&["F"])
            .fq("o")
            .pair()
            .contents(&["A"])
            .popular(),
        Response::new("X", "W")
            .dq("+")
            .determinants(&["CF", "mp"])
            .fq("u")
            .contents(&["Bt", "Na"])
            .z("ZA"),
        Response::new("X", "Dd")
            .dq("o")
            .determinants(&["F"])
            .fq("-")
            .contents(&["Ad"])
            .special_scores(&["INC"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sample_response_carries_a_card() {
        let responses = sample_data();
        assert_eq!(responses.len(), 15);
        assert!(responses.iter().all(Response::has_card));
        assert_eq!(responses.iter().filter(|r| !r.z.is_empty()).count(), 12);
    }
}
