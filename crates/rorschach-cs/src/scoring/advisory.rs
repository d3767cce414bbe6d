//! Caller-side validity warnings. These never alter the computed summary.

use super::format::UNDEFINED;
use super::summary::StructuralSummary;

/// Below this R a high Lambda makes the protocol of doubtful interpretive value.
const BRIEF_PROTOCOL_R: usize = 14;
const HIGH_LAMBDA: f64 = 0.99;

pub fn protocol_advisories(summary: &StructuralSummary, min_responses: usize) -> Vec<String> {
    let r = summary.lower_section.r;
    let mut advisories = Vec::new();

    if r < min_responses {
        advisories.push(format!(
            "protocol has {r} responses; at least {min_responses} are needed for a reliable interpretation"
        ));
    }

    // Every response pure F leaves Lambda undefined, which is the extreme case.
    let lambda = summary.lower_section.lambda.as_str();
    let high_lambda = lambda == UNDEFINED
        || lambda
            .parse::<f64>()
            .map(|value| value > HIGH_LAMBDA)
            .unwrap_or(false);
    if high_lambda && r < BRIEF_PROTOCOL_R {
        advisories.push(format!(
            "Lambda {lambda} with only {r} responses suggests a brief, guarded protocol"
        ));
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{calculate, domain::Response, sample::sample_data};

    fn summary_for(responses: &[Response]) -> StructuralSummary {
        calculate(responses).into_result().expect("valid protocol")
    }

    #[test]
    fn sample_protocol_has_no_advisories() {
        let summary = summary_for(&sample_data());
        assert!(protocol_advisories(&summary, 14).is_empty());
    }

    #[test]
    fn short_pure_form_protocol_gets_both_warnings() {
        let responses: Vec<Response> = ["I", "II", "III"]
            .into_iter()
            .map(|card| Response::new(card, "W").determinants(&["F"]).fq("o"))
            .collect();
        let advisories = protocol_advisories(&summary_for(&responses), 14);
        assert_eq!(advisories.len(), 2);
        assert!(advisories[0].contains("3 responses"));
        assert!(advisories[1].contains("Lambda -"));
    }

    #[test]
    fn threshold_follows_configuration() {
        let summary = summary_for(&sample_data());
        let advisories = protocol_advisories(&summary, 20);
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].contains("at least 20"));
    }
}
