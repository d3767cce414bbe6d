use crate::infra::open_output;
use clap::Args;
use rorschach_cs::config::AppConfig;
use rorschach_cs::error::AppError;
use rorschach_cs::scoring::{
    calculate, protocol_advisories, sample_data, summary_rows, write_csv, CalculationResult,
    ExportError, Response, ResponseImporter, StructuralSummary,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// Scored protocol CSV (card,location,dq,determinants,fq,pair,contents,popular,z,special_scores)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the full calculation result as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SampleArgs {
    /// Print the full calculation result as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Scored protocol CSV to summarise
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Destination file for the flat summary CSV (defaults to stdout)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let responses = ResponseImporter::from_path(&args.csv)?;
    report(&responses, args.json)
}

pub(crate) fn run_sample(args: SampleArgs) -> Result<(), AppError> {
    println!("Bundled sample protocol");
    report(&sample_data(), args.json)
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let responses = ResponseImporter::from_path(&args.csv)?;
    let summary = require_summary(calculate(&responses))?;

    let rows = summary_rows(&summary)?;
    write_csv(&rows, open_output(args.out.as_deref())?)?;
    if let Some(path) = &args.out {
        println!("Wrote {} summary rows to {}", rows.len(), path.display());
    }
    Ok(())
}

fn report(responses: &[Response], as_json: bool) -> Result<(), AppError> {
    let result = calculate(responses);

    if as_json {
        let json = serde_json::to_string_pretty(&result).map_err(ExportError::Encode)?;
        println!("{}", json);
        return require_summary(result).map(|_| ());
    }

    let summary = require_summary(result)?;
    let min_responses = AppConfig::load()?.protocol.min_responses;
    render_summary(&summary);
    let advisories = protocol_advisories(&summary, min_responses);
    if !advisories.is_empty() {
        println!("\nAdvisories");
        for advisory in advisories {
            println!("- {}", advisory);
        }
    }
    Ok(())
}

/// A protocol without a valid response fails the command.
fn require_summary(result: CalculationResult) -> Result<StructuralSummary, AppError> {
    result.into_result().map_err(AppError::from)
}

pub(crate) fn render_summary(summary: &StructuralSummary) {
    let upper = &summary.upper_section;
    let lower = &summary.lower_section;
    let indices = &summary.special_indices;

    println!("Structural summary (R = {})", lower.r);
    println!("\nLocation features");
    println!(
        "- Zf {} | ZSum {} | ZEst {} | Zd {}",
        upper.zf, upper.zsum, upper.zest, upper.zd
    );
    println!(
        "- W {} | D {} | Dd {} | S {} | P {} | (2) {}",
        upper.w, upper.d, upper.dd, upper.s, upper.popular, upper.pairs
    );
    if !upper.blends.is_empty() {
        println!("- Blends: {}", upper.blends.join(", "));
    }

    println!("\nCore");
    println!(
        "- EB {} | EA {} | EBPer {} | style {}",
        lower.eb_balance, lower.ea, lower.ebper, lower.eb_style
    );
    println!(
        "- eb {} | es {} | Adj es {} | D {} | Adj D {} | Lambda {}",
        lower.eb, lower.es, lower.adj_es, lower.d, lower.adj_d, lower.lambda
    );

    println!("\nAffect");
    println!(
        "- FC:CF+C {} | Pure C {} | SumC':WSumC {} | Afr {} | Blends:R {}",
        lower.affect.fc_to_cf_c,
        lower.affect.pure_c,
        lower.affect.achromatic_to_chromatic,
        lower.affect.afr,
        lower.affect.blends_to_r
    );
    println!("\nInterpersonal");
    println!(
        "- COP {} | AG {} | GHR:PHR {} | a:p {} | Isolation {}",
        lower.interpersonal.cop,
        lower.interpersonal.ag,
        lower.interpersonal.ghr_to_phr,
        lower.interpersonal.active_to_passive,
        lower.interpersonal.isolation_index
    );
    println!("\nIdeation");
    println!(
        "- Ma:Mp {} | 2AB+(Art+Ay) {} | Sum6 {} | Lvl2 {} | WSum6 {} | M- {}",
        lower.ideation.human_active_to_passive,
        lower.ideation.intellectualization,
        lower.ideation.sum6,
        lower.ideation.level2,
        lower.ideation.wsum6,
        lower.ideation.m_minus
    );
    println!("\nMediation");
    println!(
        "- XA% {} | WDA% {} | X-% {} | X+% {} | Xu% {}",
        lower.mediation.xa,
        lower.mediation.wda,
        lower.mediation.x_minus,
        lower.mediation.x_plus,
        lower.mediation.xu
    );
    println!("\nProcessing");
    println!(
        "- W:D:Dd {} | W:M {} | PSV {} | DQ+ {} | DQv {}",
        lower.processing.w_d_dd,
        lower.processing.w_to_m,
        lower.processing.psv,
        lower.processing.dq_plus,
        lower.processing.dq_v
    );
    println!("\nSelf-perception");
    println!(
        "- 3r+(2)/R {} | Fr+rF {} | FD {} | An+Xy {} | H:(H)+Hd+(Hd) {}",
        lower.self_perception.egocentricity,
        lower.self_perception.reflections,
        lower.self_perception.fd,
        lower.self_perception.an_xy,
        lower.self_perception.pure_to_other_human
    );

    println!("\nSpecial indices");
    for (name, value) in [
        ("PTI", &indices.pti),
        ("DEPI", &indices.depi),
        ("CDI", &indices.cdi),
        ("S-CON", &indices.scon),
        ("HVI", &indices.hvi),
        ("OBS", &indices.obs),
    ] {
        println!("- {:<5} {}", name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocols_without_cards_fail_the_command() {
        for as_json in [false, true] {
            let err = report(&[Response::new("", "W")], as_json).expect_err("no valid responses");
            assert!(matches!(
                err,
                AppError::Calculation(ref errors) if errors[0].field == "responses"
            ));
        }
    }

    #[test]
    fn export_of_card_less_protocol_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "rorschach-cs-export-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "card,location,determinants\n,W,F\n").expect("write fixture");

        let result = run_export(ExportArgs {
            csv: path.clone(),
            out: None,
        });
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(AppError::Calculation(_))));
    }

    #[test]
    fn valid_protocol_yields_a_summary() {
        let summary = require_summary(calculate(&sample_data())).expect("sample summarises");
        assert_eq!(summary.lower_section.r, 15);
    }
}
