use crate::demo::{run_export, run_sample, run_summary, ExportArgs, SampleArgs, SummaryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rorschach_cs::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rorschach CS Structural Summary",
    about = "Compute Comprehensive System structural summaries over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Summarise a scored protocol CSV
    Summary(SummaryArgs),
    /// Summarise the bundled sample protocol
    Sample(SampleArgs),
    /// Write the flat section,field,value export for a protocol CSV
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Summary(args) => run_summary(args),
        Command::Sample(args) => run_sample(args),
        Command::Export(args) => run_export(args),
    }
}
