use crate::render::run_report;
use crate::server;
use clap::{Args, Parser, Subcommand};
use clinic_report::error::AppError;
use clinic_report::reports::ReportVariant;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Clinic Job Report",
    about = "Serve and render clinic job comparison reports",
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
    /// Render one report selection as text
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory holding the report datasets
    #[arg(long)]
    pub(crate) asset_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Report edition (asagaya or machida)
    #[arg(long, value_parser = parse_variant, default_value = "asagaya")]
    pub(crate) variant: ReportVariant,
    /// Job category key (nurses, medicalOffice, radiologist)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Employment type key (fullTime or partTime)
    #[arg(long)]
    pub(crate) employment: Option<String>,
    /// Directory holding the report datasets
    #[arg(long)]
    pub(crate) asset_dir: Option<PathBuf>,
}

fn parse_variant(raw: &str) -> Result<ReportVariant, String> {
    raw.parse()
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_subcommand_parses_facets() {
        let cli = Cli::try_parse_from([
            "clinic-report-api",
            "report",
            "--variant",
            "machida",
            "--category",
            "medicalOffice",
        ])
        .expect("arguments parse");

        let Some(Command::Report(args)) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.variant, ReportVariant::Machida);
        assert_eq!(args.category.as_deref(), Some("medicalOffice"));
        assert!(args.employment.is_none());
    }

    #[test]
    fn unknown_variant_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["clinic-report-api", "report", "--variant", "osaka"]).is_err());
    }
}
