use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Grade the aggregation pipelines of a route file and write api-report.json.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Route file to grade (e.g. dashboard-api/src/routes/stats.js)
    file: PathBuf,
    /// JSON rubric replacing the built-in one
    #[arg(long)]
    rubric: Option<PathBuf>,
    /// Output path. Defaults to api-report.json in REPORT_DIR or next to the executable
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = grader::logging::init_logging();

    let run = grader::commands::grade_api(&args.file, args.rubric.as_deref(), args.out.as_deref())?;
    grader::transcript::print_api(&run);
    Ok(())
}
