use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Merge the stage reports and test results into grade-report.json.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding api-report.json and playground-report.json
    #[arg(long)]
    reports_dir: Option<PathBuf>,
    /// Test runner transcript. Defaults to TEST_OUTPUT_PATH
    #[arg(long)]
    test_output: Option<PathBuf>,
    /// Output path. Defaults to grade-report.json in the reports directory
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = grader::logging::init_logging();

    let run = grader::commands::generate_report(
        args.reports_dir.as_deref(),
        args.test_output.as_deref(),
        args.out.as_deref(),
    )?;
    grader::transcript::print_report(&run);
    Ok(())
}
