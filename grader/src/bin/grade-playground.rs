use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Grade the header and exercises of a playground file and write playground-report.json.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Playground file to grade (e.g. playground-tp2.mongodb.js)
    file: PathBuf,
    /// JSON rubric replacing the built-in one
    #[arg(long)]
    rubric: Option<PathBuf>,
    /// Output path. Defaults to playground-report.json in REPORT_DIR or next to the executable
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = grader::logging::init_logging();

    let run = grader::commands::grade_playground(
        &args.file,
        args.rubric.as_deref(),
        args.out.as_deref(),
    )?;
    grader::transcript::print_playground(&run);
    Ok(())
}
