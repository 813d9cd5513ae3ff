//! Line-oriented summaries printed to stdout after each command.

use crate::commands::{ReportRun, StageRun};
use colored::*;
use marker::report::{ApiStageReport, PlaygroundStageReport};
use marker::types::{GradeResult, UnitStatus};

const STATUS_COLUMN: usize = 60;
const RULE_WIDTH: usize = 50;

fn dotted(label: &str) -> String {
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.chars().count() + 3));
    format!("   {label} {dots}")
}

fn status_word(status: UnitStatus) -> ColoredString {
    match status {
        UnitStatus::Implemented => "implemented".green(),
        UnitStatus::Incomplete => "incomplete".yellow(),
        UnitStatus::Pending => "pending".yellow(),
        UnitStatus::Placeholder => "placeholder".red(),
        UnitStatus::Missing => "missing".red(),
    }
}

fn print_units(results: &[GradeResult]) {
    for r in results {
        let mut line = format!(
            "{} {} ({}/{} patterns, {} needed)",
            dotted(&r.label),
            status_word(r.status),
            r.found(),
            r.expected(),
            r.required
        );
        if !r.counted {
            line.push_str(&format!(" {}", "bonus".dimmed()));
        }
        println!("{line}");
    }
}

fn print_error(error: Option<&str>) {
    if let Some(err) = error {
        println!("   {} {}", "error:".red().bold(), err);
    }
}

pub fn print_api(run: &StageRun<ApiStageReport>) {
    let p = &run.report.pipelines;
    println!("{} {}", "Grading API pipelines in".bold(), run.source.display());
    print_error(run.report.error.as_deref());
    print_units(&run.results);
    println!();
    println!("   Implemented: {}/{}", p.implemented, p.total);
    println!("   Score: {}/{}", p.score, p.max_score);
    println!("{} {}", "Report saved to".green(), run.out_path.display());
}

pub fn print_playground(run: &StageRun<PlaygroundStageReport>) {
    let s = &run.report.structure;
    let e = &run.report.exercises;
    println!("{} {}", "Grading playground".bold(), run.source.display());
    print_error(run.report.error.as_deref());

    println!("   Structure: {}/{}", s.score, s.max_score);
    for d in &s.details {
        let mark = if d.passed { "ok".green() } else { "no".red() };
        println!("{} {} {}", dotted(&d.check), mark, d.message.dimmed());
    }

    println!("   Exercises: {}/{} ({}/{} completed)", e.score, e.max_score, e.completed, e.total);
    print_units(&run.results);
    println!();
    println!(
        "   Total: {}/{}",
        s.score + e.score,
        s.max_score + e.max_score
    );
    println!("{} {}", "Report saved to".green(), run.out_path.display());
}

pub fn print_report(run: &ReportRun) {
    let r = &run.report;
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("{}", "GRADING SUMMARY".bold());
    println!("{rule}");

    let pg = &r.playground;
    println!("Playground");
    println!("   Structure: {}/{}", pg.structure.score, pg.structure.max_score);
    println!(
        "   Exercises: {}/{} ({}/{} completed)",
        pg.exercises.score, pg.exercises.max_score, pg.exercises.completed, pg.exercises.total
    );

    let p = &r.api.pipelines;
    println!("API");
    println!(
        "   Pipelines: {}/{} ({}/{} implemented)",
        p.score, p.max_score, p.implemented, p.total
    );

    println!("Tests");
    println!("   Passed: {}/{}", r.tests.passed, r.tests.total);
    println!("   Score: {}/{}", r.tests.score, r.tests.max_score);

    println!("{rule}");
    let total = format!("TOTAL: {}/{}", r.total_score, r.max_score);
    let total = match r.total_score {
        80.. => total.green(),
        40..=79 => total.yellow(),
        _ => total.red(),
    };
    println!("{}", total.bold());
    println!("{rule}");

    println!("Feedback");
    for line in &r.feedback {
        println!("   - {line}");
    }
    println!("{} {}", "Report saved to".green(), run.out_path.display());
}
