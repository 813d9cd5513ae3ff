//! # RuleFeedback Strategy
//!
//! This module provides the `RuleFeedback` strategy for the marker system.
//! It implements the [`Feedback`] trait as an ordered list of independent rules. Every rule whose
//! condition holds appends its message; no rule suppresses another.
//!
//! ## Rules, in output order
//!
//! 1. Per stage: report missing, report malformed, or report carrying its own error.
//! 2. Structure score of zero.
//! 3. Fewer completed exercises than `min_completed_exercises`.
//! 4. Fewer implemented pipelines than `min_implemented_pipelines`.
//! 5. Failing tests.
//! 6. Exactly one score band message, from disjoint ranges of the total.

use crate::merge::{Stage, StageStatus};
use crate::traits::feedback::{Feedback, FeedbackContext};

/// A closing message for totals at or above `floor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBand {
    pub floor: u32,
    pub message: String,
}

/// Threshold-rule feedback over a merged report.
#[derive(Debug, Clone)]
pub struct RuleFeedback {
    pub min_completed_exercises: usize,
    pub min_implemented_pipelines: usize,
    /// Checked from the highest floor down; the first band the total reaches wins.
    pub bands: Vec<ScoreBand>,
}

impl Default for RuleFeedback {
    fn default() -> Self {
        Self {
            min_completed_exercises: 8,
            min_implemented_pipelines: 3,
            bands: vec![
                ScoreBand {
                    floor: 80,
                    message: "Excellent work!".to_string(),
                },
                ScoreBand {
                    floor: 60,
                    message: "Good work, keep it up!".to_string(),
                },
                ScoreBand {
                    floor: 40,
                    message: "Improvements are needed".to_string(),
                },
                ScoreBand {
                    floor: 0,
                    message: "Insufficient work - review the assignment instructions".to_string(),
                },
            ],
        }
    }
}

fn stage_message(stage: Stage, status: &StageStatus) -> Option<String> {
    match status {
        StageStatus::Loaded => None,
        StageStatus::Missing => Some(format!(
            "{} not found or could not be analysed",
            stage.source_file()
        )),
        StageStatus::Malformed(_) => Some(format!("Error while analysing {}", stage.description())),
        StageStatus::Errored(err) => Some(format!("{}: {}", stage.name(), err)),
    }
}

impl RuleFeedback {
    fn band(&self, total: u32) -> Option<&ScoreBand> {
        let mut bands: Vec<&ScoreBand> = self.bands.iter().collect();
        bands.sort_by(|a, b| b.floor.cmp(&a.floor));
        bands.into_iter().find(|b| total >= b.floor)
    }
}

impl Feedback for RuleFeedback {
    fn assemble_feedback(&self, ctx: FeedbackContext<'_>) -> Vec<String> {
        let report = ctx.report;
        let mut messages = Vec::new();

        for (stage, status) in ctx.stages {
            if let Some(msg) = stage_message(*stage, status) {
                messages.push(msg);
            }
        }

        if report.playground.structure.score == 0.0 {
            messages.push(
                "Remember to fill in your student details in the playground header".to_string(),
            );
        }

        let exercises = &report.playground.exercises;
        if exercises.completed < self.min_completed_exercises {
            messages.push(format!(
                "Try to complete more playground exercises ({}/{} completed)",
                exercises.completed, exercises.total
            ));
        }

        let pipelines = &report.api.pipelines;
        if pipelines.implemented < self.min_implemented_pipelines {
            messages.push(format!(
                "Implement more aggregation pipelines in stats.js ({}/{} implemented)",
                pipelines.implemented, pipelines.total
            ));
        }

        if report.tests.failed > 0 {
            messages.push(format!(
                "{} test(s) failing - check your implementations",
                report.tests.failed
            ));
        }

        if let Some(band) = self.band(report.total_score) {
            messages.push(band.message.clone());
        }

        messages
    }
}
