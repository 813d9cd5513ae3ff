//! # Merge Module
//!
//! Combines the stage reports and the test summary into the final [`GradeReport`].
//!
//! The merge is a pure function over `stage -> StageInput`:
//! - sub-fields that are present and parse are copied;
//! - absent or unparseable sub-fields become zero-valued defaults;
//! - every contributor is clamped to `[0, fixed maximum]` and its `maxScore` reset to that maximum;
//! - the total is the rounded sum of the clamped contributors.

use crate::report::{
    ApiSection, EXERCISES_MAX, ExercisesReport, GradeReport, PIPELINES_MAX, PipelinesReport,
    PlaygroundSection, STRUCTURE_MAX, StructureReport, TESTS_MAX, TOTAL_MAX, TestsReport,
};
use crate::traits::feedback::{Feedback, FeedbackContext};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};
use util::paths::{API_REPORT_FILE, PLAYGROUND_REPORT_FILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Playground,
    Api,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Playground, Stage::Api];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Playground => "playground",
            Stage::Api => "api",
        }
    }

    /// The student file graded by this stage.
    pub fn source_file(&self) -> &'static str {
        match self {
            Stage::Playground => "playground-tp2.mongodb.js",
            Stage::Api => "stats.js",
        }
    }

    pub fn report_file(&self) -> &'static str {
        match self {
            Stage::Playground => PLAYGROUND_REPORT_FILE,
            Stage::Api => API_REPORT_FILE,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Playground => "the playground",
            Stage::Api => "the API pipelines",
        }
    }
}

/// A stage report as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum StageInput {
    Loaded(Value),
    Missing,
    /// Present but unusable; carries the parser's message.
    Malformed(String),
}

/// How a stage contributed to the merge, as seen by feedback rules.
#[derive(Debug, Clone, PartialEq)]
pub enum StageStatus {
    Loaded,
    Missing,
    Malformed(String),
    /// Loaded, but the stage recorded an error of its own (e.g. its source file was absent).
    Errored(String),
}

fn field<T: DeserializeOwned + Default>(stage: Stage, value: &Value, key: &str) -> T {
    let Some(raw) = value.get(key) else {
        warn!("{} report has no '{}' section", stage.name(), key);
        return T::default();
    };
    serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
        warn!("{} report has an invalid '{}' section: {}", stage.name(), key, e);
        T::default()
    })
}

fn clamp(score: f64, max: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Resolve one stage: its status plus the JSON object to read sub-fields from.
fn resolve(stage: Stage, input: Option<&StageInput>) -> (StageStatus, Option<&Value>) {
    match input {
        None | Some(StageInput::Missing) => {
            warn!("{} report not found", stage.name());
            (StageStatus::Missing, None)
        }
        Some(StageInput::Malformed(msg)) => {
            warn!("Could not parse {} report: {}", stage.name(), msg);
            (StageStatus::Malformed(msg.clone()), None)
        }
        Some(StageInput::Loaded(value)) if !value.is_object() => {
            warn!("{} report is not a JSON object", stage.name());
            (
                StageStatus::Malformed("expected a JSON object".to_string()),
                None,
            )
        }
        Some(StageInput::Loaded(value)) => {
            info!("Loaded {} report", stage.name());
            let status = match value.get("error").and_then(Value::as_str) {
                Some(err) => StageStatus::Errored(err.to_string()),
                None => StageStatus::Loaded,
            };
            (status, Some(value))
        }
    }
}

/// Merge stage reports and the test summary into the final report.
pub fn merge(
    stages: &BTreeMap<Stage, StageInput>,
    tests: TestsReport,
    timestamp: String,
    feedback: &dyn Feedback,
) -> GradeReport {
    let mut statuses = BTreeMap::new();

    let (status, playground) = resolve(Stage::Playground, stages.get(&Stage::Playground));
    statuses.insert(Stage::Playground, status);
    let mut structure: StructureReport = playground
        .map(|v| field(Stage::Playground, v, "structure"))
        .unwrap_or_default();
    let mut exercises: ExercisesReport = playground
        .map(|v| field(Stage::Playground, v, "exercises"))
        .unwrap_or_default();

    let (status, api) = resolve(Stage::Api, stages.get(&Stage::Api));
    statuses.insert(Stage::Api, status);
    let mut pipelines: PipelinesReport = api
        .map(|v| field(Stage::Api, v, "pipelines"))
        .unwrap_or_default();

    structure.score = clamp(structure.score, STRUCTURE_MAX);
    structure.max_score = STRUCTURE_MAX;
    exercises.score = clamp(exercises.score, EXERCISES_MAX);
    exercises.max_score = EXERCISES_MAX;
    pipelines.score = clamp(pipelines.score, PIPELINES_MAX);
    pipelines.max_score = PIPELINES_MAX;
    let mut tests = tests;
    tests.score = tests.score.min(TESTS_MAX);
    tests.max_score = TESTS_MAX;

    let total = structure.score + exercises.score + pipelines.score + tests.score as f64;

    let mut report = GradeReport {
        timestamp,
        total_score: total.round() as u32,
        max_score: TOTAL_MAX,
        playground: PlaygroundSection {
            structure,
            exercises,
        },
        api: ApiSection { pipelines },
        tests,
        feedback: Vec::new(),
    };

    let messages = feedback.assemble_feedback(FeedbackContext {
        report: &report,
        stages: &statuses,
    });
    report.feedback = messages;
    report
}
