//! Built-in rubrics for the aggregation assignment.

use super::rubric::{GradableUnit, HeaderField, Locator, Pattern, Rubric, StructureRubric};

const ROUTE_METHOD: &str = "fastify.get";
const PIPELINE_BINDING: &str = "pipeline";

fn route_unit(id: &str, path: &str, patterns: &[&str], points: f64, counted: bool) -> GradableUnit {
    GradableUnit {
        id: id.to_string(),
        label: path.trim_start_matches("/api/stats/").to_string(),
        locator: Locator::Route {
            method: ROUTE_METHOD.to_string(),
            path: path.to_string(),
            binding: Some(PIPELINE_BINDING.to_string()),
        },
        patterns: patterns.iter().map(|p| Pattern::from(*p)).collect(),
        points,
        threshold: None,
        counted,
    }
}

fn exercise(number: u32, label: &str, patterns: Vec<Pattern>) -> GradableUnit {
    // Phase 2-3 exercises are worth a little more.
    let points = if (7..=11).contains(&number) { 2.5 } else { 2.0 };
    GradableUnit {
        id: format!("exercise{number}"),
        label: label.to_string(),
        locator: Locator::Section {
            heading: format!("Exercice {number}"),
        },
        patterns,
        points,
        threshold: None,
        counted: true,
    }
}

fn lits(patterns: &[&str]) -> Vec<Pattern> {
    patterns.iter().map(|p| Pattern::from(*p)).collect()
}

impl Rubric {
    /// Rubric for `dashboard-api/src/routes/stats.js`.
    pub fn api_default() -> Self {
        Rubric {
            name: "api".to_string(),
            max_score: 50.0,
            threshold: 0.5,
            sigil_optional: true,
            pending_marker: Some("TODO".to_string()),
            units: vec![
                route_unit(
                    "overview",
                    "/api/stats/overview",
                    &["$group", "$addToSet", "$size"],
                    10.0,
                    true,
                ),
                route_unit(
                    "parQuartier",
                    "/api/stats/par-quartier",
                    &["$group", "borough", "$sort"],
                    10.0,
                    true,
                ),
                route_unit(
                    "topCuisines",
                    "/api/stats/top-cuisines",
                    &["$group", "cuisine", "$sort", "$limit"],
                    10.0,
                    true,
                ),
                route_unit(
                    "distributionGrades",
                    "/api/stats/distribution-grades",
                    &["$unwind", "grades", "$group"],
                    10.0,
                    true,
                ),
                route_unit(
                    "evolutionScores",
                    "/api/stats/evolution-scores",
                    &["$unwind", "$year", "$avg"],
                    10.0,
                    true,
                ),
                route_unit("dashboard", "/api/stats/dashboard", &["$facet"], 0.0, false),
            ],
            structure: None,
        }
    }

    /// Rubric for `playground-tp2.mongodb.js`.
    pub fn playground_default() -> Self {
        Rubric {
            name: "playground".to_string(),
            max_score: 35.0,
            threshold: 0.6,
            sigil_optional: false,
            pending_marker: Some("TODO".to_string()),
            units: vec![
                exercise(
                    1,
                    "$elemMatch simple",
                    vec![
                        Pattern::from("$elemMatch"),
                        Pattern::Regex {
                            regex: "grade.*score".to_string(),
                        },
                    ],
                ),
                exercise(2, "$elemMatch with dates", lits(&["$elemMatch", "date", "$gte"])),
                exercise(3, "$elemMatch with $or", lits(&["$elemMatch", "$or"])),
                exercise(4, "$expr with $size", lits(&["$expr", "$size", "grades"])),
                exercise(5, "Array element comparison", lits(&["$expr", "$arrayElemAt"])),
                exercise(6, "Data validation", lits(&["$exists", "$type"])),
                exercise(7, "Count per borough", lits(&["$group", "borough", "$sum"])),
                exercise(
                    8,
                    "Top Manhattan cuisines",
                    lits(&["$match", "Manhattan", "$group", "$sort", "$limit"]),
                ),
                exercise(9, "Cuisines per borough", lits(&["$group", "$addToSet"])),
                exercise(10, "Average score per year", lits(&["$unwind", "$year", "$avg"])),
                exercise(11, "Inspections per borough", lits(&["$unwind", "$group", "grades"])),
                exercise(12, "$lookup join", lits(&["$lookup", "boroughs"])),
                exercise(13, "$bucket histogram", lits(&["$bucket"])),
                exercise(14, "$facet dashboard", lits(&["$facet"])),
                exercise(15, "Compound index", lits(&["createIndex", "borough", "cuisine"])),
                exercise(16, "Geospatial index", lits(&["2dsphere", "$nearSphere"])),
            ],
            structure: Some(StructureRubric {
                max_score: 5.0,
                fields: vec![
                    HeaderField {
                        key: "Nom".to_string(),
                        label: "Last name filled in".to_string(),
                        min_chars: 2,
                    },
                    HeaderField {
                        key: "Prénom".to_string(),
                        label: "First name filled in".to_string(),
                        min_chars: 2,
                    },
                    HeaderField {
                        key: "Groupe".to_string(),
                        label: "Group filled in".to_string(),
                        min_chars: 0,
                    },
                    HeaderField {
                        key: "Date".to_string(),
                        label: "Date filled in".to_string(),
                        min_chars: 0,
                    },
                ],
                checklist_min: 3,
                checklist_label: "Checklist used".to_string(),
            }),
        }
    }
}
