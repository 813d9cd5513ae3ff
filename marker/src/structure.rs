//! Header checks for the playground file.
//!
//! Each configured field (`Nom : ...`, `Groupe : ...`) earns one point when the value on the
//! same line, cut at the first `_`, is longer than the field's minimum. The checklist earns one
//! point when enough `[x]` boxes are ticked.

use crate::report::StructureReport;
use crate::report::StructureCheck;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use util::rubric::{HeaderField, StructureRubric};

static CHECKED_BOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[x\]").expect("checkbox regex is valid"));

/// Score the header of `source` against `rubric`.
pub fn check_structure(source: &str, rubric: &StructureRubric) -> StructureReport {
    let mut details: Vec<StructureCheck> = rubric
        .fields
        .iter()
        .map(|field| check_field(source, field))
        .collect();

    let ticked = CHECKED_BOX.find_iter(source).count();
    let checklist_ok = ticked >= rubric.checklist_min;
    details.push(StructureCheck {
        check: rubric.checklist_label.clone(),
        passed: checklist_ok,
        message: if checklist_ok {
            format!("{ticked} items checked")
        } else {
            format!("{ticked} items checked, at least {} needed", rubric.checklist_min)
        },
    });

    let passed = details.iter().filter(|d| d.passed).count() as f64;
    StructureReport {
        score: passed.min(rubric.max_score),
        max_score: rubric.max_score,
        details,
    }
}

fn check_field(source: &str, field: &HeaderField) -> StructureCheck {
    let value = field_value(source, &field.key);
    let passed = value
        .as_deref()
        .is_some_and(|v| v.chars().count() > field.min_chars);
    debug!(field = %field.key, ?value, passed, "header field");

    StructureCheck {
        check: field.label.clone(),
        passed,
        message: if passed { "OK" } else { "Not filled in" }.to_string(),
    }
}

/// Trimmed value after the first `<key> :` occurrence, cut at the first `_`.
fn field_value(source: &str, key: &str) -> Option<String> {
    let re = Regex::new(&format!(r"{}[ \t]*:[ \t]*([^\n_]*)", regex::escape(key))).ok()?;
    let value = re.captures(source)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use util::rubric::Rubric;

    fn rubric() -> StructureRubric {
        Rubric::playground_default()
            .structure
            .expect("playground rubric has structure checks")
    }

    const FILLED: &str = "\
// Nom : Dupont
// Prénom : Léa
// Groupe : B2
// Date : 12/03/2026
// [x] Exercice 1
// [X] Exercice 2
// [x] Exercice 3
// [ ] Exercice 4
";

    const TEMPLATE: &str = "\
// Nom : ______________
// Prénom : ___________
// Groupe : ___
// Date : ___
// [ ] Exercice 1
";

    #[test]
    fn test_filled_header_scores_full() {
        let report = check_structure(FILLED, &rubric());
        assert_eq!(report.score, 5.0);
        assert_eq!(report.details.len(), 5);
        assert!(report.details.iter().all(|d| d.passed));
        assert_eq!(report.details[4].message, "3 items checked");
    }

    #[test]
    fn test_template_scores_zero() {
        let report = check_structure(TEMPLATE, &rubric());
        assert_eq!(report.score, 0.0);
        assert_eq!(report.details[0].message, "Not filled in");
        assert_eq!(report.details[4].message, "0 items checked, at least 3 needed");
    }

    #[test]
    fn test_short_name_fails_but_short_group_passes() {
        let source = "// Nom : Li\n// Prénom : Ana\n// Groupe : A\n// Date : x\n";
        let report = check_structure(source, &rubric());
        let passed: Vec<bool> = report.details.iter().map(|d| d.passed).collect();
        assert_eq!(passed, vec![false, true, true, true, false]);
        assert_eq!(report.score, 3.0);
    }

    #[test]
    fn test_value_does_not_continue_on_next_line() {
        let source = "// Nom :\n// Dupont\n";
        assert_eq!(field_value(source, "Nom"), None);
    }

    #[test]
    fn test_prenom_is_not_taken_for_nom() {
        let source = "// Prénom : Léa\n";
        assert_eq!(field_value(source, "Nom"), None);
        assert_eq!(field_value(source, "Prénom").as_deref(), Some("Léa"));
    }
}
