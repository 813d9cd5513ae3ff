use serde::{Deserialize, Serialize};
use std::{fmt, fs, io::Write, path::Path};
use tracing::debug;

use crate::paths::ensure_parent_dir;

/// A complete grading rubric for one source file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rubric {
    pub name: String,
    /// Upper bound of the unit subtotal.
    pub max_score: f64,
    /// Default fraction of patterns that must be found (0.0 - 1.0).
    pub threshold: f64,
    /// When true a single leading `$` of a literal pattern is optional.
    #[serde(default)]
    pub sigil_optional: bool,
    /// Word that, as the first word of a line comment, marks a unit as not done.
    #[serde(default)]
    pub pending_marker: Option<String>,
    pub units: Vec<GradableUnit>,
    #[serde(default)]
    pub structure: Option<StructureRubric>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradableUnit {
    pub id: String,
    pub label: String,
    pub locator: Locator,
    pub patterns: Vec<Pattern>,
    pub points: f64,
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Bonus units are graded and reported, but add no points and do not count
    /// toward the implemented total.
    #[serde(default = "default_counted")]
    pub counted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Locator {
    /// `<method>('<path>'` up to the next `<method>`; optionally narrowed to the
    /// `const <binding> = [ ... ];` array inside it.
    Route {
        method: String,
        path: String,
        #[serde(default)]
        binding: Option<String>,
    },
    /// `// <heading> :` comment line up to the next heading of the same class.
    Section { heading: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Pattern {
    Literal(String),
    Regex { regex: String },
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => write!(f, "{text}"),
            Pattern::Regex { regex } => write!(f, "/{regex}/"),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::Literal(text.to_string())
    }
}

/// Header checks on the graded file (student name, group, checklist).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructureRubric {
    pub max_score: f64,
    pub fields: Vec<HeaderField>,
    /// Minimum number of `[x]` marks for the checklist point.
    pub checklist_min: usize,
    pub checklist_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderField {
    /// Text before the colon, e.g. `Nom`.
    pub key: String,
    pub label: String,
    /// The trimmed value must be strictly longer than this.
    pub min_chars: usize,
}

fn default_counted() -> bool {
    true
}

impl Rubric {
    pub fn threshold_for(&self, unit: &GradableUnit) -> f64 {
        unit.threshold.unwrap_or(self.threshold)
    }

    /// Number of units that count toward the implemented total.
    pub fn counted_units(&self) -> usize {
        self.units.iter().filter(|u| u.counted).count()
    }

    /// Checks thresholds, point values and unit ids.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!("Rubric threshold {} is outside 0..=1", self.threshold));
        }
        if self.max_score < 0.0 {
            return Err("Rubric max_score must not be negative".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for unit in &self.units {
            if !seen.insert(unit.id.as_str()) {
                return Err(format!("Duplicate unit id '{}'", unit.id));
            }
            if unit.points < 0.0 {
                return Err(format!("Unit '{}' has negative points", unit.id));
            }
            if let Some(t) = unit.threshold {
                if !(0.0..=1.0).contains(&t) {
                    return Err(format!("Unit '{}' threshold {t} is outside 0..=1", unit.id));
                }
            }
        }
        Ok(())
    }
}

/// Read a rubric JSON file and validate it.
pub fn load_rubric(path: &Path) -> Result<Rubric, String> {
    use std::io::ErrorKind;

    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = match e.kind() {
                ErrorKind::NotFound => "Rubric file not found".to_string(),
                ErrorKind::PermissionDenied => "Permission denied reading rubric".to_string(),
                ErrorKind::InvalidData => "Rubric file is not valid UTF-8".to_string(),
                _ => format!("Failed to read rubric ({})", e.kind()),
            };
            return Err(msg);
        }
    };

    let rubric = serde_json::from_str::<Rubric>(&s)
        .map_err(|e| format!("Invalid rubric JSON: {e}"))?;
    rubric.validate()?;
    debug!("Loaded rubric '{}' with {} units", rubric.name, rubric.units.len());
    Ok(rubric)
}

/// Save a rubric as pretty JSON (atomic-ish write).
pub fn save_rubric(path: &Path, rubric: &Rubric) -> Result<(), String> {
    ensure_parent_dir(path).map_err(|_| "Failed to prepare rubric directory".to_string())?;

    let pretty = serde_json::to_string_pretty(rubric)
        .map_err(|_| "Failed to serialize rubric".to_string())?;

    let mut tmp = path.to_path_buf();
    let fname = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("rubric.json");
    tmp.set_file_name(format!("{fname}.tmp"));
    {
        let mut f = fs::File::create(&tmp).map_err(|_| "Failed to create temp file".to_string())?;
        f.write_all(pretty.as_bytes())
            .map_err(|_| "Failed to write temp file".to_string())?;
        f.flush().map_err(|_| "Failed to flush temp file".to_string())?;
    }
    fs::rename(&tmp, path).map_err(|_| "Failed to move temp file into place".to_string())?;
    Ok(())
}
