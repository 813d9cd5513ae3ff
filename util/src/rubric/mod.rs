//! Grading rubrics: which sections of a source file are graded, how they are
//! located, and which patterns each must contain.

pub mod defaults;
pub mod rubric;

pub use rubric::{
    GradableUnit, HeaderField, Locator, Pattern, Rubric, StructureRubric, load_rubric, save_rubric,
};
