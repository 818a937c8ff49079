//! Grading: result-set equivalence checking and the workflow around it.

mod checker;
mod workflow;

pub use checker::{is_equivalent, CheckOptions};
pub use workflow::{grade, grade_with_client, GradeOptions, GradeOutcome};
