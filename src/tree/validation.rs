use super::query::all_step_ids;
use crate::lifecycle::Lifecycle;
use crate::step::Step;
use ahash::AHashSet;
use serde::Serialize;

/// Every problem found in one validation pass. Validation never stops at the
/// first violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Checks the value-level rules of a single step and, recursively, its sub-steps.
///
/// Id uniqueness is a tree-level rule and is left to
/// [`validate_lifecycle_structure`].
pub fn validate_step_structure(step: &Step) -> ValidationReport {
    let mut errors = Vec::new();

    if step.id.is_empty() {
        errors.push("Step must have a valid string id".to_string());
    }
    if step.title.is_empty() {
        errors.push("Step must have a valid string title".to_string());
    }
    if step.description.is_empty() {
        errors.push("Step must have a valid string description".to_string());
    }
    if step.order < 1 {
        errors.push("Step order must be a positive number".to_string());
    }

    if let Some(sub_steps) = &step.sub_steps {
        for (index, sub_step) in sub_steps.iter().enumerate() {
            let report = validate_step_structure(sub_step);
            if !report.is_valid {
                errors.push(format!("SubStep {}: {}", index, report.errors.join(", ")));
            }
        }
    }

    if let Some(duration) = step.duration {
        if !duration.is_finite() || duration < 0.0 {
            errors.push("Step duration must be a non-negative number".to_string());
        }
    }

    ValidationReport::from_errors(errors)
}

/// Checks a whole lifecycle: every step, id uniqueness across all levels,
/// top-level ordering and the progress counters.
///
/// Only the top level is checked for ordering; sub-step order is not inspected.
pub fn validate_lifecycle_structure(lifecycle: &Lifecycle) -> ValidationReport {
    let mut errors = Vec::new();

    if lifecycle.steps.is_empty() {
        errors.push("Lifecycle must have at least one step".to_string());
    }

    for (index, step) in lifecycle.steps.iter().enumerate() {
        let report = validate_step_structure(step);
        if !report.is_valid {
            errors.push(format!("Step {}: {}", index, report.errors.join(", ")));
        }
    }

    let ids = all_step_ids(&lifecycle.steps);
    let unique: AHashSet<&str> = ids.iter().map(String::as_str).collect();
    if unique.len() != ids.len() {
        errors.push("Duplicate step IDs found in lifecycle".to_string());
    }

    if !lifecycle.steps.is_sorted_by_key(|s| s.order) {
        errors.push("Main steps are not properly ordered".to_string());
    }

    if lifecycle.completed_steps > lifecycle.total_steps {
        errors.push("completedSteps cannot exceed totalSteps".to_string());
    }

    ValidationReport::from_errors(errors)
}
