use super::query::{PreOrder, flatten_steps, step_depth};
use crate::step::{Step, Visualization, VisualizationOverride};
use serde::Serialize;

/// Shape statistics for a step forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub total_steps: usize,
    pub main_steps: usize,
    pub sub_steps: usize,
    pub max_depth: usize,
    pub estimated_duration: f64,
}

/// Sum of every `duration` in the forest; a missing duration counts as 0.
pub fn calculate_total_duration(steps: &[Step]) -> f64 {
    PreOrder::new(steps)
        .filter_map(|(_, s)| s.duration)
        .sum()
}

pub fn create_step_summary(steps: &[Step]) -> StepSummary {
    let flattened = flatten_steps(steps);
    let main_steps = steps.len();
    let max_depth = flattened
        .iter()
        .filter_map(|s| step_depth(&s.id, steps))
        .max()
        .unwrap_or(0);

    StepSummary {
        total_steps: flattened.len(),
        main_steps,
        sub_steps: flattened.len() - main_steps,
        max_depth,
        estimated_duration: calculate_total_duration(steps),
    }
}

/// Case-insensitive substring search over titles and descriptions, at every depth.
pub fn search_steps<'a>(steps: &'a [Step], query: &str) -> Vec<&'a Step> {
    let query = query.to_lowercase();
    PreOrder::new(steps)
        .map(|(_, s)| s)
        .filter(|s| {
            s.title.to_lowercase().contains(&query)
                || s.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// Applies `overrides` on top of `base`. Renderer settings merge key by key,
/// with the override winning on conflicts.
pub fn merge_visualization_configs(
    base: &Visualization,
    overrides: &VisualizationOverride,
) -> Visualization {
    let mut config = base.config.clone();
    for (key, value) in &overrides.config {
        config.insert(key.clone(), value.clone());
    }

    Visualization {
        kind: overrides.kind.unwrap_or(base.kind),
        interactive: overrides.interactive.unwrap_or(base.interactive),
        config,
    }
}
