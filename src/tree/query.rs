use crate::lifecycle::Lifecycle;
use crate::step::{Step, StepStatus};

/// Pre-order walk over a step forest, yielding each step with its nesting depth.
///
/// A parent is yielded before its children, and a whole subtree before the
/// next sibling. This order is the canonical next/previous sequence.
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a Step)>,
}

impl<'a> PreOrder<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Self {
            stack: steps.iter().rev().map(|s| (0, s)).collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a Step);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, step) = self.stack.pop()?;
        self.stack
            .extend(step.children().iter().rev().map(|c| (depth + 1, c)));
        Some((depth, step))
    }
}

/// Every id in the forest, in pre-order. Duplicates are kept.
pub fn all_step_ids(steps: &[Step]) -> Vec<String> {
    PreOrder::new(steps).map(|(_, s)| s.id.clone()).collect()
}

/// Every step in the forest, in pre-order.
pub fn flatten_steps(steps: &[Step]) -> Vec<&Step> {
    PreOrder::new(steps).map(|(_, s)| s).collect()
}

/// First step (in pre-order) carrying `id`.
pub fn find_step<'a>(id: &str, steps: &'a [Step]) -> Option<&'a Step> {
    PreOrder::new(steps).map(|(_, s)| s).find(|s| s.id == id)
}

/// Nesting level of `id`: 0 for a top-level step, `None` when absent.
pub fn step_depth(id: &str, steps: &[Step]) -> Option<usize> {
    PreOrder::new(steps)
        .find(|(_, s)| s.id == id)
        .map(|(depth, _)| depth)
}

/// Ids from the root ancestor down to and including `id`.
pub fn step_path(id: &str, steps: &[Step]) -> Option<Vec<String>> {
    for step in steps {
        if step.id == id {
            return Some(vec![step.id.clone()]);
        }
        if let Some(mut tail) = step_path(id, step.children()) {
            tail.insert(0, step.id.clone());
            return Some(tail);
        }
    }
    None
}

/// The immediate parent of `id`; `None` for top-level steps and unknown ids.
pub fn parent_step<'a>(id: &str, steps: &'a [Step]) -> Option<&'a Step> {
    for step in steps {
        let children = step.children();
        if children.iter().any(|c| c.id == id) {
            return Some(step);
        }
        if let Some(parent) = parent_step(id, children) {
            return Some(parent);
        }
    }
    None
}

/// Steps sharing a parent with `id`, excluding `id` itself.
pub fn sibling_steps<'a>(id: &str, steps: &'a [Step]) -> Vec<&'a Step> {
    if steps.iter().any(|s| s.id == id) {
        return steps.iter().filter(|s| s.id != id).collect();
    }
    for step in steps {
        let siblings = sibling_steps(id, step.children());
        if !siblings.is_empty() {
            return siblings;
        }
    }
    Vec::new()
}

/// Every step, at any depth, whose status is explicitly `status`.
pub fn steps_by_status(steps: &[Step], status: StepStatus) -> Vec<&Step> {
    PreOrder::new(steps)
        .map(|(_, s)| s)
        .filter(|s| s.status == Some(status))
        .collect()
}

/// The id following `id` in pre-order, or `None` at the end or for unknown ids.
pub fn next_step_id(id: &str, steps: &[Step]) -> Option<String> {
    let flat = flatten_steps(steps);
    let index = flat.iter().position(|s| s.id == id)?;
    flat.get(index + 1).map(|s| s.id.clone())
}

/// The id preceding `id` in pre-order, or `None` at the start or for unknown ids.
pub fn previous_step_id(id: &str, steps: &[Step]) -> Option<String> {
    let flat = flatten_steps(steps);
    let index = flat.iter().position(|s| s.id == id)?;
    index.checked_sub(1).map(|i| flat[i].id.clone())
}

/// Deep, independent copy of a step and everything below it.
pub fn clone_step(step: &Step) -> Step {
    step.clone()
}

/// Deep, independent copy of a lifecycle, including its example map.
pub fn clone_lifecycle(lifecycle: &Lifecycle) -> Lifecycle {
    lifecycle.clone()
}
