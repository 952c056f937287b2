use super::arena::{StepArena, StepView};
use super::document::Lifecycle;
use crate::error::{GenerationError, NavigationError};
use crate::generator::ExampleGenerator;
use crate::step::{Example, Step, StepStatus};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

/// Completion counters of a lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `round(100 * completed / total)`, 0 when there are no steps.
    pub percentage: u32,
}

/// Stateful controller over one step tree: cursor, per-step status,
/// completion counter and the generated-example cache.
///
/// The tree's shape is fixed at construction; only `status`, `expandable`
/// and `real_data_example` of existing steps change afterwards. The cursor
/// is kept as an id so it survives export and import.
#[derive(Debug, Clone)]
pub struct LifecycleManager {
    arena: StepArena,
    current_step_id: Option<String>,
    user_input: Option<String>,
    generated_examples: IndexMap<String, Example>,
    total_steps: usize,
    completed_steps: usize,
}

impl LifecycleManager {
    /// Wraps `steps`, placing the cursor on the first top-level step.
    /// Statuses are kept as supplied.
    pub fn new(steps: Vec<Step>, user_input: Option<String>) -> Self {
        let current_step_id = steps.first().map(|s| s.id.clone());
        let arena = StepArena::from_steps(steps);
        let total_steps = arena.len();
        debug!(total_steps, "Created lifecycle manager");

        Self {
            arena,
            current_step_id,
            user_input,
            generated_examples: IndexMap::new(),
            total_steps,
            completed_steps: 0,
        }
    }

    /// Restores a manager from a lifecycle document, keeping its cursor,
    /// counters, user input and example cache as they were recorded.
    pub fn from_lifecycle(lifecycle: Lifecycle) -> Self {
        Self {
            arena: StepArena::from_steps(lifecycle.steps),
            current_step_id: lifecycle.current_step_id,
            user_input: lifecycle.user_input,
            generated_examples: lifecycle.generated_examples,
            total_steps: lifecycle.total_steps,
            completed_steps: lifecycle.completed_steps,
        }
    }

    /// A snapshot of the whole aggregate in its nested exchange shape.
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle {
            steps: self.arena.to_steps(),
            current_step_id: self.current_step_id.clone(),
            user_input: self.user_input.clone(),
            generated_examples: self.generated_examples.clone(),
            total_steps: self.total_steps,
            completed_steps: self.completed_steps,
        }
    }

    pub fn steps(&self) -> Vec<Step> {
        self.arena.to_steps()
    }

    pub fn find_step(&self, id: &str) -> Option<StepView<'_>> {
        self.arena
            .position(id)
            .map(|p| StepView::new(&self.arena, p))
    }

    /// Every step in pre-order.
    pub fn flattened(&self) -> impl Iterator<Item = StepView<'_>> {
        (0..self.arena.len()).map(|p| StepView::new(&self.arena, p))
    }

    pub fn main_steps(&self) -> impl Iterator<Item = StepView<'_>> {
        self.arena
            .roots()
            .iter()
            .map(|&r| StepView::new(&self.arena, r))
    }

    pub fn current_step_id(&self) -> Option<&str> {
        self.current_step_id.as_deref()
    }

    /// The step under the cursor; `None` when the cursor is unset or stale.
    pub fn current_step(&self) -> Option<StepView<'_>> {
        self.current_step_id
            .as_deref()
            .and_then(|id| self.find_step(id))
    }

    pub fn navigate_to_step(&mut self, step_id: &str) -> Result<StepView<'_>, NavigationError> {
        let Some(position) = self.arena.position(step_id) else {
            warn!(step_id, "Navigation target not found");
            return Err(NavigationError::StepNotFound(step_id.to_string()));
        };
        self.current_step_id = Some(step_id.to_string());
        debug!(step_id, "Navigated to step");
        Ok(StepView::new(&self.arena, position))
    }

    /// Moves the cursor one step forward in pre-order across the whole tree.
    pub fn navigate_to_next(&mut self) -> Result<StepView<'_>, NavigationError> {
        let position = self.current_position()?;
        if position + 1 >= self.arena.len() {
            return Err(NavigationError::AtLastStep);
        }
        Ok(self.move_cursor(position + 1))
    }

    /// Moves the cursor one step back in pre-order across the whole tree.
    pub fn navigate_to_previous(&mut self) -> Result<StepView<'_>, NavigationError> {
        let position = self.current_position()?;
        if position == 0 {
            return Err(NavigationError::AtFirstStep);
        }
        Ok(self.move_cursor(position - 1))
    }

    fn current_position(&self) -> Result<usize, NavigationError> {
        self.current_step_id
            .as_deref()
            .and_then(|id| self.arena.position(id))
            .ok_or(NavigationError::CurrentStepNotFound)
    }

    fn move_cursor(&mut self, position: usize) -> StepView<'_> {
        let id = self.arena.node(position).step.id.clone();
        debug!(step_id = %id, "Moved cursor");
        self.current_step_id = Some(id);
        StepView::new(&self.arena, position)
    }

    /// Marks a step completed. The counter grows at most once per step;
    /// returns `false` only for an unknown id.
    pub fn mark_step_completed(&mut self, step_id: &str) -> bool {
        let Some(position) = self.arena.position(step_id) else {
            warn!(step_id, "Cannot complete unknown step");
            return false;
        };
        let step = self.arena.step_mut(position);
        if step.status != Some(StepStatus::Completed) {
            step.status = Some(StepStatus::Completed);
            self.completed_steps += 1;
            debug!(step_id, completed = self.completed_steps, "Step completed");
        }
        true
    }

    /// Makes `step_id` the single active step.
    ///
    /// Every step that is not completed is first reset to pending. The reset
    /// happens even when `step_id` is unknown, in which case `false` is returned.
    pub fn mark_step_active(&mut self, step_id: &str) -> bool {
        for node in self.arena.nodes_mut() {
            if node.step.status != Some(StepStatus::Completed) {
                node.step.status = Some(StepStatus::Pending);
            }
        }

        let Some(position) = self.arena.position(step_id) else {
            warn!(step_id, "Cannot activate unknown step");
            return false;
        };
        self.arena.step_mut(position).status = Some(StepStatus::Active);
        true
    }

    pub fn progress(&self) -> Progress {
        let percentage = if self.total_steps > 0 {
            (self.completed_steps as f64 / self.total_steps as f64 * 100.0).round() as u32
        } else {
            0
        };
        Progress {
            completed: self.completed_steps,
            total: self.total_steps,
            percentage,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    pub fn user_input(&self) -> Option<&str> {
        self.user_input.as_deref()
    }

    /// Replaces the stored input. Cached examples are left untouched.
    pub fn update_user_input(&mut self, input: impl Into<String>) {
        self.user_input = Some(input.into());
    }

    pub fn add_generated_example(&mut self, step_id: impl Into<String>, example: Example) {
        let step_id = step_id.into();
        debug!(step_id = %step_id, data_type = %example.data_type, "Cached example");
        self.generated_examples.insert(step_id, example);
    }

    pub fn generated_example(&self, step_id: &str) -> Option<&Example> {
        self.generated_examples.get(step_id)
    }

    pub fn generated_examples(&self) -> &IndexMap<String, Example> {
        &self.generated_examples
    }

    /// Generates an example for `step_id` with `generator` and caches it,
    /// replacing any earlier entry for that id.
    pub fn generate_example(
        &mut self,
        step_id: &str,
        generator: &ExampleGenerator,
    ) -> Result<&Example, GenerationError> {
        let example = generator.generate_example_for_step(step_id)?;
        self.add_generated_example(step_id, example);
        self.generated_examples
            .get(step_id)
            .ok_or_else(|| GenerationError::NoGenerator(step_id.to_string()))
    }

    /// Generates and caches an example for the step under the cursor.
    pub fn generate_example_for_current(
        &mut self,
        generator: &ExampleGenerator,
    ) -> Result<&Example, GenerationError> {
        let step_id = self
            .current_step()
            .map(|s| s.id().to_string())
            .ok_or(GenerationError::NoCurrentStep)?;
        self.generate_example(&step_id, generator)
    }

    /// Stores `example` on the step itself. This per-step slot is separate
    /// from the manager's example map.
    pub fn attach_example(&mut self, step_id: &str, example: Example) -> bool {
        match self.arena.position(step_id) {
            Some(position) => {
                self.arena.step_mut(position).real_data_example = Some(example);
                true
            }
            None => false,
        }
    }

    /// Steps whose nesting level is exactly `depth`, in pre-order.
    pub fn steps_by_depth(&self, depth: usize) -> Vec<StepView<'_>> {
        self.arena
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.depth == depth)
            .map(|(p, _)| StepView::new(&self.arena, p))
            .collect()
    }

    pub fn expand_step(&mut self, step_id: &str) -> bool {
        self.set_expandable(step_id, true)
    }

    pub fn collapse_step(&mut self, step_id: &str) -> bool {
        self.set_expandable(step_id, false)
    }

    fn set_expandable(&mut self, step_id: &str, expandable: bool) -> bool {
        match self.arena.position(step_id) {
            Some(position) => {
                self.arena.step_mut(position).expandable = expandable;
                true
            }
            None => false,
        }
    }
}
