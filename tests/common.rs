//! Common test utilities for building step trees and lifecycle documents.
use llm_lifecycle::prelude::*;

/// A three-level tree in pre-order: a, a1, a1x, a2, b, b1.
#[allow(dead_code)]
pub fn create_nested_steps() -> Vec<Step> {
    vec![
        Step::new("a", "Alpha", "First main step", 1)
            .with_expandable(true)
            .with_duration(100.0)
            .with_sub_steps(vec![
                Step::new("a1", "Alpha One", "Nested under alpha", 1)
                    .with_duration(40.0)
                    .with_sub_steps(vec![
                        Step::new("a1x", "Deep Leaf", "Third level", 1).with_duration(10.0),
                    ]),
                Step::new("a2", "Alpha Two", "Second child of alpha", 2).with_duration(60.0),
            ]),
        Step::new("b", "Beta", "Second main step", 2)
            .with_expandable(true)
            .with_sub_steps(vec![Step::new("b1", "Beta One", "Only child of beta", 1)]),
    ]
}

/// A tree where `dup` appears both at the top level and nested under `x`.
#[allow(dead_code)]
pub fn create_duplicate_id_steps() -> Vec<Step> {
    vec![
        Step::new("dup", "First Dup", "Top level occurrence", 1),
        Step::new("x", "Holder", "Holds the second occurrence", 2).with_sub_steps(vec![
            Step::new("dup", "Second Dup", "Nested occurrence", 1),
        ]),
    ]
}

/// Top-level steps listed out of order.
#[allow(dead_code)]
pub fn create_out_of_order_steps() -> Vec<Step> {
    vec![
        Step::new("late", "Late", "Has order two", 2),
        Step::new("early", "Early", "Has order one", 1),
    ]
}

/// Wraps `steps` in a lifecycle document with consistent counters.
#[allow(dead_code)]
pub fn create_lifecycle(steps: Vec<Step>) -> Lifecycle {
    let total_steps = flatten_steps(&steps).len();
    Lifecycle {
        current_step_id: steps.first().map(|s| s.id.clone()),
        steps,
        user_input: Some("Hello, how are you?".to_string()),
        generated_examples: Default::default(),
        total_steps,
        completed_steps: 0,
    }
}

/// A lifecycle document as another client might have written it: no
/// `generatedExamples`, a nested sub-step and one completed step.
#[allow(dead_code)]
pub const MINIMAL_LIFECYCLE_JSON: &str = r#"
{
  "steps": [
    {
      "id": "input-processing",
      "title": "Input Processing",
      "description": "Initial processing",
      "order": 1,
      "expandable": true,
      "status": "completed",
      "subSteps": [
        {
          "id": "prompt-reception",
          "title": "Prompt Reception",
          "description": "Receiving the prompt",
          "order": 1,
          "expandable": false,
          "duration": 100,
          "visualization": { "type": "flow", "interactive": true }
        }
      ]
    }
  ],
  "currentStepId": "prompt-reception",
  "userInput": "Hi there",
  "totalSteps": 2,
  "completedSteps": 1
}
"#;
