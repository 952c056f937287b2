use super::manager::LifecycleManager;
use crate::step::{Step, VisualizationType};
use crate::tree::create_step_summary;
use serde::Serialize;

fn main_step(
    id: &str,
    title: &str,
    description: &str,
    order: u32,
    duration: f64,
    kind: VisualizationType,
    sub_steps: Vec<Step>,
) -> Step {
    Step::new(id, title, description, order)
        .with_expandable(true)
        .with_duration(duration)
        .with_visualization(kind)
        .with_sub_steps(sub_steps)
}

fn sub_step(
    id: &str,
    title: &str,
    description: &str,
    order: u32,
    duration: f64,
    kind: VisualizationType,
) -> Step {
    Step::new(id, title, description, order)
        .with_duration(duration)
        .with_visualization(kind)
}

/// The built-in five-stage pipeline: 5 main steps and 16 sub-steps.
///
/// Main steps are expandable, sub-steps are not. Every id is unique and
/// `order` runs from 1 at each level.
pub fn default_steps() -> Vec<Step> {
    use VisualizationType::*;

    vec![
        main_step(
            "input-processing",
            "Input Processing",
            "Initial processing of the user prompt including validation and preparation",
            1,
            500.0,
            Flow,
            vec![
                sub_step(
                    "prompt-reception",
                    "Prompt Reception",
                    "Receiving and validating the input prompt",
                    1,
                    100.0,
                    Flow,
                ),
                sub_step(
                    "safety-filtering",
                    "Safety Filtering",
                    "Checking prompt for safety and policy compliance",
                    2,
                    200.0,
                    Flow,
                ),
                sub_step(
                    "preprocessing",
                    "Text Preprocessing",
                    "Normalizing and preparing text for tokenization",
                    3,
                    200.0,
                    Sequence,
                ),
            ],
        ),
        main_step(
            "tokenization",
            "Tokenization",
            "Converting text into tokens that the model can understand",
            2,
            800.0,
            Sequence,
            vec![
                sub_step(
                    "byte-pair-encoding",
                    "Byte Pair Encoding",
                    "Breaking text into subword units using BPE algorithm",
                    1,
                    300.0,
                    Sequence,
                ),
                sub_step(
                    "vocabulary-lookup",
                    "Vocabulary Lookup",
                    "Converting subwords to token IDs using model vocabulary",
                    2,
                    200.0,
                    Matrix,
                ),
                sub_step(
                    "special-tokens",
                    "Special Token Handling",
                    "Adding special tokens for sequence structure",
                    3,
                    300.0,
                    Sequence,
                ),
            ],
        ),
        main_step(
            "model-processing",
            "Model Processing",
            "Processing tokens through the transformer neural network",
            3,
            2000.0,
            Graph,
            vec![
                sub_step(
                    "embedding-lookup",
                    "Embedding Lookup",
                    "Converting token IDs to high-dimensional vectors",
                    1,
                    300.0,
                    Matrix,
                ),
                sub_step(
                    "attention-computation",
                    "Attention Computation",
                    "Computing attention weights between tokens",
                    2,
                    800.0,
                    Matrix,
                ),
                sub_step(
                    "feed-forward",
                    "Feed Forward Networks",
                    "Processing through feed-forward neural networks",
                    3,
                    600.0,
                    Graph,
                ),
                sub_step(
                    "layer-normalization",
                    "Layer Normalization",
                    "Normalizing outputs between transformer layers",
                    4,
                    300.0,
                    Flow,
                ),
            ],
        ),
        main_step(
            "response-generation",
            "Response Generation",
            "Generating output tokens and converting back to text",
            4,
            1000.0,
            Flow,
            vec![
                sub_step(
                    "logits-calculation",
                    "Logits Calculation",
                    "Computing probability scores for next tokens",
                    1,
                    300.0,
                    Matrix,
                ),
                sub_step(
                    "sampling-strategy",
                    "Sampling Strategy",
                    "Selecting next tokens using sampling algorithms",
                    2,
                    400.0,
                    Graph,
                ),
                sub_step(
                    "token-to-text",
                    "Token to Text Conversion",
                    "Converting selected tokens back to readable text",
                    3,
                    300.0,
                    Sequence,
                ),
            ],
        ),
        main_step(
            "output-processing",
            "Output Processing",
            "Final processing and validation of the generated response",
            5,
            400.0,
            Flow,
            vec![
                sub_step(
                    "response-formatting",
                    "Response Formatting",
                    "Formatting the response for presentation",
                    1,
                    100.0,
                    Flow,
                ),
                sub_step(
                    "output-safety",
                    "Output Safety Filtering",
                    "Final safety check on generated content",
                    2,
                    200.0,
                    Flow,
                ),
                sub_step(
                    "final-validation",
                    "Final Validation",
                    "Ensuring response quality and completeness",
                    3,
                    100.0,
                    Flow,
                ),
            ],
        ),
    ]
}

/// A manager over [`default_steps`].
pub fn create_default_lifecycle(user_input: Option<String>) -> LifecycleManager {
    LifecycleManager::new(default_steps(), user_input)
}

/// One main step as listed in a [`LifecycleOverview`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainStepOverview {
    pub id: String,
    pub title: String,
    pub description: String,
    pub sub_step_count: usize,
    pub estimated_duration: f64,
}

/// A compact description of the default pipeline for index pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleOverview {
    pub total_steps: usize,
    pub estimated_duration: f64,
    pub main_steps: Vec<MainStepOverview>,
}

pub fn lifecycle_overview() -> LifecycleOverview {
    let steps = default_steps();
    let summary = create_step_summary(&steps);
    let main_steps = steps
        .iter()
        .map(|step| MainStepOverview {
            id: step.id.clone(),
            title: step.title.clone(),
            description: step.description.clone(),
            sub_step_count: step.children().len(),
            estimated_duration: step.duration.unwrap_or(0.0),
        })
        .collect();

    LifecycleOverview {
        total_steps: summary.total_steps,
        estimated_duration: summary.estimated_duration,
        main_steps,
    }
}
