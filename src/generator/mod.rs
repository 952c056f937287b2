//! Synthesizes illustrative input/output data for each pipeline stage.
//!
//! Nothing here runs a model. Numbers are simulated with bounded randomness,
//! except where a stage performs a small real computation (softmax, layer
//! normalization, a toy feed-forward pass) to keep the output self-consistent.

use crate::config::{DEFAULT_USER_INPUT, GeneratorConfig};
use crate::error::{GenerationError, UnknownStage};
use crate::step::{Example, ExampleGenerationRequest, ExampleGenerationResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

pub mod math;
mod stages;

pub use math::{RankedProbability, round_to, softmax, top_k};

/// Everything a stage generator may read, plus the randomness it may draw from.
pub(crate) struct StageContext<'a> {
    pub(crate) input: &'a str,
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) rng: StdRng,
}

type StageFn = fn(&mut StageContext<'_>) -> Example;

/// Defines the closed set of stages, their wire ids and their generators.
macro_rules! define_stages {
    ( $( ($variant:ident, $id:literal, $generator:path) ),* $(,)? ) => {
        /// The sixteen pipeline stages that have a built-in example generator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StageId {
            $( $variant, )*
        }

        impl StageId {
            pub const ALL: &'static [StageId] = &[ $( StageId::$variant, )* ];

            /// The step id this stage is addressed by.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( StageId::$variant => $id, )*
                }
            }

            fn generator(self) -> StageFn {
                match self {
                    $( StageId::$variant => $generator, )*
                }
            }
        }

        impl FromStr for StageId {
            type Err = UnknownStage;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $id => Ok(StageId::$variant), )*
                    other => Err(UnknownStage(other.to_string())),
                }
            }
        }
    };
}

define_stages! {
    (PromptReception, "prompt-reception", stages::input::prompt_reception),
    (SafetyFiltering, "safety-filtering", stages::input::safety_filtering),
    (Preprocessing, "preprocessing", stages::input::preprocessing),
    (BytePairEncoding, "byte-pair-encoding", stages::tokenization::byte_pair_encoding),
    (VocabularyLookup, "vocabulary-lookup", stages::tokenization::vocabulary_lookup),
    (SpecialTokens, "special-tokens", stages::tokenization::special_tokens),
    (EmbeddingLookup, "embedding-lookup", stages::model::embedding_lookup),
    (AttentionComputation, "attention-computation", stages::model::attention_computation),
    (FeedForward, "feed-forward", stages::model::feed_forward),
    (LayerNormalization, "layer-normalization", stages::model::layer_normalization),
    (LogitsCalculation, "logits-calculation", stages::response::logits_calculation),
    (SamplingStrategy, "sampling-strategy", stages::response::sampling_strategy),
    (TokenToText, "token-to-text", stages::response::token_to_text),
    (ResponseFormatting, "response-formatting", stages::output::response_formatting),
    (OutputSafety, "output-safety", stages::output::output_safety),
    (FinalValidation, "final-validation", stages::output::final_validation),
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces stage examples from a single free-text input.
///
/// Changing the input with [`update_user_input`](Self::update_user_input)
/// only affects examples generated afterwards.
#[derive(Debug, Clone)]
pub struct ExampleGenerator {
    user_input: String,
    config: GeneratorConfig,
}

impl Default for ExampleGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_USER_INPUT)
    }
}

impl ExampleGenerator {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            config: GeneratorConfig::default(),
        }
    }

    /// A generator driven by `config`, starting from its default input.
    ///
    /// Sizes outside their bounds are clamped; use
    /// [`GeneratorConfig::validate`] to reject them instead.
    pub fn with_config(config: GeneratorConfig) -> Self {
        let config = config.clamped();
        Self {
            user_input: config.default_input.clone(),
            config,
        }
    }

    /// Makes every example reproducible for a given input.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn update_user_input(&mut self, new_input: impl Into<String>) {
        self.user_input = new_input.into();
    }

    /// Looks up the generator for `step_id` and runs it.
    ///
    /// Unknown ids are reported as [`GenerationError::NoGenerator`]; this never panics.
    pub fn generate_example_for_step(&self, step_id: &str) -> Result<Example, GenerationError> {
        let stage = step_id.parse::<StageId>().inspect_err(|_| {
            warn!(step_id, "No example generator registered for step");
        })?;
        Ok(self.generate(stage))
    }

    /// Runs the generator of a known stage.
    pub fn generate(&self, stage: StageId) -> Example {
        let mut ctx = StageContext {
            input: &self.user_input,
            config: &self.config,
            rng: self.rng(),
        };
        let example = (stage.generator())(&mut ctx);
        debug!(stage = %stage, data_type = %example.data_type, "Generated example");
        example
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Builds a throwaway generator for one request. Nothing is cached.
pub fn generate_example_for_request(request: &ExampleGenerationRequest) -> ExampleGenerationResult {
    let generator = match &request.user_input {
        Some(input) => ExampleGenerator::new(input.clone()),
        None => ExampleGenerator::default(),
    };
    generator.generate_example_for_step(&request.step_id).into()
}
