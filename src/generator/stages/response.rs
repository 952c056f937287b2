use super::{RESPONSE_TOKENS, random_vector, record};
use crate::generator::StageContext;
use crate::generator::math::{round_to, softmax, top_k};
use crate::step::{DataType, Example};
use rand::Rng;
use serde_json::{Value, json};

const CANDIDATES: &[(u32, &str)] = &[
    (100, "I"),
    (101, "Hello"),
    (102, "How"),
    (103, "The"),
    (104, "Sure"),
    (105, "Thanks"),
];
const SAMPLING_TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.9;

pub(crate) fn logits_calculation(ctx: &mut StageContext<'_>) -> Example {
    let vocabulary = ctx.config.logits_vocabulary;
    let logits: Vec<f64> = (0..vocabulary)
        .map(|_| round_to(ctx.rng.random_range(-10.0..10.0), 2))
        .collect();
    let probabilities = softmax(&logits);
    let top_tokens = top_k(&probabilities, ctx.config.top_k);
    let hidden_state = random_vector(&mut ctx.rng, ctx.config.embedding_dimension, 0.0, 1.0);

    Example {
        input_data: record(json!({
            "finalHiddenState": hidden_state,
            "vocabularySize": vocabulary,
            "outputProjection": "linear_layer",
        })),
        output_data: record(json!({
            "logits": logits,
            "probabilities": probabilities,
            "topTokens": top_tokens,
            "temperature": 1.0,
        })),
        explanation: "The final hidden state is projected to vocabulary size, producing \
                      probability scores for each possible next token."
            .to_string(),
        data_type: DataType::Probabilities,
    }
}

/// Nucleus sampling over a small ranked candidate list: the pool is the
/// shortest prefix whose cumulative probability reaches `TOP_P`, and the
/// selected token is drawn from that pool by weight.
pub(crate) fn sampling_strategy(ctx: &mut StageContext<'_>) -> Example {
    let logits: Vec<f64> = CANDIDATES
        .iter()
        .map(|_| ctx.rng.random_range(-2.0..2.0) / SAMPLING_TEMPERATURE)
        .collect();
    let ranked = top_k(&softmax(&logits), CANDIDATES.len());

    let mut cumulative = 0.0;
    let mut pool = Vec::new();
    for entry in &ranked {
        pool.push(*entry);
        cumulative += entry.probability;
        if cumulative >= TOP_P {
            break;
        }
    }

    let pool_mass: f64 = pool.iter().map(|e| e.probability).sum();
    let mut draw = ctx.rng.random_range(0.0..1.0) * pool_mass;
    let mut selected = pool[pool.len() - 1];
    for entry in &pool {
        if draw < entry.probability {
            selected = *entry;
            break;
        }
        draw -= entry.probability;
    }

    let describe = |index: usize, probability: f64| -> Value {
        let (id, token) = CANDIDATES[index];
        json!({ "token": token, "probability": probability, "id": id })
    };
    let ranked_json: Vec<Value> = ranked
        .iter()
        .map(|e| describe(e.index, e.probability))
        .collect();
    let pool_json: Vec<Value> = pool
        .iter()
        .map(|e| describe(e.index, e.probability))
        .collect();

    Example {
        input_data: record(json!({
            "candidates": ranked_json,
            "probabilities": ranked.iter().map(|e| e.probability).collect::<Vec<_>>(),
            "samplingMethod": "top_p",
            "temperature": SAMPLING_TEMPERATURE,
            "topP": TOP_P,
        })),
        output_data: record(json!({
            "selectedToken": describe(selected.index, selected.probability),
            "samplingPool": pool_json,
            "randomSeed": ctx.config.seed,
            "samplingReason": "cumulative_probability_threshold",
        })),
        explanation: "Sampling strategies select the next token from the probability \
                      distribution, balancing randomness and quality."
            .to_string(),
        data_type: DataType::Tokens,
    }
}

pub(crate) fn token_to_text(_ctx: &mut StageContext<'_>) -> Example {
    let tokens: Vec<Value> = RESPONSE_TOKENS
        .iter()
        .map(|(id, token)| json!({ "id": id, "token": token }))
        .collect();
    let text: String = RESPONSE_TOKENS.iter().map(|(_, token)| *token).collect();

    Example {
        input_data: record(json!({
            "selectedTokenIds": RESPONSE_TOKENS.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            "vocabulary": "model_vocabulary",
            "decodingMethod": "greedy",
        })),
        output_data: record(json!({
            "tokens": tokens,
            "reconstructedText": text,
            "postprocessing": ["detokenization", "space_normalization"],
            "characterCount": text.chars().count(),
        })),
        explanation: "Selected token IDs are converted back to text by looking up their string \
                      representations and joining them."
            .to_string(),
        data_type: DataType::Text,
    }
}
