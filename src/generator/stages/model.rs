use super::{framed_sequence, random_vector, record, vocabulary_tokens};
use crate::generator::StageContext;
use crate::generator::math::{mean, round_to, softmax, variance};
use crate::step::{DataType, Example};
use rand::Rng;
use serde_json::json;

const LAYER_NORM_EPSILON: f64 = 1e-5;

pub(crate) fn embedding_lookup(ctx: &mut StageContext<'_>) -> Example {
    let dimension = ctx.config.embedding_dimension;
    let token_ids = framed_sequence(ctx.input, ctx.config.vocabulary_size);
    let embeddings: Vec<Vec<f64>> = token_ids
        .iter()
        .map(|_| random_vector(&mut ctx.rng, dimension, -1.0, 1.0))
        .collect();
    Example {
        input_data: record(json!({
            "tokenIds": token_ids,
            "embeddingDimension": dimension,
            "vocabularySize": ctx.config.vocabulary_size,
        })),
        output_data: record(json!({
            "embeddings": embeddings,
            "embeddingMatrix": "lookup_table",
            "dimensions": [token_ids.len(), dimension],
        })),
        explanation: "Each token ID is converted to a dense vector representation that captures \
                      semantic meaning in high-dimensional space."
            .to_string(),
        data_type: DataType::Embeddings,
    }
}

/// Builds a row-normalized attention matrix over the framed input sequence,
/// truncated to the configured window.
pub(crate) fn attention_computation(ctx: &mut StageContext<'_>) -> Example {
    let mut tokens = vec!["<BOS>".to_string()];
    tokens.extend(vocabulary_tokens(ctx.input));
    tokens.push("<EOS>".to_string());
    tokens.truncate(ctx.config.max_sequence_length.max(1));
    let seq_length = tokens.len();

    let weights: Vec<Vec<f64>> = (0..seq_length)
        .map(|_| {
            let scores: Vec<f64> = (0..seq_length)
                .map(|_| ctx.rng.random_range(-2.0..2.0))
                .collect();
            softmax(&scores)
        })
        .collect();
    let flat: Vec<f64> = weights.iter().flatten().copied().collect();
    let max_attention = flat.iter().copied().fold(0.0, f64::max);

    Example {
        input_data: record(json!({
            "tokens": tokens,
            "queries": vec!["Q_vector"; seq_length],
            "keys": vec!["K_vector"; seq_length],
            "values": vec!["V_vector"; seq_length],
            "sequenceLength": seq_length,
        })),
        output_data: record(json!({
            "attentionWeights": weights,
            "attendedValues": vec!["attended_vector"; seq_length],
            "maxAttention": max_attention,
            "avgAttention": round_to(mean(&flat), 4),
        })),
        explanation: "Attention mechanism computes how much each token should focus on every \
                      other token in the sequence."
            .to_string(),
        data_type: DataType::Attention,
    }
}

/// A toy two-layer perceptron with ReLU, small enough to run for real.
pub(crate) fn feed_forward(ctx: &mut StageContext<'_>) -> Example {
    let input_dim = ctx.config.embedding_dimension;
    let hidden_dim = input_dim.saturating_mul(4);
    let input_vector = random_vector(&mut ctx.rng, input_dim, 0.0, 1.0);

    let hidden: Vec<f64> = (0..hidden_dim)
        .map(|_| {
            let pre: f64 = input_vector
                .iter()
                .map(|x| x * ctx.rng.random_range(-0.5..0.5))
                .sum();
            pre.max(0.0)
        })
        .collect();
    let output_vector: Vec<f64> = (0..input_dim)
        .map(|_| {
            let out: f64 = hidden
                .iter()
                .map(|h| h * ctx.rng.random_range(-0.5..0.5))
                .sum();
            round_to(out, 2)
        })
        .collect();
    let non_zero = hidden.iter().filter(|h| **h > 0.0).count();

    Example {
        input_data: record(json!({
            "inputVector": input_vector,
            "inputDimension": input_dim,
            "hiddenDimension": hidden_dim,
        })),
        output_data: record(json!({
            "outputVector": output_vector,
            "activation": "ReLU",
            "layersApplied": ["linear_1", "activation", "linear_2"],
            "nonZeroNeurons": non_zero,
        })),
        explanation: "Feed-forward networks process each position independently through \
                      multi-layer perceptrons with non-linear activations."
            .to_string(),
        data_type: DataType::Embeddings,
    }
}

pub(crate) fn layer_normalization(ctx: &mut StageContext<'_>) -> Example {
    let vector = random_vector(&mut ctx.rng, ctx.config.embedding_dimension, 0.0, 1.0);
    let center = mean(&vector);
    let spread = variance(&vector);
    let denominator = (spread + LAYER_NORM_EPSILON).sqrt();
    let normalized: Vec<f64> = vector
        .iter()
        .map(|x| round_to((x - center) / denominator, 2))
        .collect();

    Example {
        input_data: record(json!({
            "unnormalizedVector": vector,
            "mean": round_to(center, 4),
            "variance": round_to(spread, 4),
        })),
        output_data: record(json!({
            "normalizedVector": normalized,
            "gamma": 1.0,
            "beta": 0.0,
            "epsilon": LAYER_NORM_EPSILON,
        })),
        explanation: "Layer normalization stabilizes training by normalizing inputs to have zero \
                      mean and unit variance."
            .to_string(),
        data_type: DataType::Embeddings,
    }
}
