use super::{BOS_ID, EOS_ID, framed_sequence, record, token_id, vocabulary_tokens, words};
use crate::generator::StageContext;
use crate::step::{DataType, Example};
use rand::Rng;
use serde_json::json;

/// Splits a word the way a tiny BPE vocabulary might: short words stay
/// whole, longer ones lose their last two characters to a suffix unit.
fn split_subwords(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 3 {
        return vec![word.to_string()];
    }
    let (stem, suffix) = chars.split_at(chars.len() - 2);
    vec![stem.iter().collect(), suffix.iter().collect()]
}

pub(crate) fn byte_pair_encoding(ctx: &mut StageContext<'_>) -> Example {
    let words = words(ctx.input);
    let subwords: Vec<String> = words.iter().flat_map(|w| split_subwords(w)).collect();
    Example {
        input_data: record(json!({
            "text": ctx.input,
            "words": words,
        })),
        output_data: record(json!({
            "subwords": subwords,
            "mergedPairs": ["th", "er", "in", "on"],
            "tokenCount": subwords.len(),
        })),
        explanation: "Byte Pair Encoding breaks words into subword units based on frequency, \
                      allowing the model to handle unseen words."
            .to_string(),
        data_type: DataType::Tokens,
    }
}

pub(crate) fn vocabulary_lookup(ctx: &mut StageContext<'_>) -> Example {
    let vocabulary_size = ctx.config.vocabulary_size;
    let tokens = vocabulary_tokens(ctx.input);
    let token_ids: Vec<_> = tokens
        .iter()
        .map(|token| {
            json!({
                "token": token,
                "id": token_id(token, vocabulary_size),
                "frequency": ctx.rng.random_range(1_000..11_000),
            })
        })
        .collect();
    Example {
        input_data: record(json!({
            "subwords": tokens,
            "vocabularySize": vocabulary_size,
        })),
        output_data: record(json!({
            "tokenIds": token_ids,
            "unkTokens": [],
            "specialTokens": [
                { "token": "<BOS>", "id": BOS_ID },
                { "token": "<EOS>", "id": EOS_ID },
            ],
        })),
        explanation: "Each subword is mapped to a unique integer ID from the model's vocabulary, \
                      creating a sequence of token IDs."
            .to_string(),
        data_type: DataType::Tokens,
    }
}

pub(crate) fn special_tokens(ctx: &mut StageContext<'_>) -> Example {
    let sequence = framed_sequence(ctx.input, ctx.config.vocabulary_size);
    let content = &sequence[1..sequence.len() - 1];
    Example {
        input_data: record(json!({
            "contentTokens": content,
            "sequenceType": "user_message",
        })),
        output_data: record(json!({
            "finalSequence": sequence,
            "addedTokens": [
                { "position": 0, "token": "<BOS>", "id": BOS_ID, "purpose": "beginning_of_sequence" },
                { "position": sequence.len() - 1, "token": "<EOS>", "id": EOS_ID, "purpose": "end_of_sequence" },
            ],
        })),
        explanation: "Special tokens are added to mark the beginning and end of sequences, \
                      helping the model understand structure."
            .to_string(),
        data_type: DataType::Tokens,
    }
}
