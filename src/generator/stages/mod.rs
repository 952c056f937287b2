//! Stage generators, grouped by the main step they belong to.

pub(super) mod input;
pub(super) mod model;
pub(super) mod output;
pub(super) mod response;
pub(super) mod tokenization;

use super::math::round_to;
use rand::Rng;
use serde_json::{Map, Value};

pub(super) const BOS_ID: u32 = 1;
pub(super) const EOS_ID: u32 = 2;

/// The canned reply the response stages pretend the model produced, as
/// (token id, token text) pairs.
pub(super) const RESPONSE_TOKENS: &[(u32, &str)] =
    &[(100, "I"), (345, "'m"), (2156, " doing"), (1690, " well")];

pub(super) const RAW_RESPONSE: &str = "  i'm doing well, thank you for asking  ";

/// Unwraps a `json!` object literal into an example record.
pub(super) fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// Lowercased whitespace-separated words.
pub(super) fn words(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Lowercased tokens split on whitespace and basic punctuation.
pub(super) fn vocabulary_tokens(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '!' | '?' | '.'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A stable pseudo vocabulary id for `token` (FNV-1a), clear of the
/// reserved special-token ids.
pub(super) fn token_id(token: &str, vocabulary_size: u32) -> u32 {
    let hash = token.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    });
    let span = u64::from(vocabulary_size.max(4) - 3);
    (hash % span) as u32 + 3
}

/// `<BOS>`, the input's token ids, `<EOS>`.
pub(super) fn framed_sequence(input: &str, vocabulary_size: u32) -> Vec<u32> {
    let mut sequence = vec![BOS_ID];
    sequence.extend(
        vocabulary_tokens(input)
            .iter()
            .map(|t| token_id(t, vocabulary_size)),
    );
    sequence.push(EOS_ID);
    sequence
}

/// `len` values drawn uniformly from `[low, high)`, rounded to 2 places.
pub(super) fn random_vector(rng: &mut impl Rng, len: usize, low: f64, high: f64) -> Vec<f64> {
    (0..len)
        .map(|_| round_to(rng.random_range(low..high), 2))
        .collect()
}

/// A single value drawn from `[low, high)`, rounded to 2 places.
pub(super) fn random_score(rng: &mut impl Rng, low: f64, high: f64) -> f64 {
    round_to(rng.random_range(low..high), 2)
}
