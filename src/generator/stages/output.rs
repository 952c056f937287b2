use super::{RAW_RESPONSE, random_score, record};
use crate::generator::StageContext;
use crate::step::{DataType, Example};
use serde_json::json;

const MAX_RESPONSE_LENGTH: usize = 2_000;

/// Trims, capitalizes the first letter and makes sure the text ends in
/// terminal punctuation.
fn format_response(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let mut formatted = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !formatted.ends_with(['.', '!', '?']) {
        formatted.push('.');
    }
    formatted
}

pub(crate) fn response_formatting(_ctx: &mut StageContext<'_>) -> Example {
    let formatted = format_response(RAW_RESPONSE);
    Example {
        input_data: record(json!({
            "rawText": RAW_RESPONSE,
            "formatRules": ["capitalize_first", "add_punctuation", "trim_whitespace"],
        })),
        output_data: record(json!({
            "formattedText": formatted,
            "formatting": {
                "capitalization": "applied",
                "punctuation": "verified",
                "whitespace": "trimmed",
            },
            "finalLength": formatted.chars().count(),
        })),
        explanation: "The generated text is formatted according to style guidelines and \
                      presentation requirements."
            .to_string(),
        data_type: DataType::Text,
    }
}

pub(crate) fn output_safety(ctx: &mut StageContext<'_>) -> Example {
    let response = format_response(RAW_RESPONSE);
    let safety_score = random_score(&mut ctx.rng, 0.95, 0.99);
    let confidence = random_score(&mut ctx.rng, 0.90, 0.99);
    Example {
        input_data: record(json!({
            "generatedText": response,
            "safetyChecks": ["toxicity", "harmful_content", "bias_detection"],
        })),
        output_data: record(json!({
            "safetyScore": safety_score,
            "flaggedIssues": [],
            "approved": safety_score >= 0.5,
            "confidenceLevel": confidence,
            "filteringApplied": false,
        })),
        explanation: "Final safety filtering ensures the generated response meets platform \
                      safety and quality standards."
            .to_string(),
        data_type: DataType::Probabilities,
    }
}

pub(crate) fn final_validation(ctx: &mut StageContext<'_>) -> Example {
    let response = format_response(RAW_RESPONSE);
    let is_complete = response.ends_with(['.', '!', '?']);
    let length_appropriate = (1..=MAX_RESPONSE_LENGTH).contains(&response.chars().count());
    let quality_score = random_score(&mut ctx.rng, 0.85, 0.98);
    Example {
        input_data: record(json!({
            "response": response,
            "prompt": ctx.input,
            "validationCriteria": ["completeness", "relevance", "coherence", "length"],
        })),
        output_data: record(json!({
            "isComplete": is_complete,
            "isRelevant": true,
            "isCoherent": true,
            "lengthAppropriate": length_appropriate,
            "qualityScore": quality_score,
            "approved": is_complete && length_appropriate,
        })),
        explanation: "Final validation ensures the response is complete, relevant, and meets \
                      quality standards before delivery."
            .to_string(),
        data_type: DataType::Probabilities,
    }
}
