use super::{random_score, record};
use crate::generator::StageContext;
use crate::step::{DataType, Example};
use serde_json::json;

pub(crate) fn prompt_reception(ctx: &mut StageContext<'_>) -> Example {
    let input = ctx.input;
    Example {
        input_data: record(json!({
            "rawInput": input,
            "timestamp": jiff::Timestamp::now().to_string(),
            "contentLength": input.chars().count(),
            "encoding": "UTF-8",
        })),
        output_data: record(json!({
            "validatedPrompt": input,
            "isValid": true,
            "metadata": {
                "lengthCheck": "passed",
                "encodingCheck": "passed",
                "formatCheck": "passed",
            },
        })),
        explanation: "The system receives the raw user input and performs basic validation checks \
                      including length, encoding, and format verification."
            .to_string(),
        data_type: DataType::Text,
    }
}

pub(crate) fn safety_filtering(ctx: &mut StageContext<'_>) -> Example {
    let safety_score = random_score(&mut ctx.rng, 0.90, 0.99);
    let confidence = random_score(&mut ctx.rng, 0.95, 0.99);
    Example {
        input_data: record(json!({
            "prompt": ctx.input,
            "safetyPolicies": ["harmful_content", "personal_info", "inappropriate_requests"],
        })),
        output_data: record(json!({
            "safetyScore": safety_score,
            "flaggedCategories": [],
            "approved": safety_score >= 0.5,
            "confidence": confidence,
        })),
        explanation: "Safety filtering evaluates the prompt against various safety policies to \
                      ensure compliance with platform guidelines."
            .to_string(),
        data_type: DataType::Probabilities,
    }
}

pub(crate) fn preprocessing(ctx: &mut StageContext<'_>) -> Example {
    let normalized = ctx.input.split_whitespace().collect::<Vec<_>>().join(" ");
    let changes: Vec<&str> = if normalized != ctx.input {
        vec!["whitespace_normalization"]
    } else {
        Vec::new()
    };
    Example {
        input_data: record(json!({
            "originalText": ctx.input,
            "preprocessing": ["trim_whitespace", "normalize_spaces", "unicode_normalization"],
        })),
        output_data: record(json!({
            "normalizedText": normalized,
            "changesApplied": changes,
            "characterCount": normalized.chars().count(),
        })),
        explanation: "Text preprocessing normalizes the input by removing extra whitespace and \
                      standardizing character encoding."
            .to_string(),
        data_type: DataType::Text,
    }
}
