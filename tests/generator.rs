//! Tests for the per-stage example generator and its numeric helpers.
use llm_lifecycle::prelude::*;
use serde_json::Value;

fn output_array<'a>(example: &'a Example, key: &str) -> &'a Vec<Value> {
    example
        .output(key)
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("output '{}' should be an array", key))
}

fn as_f64s(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(Value::as_f64).collect()
}

#[cfg(test)]
mod stage_tests {
    use super::*;

    #[test]
    fn test_every_stage_generates_with_expected_data_type() {
        let generator = ExampleGenerator::default();
        let expected = [
            ("prompt-reception", DataType::Text),
            ("safety-filtering", DataType::Probabilities),
            ("preprocessing", DataType::Text),
            ("byte-pair-encoding", DataType::Tokens),
            ("vocabulary-lookup", DataType::Tokens),
            ("special-tokens", DataType::Tokens),
            ("embedding-lookup", DataType::Embeddings),
            ("attention-computation", DataType::Attention),
            ("feed-forward", DataType::Embeddings),
            ("layer-normalization", DataType::Embeddings),
            ("logits-calculation", DataType::Probabilities),
            ("sampling-strategy", DataType::Tokens),
            ("token-to-text", DataType::Text),
            ("response-formatting", DataType::Text),
            ("output-safety", DataType::Probabilities),
            ("final-validation", DataType::Probabilities),
        ];
        assert_eq!(expected.len(), StageId::ALL.len());

        for (step_id, data_type) in expected {
            let example = generator
                .generate_example_for_step(step_id)
                .unwrap_or_else(|e| panic!("{} failed: {}", step_id, e));
            assert_eq!(example.data_type, data_type, "data type of {}", step_id);
            assert!(!example.explanation.is_empty());
        }
    }

    #[test]
    fn test_stage_ids_round_trip_through_parse() {
        for stage in StageId::ALL {
            assert_eq!(stage.as_str().parse::<StageId>().ok(), Some(*stage));
        }
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        let generator = ExampleGenerator::default();
        let err = generator
            .generate_example_for_step("input-processing")
            .expect_err("main steps have no generator");
        assert!(err.to_string().contains("No example generator found"));
        assert!(err.to_string().contains("input-processing"));
    }

    #[test]
    fn test_prompt_reception_echoes_input() {
        let generator = ExampleGenerator::new("What is a token?");
        let example = generator.generate(StageId::PromptReception);
        assert_eq!(
            example.output("validatedPrompt").and_then(Value::as_str),
            Some("What is a token?")
        );
        assert!(example.input("timestamp").is_some());
    }

    #[test]
    fn test_byte_pair_encoding_of_default_input() {
        let generator = ExampleGenerator::default();
        let example = generator.generate(StageId::BytePairEncoding);
        let subwords = output_array(&example, "subwords");
        assert!(!subwords.is_empty());
        assert_eq!(
            example.output("tokenCount").and_then(Value::as_u64),
            Some(subwords.len() as u64)
        );
    }

    #[test]
    fn test_empty_input_yields_no_subwords() {
        let generator = ExampleGenerator::new("");
        let example = generator.generate(StageId::BytePairEncoding);
        assert!(output_array(&example, "subwords").is_empty());
    }

    #[test]
    fn test_special_tokens_frame_the_sequence() {
        let generator = ExampleGenerator::new("hello world");
        let example = generator.generate(StageId::SpecialTokens);
        let sequence = output_array(&example, "finalSequence");
        assert_eq!(sequence.len(), 4);
        assert_eq!(sequence.first().and_then(Value::as_u64), Some(1));
        assert_eq!(sequence.last().and_then(Value::as_u64), Some(2));
    }

    #[test]
    fn test_one_embedding_per_framed_token() {
        let generator = ExampleGenerator::new("hello world");
        let example = generator.generate(StageId::EmbeddingLookup);
        let token_ids = example
            .input("tokenIds")
            .and_then(Value::as_array)
            .expect("tokenIds should be an array");
        let embeddings = output_array(&example, "embeddings");
        assert_eq!(embeddings.len(), token_ids.len());
        for vector in embeddings {
            assert_eq!(vector.as_array().map(Vec::len), Some(8));
        }
    }

    #[test]
    fn test_attention_matrix_is_square_and_row_normalized() {
        let generator = ExampleGenerator::default().with_seed(3);
        let example = generator.generate(StageId::AttentionComputation);
        let rows = output_array(&example, "attentionWeights");
        assert!(!rows.is_empty());
        for row in rows {
            let values = as_f64s(row.as_array().expect("row should be an array"));
            assert_eq!(values.len(), rows.len());
            let sum: f64 = values.iter().sum();
            assert!((sum - 1.0).abs() < 0.01, "row sum was {}", sum);
        }
    }

    #[test]
    fn test_attention_window_is_capped_by_config() {
        let config = GeneratorConfig {
            max_sequence_length: 3,
            ..GeneratorConfig::default()
        };
        let mut generator = ExampleGenerator::with_config(config);
        generator.update_user_input("one two three four five six");
        let example = generator.generate(StageId::AttentionComputation);
        assert_eq!(output_array(&example, "attentionWeights").len(), 3);
    }

    #[test]
    fn test_feed_forward_keeps_dimension() {
        let generator = ExampleGenerator::default();
        let example = generator.generate(StageId::FeedForward);
        let input = example
            .input("inputVector")
            .and_then(Value::as_array)
            .expect("inputVector should be an array");
        assert_eq!(output_array(&example, "outputVector").len(), input.len());
    }

    #[test]
    fn test_logits_probabilities_form_a_distribution() {
        let generator = ExampleGenerator::default().with_seed(11);
        let example = generator.generate(StageId::LogitsCalculation);
        let probabilities = as_f64s(output_array(&example, "probabilities"));
        assert_eq!(probabilities.len(), 10);
        assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
        let sum: f64 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 0.01, "sum was {}", sum);
        assert_eq!(output_array(&example, "topTokens").len(), 3);
    }

    #[test]
    fn test_sampled_token_comes_from_the_pool() {
        let generator = ExampleGenerator::default().with_seed(5);
        let example = generator.generate(StageId::SamplingStrategy);
        let selected = example.output("selectedToken").expect("selectedToken");
        assert!(output_array(&example, "samplingPool").contains(selected));
    }

    #[test]
    fn test_token_to_text_reconstructs_response() {
        let example = ExampleGenerator::default().generate(StageId::TokenToText);
        assert_eq!(
            example.output("reconstructedText").and_then(Value::as_str),
            Some("I'm doing well")
        );
    }

    #[test]
    fn test_response_formatting() {
        let example = ExampleGenerator::default().generate(StageId::ResponseFormatting);
        assert_eq!(
            example.output("formattedText").and_then(Value::as_str),
            Some("I'm doing well, thank you for asking.")
        );
    }

    #[test]
    fn test_final_validation_approves_canned_response() {
        let example = ExampleGenerator::default().generate(StageId::FinalValidation);
        assert_eq!(example.output("isComplete"), Some(&Value::Bool(true)));
        assert_eq!(example.output("approved"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let first = ExampleGenerator::new("Explain attention").with_seed(42);
        let second = ExampleGenerator::new("Explain attention").with_seed(42);
        for stage in StageId::ALL {
            if *stage == StageId::PromptReception {
                continue;
            }
            assert_eq!(
                first.generate(*stage),
                second.generate(*stage),
                "stage {} differs",
                stage
            );
        }
    }

    #[test]
    fn test_update_user_input_changes_later_examples() {
        let mut generator = ExampleGenerator::new("first");
        let before = generator.generate(StageId::Preprocessing);
        generator.update_user_input("second   input");
        let after = generator.generate(StageId::Preprocessing);
        assert_eq!(
            before.output("normalizedText").and_then(Value::as_str),
            Some("first")
        );
        assert_eq!(
            after.output("normalizedText").and_then(Value::as_str),
            Some("second input")
        );
    }

    #[test]
    fn test_request_wire_shape() {
        let failed = generate_example_for_request(&ExampleGenerationRequest {
            step_id: "tokenization".to_string(),
            user_input: None,
        });
        assert!(!failed.success);
        assert!(failed.example.is_none());
        assert!(failed.error.is_some());

        let ok = generate_example_for_request(&ExampleGenerationRequest {
            step_id: "vocabulary-lookup".to_string(),
            user_input: Some("hi".to_string()),
        });
        assert!(ok.success);
        assert_eq!(ok.example.map(|e| e.data_type), Some(DataType::Tokens));
        assert!(ok.error.is_none());
    }
}

#[cfg(test)]
mod math_tests {
    use super::*;

    #[test]
    fn test_softmax_is_a_distribution() {
        let probabilities = softmax(&[1.0, 2.0, 3.0]);
        assert_eq!(probabilities.len(), 3);
        assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
        let sum: f64 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 0.001);
        assert!(probabilities[2] > probabilities[1]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let probabilities = softmax(&[1000.0, 1000.0]);
        assert_eq!(probabilities, vec![0.5, 0.5]);
    }

    #[test]
    fn test_softmax_of_empty_is_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_top_k_orders_and_keeps_ties_stable() {
        let ranked = top_k(&[0.1, 0.4, 0.1, 0.4], 3);
        let indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 3, 0]);
        assert_eq!(top_k(&[0.5, 0.5], 10).len(), 2);
        assert!(top_k(&[0.5], 0).is_empty());
    }
}
