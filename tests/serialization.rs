//! Tests for exporting and importing lifecycle documents.
mod common;
use common::*;
use llm_lifecycle::config::MAX_EMBEDDING_DIMENSION;
use llm_lifecycle::error::ConfigError;
use llm_lifecycle::prelude::*;
use serde_json::Value;
use std::fs;

#[cfg(test)]
mod serialization_tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_state() {
        let mut manager = create_default_lifecycle(Some("Round trip".to_string()));
        manager.navigate_to_step("sampling-strategy").expect("exists");
        manager.mark_step_completed("input-processing");
        manager.mark_step_completed("prompt-reception");
        manager.mark_step_active("tokenization");
        manager
            .generate_example("layer-normalization", &ExampleGenerator::default().with_seed(9))
            .expect("layer normalization has a generator");

        let json = export_to_json(&manager.lifecycle()).expect("export should succeed");
        let imported = import_from_json(&json).expect("import should succeed");
        assert_eq!(imported, manager.lifecycle());

        let restored = LifecycleManager::from_lifecycle(imported);
        assert_eq!(restored.current_step_id(), Some("sampling-strategy"));
        assert_eq!(restored.progress(), manager.progress());
        assert_eq!(restored.user_input(), Some("Round trip"));
        assert_eq!(
            restored.generated_example("layer-normalization"),
            manager.generated_example("layer-normalization")
        );
        assert_eq!(
            restored.find_step("tokenization").and_then(|s| s.status()),
            Some(StepStatus::Active)
        );
    }

    #[test]
    fn test_export_uses_camel_case_keys() {
        let manager = create_default_lifecycle(Some("Hi".to_string()));
        let json = export_to_json(&manager.lifecycle()).expect("export should succeed");
        let value: Value = serde_json::from_str(&json).expect("valid JSON");

        for key in [
            "steps",
            "currentStepId",
            "userInput",
            "generatedExamples",
            "totalSteps",
            "completedSteps",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert!(value["generatedExamples"].is_object());

        let first = &value["steps"][0];
        assert!(first.get("subSteps").is_some());
        assert_eq!(first["visualization"]["type"], "flow");
        assert!(first.get("status").is_none());
    }

    #[test]
    fn test_example_keys_on_the_wire() {
        let mut manager = create_default_lifecycle(None);
        manager
            .generate_example("special-tokens", &ExampleGenerator::default())
            .expect("special tokens has a generator");
        let json = export_to_json(&manager.lifecycle()).expect("export should succeed");
        let value: Value = serde_json::from_str(&json).expect("valid JSON");

        let example = &value["generatedExamples"]["special-tokens"];
        assert!(example["inputData"].is_object());
        assert!(example["outputData"]["finalSequence"].is_array());
        assert_eq!(example["dataType"], "tokens");
    }

    #[test]
    fn test_import_without_generated_examples() {
        let lifecycle = import_from_json(MINIMAL_LIFECYCLE_JSON).expect("import should succeed");
        assert!(lifecycle.generated_examples.is_empty());
        assert_eq!(lifecycle.total_steps, 2);

        let manager = LifecycleManager::from_lifecycle(lifecycle);
        assert_eq!(manager.current_step_id(), Some("prompt-reception"));
        assert_eq!(manager.progress().percentage, 50);
        assert_eq!(
            manager.find_step("input-processing").and_then(|s| s.status()),
            Some(StepStatus::Completed)
        );
        assert_eq!(manager.find_step("prompt-reception").and_then(|s| s.duration()), Some(100.0));
    }

    #[test]
    fn test_import_with_null_generated_examples() {
        let json = r#"{
            "steps": [
                { "id": "only", "title": "Only", "description": "Single step", "order": 1, "expandable": false }
            ],
            "generatedExamples": null,
            "totalSteps": 1,
            "completedSteps": 0
        }"#;
        let lifecycle = import_from_json(json).expect("null examples should import");
        assert!(lifecycle.generated_examples.is_empty());

        let exported = export_to_json(&lifecycle).expect("export should succeed");
        let value: Value = serde_json::from_str(&exported).expect("valid JSON");
        assert!(value["generatedExamples"].is_object());
    }

    #[test]
    fn test_malformed_json_fails() {
        let err = import_from_json("{ not json").expect_err("malformed input");
        assert!(matches!(err, ImportError::Json(_)));

        let err = import_from_json(r#"{ "steps": [] }"#).expect_err("missing counters");
        assert!(err.to_string().contains("Failed to parse lifecycle JSON"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = MINIMAL_LIFECYCLE_JSON.replace("\"completed\"", "\"finished\"");
        assert!(import_from_json(&json).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join("llm_lifecycle_save_and_load.json");
        let path = path.to_string_lossy().to_string();

        let manager = LifecycleManager::new(create_nested_steps(), Some("file".to_string()));
        manager.lifecycle().save(&path).expect("save should succeed");
        let loaded = Lifecycle::from_file(&path).expect("load should succeed");
        assert_eq!(loaded, manager.lifecycle());

        fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Lifecycle::from_file("/definitely/not/here.json").expect_err("missing file");
        assert!(matches!(err, ImportError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_generator_config_from_json() {
        let config = GeneratorConfig::from_json(r#"{ "seed": 7, "topK": 5 }"#)
            .expect("partial config should parse");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.top_k, 5);
        assert_eq!(config.embedding_dimension, 8);
        assert_eq!(config.default_input, "Hello, how are you?");

        let generator = ExampleGenerator::with_config(config);
        let example = generator.generate(StageId::LogitsCalculation);
        let top = example
            .output("topTokens")
            .and_then(Value::as_array)
            .map(Vec::len);
        assert_eq!(top, Some(5));
    }

    #[test]
    fn test_oversized_embedding_dimension_is_rejected() {
        let err = GeneratorConfig::from_json(r#"{ "embeddingDimension": 4611686018427387904, "seed": 1 }"#)
            .expect_err("dimension is far beyond the cap");
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "embeddingDimension",
                ..
            }
        ));
        assert!(err.to_string().contains("embeddingDimension"));
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        for json in [
            r#"{ "maxSequenceLength": 0 }"#,
            r#"{ "logitsVocabulary": 0 }"#,
            r#"{ "vocabularySize": 2 }"#,
        ] {
            let err = GeneratorConfig::from_json(json).expect_err("size below its minimum");
            assert!(matches!(err, ConfigError::OutOfRange { .. }), "{}", json);
        }
    }

    #[test]
    fn test_generator_clamps_oversized_config() {
        let config = GeneratorConfig {
            embedding_dimension: usize::MAX / 2,
            seed: Some(1),
            ..GeneratorConfig::default()
        };
        let generator = ExampleGenerator::with_config(config);
        assert_eq!(generator.config().embedding_dimension, MAX_EMBEDDING_DIMENSION);

        let example = generator
            .generate_example_for_step("feed-forward")
            .expect("feed-forward has a generator");
        let output = example
            .output("outputVector")
            .and_then(Value::as_array)
            .map(Vec::len);
        assert_eq!(output, Some(MAX_EMBEDDING_DIMENSION));
    }
}
