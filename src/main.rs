use llm_lifecycle::ExampleGenerator;
use llm_lifecycle::lifecycle::create_default_lifecycle;
use std::env;

fn main() {
    // Everything after the program name is the prompt to illustrate
    let args: Vec<String> = env::args().skip(1).collect();
    let user_input = if args.is_empty() {
        "Explain how neural networks work".to_string()
    } else {
        args.join(" ")
    };

    let mut manager = create_default_lifecycle(Some(user_input.clone()));
    println!("LLM Lifecycle Walkthrough\n");
    println!("User Input: \"{}\"", user_input);
    println!(
        "Total Steps: {} ({} main steps)",
        manager.total_steps(),
        manager.main_steps().count()
    );
    if let Some(step) = manager.current_step() {
        println!("Current Step: {}\n", step.title());
    }

    // Navigation
    println!("Step Navigation:");
    match manager.navigate_to_step("tokenization") {
        Ok(step) => println!("  Current: {}", step.title()),
        Err(e) => exit_with_error(&e.to_string()),
    }
    match manager.navigate_to_next() {
        Ok(step) => println!("  Next: {}", step.title()),
        Err(e) => exit_with_error(&e.to_string()),
    }

    // Progress
    println!("\nProgress Tracking:");
    let initial = manager.progress();
    println!(
        "  Initial: {}/{} ({}%)",
        initial.completed, initial.total, initial.percentage
    );
    manager.mark_step_completed("input-processing");
    manager.mark_step_completed("prompt-reception");
    let updated = manager.progress();
    println!(
        "  After marking 2 complete: {}/{} ({}%)",
        updated.completed, updated.total, updated.percentage
    );

    // Examples for the stage under the cursor and for attention
    println!("\nExample Generation:");
    let generator = ExampleGenerator::new(user_input);
    match manager.generate_example_for_current(&generator) {
        Ok(example) => {
            println!("  Tokenization example data type: {}", example.data_type);
            println!(
                "  Input: {}",
                serde_json::Value::Object(example.input_data.clone())
            );
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
    if let Ok(example) = generator.generate_example_for_step("attention-computation") {
        let rows = example
            .output("attentionWeights")
            .and_then(|w| w.as_array())
            .map_or(0, |w| w.len());
        println!("  Attention example data type: {}", example.data_type);
        println!("  Attention matrix size: {}x{}", rows, rows);
    }

    // Hierarchy
    println!("\nStep Hierarchy:");
    for (index, step) in manager.steps_by_depth(0).iter().enumerate() {
        println!(
            "  {}. {} ({} sub-steps)",
            index + 1,
            step.title(),
            step.sub_step_count()
        );
        for (sub_index, sub_step) in step.sub_steps().enumerate() {
            println!("     {}.{} {}", index + 1, sub_index + 1, sub_step.title());
        }
    }

    println!("\nWalkthrough completed successfully!");
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
