use clap::Parser;
use llm_lifecycle::lifecycle::lifecycle_overview;
use llm_lifecycle::prelude::*;
use llm_lifecycle::tree::create_step_summary;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Walk the stages of an LLM request and generate illustrative data for them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The prompt the examples are generated from
    #[arg(long)]
    input: Option<String>,

    /// Optional path to a generator config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Seed for reproducible examples
    #[arg(long)]
    seed: Option<u64>,

    /// Generate and print the example for one step id
    #[arg(short, long)]
    step: Option<String>,

    /// Load a previously exported lifecycle instead of the built-in one
    #[arg(long)]
    import: Option<String>,

    /// Write the lifecycle to this path when done
    #[arg(long)]
    export: Option<String>,

    /// Print an overview of the built-in pipeline
    #[arg(long)]
    overview: bool,

    /// Run in interactive mode to walk the steps one command at a time
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let generator = build_generator(&cli);
    let manager = load_manager(&cli, &generator);

    if cli.human {
        run_interactive(manager, generator);
    } else {
        run_non_interactive(cli, manager, generator);
    }
}

fn build_generator(cli: &Cli) -> ExampleGenerator {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config from '{}': {}", path, e))
        }),
        None => GeneratorConfig::default(),
    };
    let mut generator = ExampleGenerator::with_config(config);
    if let Some(input) = &cli.input {
        generator.update_user_input(input.clone());
    }
    if let Some(seed) = cli.seed {
        generator = generator.with_seed(seed);
    }
    generator
}

fn load_manager(cli: &Cli, generator: &ExampleGenerator) -> LifecycleManager {
    match &cli.import {
        Some(path) => {
            let lifecycle = Lifecycle::from_file(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to import lifecycle '{}': {}", path, e))
            });
            let report = validate_lifecycle_structure(&lifecycle);
            if !report.is_valid {
                eprintln!("Warning: imported lifecycle has structural problems:");
                for error in &report.errors {
                    eprintln!("  - {}", error);
                }
            }
            LifecycleManager::from_lifecycle(lifecycle)
        }
        None => create_default_lifecycle(Some(generator.user_input().to_string())),
    }
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli, mut manager: LifecycleManager, generator: ExampleGenerator) {
    if cli.overview {
        print_overview();
    }

    if let Some(step_id) = &cli.step {
        let example = manager
            .generate_example(step_id, &generator)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        print_example(step_id, example);
    }

    if !cli.overview && cli.step.is_none() {
        print_tree(&manager);
        print_progress(&manager);
    }

    if let Some(path) = &cli.export {
        export_lifecycle(&manager, path);
    }
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(mut manager: LifecycleManager, mut generator: ExampleGenerator) {
    println!("--- LLM Lifecycle Interactive Mode ---");
    println!("Type 'help' for the list of commands.\n");
    print_current(&manager);

    loop {
        let line = prompt_for_input("Command");
        let (command, argument) = match line.split_once(' ') {
            Some((command, rest)) => (command, Some(rest.trim())),
            None => (line.as_str(), None),
        };

        match command {
            "" => continue,
            "help" => print_help(),
            "next" => match manager.navigate_to_next() {
                Ok(step) => println!("  -> {} ({})", step.title(), step.id()),
                Err(e) => println!("  {}", e),
            },
            "prev" => match manager.navigate_to_previous() {
                Ok(step) => println!("  -> {} ({})", step.title(), step.id()),
                Err(e) => println!("  {}", e),
            },
            "goto" => match argument {
                Some(id) => match manager.navigate_to_step(id) {
                    Ok(step) => println!("  -> {} ({})", step.title(), step.id()),
                    Err(e) => println!("  {}", e),
                },
                None => println!("  Usage: goto <step-id>"),
            },
            "complete" => {
                let Some(id) = target_id(&manager, argument) else {
                    println!("  No step selected.");
                    continue;
                };
                if manager.mark_step_completed(&id) {
                    print_progress(&manager);
                } else {
                    println!("  Step with id '{}' not found", id);
                }
            }
            "active" => {
                let Some(id) = target_id(&manager, argument) else {
                    println!("  No step selected.");
                    continue;
                };
                if manager.mark_step_active(&id) {
                    println!("  '{}' is now active.", id);
                } else {
                    println!("  Step with id '{}' not found", id);
                }
            }
            "example" => {
                let label = target_id(&manager, argument).unwrap_or_default();
                let result = match argument {
                    Some(id) => manager.generate_example(id, &generator),
                    None => manager.generate_example_for_current(&generator),
                };
                match result {
                    Ok(example) => print_example(&label, example),
                    Err(e) => println!("  {}", e),
                }
            }
            "input" => match argument {
                Some(text) => {
                    generator.update_user_input(text);
                    manager.update_user_input(text);
                    println!("  Input updated.");
                }
                None => println!("  Current input: \"{}\"", generator.user_input()),
            },
            "progress" => print_progress(&manager),
            "tree" => print_tree(&manager),
            "current" => print_current(&manager),
            "search" => match argument {
                Some(query) => {
                    let steps = manager.steps();
                    let hits = search_steps(&steps, query);
                    if hits.is_empty() {
                        println!("  No matching steps.");
                    }
                    for step in hits {
                        println!("  {} ({})", step.title, step.id);
                    }
                }
                None => println!("  Usage: search <text>"),
            },
            "export" => match argument {
                Some(path) => export_lifecycle(&manager, path),
                None => println!("  Usage: export <path>"),
            },
            "quit" | "exit" => break,
            other => println!("  Unknown command '{}'. Type 'help'.", other),
        }
    }
}

fn target_id(manager: &LifecycleManager, argument: Option<&str>) -> Option<String> {
    argument
        .map(str::to_string)
        .or_else(|| manager.current_step_id().map(str::to_string))
}

fn print_help() {
    println!("  next | prev            move through the steps in order");
    println!("  goto <id>              jump to a step");
    println!("  complete [id]          mark a step completed (default: current)");
    println!("  active [id]            mark a step active (default: current)");
    println!("  example [id]           generate an example (default: current)");
    println!("  input [text]           show or change the prompt");
    println!("  progress | tree        show progress or the step tree");
    println!("  search <text>          find steps by title or description");
    println!("  export <path>          write the lifecycle as JSON");
    println!("  quit");
}

fn print_current(manager: &LifecycleManager) {
    match manager.current_step() {
        Some(step) => println!(
            "Current Step: {} ({}) - {}",
            step.title(),
            step.id(),
            step.description()
        ),
        None => println!("No current step."),
    }
}

fn print_progress(manager: &LifecycleManager) {
    let progress = manager.progress();
    println!(
        "Progress: {}/{} ({}%)",
        progress.completed, progress.total, progress.percentage
    );
}

fn print_tree(manager: &LifecycleManager) {
    let current = manager.current_step_id();
    for step in manager.flattened() {
        let marker = if Some(step.id()) == current { ">" } else { " " };
        println!(
            "{} {}{} [{}] ({})",
            marker,
            "  ".repeat(step.depth()),
            step.title(),
            step.effective_status(),
            step.id()
        );
    }
}

fn print_example(step_id: &str, example: &Example) {
    println!("\nExample for '{}' ({}):", step_id, example.data_type);
    println!("  {}", example.explanation);
    let rendered = serde_json::to_string_pretty(example)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to render example: {}", e)));
    println!("{}", rendered);
}

fn print_overview() {
    let overview = lifecycle_overview();
    let summary = create_step_summary(&default_steps());
    println!("--- LLM Lifecycle Overview ---");
    println!(
        "Total Steps: {} ({} main, {} sub)",
        overview.total_steps, summary.main_steps, summary.sub_steps
    );
    println!("Estimated Duration: {} ms\n", overview.estimated_duration);
    for (index, step) in overview.main_steps.iter().enumerate() {
        println!(
            "{}. {} - {} ({} sub-steps, {} ms)",
            index + 1,
            step.title,
            step.description,
            step.sub_step_count,
            step.estimated_duration
        );
    }
    println!();
}

fn export_lifecycle(manager: &LifecycleManager, path: &str) {
    match manager.lifecycle().save(path) {
        Ok(()) => println!("Lifecycle written to {}", path),
        Err(e) => eprintln!("Error: {}", e),
    }
}

/// Prompts the user and reads one trimmed line. End of input reads as `quit`.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();

    print!("> {}: ", prompt_text);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }

    match io::stdin().read_line(&mut line) {
        Ok(0) => "quit".to_string(),
        Ok(_) => line.trim().to_string(),
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
