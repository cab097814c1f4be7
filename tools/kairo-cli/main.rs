use clap::Parser;
use kairo::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

/// Simulate a wired circuit and report which components are active
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the circuit JSON file
    circuit_path: Option<String>,

    /// Optional path to a simulation config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Toggle a switch node before simulating (repeatable)
    #[arg(short, long)]
    toggle: Vec<String>,

    /// Write the simulated circuit to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Run in interactive mode to toggle switches one at a time
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.human {
        run_interactive(cli.config);
    } else {
        run_non_interactive(cli);
    }
}

fn build_simulator(config_path: Option<&str>) -> Simulator {
    let Some(path) = config_path else {
        return Simulator::new();
    };
    let config = SimulationConfig::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e)));
    Simulator::builder()
        .with_config(&config)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid config: {}", e)))
        .build()
}

fn load_session(circuit_path: &str, simulator: Simulator) -> CircuitSession {
    let load_start = Instant::now();
    let circuit = Circuit::from_file(circuit_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load circuit: {}", e)));
    let load_duration = load_start.elapsed();

    let sim_start = Instant::now();
    let session = CircuitSession::with_circuit(simulator, circuit);
    let sim_duration = sim_start.elapsed();

    println!(
        "Loaded {} node(s) and {} wire(s) in {:?}; first pass took {:?}",
        session.nodes().len(),
        session.edges().len(),
        load_duration,
        sim_duration
    );
    session
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let circuit_path = cli.circuit_path.unwrap_or_else(|| {
        exit_with_error("Circuit path is required in non-interactive mode.");
    });
    let simulator = build_simulator(cli.config.as_deref());
    let mut session = load_session(&circuit_path, simulator);

    for node_id in &cli.toggle {
        let start = Instant::now();
        let changed = session
            .toggle_switch(node_id)
            .unwrap_or_else(|e| exit_with_error(&format!("Toggle failed: {}", e)));
        println!(
            "Toggled '{}' ({} in {:?})",
            node_id,
            if changed { "state changed" } else { "no change" },
            start.elapsed()
        );
    }

    print_report(&session);

    if let Some(output) = cli.output {
        session
            .circuit()
            .save(&output)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write output: {}", e)));
        println!("\nWrote simulated circuit to '{}'", output);
    }
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(config_path: Option<String>) {
    println!("--- Kairo Interactive Mode ---");

    let circuit_path = prompt_for_input("Enter circuit path", Some("data/circuit.json"));
    let simulator = build_simulator(config_path.as_deref());
    let mut session = load_session(&circuit_path, simulator);

    loop {
        print_report(&session);
        let node_id = prompt_for_input("\nToggle which switch? (empty to quit)", None);
        if node_id.is_empty() {
            break;
        }
        match session.toggle_switch(&node_id) {
            Ok(true) => println!("Circuit state changed."),
            Ok(false) => println!("No component changed state."),
            Err(e) => println!("{}", e),
        }
    }
}

fn print_report(session: &CircuitSession) {
    println!("\n--- Component States ---");
    for node in session.nodes().iter() {
        let fields: Vec<String> = node
            .data
            .iter()
            .map(|(field, value)| format!("{}={}", field, value))
            .collect();
        println!("  {:<16} {:<14} {}", node.id, node.node_type, fields.join(" "));
    }

    let failures = session.last_failures();
    if !failures.is_empty() {
        println!("\n--- Failures ---");
        for failure in failures {
            println!(
                "  {} ({}) during {}: {}",
                failure.node_id, failure.node_type, failure.stage, failure.error
            );
        }
    }
}

/// Asks for a line on stdin, falling back to `default` on an empty answer.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    match default {
        Some(d) => print!("> {prompt_text} [{d}]: "),
        None => print!("> {prompt_text}: "),
    }
    io::stdout()
        .flush()
        .unwrap_or_else(|e| exit_with_error(&format!("Could not write prompt: {e}")));

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .unwrap_or_else(|e| exit_with_error(&format!("Could not read answer: {e}")));

    match answer.trim() {
        "" => default.unwrap_or_default().to_string(),
        given => given.to_string(),
    }
}

/// Reports a fatal CLI error and exits with status 1.
fn exit_with_error(message: &str) -> ! {
    eprintln!("\nkairo: {message}");
    std::process::exit(1);
}
