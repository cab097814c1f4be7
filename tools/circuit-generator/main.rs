use clap::Parser;
use kairo::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;

/// A CLI tool to generate random circuits for the kairo simulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_circuit.json")]
    output: String,

    /// The number of independent clusters to generate
    #[arg(long, default_value_t = 10)]
    clusters: usize,

    /// The maximum number of loads placed in series per cluster
    #[arg(long, default_value_t = 4)]
    max_chain: usize,
}

/// Two-terminal loads a chain may contain: (type, positive, negative).
const LOADS: [(&str, &str, &str); 4] = [
    ("led", "anode", "cathode"),
    ("buzzer", "positive", "negative"),
    ("motor", "positive", "negative"),
    ("button", "in", "out"),
];

#[derive(Default)]
struct Builder {
    nodes: Vec<CircuitNode>,
    edges: Vec<CircuitEdge>,
}

impl Builder {
    fn node(&mut self, node: CircuitNode) -> String {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    fn wire(&mut self, source: (&str, &str), target: (&str, &str)) {
        let id = format!("e{}", self.edges.len());
        self.edges.push(CircuitEdge::new(id, source, target));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.max_chain == 0 {
        eprintln!("Error: --max-chain must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating {} cluster(s) with up to {} load(s) each...",
        cli.clusters, cli.max_chain
    );

    let mut builder = Builder::default();
    for cluster in 0..cli.clusters {
        generate_cluster(&mut builder, &mut rng, cluster, cli.max_chain);
    }

    let circuit = Circuit::new(builder.nodes, builder.edges);
    circuit.save(&cli.output)?;

    println!(
        "Successfully generated {} node(s) and {} wire(s) to '{}'",
        circuit.nodes.len(),
        circuit.edges.len(),
        cli.output
    );

    Ok(())
}

/// Generates one cluster: a battery feeding a series chain of loads. Roughly
/// one in four chains is left open so the output mixes live and dead parts.
fn generate_cluster(builder: &mut Builder, rng: &mut ThreadRng, cluster: usize, max_chain: usize) {
    let x = cluster as f64 * 240.0;
    let battery = builder.node(
        CircuitNode::new(format!("c{cluster}-battery"), "battery")
            .with_data("voltage", 9)
            .at(x, 0.0),
    );

    let length = rng.random_range(1..=max_chain);
    let mut previous = (battery.clone(), "plus");
    for index in 0..length {
        let (node_type, positive, negative) = LOADS[rng.random_range(0..LOADS.len())];
        let mut node = CircuitNode::new(format!("c{cluster}-{node_type}{index}"), node_type)
            .at(x, 80.0 * (index + 1) as f64);
        if node_type == "button" {
            node = node.with_data("isClosed", rng.random_bool(0.5));
        }
        let id = builder.node(node);
        builder.wire((previous.0.as_str(), previous.1), (id.as_str(), positive));
        previous = (id, negative);
    }

    if rng.random_bool(0.75) {
        builder.wire((previous.0.as_str(), previous.1), (battery.as_str(), "minus"));
    }
}
