//! Logicsim - Digital Logic Circuit Simulator
//!
//! Evaluates a circuit once and prints every component's state, its JSON
//! export, or a truth table.
//!
//! # Usage
//!
//! ```bash
//! logicsim half_adder.lsim --set a=1 --set b=1
//! logicsim half_adder.lsim --truth-table --inputs a,b --outputs sum,carry
//! logicsim saved.json --export
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, LevelFilter};
use logic_sim_core::{
    circuit::{validate_circuit, Circuit},
    circuit_truth_table,
    components::ComponentKind,
    dsl,
    error::{LogicError, Result},
    Simulator,
};

/// Digital logic circuit simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit file (netlist, or .json export)
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Set an INPUT before evaluating, e.g. `--set a=1`
    #[arg(short, long = "set", value_name = "ID=LEVEL", value_parser = parse_assignment)]
    set: Vec<(String, bool)>,

    /// Print a truth table instead of component states
    #[arg(short, long)]
    truth_table: bool,

    /// INPUT ids to enumerate (comma separated, defaults to every INPUT)
    #[arg(long, value_delimiter = ',', requires = "truth_table")]
    inputs: Vec<String>,

    /// Component ids to observe (comma separated, defaults to every OUTPUT)
    #[arg(long, value_delimiter = ',', requires = "truth_table")]
    outputs: Vec<String>,

    /// Print the evaluated circuit as JSON
    #[arg(short, long, conflicts_with = "truth_table")]
    export: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_assignment(arg: &str) -> std::result::Result<(String, bool), String> {
    let (id, level) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=LEVEL, got '{}'", arg))?;
    let level =
        dsl::parse_bool(level, 0).map_err(|_| format!("invalid logic level: {}", level))?;
    Ok((id.to_string(), level))
}

fn setup_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Fails only if a logger is already installed
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();
}

fn load_circuit(path: &Path) -> Result<Circuit> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let content = std::fs::read_to_string(path).map_err(|e| LogicError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Circuit::from_json(&content)
    } else {
        let ast = dsl::parse_file(path)?;
        Circuit::from_ast(ast)
    }
}

fn ids_of_kind(circuit: &Circuit, kind: ComponentKind) -> Vec<String> {
    circuit
        .components()
        .filter(|c| c.kind == kind)
        .map(|c| c.id.clone())
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(args.verbose);

    // Load and validate
    let circuit = load_circuit(&args.circuit_file)?;
    validate_circuit(&circuit)?;
    info!(
        "loaded {} component(s), {} connection(s)",
        circuit.len(),
        circuit.connections().len()
    );

    // Evaluate
    let mut simulator = Simulator::new(circuit);
    simulator.simulate()?;
    for (id, level) in &args.set {
        simulator.set_input(id, *level)?;
    }
    let circuit = simulator.circuit();

    if args.truth_table {
        let inputs = if args.inputs.is_empty() {
            ids_of_kind(circuit, ComponentKind::Input)
        } else {
            args.inputs.clone()
        };
        let outputs = if args.outputs.is_empty() {
            ids_of_kind(circuit, ComponentKind::Output)
        } else {
            args.outputs.clone()
        };
        let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
        let outputs: Vec<&str> = outputs.iter().map(String::as_str).collect();
        let table = circuit_truth_table(circuit, &inputs, &outputs)?;
        print!("{}", table);
    } else if args.export {
        println!("{}", circuit.to_json()?);
    } else {
        for component in circuit.components() {
            let outputs: String = component
                .outputs()
                .iter()
                .map(|&v| if v { '1' } else { '0' })
                .collect();
            println!(
                "{:<12} {:<10} {} {}",
                component.id,
                component.kind.name(),
                u8::from(component.display_value()),
                outputs
            );
        }
    }

    Ok(())
}
