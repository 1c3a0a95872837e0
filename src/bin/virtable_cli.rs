//! CLI tool for virtable - lays out a JSON scenario and prints the render plan
//!
//! Usage:
//!   virtable_cli <scenario.json>              # Output plan JSON to stdout
//!   virtable_cli <scenario.json> -o plan.json # Output plan JSON to file
//!   virtable_cli <scenario.json> --text       # Preview the plan as a text grid
//!
//! Set `RUST_LOG=virtable=debug` to trace recomputation.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use virtable::render::TextRenderer;
use virtable::scenario::Scenario;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: virtable_cli <scenario.json> [-o plan.json] [--text]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let text_mode = args.iter().skip(2).any(|a| a == "--text");
    let output_path = args
        .iter()
        .skip(2)
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 3));

    // Read and decode the scenario
    let scenario = match Scenario::from_path(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    let plan = match scenario.run() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error computing layout: {}", e);
            std::process::exit(1);
        }
    };

    let output = if text_mode {
        TextRenderer::default().render(&plan)
    } else {
        match serde_json::to_string_pretty(&plan) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing JSON: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(output.as_bytes()).unwrap();
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
}
