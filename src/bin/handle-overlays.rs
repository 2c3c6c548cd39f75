//! handle-overlays CLI: inspect a GFA graph through the overlay helpers.
//!
//! Usage:
//!   handle-overlays stats <graph.gfa> [--json]
//!   handle-overlays positions <graph.gfa> [--path NAME] [--json]
//!   handle-overlays layout <graph.gfa> [--by-path] [--json]

use clap::{Parser, Subcommand};
use handle_overlays::report::{self, GraphStats, LayoutEntry, PathPositions};
use handle_overlays::{read_gfa_file, HashGraph};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "handle-overlays",
    version,
    about = "Path positions and linear layouts for GFA graphs"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count nodes, edges, paths and sequence
    Stats {
        /// GFA file to read
        gfa: PathBuf,
    },
    /// Show the base-pair position of every path step
    Positions {
        /// GFA file to read
        gfa: PathBuf,
        /// Only report this path
        #[arg(long)]
        path: Option<String>,
    },
    /// Show where each node lands in a linear layout
    Layout {
        /// GFA file to read
        gfa: PathBuf,
        /// Order nodes along the paths instead of by id
        #[arg(long)]
        by_path: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<HashGraph, String> {
    read_gfa_file(path).map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_stats(stats: &GraphStats) {
    println!("nodes:   {}", stats.nodes);
    println!("edges:   {}", stats.edges);
    println!("paths:   {}", stats.paths);
    println!("length:  {}", stats.length);
    if let (Some(min), Some(max)) = (stats.min_node_id, stats.max_node_id) {
        println!("ids:     {}..={}", min, max);
    }
}

fn print_positions(positions: &[PathPositions]) {
    for path in positions {
        println!("{} ({} bp, {} steps)", path.path, path.length, path.steps.len());
        for step in &path.steps {
            println!("  {:>6}  {:>10}  {}", step.rank, step.position, step.handle);
        }
    }
}

fn print_layout(entries: &[LayoutEntry]) {
    println!("{:>6}  {:>12}  {:>10}  {:>8}", "RANK", "NODE", "OFFSET", "LENGTH");
    println!("{}", "-".repeat(42));
    for entry in entries {
        println!(
            "{:>6}  {:>12}  {:>10}  {:>8}",
            entry.rank, entry.node, entry.offset, entry.length
        );
    }
}

fn cmd_stats(graph: &HashGraph, json: bool) -> i32 {
    let stats = report::graph_stats(graph);
    if json {
        return print_json(&stats);
    }
    print_stats(&stats);
    0
}

fn cmd_positions(graph: &HashGraph, path: Option<&str>, json: bool) -> i32 {
    let positions = match report::path_positions(graph, path) {
        Ok(positions) => positions,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if json {
        return print_json(&positions);
    }
    print_positions(&positions);
    0
}

fn cmd_layout(graph: &HashGraph, by_path: bool, json: bool) -> i32 {
    let entries = report::layout(graph, by_path);
    if json {
        return print_json(&entries);
    }
    print_layout(&entries);
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let gfa = match &cli.command {
        Commands::Stats { gfa } | Commands::Positions { gfa, .. } | Commands::Layout { gfa, .. } => gfa,
    };
    let graph = match load(gfa) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match &cli.command {
        Commands::Stats { .. } => cmd_stats(&graph, cli.json),
        Commands::Positions { path, .. } => cmd_positions(&graph, path.as_deref(), cli.json),
        Commands::Layout { by_path, .. } => cmd_layout(&graph, *by_path, cli.json),
    };
    std::process::exit(code);
}
