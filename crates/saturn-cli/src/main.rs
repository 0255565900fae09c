//! saturn CLI entry point.
//!
//! Saturation-degree graph coloring over DIMACS `.col` inputs: greedy
//! DSATUR, or anytime branch-and-bound seeded by it.

use anyhow::{Context, Result};
use clap::Parser;
use saturn_core::dimacs::parse_dimacs_file;
use saturn_solver::{solve_with_stats, Mode, SolverConfig};
use std::io::Write;
use std::time::Duration;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "saturn")]
#[command(version = VERSION)]
#[command(about = "Saturation-degree graph coloring: greedy DSATUR and branch-and-bound", long_about = None)]
struct Args {
    /// Input graph file in DIMACS .col format
    #[arg(short, long)]
    input: String,

    /// Coloring mode: greedy (one-shot DSATUR) or bnb (branch-and-bound
    /// seeded by an internal greedy run)
    #[arg(short, long, default_value = "greedy")]
    mode: String,

    /// Wall-clock time limit in seconds (bnb only)
    ///
    /// On expiry the best complete coloring found so far is returned,
    /// which is at worst the greedy seed.
    #[arg(long)]
    timeout: Option<u64>,

    /// Stop as soon as the greedy color count improves by this many
    /// colors (bnb only)
    #[arg(long)]
    improve: Option<usize>,

    /// Bit-set block size for vertex-indexed sets (layout tuning only)
    #[arg(long, default_value = "100")]
    block_size_vertices: usize,

    /// Bit-set block size for color-indexed sets (layout tuning only)
    #[arg(long, default_value = "100")]
    block_size_colors: usize,

    /// Print the solution as JSON on stdout
    #[arg(long, default_value = "false")]
    json: bool,

    /// Append a JSON-lines run record to this file
    #[arg(long)]
    telemetry: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("saturn {} - starting", VERSION);

    let mode: Mode = args
        .mode
        .parse()
        .with_context(|| format!("invalid --mode '{}'", args.mode))?;

    let config = SolverConfig {
        mode,
        block_size_vertices: args.block_size_vertices,
        block_size_colors: args.block_size_colors,
        timeout: args.timeout.map(Duration::from_secs),
        improve: args.improve,
    };

    let graph = parse_dimacs_file(&args.input, config.block_size_vertices)
        .with_context(|| format!("failed to load '{}'", args.input))?;

    log::info!(
        "Loaded graph: {} vertices, {} edges, density {:.3}",
        graph.num_vertices(),
        graph.num_edges(),
        graph.density()
    );

    let (solution, stats) = solve_with_stats(&graph, &config)?;

    let conflicts = solution.validate(&graph);
    log::info!("Coloring completed ({} mode)", mode);
    log::info!("  Colors used: {}", solution.num_colors);
    log::info!("  Conflicts: {}", conflicts);
    log::info!("  Runtime: {:.2}ms", solution.computation_time_ms);
    if let Some(stats) = &stats {
        log::info!(
            "  Search: {} nodes, {} backtracks, {} pruned, {} improvement(s){}",
            stats.nodes,
            stats.backtracks,
            stats.pruned,
            stats.improvements,
            if stats.timed_out { ", timed out" } else { "" }
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        println!("{} colors", solution.num_colors);
        println!("{:?}", solution.colors);
    }

    if let Some(path) = &args.telemetry {
        let record = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "input": args.input,
            "mode": mode.to_string(),
            "graph_vertices": graph.num_vertices(),
            "graph_edges": graph.num_edges(),
            "num_colors": solution.num_colors,
            "conflicts": conflicts,
            "runtime_ms": solution.computation_time_ms,
            "search": stats,
        });
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open telemetry file '{}'", path))?;
        writeln!(file, "{}", serde_json::to_string(&record)?)?;
        log::info!("Telemetry written to: {}", path);
    }

    Ok(())
}
