//! Headless Colony Runner
//!
//! Loads a text maze, runs the ant colony over it and prints the outcome as
//! JSON or a short text summary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use maze_colony::colony::{ColonyOptimizer, ColonyOutcome};
use maze_colony::core::error::{ColonyError, Result};
use maze_colony::core::types::Coordinate;
use maze_colony::core::ColonyConfig;
use maze_colony::maze::MazeLoader;

/// Headless Colony Runner - ant colony shortest-path search on a text maze
#[derive(Parser, Debug)]
#[command(name = "colony_runner")]
#[command(about = "Run ant colony optimization on a maze file and report the best path")]
struct Args {
    /// Maze text file (`#` wall, `.` floor, `S` start, `E` end)
    #[arg(long)]
    maze: PathBuf,

    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ants per iteration
    #[arg(long)]
    ants: Option<u32>,

    /// Number of iterations
    #[arg(long)]
    iterations: Option<u32>,

    /// Pheromone deposited per successful walk
    #[arg(long)]
    deposit: Option<f64>,

    /// Evaporation rate per iteration, in (0, 1)
    #[arg(long)]
    evaporation: Option<f64>,

    /// Step budget per walk
    #[arg(long)]
    max_steps: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Start cell as `row,col` (overrides the `S` marker)
    #[arg(long, value_parser = parse_coordinate)]
    start: Option<Coordinate>,

    /// End cell as `row,col` (overrides the `E` marker)
    #[arg(long, value_parser = parse_coordinate)]
    end: Option<Coordinate>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every iteration
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_coordinate(s: &str) -> std::result::Result<Coordinate, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got '{}'", s))?;
    let row = row.trim().parse().map_err(|e| format!("bad row '{}': {}", row, e))?;
    let col = col.trim().parse().map_err(|e| format!("bad col '{}': {}", col, e))?;
    Ok(Coordinate::new(row, col))
}

fn build_config(args: &Args) -> Result<ColonyConfig> {
    let mut config = match &args.config {
        Some(path) => ColonyConfig::load(path)?,
        None => ColonyConfig::default(),
    };

    if let Some(ants) = args.ants {
        config.num_ants = ants;
    }
    if let Some(iterations) = args.iterations {
        config.num_iterations = iterations;
    }
    if let Some(deposit) = args.deposit {
        config.deposit_amount = deposit;
    }
    if let Some(rate) = args.evaporation {
        config.evaporation_rate = rate;
    }
    if let Some(steps) = args.max_steps {
        config.max_steps = steps;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let loaded = MazeLoader::from_file(&args.maze)?;

    let start = args.start.or(loaded.start).ok_or_else(|| {
        ColonyError::InvalidArgument("no start cell: add an 'S' marker or pass --start".into())
    })?;
    let end = args.end.or(loaded.end).ok_or_else(|| {
        ColonyError::InvalidArgument("no end cell: add an 'E' marker or pass --end".into())
    })?;

    tracing::info!(
        "Maze {}x{} ({} walkable), start {}, end {}, {} ants x {} iterations",
        loaded.maze.rows(),
        loaded.maze.cols(),
        loaded.maze.walkable_count(),
        start,
        end,
        config.num_ants,
        config.num_iterations
    );

    let outcome = ColonyOptimizer::new(&loaded.maze, start, end, config)?.run()?;

    println!("{}", render_output(&outcome, &args.format));
    Ok(())
}

fn render_output(outcome: &ColonyOutcome, format: &str) -> String {
    match format {
        "json" => outcome.to_json(),
        "text" => {
            let mut text = outcome.summary();
            if let Some(path) = &outcome.best_path {
                let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
                text.push_str(&format!("\nPath: {}", cells.join(" -> ")));
            }
            text
        }
        _ => {
            tracing::warn!("Unknown format '{}', defaulting to json", format);
            outcome.to_json()
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_colony::colony::run as run_colony;
    use maze_colony::maze::Maze;

    fn outcome() -> ColonyOutcome {
        let maze = Maze::open(1, 3).unwrap();
        let config = ColonyConfig {
            num_ants: 2,
            num_iterations: 2,
            seed: Some(6),
            ..Default::default()
        };
        run_colony(&maze, Coordinate::new(0, 0), Coordinate::new(0, 2), config).unwrap()
    }

    #[test]
    fn test_text_format_lists_path() {
        let text = render_output(&outcome(), "text");
        assert!(text.contains("Path: (0, 0) -> (0, 1) -> (0, 2)"));
    }

    #[test]
    fn test_unknown_format_falls_back_to_json() {
        let outcome = outcome();
        let fallback = render_output(&outcome, "yaml");
        assert_eq!(fallback, render_output(&outcome, "json"));
        assert!(serde_json::from_str::<serde_json::Value>(&fallback).is_ok());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("2, 3").unwrap(), Coordinate::new(2, 3));
        assert!(parse_coordinate("2").is_err());
        assert!(parse_coordinate("a,1").is_err());
    }
}
