//! # saturn-solver
//!
//! Saturation-degree coloring strategies for the saturn engine:
//! - **SaturationTracker**: shared per-run state (forbidden colors,
//!   saturation degrees, uncolored mask)
//! - **GreedyColorer**: one-shot DSATUR heuristic
//! - **BranchAndBound**: anytime exact search seeded by the greedy result
//!
//! The [`color_graph`] and [`solve`] entry points wire the pieces
//! together according to a [`SolverConfig`].

pub mod bnb;
pub mod greedy;
pub mod saturation;

pub use bnb::{BranchAndBound, SearchStats};
pub use greedy::GreedyColorer;
pub use saturation::SaturationTracker;

use saturn_core::{ColoringSolution, Graph, Result, SaturnError, DEFAULT_BLOCK_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Coloring strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One-shot DSATUR heuristic.
    Greedy,
    /// Branch-and-bound search seeded by an internal greedy run.
    #[serde(rename = "bnb")]
    BranchAndBound,
}

impl FromStr for Mode {
    type Err = SaturnError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greedy" => Ok(Mode::Greedy),
            "bnb" => Ok(Mode::BranchAndBound),
            other => Err(SaturnError::unsupported_mode(other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Greedy => write!(f, "greedy"),
            Mode::BranchAndBound => write!(f, "bnb"),
        }
    }
}

/// Configuration for a solver run.
///
/// The two block sizes tune the internal bit-set layout for the
/// vertex-indexed and color-indexed families respectively; they never
/// affect the returned coloring. `timeout` and `improve` apply to
/// branch-and-bound only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub mode: Mode,
    pub block_size_vertices: usize,
    pub block_size_colors: usize,
    pub timeout: Option<Duration>,
    pub improve: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Greedy,
            block_size_vertices: DEFAULT_BLOCK_SIZE,
            block_size_colors: DEFAULT_BLOCK_SIZE,
            timeout: None,
            improve: None,
        }
    }
}

impl SolverConfig {
    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.block_size_vertices == 0 || self.block_size_colors == 0 {
            return Err(SaturnError::config("block sizes must be at least 1"));
        }
        Ok(())
    }
}

/// Colors `graph` according to `config`, returning the solution together
/// with branch-and-bound search counters when that mode ran.
pub fn solve_with_stats(
    graph: &Graph,
    config: &SolverConfig,
) -> Result<(ColoringSolution, Option<SearchStats>)> {
    config.validate()?;

    if config.mode == Mode::Greedy && (config.timeout.is_some() || config.improve.is_some()) {
        log::warn!("timeout/improve are branch-and-bound options; greedy mode ignores them");
    }

    let seed = GreedyColorer::new(graph, config.block_size_colors).run();

    match config.mode {
        Mode::Greedy => Ok((seed, None)),
        Mode::BranchAndBound => {
            let (best, stats) = BranchAndBound::new(
                graph,
                config.block_size_colors,
                config.timeout,
                config.improve,
            )
            .run(seed);
            Ok((best, Some(stats)))
        }
    }
}

/// Colors `graph` according to `config`.
pub fn solve(graph: &Graph, config: &SolverConfig) -> Result<ColoringSolution> {
    solve_with_stats(graph, config).map(|(solution, _)| solution)
}

/// Colors the graph described by `edges`, inferring the vertex count as
/// one plus the largest vertex id referenced.
pub fn color_graph(edges: &[(u32, u32)], config: &SolverConfig) -> Result<ColoringSolution> {
    config.validate()?;
    let graph = Graph::from_edges(edges, config.block_size_vertices);
    solve(&graph, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        assert_eq!("greedy".parse::<Mode>().unwrap(), Mode::Greedy);
        assert_eq!("bnb".parse::<Mode>().unwrap(), Mode::BranchAndBound);
        assert_eq!(Mode::Greedy.to_string(), "greedy");
        assert_eq!(Mode::BranchAndBound.to_string(), "bnb");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "annealing".parse::<Mode>().unwrap_err();
        assert!(matches!(err, SaturnError::UnsupportedMode(_)));
    }

    #[test]
    fn test_config_serde() {
        let config = SolverConfig {
            mode: Mode::BranchAndBound,
            timeout: Some(Duration::from_secs(30)),
            improve: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"bnb\""));
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode, Mode::BranchAndBound);
        assert_eq!(back.improve, Some(2));
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let config = SolverConfig {
            block_size_vertices: 0,
            ..Default::default()
        };
        let err = color_graph(&[(0, 1)], &config).unwrap_err();
        assert!(matches!(err, SaturnError::Config(_)));
    }

    #[test]
    fn test_color_graph_worked_example() {
        let solution = color_graph(&[(4, 3), (0, 1), (1, 2), (1, 3)], &SolverConfig::default())
            .unwrap();
        assert_eq!(solution.num_colors, 2);
        assert_eq!(solution.colors, vec![1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_color_graph_empty() {
        let solution = color_graph(&[], &SolverConfig::default()).unwrap();
        assert_eq!(solution.num_colors, 0);
        assert!(solution.colors.is_empty());
    }

    #[test]
    fn test_modes_agree_on_triangle() {
        let edges = [(0u32, 1u32), (1, 2), (0, 2)];
        let greedy = color_graph(&edges, &SolverConfig::default()).unwrap();
        let bnb = color_graph(
            &edges,
            &SolverConfig {
                mode: Mode::BranchAndBound,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(greedy.num_colors, 3);
        assert_eq!(bnb.num_colors, 3);
    }

    #[test]
    fn test_solve_with_stats_reports_for_bnb_only() {
        let graph = Graph::from_edges(&[(0, 1), (1, 2)], 100);

        let (_, stats) = solve_with_stats(&graph, &SolverConfig::default()).unwrap();
        assert!(stats.is_none());

        let config = SolverConfig {
            mode: Mode::BranchAndBound,
            ..Default::default()
        };
        let (solution, stats) = solve_with_stats(&graph, &config).unwrap();
        assert!(stats.is_some());
        assert!(solution.is_valid(&graph));
    }

    #[test]
    fn test_greedy_num_colors_matches_distinct_values() {
        let edges = [
            (0u32, 1u32),
            (0, 2),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 3),
        ];
        let solution = color_graph(&edges, &SolverConfig::default()).unwrap();
        let distinct: std::collections::HashSet<_> = solution.colors.iter().collect();
        assert_eq!(solution.num_colors, distinct.len());
    }
}
