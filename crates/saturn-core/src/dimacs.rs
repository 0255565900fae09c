//! DIMACS graph file format parser.
//!
//! Parses DIMACS `.col` files, the standard format for graph coloring
//! benchmark problems:
//! - Lines starting with 'c' are comments (ignored)
//! - Line starting with 'p edge N M' declares N vertices and M edges
//! - Lines starting with 'e U V' declare an edge between vertices U and V
//!   (1-indexed)
//!
//! ```text
//! c Triangle graph example
//! p edge 3 3
//! e 1 2
//! e 2 3
//! e 1 3
//! ```

use crate::errors::{Result, SaturnError};
use crate::types::Graph;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses a DIMACS `.col` file into a [`Graph`].
///
/// Vertices are converted from 1-indexed (DIMACS standard) to 0-indexed.
/// The vertex count comes from the problem line, so trailing isolated
/// vertices are preserved. Self-loops are skipped with a warning and
/// duplicate edges collapse; a mismatch between the declared and actual
/// edge count is logged, not fatal.
///
/// `block_size` is the layout granularity of the adjacency bit sets.
pub fn parse_dimacs_file<P: AsRef<Path>>(path: P, block_size: usize) -> Result<Graph> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|e| {
        SaturnError::parse(format!(
            "failed to open DIMACS file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    let reader = BufReader::new(file);

    let mut num_vertices = 0usize;
    let mut num_edges_declared = 0usize;
    let mut edges: Vec<(u32, u32)> = Vec::new();
    let mut problem_line_found = false;

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| {
            SaturnError::parse(format!(
                "failed to read line {} from DIMACS file: {}",
                line_num + 1,
                e
            ))
        })?;

        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts[0] {
            "p" => {
                // Problem line: p edge N M
                if parts.len() < 4 {
                    return Err(SaturnError::parse(format!(
                        "invalid problem line format at line {}: expected 'p edge N M', got '{}'",
                        line_num + 1,
                        line
                    )));
                }
                if parts[1] != "edge" {
                    return Err(SaturnError::parse(format!(
                        "unsupported problem type '{}' at line {}: only 'edge' is supported",
                        parts[1],
                        line_num + 1
                    )));
                }

                num_vertices = parts[2].parse::<usize>().map_err(|_| {
                    SaturnError::parse(format!(
                        "invalid vertex count '{}' at line {}: must be a non-negative integer",
                        parts[2],
                        line_num + 1
                    ))
                })?;

                num_edges_declared = parts[3].parse::<usize>().map_err(|_| {
                    SaturnError::parse(format!(
                        "invalid edge count '{}' at line {}: must be a non-negative integer",
                        parts[3],
                        line_num + 1
                    ))
                })?;

                problem_line_found = true;
            }
            "e" => {
                // Edge line: e U V
                if !problem_line_found {
                    return Err(SaturnError::parse(format!(
                        "edge definition at line {} before problem line (expected 'p edge N M' first)",
                        line_num + 1
                    )));
                }

                if parts.len() < 3 {
                    return Err(SaturnError::parse(format!(
                        "invalid edge line format at line {}: expected 'e U V', got '{}'",
                        line_num + 1,
                        line
                    )));
                }

                let u = parts[1].parse::<u32>().map_err(|_| {
                    SaturnError::parse(format!(
                        "invalid vertex id '{}' at line {}: must be a positive integer",
                        parts[1],
                        line_num + 1
                    ))
                })?;

                let v = parts[2].parse::<u32>().map_err(|_| {
                    SaturnError::parse(format!(
                        "invalid vertex id '{}' at line {}: must be a positive integer",
                        parts[2],
                        line_num + 1
                    ))
                })?;

                // DIMACS is 1-indexed
                if u == 0 || u as usize > num_vertices {
                    return Err(SaturnError::parse(format!(
                        "vertex id {} at line {} out of range [1, {}]",
                        u,
                        line_num + 1,
                        num_vertices
                    )));
                }
                if v == 0 || v as usize > num_vertices {
                    return Err(SaturnError::parse(format!(
                        "vertex id {} at line {} out of range [1, {}]",
                        v,
                        line_num + 1,
                        num_vertices
                    )));
                }

                edges.push((u - 1, v - 1));
            }
            _ => {
                // Ignore unknown line types (forward compatibility)
                log::debug!(
                    "ignoring unknown DIMACS line type '{}' at line {}",
                    parts[0],
                    line_num + 1
                );
            }
        }
    }

    if !problem_line_found {
        return Err(SaturnError::parse(
            "no problem line found in DIMACS file (expected 'p edge N M')",
        ));
    }

    let graph = Graph::with_vertices(num_vertices, &edges, block_size)?;

    if graph.num_edges() != num_edges_declared {
        log::warn!(
            "DIMACS file declared {} edges but actual edge count is {} (after deduplication)",
            num_edges_declared,
            graph.num_edges()
        );
    }

    Ok(graph)
}
