//! Graph representation and coloring solutions.

use crate::bitset::{BitSet, Ones};
use crate::errors::{Result, SaturnError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Undirected graph with bit-set adjacency rows.
///
/// Immutable after construction: each vertex owns a [`BitSet`] of its
/// neighbors, all rows sharing the graph's vertex count as capacity and a
/// common block size. Adjacency is symmetric and loop-free.
#[derive(Debug, Clone)]
pub struct Graph {
    num_vertices: usize,
    num_edges: usize,
    adjacency: Vec<BitSet>,
    block_size: usize,
}

impl Graph {
    /// Builds a graph from an edge list, inferring the vertex count as one
    /// plus the largest vertex id referenced (zero for an empty list).
    ///
    /// Self-loops carry no coloring constraint and are skipped with a
    /// warning; duplicate edges collapse into one.
    pub fn from_edges(edges: &[(u32, u32)], block_size: usize) -> Self {
        let num_vertices = edges
            .iter()
            .map(|&(u, v)| u.max(v) as usize + 1)
            .max()
            .unwrap_or(0);
        Self::build(num_vertices, edges, block_size)
    }

    /// Builds a graph with an explicit vertex count, so trailing isolated
    /// vertices beyond every edge can be represented.
    ///
    /// Fails with [`SaturnError::InvalidEdge`] if an edge references a
    /// vertex at or beyond `num_vertices`.
    pub fn with_vertices(
        num_vertices: usize,
        edges: &[(u32, u32)],
        block_size: usize,
    ) -> Result<Self> {
        for &(u, v) in edges {
            if u as usize >= num_vertices || v as usize >= num_vertices {
                return Err(SaturnError::invalid_edge(
                    u,
                    v,
                    format!("vertex id out of range for {} vertices", num_vertices),
                ));
            }
        }
        Ok(Self::build(num_vertices, edges, block_size))
    }

    fn build(num_vertices: usize, edges: &[(u32, u32)], block_size: usize) -> Self {
        let mut adjacency: Vec<BitSet> = (0..num_vertices)
            .map(|_| BitSet::new(num_vertices, block_size))
            .collect();
        let mut num_edges = 0;

        for &(u, v) in edges {
            if u == v {
                log::warn!("skipping self-loop edge ({}, {})", u, v);
                continue;
            }
            let (u, v) = (u as usize, v as usize);
            if !adjacency[u].test(v) {
                num_edges += 1;
            }
            adjacency[u].set(v);
            adjacency[v].set(u);
        }

        Self {
            num_vertices,
            num_edges,
            adjacency,
            block_size,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of distinct undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Block size of the adjacency rows, in bits.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Adjacency row of `vertex`.
    #[inline]
    pub fn adjacency(&self, vertex: usize) -> &BitSet {
        &self.adjacency[vertex]
    }

    /// Iterates over the neighbors of `vertex` in increasing order.
    pub fn neighbors(&self, vertex: usize) -> Ones<'_> {
        self.adjacency[vertex].ones()
    }

    /// Degree of `vertex`.
    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].popcount()
    }

    /// Returns `true` if `u` and `v` are adjacent.
    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.adjacency[u].test(v)
    }

    /// Graph density: |E| / (|V| * (|V| - 1) / 2)
    pub fn density(&self) -> f64 {
        if self.num_vertices <= 1 {
            return 0.0;
        }
        (2.0 * self.num_edges as f64) / (self.num_vertices * (self.num_vertices - 1)) as f64
    }
}

/// Solution to a graph coloring problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColoringSolution {
    /// Color assignment for each vertex (vertex index -> color, 0-based).
    pub colors: Vec<usize>,

    /// Number of distinct colors used.
    pub num_colors: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: f64,
}

impl ColoringSolution {
    /// Creates a solution from a color vector, computing the distinct
    /// color count.
    pub fn from_colors(colors: Vec<usize>) -> Self {
        let num_colors = colors.iter().collect::<HashSet<_>>().len();
        Self {
            colors,
            num_colors,
            computation_time_ms: 0.0,
        }
    }

    /// Validates the solution against the graph.
    ///
    /// Returns the number of conflicts (edges whose endpoints share a
    /// color). A proper coloring has zero.
    pub fn validate(&self, graph: &Graph) -> usize {
        let mut conflicts = 0;
        for u in 0..graph.num_vertices() {
            for v in graph.neighbors(u) {
                if u < v && self.colors[u] == self.colors[v] {
                    conflicts += 1;
                }
            }
        }
        conflicts
    }

    /// Checks the solution is a proper coloring of `graph`.
    pub fn is_valid(&self, graph: &Graph) -> bool {
        self.colors.len() == graph.num_vertices() && self.validate(graph) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_from_edges() {
        let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 100);

        assert_eq!(graph.num_vertices(), 4);
        assert_eq!(graph.num_edges(), 3);
        assert!(graph.is_adjacent(0, 1));
        assert!(graph.is_adjacent(1, 0));
        assert!(!graph.is_adjacent(0, 2));
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_vertex_count_inferred_from_max_id() {
        // Vertex 9 appears in no edge below the max id but still exists.
        let graph = Graph::from_edges(&[(2, 9)], 100);
        assert_eq!(graph.num_vertices(), 10);
        assert_eq!(graph.degree(5), 0);
    }

    #[test]
    fn test_empty_edge_list() {
        let graph = Graph::from_edges(&[], 100);
        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.density(), 0.0);
    }

    #[test]
    fn test_self_loops_and_duplicates_collapse() {
        let graph = Graph::from_edges(&[(0, 1), (1, 0), (0, 1), (2, 2)], 100);
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 1);
        assert!(!graph.is_adjacent(2, 2));
    }

    #[test]
    fn test_with_vertices_allows_trailing_isolated() {
        let graph = Graph::with_vertices(5, &[(0, 1)], 100).unwrap();
        assert_eq!(graph.num_vertices(), 5);
        assert_eq!(graph.degree(4), 0);
    }

    #[test]
    fn test_with_vertices_rejects_out_of_range() {
        let result = Graph::with_vertices(3, &[(0, 3)], 100);
        assert!(matches!(
            result,
            Err(SaturnError::InvalidEdge { u: 0, v: 3, .. })
        ));
    }

    #[test]
    fn test_density() {
        let triangle = Graph::from_edges(&[(0, 1), (1, 2), (0, 2)], 100);
        assert!((triangle.density() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_solution_validation() {
        let graph = Graph::from_edges(&[(0, 1), (1, 2)], 100);

        let valid = ColoringSolution::from_colors(vec![0, 1, 0]);
        assert_eq!(valid.num_colors, 2);
        assert_eq!(valid.validate(&graph), 0);
        assert!(valid.is_valid(&graph));

        let invalid = ColoringSolution::from_colors(vec![0, 0, 1]);
        assert_eq!(invalid.validate(&graph), 1);
        assert!(!invalid.is_valid(&graph));
    }
}
