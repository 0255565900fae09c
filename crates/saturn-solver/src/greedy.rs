//! Greedy DSATUR coloring.
//!
//! Single pass: repeatedly color the most saturated uncolored vertex with
//! the smallest color its neighbors have not taken. No backtracking, no
//! time limit; the tie-break rules make the result fully deterministic.
//! The color count it produces seeds the branch-and-bound upper bound.

use crate::saturation::SaturationTracker;
use saturn_core::{ColoringSolution, Graph};
use std::time::Instant;

/// One-shot DSATUR colorer over a fresh tracker.
pub struct GreedyColorer<'g> {
    tracker: SaturationTracker<'g>,
}

impl<'g> GreedyColorer<'g> {
    /// Prepares a greedy run. The palette is sized to the vertex count:
    /// first-fit over a proper partial coloring can never need more.
    pub fn new(graph: &'g Graph, block_size_colors: usize) -> Self {
        Self {
            tracker: SaturationTracker::new(graph, graph.num_vertices(), block_size_colors),
        }
    }

    /// Colors every vertex and returns the complete solution.
    pub fn run(mut self) -> ColoringSolution {
        let start = Instant::now();

        while let Some(vertex) = self.tracker.pick_next_vertex() {
            let color = self
                .tracker
                .smallest_available_color(vertex)
                .expect("palette sized to the vertex count cannot be exhausted");
            self.tracker.color_vertex(vertex, color);
        }

        let colors = self
            .tracker
            .colors()
            .iter()
            .map(|c| c.expect("greedy run left a vertex uncolored"))
            .collect();

        let mut solution = ColoringSolution::from_colors(colors);
        solution.computation_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        log::debug!(
            "greedy: {} colors on {} vertices in {:.2}ms",
            solution.num_colors,
            self.tracker.colors().len(),
            solution.computation_time_ms
        );

        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greedy(edges: &[(u32, u32)]) -> ColoringSolution {
        let graph = Graph::from_edges(edges, 100);
        GreedyColorer::new(&graph, 100).run()
    }

    #[test]
    fn test_worked_example() {
        // Vertex 1 has the highest degree and is colored first with color
        // 0; its neighbors are forced away from it; vertex 4 is only
        // constrained by vertex 3.
        let solution = greedy(&[(4, 3), (0, 1), (1, 2), (1, 3)]);
        assert_eq!(solution.num_colors, 2);
        assert_eq!(solution.colors, vec![1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_triangle_needs_three() {
        let edges = [(0, 1), (1, 2), (0, 2)];
        let graph = Graph::from_edges(&edges, 100);
        let solution = GreedyColorer::new(&graph, 100).run();
        assert_eq!(solution.num_colors, 3);
        assert!(solution.is_valid(&graph));
    }

    #[test]
    fn test_bipartite_uses_two() {
        // C6 is bipartite; DSATUR finds the 2-coloring.
        let solution = greedy(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        assert_eq!(solution.num_colors, 2);
    }

    #[test]
    fn test_empty_graph() {
        let solution = greedy(&[]);
        assert_eq!(solution.num_colors, 0);
        assert!(solution.colors.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let edges = [(0, 3), (1, 4), (2, 5), (0, 4), (1, 5), (2, 3), (3, 5)];
        let first = greedy(&edges);
        for _ in 0..5 {
            let again = greedy(&edges);
            assert_eq!(again.colors, first.colors);
            assert_eq!(again.num_colors, first.num_colors);
        }
    }

    #[test]
    fn test_block_size_does_not_change_result() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (4, 0), (4, 2)];
        let baseline = {
            let graph = Graph::from_edges(&edges, 100);
            GreedyColorer::new(&graph, 100).run()
        };
        for (bs1, bs2) in [(1, 1), (7, 3), (64, 64), (128, 100)] {
            let graph = Graph::from_edges(&edges, bs1);
            let solution = GreedyColorer::new(&graph, bs2).run();
            assert_eq!(solution.colors, baseline.colors, "bs1={} bs2={}", bs1, bs2);
        }
    }

    #[test]
    fn test_validity_on_denser_graph() {
        // Two overlapping cliques.
        let edges = [
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 2),
            (1, 3),
            (2, 3),
            (3, 4),
            (3, 5),
            (4, 5),
            (4, 6),
            (5, 6),
        ];
        let graph = Graph::from_edges(&edges, 100);
        let solution = GreedyColorer::new(&graph, 100).run();
        assert!(solution.is_valid(&graph));
        assert_eq!(solution.colors.len(), 7);
        // K4 forces at least 4 colors.
        assert!(solution.num_colors >= 4);
    }
}
