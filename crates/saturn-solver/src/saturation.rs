//! Saturation state over a graph and a partial coloring.
//!
//! The tracker is the shared mutable state both strategies drive: for
//! every vertex it holds the set of colors its colored neighbors already
//! use (the saturation set), the cached count of those colors (the
//! saturation degree), and the count of adjacent still-uncolored vertices.
//! Branch-and-bound mutates one tracker in place along the whole search,
//! so `uncolor_vertex` must be the exact inverse of `color_vertex`; the
//! per-vertex per-color neighbor reference counts make that exact without
//! recomputation.

use saturn_core::{BitSet, Graph};

/// Mutable saturation state for a single solver run.
pub struct SaturationTracker<'g> {
    graph: &'g Graph,
    palette: usize,
    colors: Vec<Option<usize>>,
    /// Per vertex: colors used by at least one colored neighbor.
    forbidden: Vec<BitSet>,
    /// Per vertex, per color: how many colored neighbors carry that color.
    color_refs: Vec<Vec<u32>>,
    /// Cached popcount of each forbidden set.
    saturation: Vec<usize>,
    uncolored: BitSet,
    uncolored_degree: Vec<usize>,
    uncolored_count: usize,
}

impl<'g> SaturationTracker<'g> {
    /// Creates a fresh tracker with an all-uncolored state.
    ///
    /// `palette` bounds the colors a run may assign; the forbidden sets
    /// are sized to it up front. `block_size_colors` is the layout
    /// granularity of the color-indexed sets (the vertex-indexed mask
    /// inherits the graph's block size so it stays compatible with the
    /// adjacency rows).
    pub fn new(graph: &'g Graph, palette: usize, block_size_colors: usize) -> Self {
        let n = graph.num_vertices();
        Self {
            graph,
            palette,
            colors: vec![None; n],
            forbidden: (0..n)
                .map(|_| BitSet::new(palette, block_size_colors))
                .collect(),
            color_refs: vec![vec![0; palette]; n],
            saturation: vec![0; n],
            uncolored: BitSet::full(n, graph.block_size()),
            uncolored_degree: (0..n).map(|v| graph.degree(v)).collect(),
            uncolored_count: n,
        }
    }

    /// Assigns color `color` to `vertex` and updates neighbor state.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is already colored or `color` is outside the
    /// palette.
    pub fn color_vertex(&mut self, vertex: usize, color: usize) {
        assert!(
            self.colors[vertex].is_none(),
            "vertex {} is already colored",
            vertex
        );
        self.colors[vertex] = Some(color);
        self.uncolored.clear(vertex);
        self.uncolored_count -= 1;

        let graph = self.graph;
        for u in graph.neighbors(vertex) {
            self.uncolored_degree[u] -= 1;
            let refs = &mut self.color_refs[u][color];
            *refs += 1;
            if *refs == 1 {
                self.forbidden[u].set(color);
                self.saturation[u] += 1;
            }
        }
    }

    /// Exact inverse of [`color_vertex`](Self::color_vertex); used on
    /// backtrack only.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not colored.
    pub fn uncolor_vertex(&mut self, vertex: usize) {
        let color = self.colors[vertex]
            .take()
            .unwrap_or_else(|| panic!("vertex {} is not colored", vertex));
        self.uncolored.set(vertex);
        self.uncolored_count += 1;

        let graph = self.graph;
        for u in graph.neighbors(vertex) {
            self.uncolored_degree[u] += 1;
            let refs = &mut self.color_refs[u][color];
            *refs -= 1;
            if *refs == 0 {
                self.forbidden[u].clear(color);
                self.saturation[u] -= 1;
            }
        }
    }

    /// Selects the next vertex to color: maximum saturation degree, ties
    /// broken by maximum uncolored degree, then by smallest index.
    ///
    /// Returns `None` once every vertex is colored.
    pub fn pick_next_vertex(&self) -> Option<usize> {
        let mut best: Option<(usize, usize, usize)> = None;
        for v in self.uncolored.ones() {
            let key = (self.saturation[v], self.uncolored_degree[v]);
            // Strictly-greater comparison over an ascending scan keeps the
            // smallest index on ties.
            if best.map_or(true, |(s, d, _)| key > (s, d)) {
                best = Some((key.0, key.1, v));
            }
        }
        best.map(|(_, _, v)| v)
    }

    /// First-fit: smallest color not forbidden at `vertex`, or `None`
    /// when the whole palette is forbidden.
    pub fn smallest_available_color(&self, vertex: usize) -> Option<usize> {
        self.forbidden[vertex].first_unset()
    }

    /// Returns `true` if `color` is used by a colored neighbor of `vertex`.
    pub fn is_forbidden(&self, vertex: usize, color: usize) -> bool {
        self.forbidden[vertex].test(color)
    }

    /// Saturation degree of `vertex`.
    pub fn saturation_degree(&self, vertex: usize) -> usize {
        self.saturation[vertex]
    }

    /// Number of adjacent still-uncolored vertices.
    pub fn uncolored_degree(&self, vertex: usize) -> usize {
        self.uncolored_degree[vertex]
    }

    /// Current color of each vertex (`None` = uncolored).
    pub fn colors(&self) -> &[Option<usize>] {
        &self.colors
    }

    /// Mask of still-uncolored vertices.
    pub fn uncolored_mask(&self) -> &BitSet {
        &self.uncolored
    }

    /// Number of still-uncolored vertices.
    pub fn uncolored_count(&self) -> usize {
        self.uncolored_count
    }

    /// Palette capacity of this run.
    pub fn palette(&self) -> usize {
        self.palette
    }
}
