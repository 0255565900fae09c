//! # saturn-core
//!
//! Core types for the saturn graph coloring engine.
//!
//! This crate defines the fundamental pieces shared by the solver and CLI:
//! - **BitSet**: fixed-capacity bit vector with a tunable block layout
//! - **Types**: graph representation and coloring solutions
//! - **DIMACS**: parser for standard `.col` benchmark files
//! - **Errors**: unified error handling with `SaturnError`

pub mod bitset;
pub mod dimacs;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use bitset::BitSet;
pub use errors::{Result, SaturnError};
pub use types::{ColoringSolution, Graph};

/// Default bit-set block size, in bits.
///
/// Purely a layout granularity; it never affects coloring results.
pub const DEFAULT_BLOCK_SIZE: usize = 100;
