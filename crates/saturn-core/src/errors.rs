//! Error types for saturn.

use thiserror::Error;

/// Unified error type for all saturn operations.
///
/// Boundary failures (malformed input, bad configuration, unknown modes)
/// are reported through this type. Internal bit-set contract violations
/// (index out of range, incompatible operands) are programming errors and
/// panic instead; see [`crate::bitset::BitSet`].
#[derive(Error, Debug)]
pub enum SaturnError {
    /// An edge references a vertex outside the declared vertex range.
    #[error("invalid edge ({u}, {v}): {reason}")]
    InvalidEdge { u: u32, v: u32, reason: String },

    /// Requested coloring mode is not recognized.
    #[error("unsupported mode '{0}': available modes are greedy, bnb (branch-and-bound)")]
    UnsupportedMode(String),

    /// Configuration value is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input file is not valid DIMACS.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O errors (file reading, telemetry writing).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SaturnError {
    /// Creates an invalid-edge error.
    pub fn invalid_edge(u: u32, v: u32, reason: impl Into<String>) -> Self {
        SaturnError::InvalidEdge {
            u,
            v,
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        SaturnError::Config(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        SaturnError::Parse(message.into())
    }

    /// Creates an unsupported-mode error.
    pub fn unsupported_mode(mode: impl Into<String>) -> Self {
        SaturnError::UnsupportedMode(mode.into())
    }
}

/// Result type alias for saturn operations.
pub type Result<T> = std::result::Result<T, SaturnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let edge_err = SaturnError::invalid_edge(3, 7, "vertex id out of range");
        assert!(matches!(edge_err, SaturnError::InvalidEdge { u: 3, v: 7, .. }));

        let config_err = SaturnError::config("block size must be at least 1");
        assert!(matches!(config_err, SaturnError::Config(_)));

        let mode_err = SaturnError::unsupported_mode("annealing");
        assert!(matches!(mode_err, SaturnError::UnsupportedMode(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = SaturnError::unsupported_mode("dfs");
        let message = err.to_string();
        assert!(message.contains("dfs"));
        assert!(message.contains("greedy"));
        assert!(message.contains("bnb"));
    }
}
