//! Error types for map graph construction

use std::fmt;

/// Errors that can occur while building or configuring a map graph
#[derive(Debug, Clone)]
pub enum GraphError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// The Voronoi source reported no nearest site for a domain corner
    MissingCornerOwner {
        /// Planar x coordinate of the corner
        x: f32,
        /// Planar z coordinate of the corner
        z: f32,
    },
    /// Construction failed due to geometry issues
    GenerationFailed(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            GraphError::MissingCornerOwner { x, z } => {
                write!(f, "no nearest site for domain corner ({}, {})", x, z)
            }
            GraphError::GenerationFailed(msg) => write!(f, "generation failed: {}", msg),
        }
    }
}

impl std::error::Error for GraphError {}

/// Result type alias for map graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
