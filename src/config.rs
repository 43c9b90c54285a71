//! Graph construction configuration and builder
//!
//! Tolerances for vertex deduplication and neighbor matching. All coordinate
//! comparisons during construction go through these two values, never exact
//! equality, to absorb floating-point drift from the upstream clipping stage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Configuration for map graph construction
///
/// The defaults match the tolerances the upstream clipping stage was tuned
/// against and are almost always what you want.
///
/// # Example
///
/// ```rust
/// use voronoi_map_graph::*;
///
/// let config = GraphConfig::default();
/// assert_eq!(config.snap_distance, 0.001);
/// assert_eq!(config.neighbor_snap, 0.5);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    /// Distance below which two points are the same point (default 1e-3)
    ///
    /// Used for vertex identity, degenerate segment removal and outline
    /// splicing. Vertex positions are quantized to this grid.
    pub snap_distance: f32,

    /// Per-axis distance below which two edge endpoints are considered
    /// coincident when matching opposite edges (default 0.5)
    ///
    /// Deliberately much looser than `snap_distance`: the endpoints of two
    /// half-edges along the same boundary accumulate independent rounding
    /// from clipping, and exact matching would leave holes in the graph.
    pub neighbor_snap: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            snap_distance: 1e-3,
            neighbor_snap: 0.5,
        }
    }
}

/// Builder for creating a validated [`GraphConfig`]
///
/// # Example
///
/// ```rust
/// use voronoi_map_graph::*;
///
/// let config = GraphConfigBuilder::new()
///     .neighbor_snap(0.25)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.neighbor_snap, 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct GraphConfigBuilder {
    snap_distance: f32,
    neighbor_snap: f32,
}

impl GraphConfigBuilder {
    /// Create a new builder with default tolerances
    pub fn new() -> Self {
        let defaults = GraphConfig::default();
        Self {
            snap_distance: defaults.snap_distance,
            neighbor_snap: defaults.neighbor_snap,
        }
    }

    /// Set the vertex identity / degenerate segment tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the distance is not strictly positive and finite.
    pub fn snap_distance(mut self, distance: f32) -> Result<Self> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "snap distance must be positive and finite (got {})",
                distance
            )));
        }
        self.snap_distance = distance;
        Ok(self)
    }

    /// Set the opposite edge matching tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the tolerance is not strictly positive and finite.
    pub fn neighbor_snap(mut self, distance: f32) -> Result<Self> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "neighbor snap must be positive and finite (got {})",
                distance
            )));
        }
        self.neighbor_snap = distance;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `neighbor_snap` is smaller than
    /// `snap_distance`; matching opposites tighter than vertex identity
    /// cannot succeed.
    pub fn build(self) -> Result<GraphConfig> {
        if self.neighbor_snap < self.snap_distance {
            return Err(GraphError::InvalidConfig(format!(
                "neighbor snap ({}) must be >= snap distance ({})",
                self.neighbor_snap, self.snap_distance
            )));
        }
        Ok(GraphConfig {
            snap_distance: self.snap_distance,
            neighbor_snap: self.neighbor_snap,
        })
    }
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
