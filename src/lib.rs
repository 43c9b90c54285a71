//! Closed half-edge map graphs from clipped planar Voronoi diagrams
//!
//! Takes a Voronoi diagram that was clipped against a rectangular domain and
//! turns it into a topologically consistent polygonal graph: one cell per
//! site, each cell a clockwise cycle of directed half-edges, shared
//! boundaries cross-linked between adjacent cells. Cells cut open by the
//! clip are stitched closed along the rectangle, coincident vertices are
//! deduplicated under floating-point noise, and every interior edge is
//! matched to its reverse edge in the neighboring cell.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_map_graph::*;
//!
//! # fn load_diagram() -> VoronoiInput { unimplemented!() }
//! // A clipped diagram from your Voronoi stage
//! let diagram = load_diagram();
//!
//! let graph = build_graph(&diagram, &GraphConfig::default()).unwrap();
//!
//! // Walk a cell's boundary polygon
//! for cell_id in graph.cell_ids() {
//!     for edge_id in graph.cell_edges(cell_id) {
//!         let vertex = graph.vertex(graph.edge(edge_id).destination);
//!         println!("{:?}", vertex.position);
//!     }
//! }
//!
//! // Drape it over a height field
//! let heights = HeightMap::new(200, 200);
//! let mut graph = graph;
//! project_heights(&mut graph, &heights);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree nearest-site lookups for [`VoronoiInput`]
//! - `parallel`: per-site boundary resolution on rayon
//! - `serde`: serialization support for configuration and cell kinds

// Modules
pub mod error;
pub mod config;
pub mod geom;
pub mod graph;
pub mod voronoi;
pub mod build;
pub mod height;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{GraphError, Result};
pub use config::{GraphConfig, GraphConfigBuilder};
pub use geom::{Bounds, Corner, Segment, Side};
pub use graph::{Cell, CellEdges, CellId, CellKind, Edge, EdgeId, MapGraph, Vertex, VertexId};
pub use voronoi::{VoronoiEdge, VoronoiInput, VoronoiSource};
pub use build::build_graph;
pub use height::{project_heights, HeightMap};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam vector types for convenience
pub use glam::{Vec2, Vec3};
