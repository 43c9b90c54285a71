//! Graph construction pipeline
//!
//! One-shot batch transform from a clipped Voronoi diagram to a closed map
//! graph, in four passes:
//!
//! 1. Fan clipped edges out to their left/right sites, dropping invisible
//!    and degenerate ones.
//! 2. Resolve each site's outline (orient, sort, snap) — independent per
//!    site, runs on rayon under the `parallel` feature.
//! 3. Assemble cells and edges against the shared vertex registry,
//!    stitching clipped outlines closed along the domain rectangle.
//! 4. Link opposite edges across cell boundaries.

mod boundary;
mod builder;
mod opposites;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::GraphConfig;
use crate::error::Result;
use crate::geom::Segment;
use crate::graph::MapGraph;
use crate::voronoi::VoronoiSource;

use builder::{CornerOwners, GraphAssembler};

/// Build a closed map graph from a clipped Voronoi diagram
///
/// # Errors
///
/// - [`GraphError::MissingCornerOwner`](crate::GraphError::MissingCornerOwner)
///   if the source cannot name a nearest site for one of the four domain
///   corners.
/// - [`GraphError::GenerationFailed`](crate::GraphError::GenerationFailed)
///   if a site yields no boundary edges at all.
///
/// Unmatched interior edges are not errors; the owning cell is flagged
/// [`CellKind::Error`](crate::CellKind::Error) and the build carries on.
///
/// # Example
///
/// ```rust
/// use voronoi_map_graph::*;
///
/// // One site in the middle of the domain: its cell is the whole rectangle
/// let input = VoronoiInput::new(
///     Bounds::from_size(10.0, 10.0),
///     vec![Vec2::new(5.0, 5.0)],
///     vec![],
/// );
/// let graph = build_graph(&input, &GraphConfig::default()).unwrap();
/// assert_eq!(graph.cells().len(), 1);
/// ```
pub fn build_graph<V: VoronoiSource>(voronoi: &V, config: &GraphConfig) -> Result<MapGraph> {
    let bounds = voronoi.bounds();
    let sites = voronoi.sites();

    // Pass 1: group the clipped segments by incident site
    let mut site_segments: Vec<Vec<Segment>> = vec![Vec::new(); sites.len()];
    let mut dropped = 0usize;
    for edge in voronoi.edges() {
        if !edge.visible {
            continue;
        }
        let segment = Segment::new(edge.start, edge.end);
        if segment.length() < config.snap_distance {
            dropped += 1;
            continue;
        }
        if let Some(left) = edge.left {
            site_segments[left].push(segment);
        }
        if let Some(right) = edge.right {
            site_segments[right].push(segment);
        }
    }
    if dropped > 0 {
        log::debug!("dropped {} degenerate voronoi edges", dropped);
    }

    let owners = CornerOwners::resolve(voronoi, bounds)?;

    // Pass 2: per-site outlines, no cross-site dependency
    #[cfg(feature = "parallel")]
    let outlines: Vec<Vec<Segment>> = site_segments
        .par_iter()
        .zip(sites.par_iter())
        .map(|(segments, &center)| boundary::resolve_outline(segments, center, config.snap_distance))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let outlines: Vec<Vec<Segment>> = site_segments
        .iter()
        .zip(sites.iter())
        .map(|(segments, &center)| boundary::resolve_outline(segments, center, config.snap_distance))
        .collect();

    // Pass 3: single-threaded assembly over the shared registries
    let mut assembler = GraphAssembler::new(bounds, *config);
    for (site, outline) in outlines.iter().enumerate() {
        assembler.build_cell(site, sites[site], outline, &owners)?;
    }

    // Pass 4: needs the complete edge index, so it runs last
    opposites::connect_opposites(&mut assembler);

    Ok(assembler.finish())
}
