//! Interface to the upstream Voronoi construction stage
//!
//! Graph construction does not build the diagram itself; it consumes one
//! through [`VoronoiSource`]. [`VoronoiInput`] is the plain owned
//! implementation for callers that already hold the clipped edge soup.

use glam::Vec2;

use crate::geom::Bounds;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// One clipped Voronoi edge between two sites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiEdge {
    /// False for edges the clipping stage discarded entirely
    pub visible: bool,
    /// First clipped endpoint
    pub start: Vec2,
    /// Second clipped endpoint
    pub end: Vec2,
    /// Index of the site left of the edge, if inside the domain
    pub left: Option<usize>,
    /// Index of the site right of the edge, if inside the domain
    pub right: Option<usize>,
}

impl VoronoiEdge {
    /// Create a visible edge between two sites
    pub fn new(start: Vec2, end: Vec2, left: Option<usize>, right: Option<usize>) -> Self {
        Self {
            visible: true,
            start,
            end,
            left,
            right,
        }
    }
}

/// A planar Voronoi diagram clipped to a rectangular domain
///
/// Everything [`build_graph`](crate::build_graph) needs from the upstream
/// stage: the domain rectangle, the site positions, the clipped edges with
/// their left/right site references, and a nearest-site query (used once per
/// domain corner to resolve corner ownership).
pub trait VoronoiSource {
    /// The rectangle the diagram was clipped against
    fn bounds(&self) -> Bounds;

    /// Site positions; a site's index is its identity
    fn sites(&self) -> &[Vec2];

    /// All clipped edges, including invisible ones
    fn edges(&self) -> &[VoronoiEdge];

    /// Index of the site nearest to a point, `None` only for empty diagrams
    fn nearest_site(&self, point: Vec2) -> Option<usize>;
}

/// Owned Voronoi diagram data implementing [`VoronoiSource`]
///
/// # Example
///
/// ```rust
/// use voronoi_map_graph::*;
///
/// let bounds = Bounds::from_size(10.0, 10.0);
/// let sites = vec![Vec2::new(5.0, 5.0)];
/// let input = VoronoiInput::new(bounds, sites, vec![]);
/// assert_eq!(input.nearest_site(Vec2::new(0.0, 0.0)), Some(0));
/// ```
pub struct VoronoiInput {
    bounds: Bounds,
    sites: Vec<Vec2>,
    edges: Vec<VoronoiEdge>,
    #[cfg(feature = "spatial-index")]
    index: Option<SpatialIndex>,
}

impl VoronoiInput {
    /// Create an input diagram from its parts
    ///
    /// With the `spatial-index` feature the nearest-site query is backed by
    /// a KD-tree built here; without it a linear scan is used.
    pub fn new(bounds: Bounds, sites: Vec<Vec2>, edges: Vec<VoronoiEdge>) -> Self {
        #[cfg(feature = "spatial-index")]
        let index = (!sites.is_empty()).then(|| SpatialIndex::new(&sites));
        Self {
            bounds,
            sites,
            edges,
            #[cfg(feature = "spatial-index")]
            index,
        }
    }
}

impl VoronoiSource for VoronoiInput {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn sites(&self) -> &[Vec2] {
        &self.sites
    }

    fn edges(&self) -> &[VoronoiEdge] {
        &self.edges
    }

    fn nearest_site(&self, point: Vec2) -> Option<usize> {
        #[cfg(feature = "spatial-index")]
        if let Some(index) = &self.index {
            return Some(index.find_nearest(point));
        }
        self.sites
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(point).total_cmp(&b.distance_squared(point))
            })
            .map(|(i, _)| i)
    }
}
