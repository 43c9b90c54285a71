//! Spatial indexing for nearest-site queries
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::Vec2;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// Wrapper around a planar KD-tree for nearest-site lookups
///
/// Corner ownership needs only four queries per build, but callers that keep
/// the [`VoronoiInput`](crate::VoronoiInput) around (picking, unit placement)
/// get O(log n) point-to-site resolution from the same structure.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from site positions
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_map_graph::*;
    ///
    /// let sites = vec![
    ///     Vec2::new(2.0, 2.0),
    ///     Vec2::new(8.0, 8.0),
    /// ];
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(Vec2::new(1.0, 1.0)), 0);
    /// ```
    pub fn new(sites: &[Vec2]) -> Self {
        let points: Vec<[f32; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();
        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the site nearest to a planar position
    pub fn find_nearest(&self, position: Vec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
