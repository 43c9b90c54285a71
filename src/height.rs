//! Elevation projection from an external height field
//!
//! The graph is built flat (y = 0 everywhere); an upstream noise stage owns
//! the actual elevation data. Projection overwrites the `y` component of
//! every cell center and vertex from the field, leaving planar coordinates
//! untouched, and is idempotent because it overwrites rather than
//! accumulates.

use glam::Vec3;

use crate::error::{GraphError, Result};
use crate::graph::MapGraph;

/// A row-major grid of elevation samples addressable by integer (x, z)
#[derive(Debug, Clone)]
pub struct HeightMap {
    values: Vec<f32>,
    width: usize,
    depth: usize,
}

impl HeightMap {
    /// Create a flat (all-zero) height map of the given extent
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            values: vec![0.0; width * depth],
            width,
            depth,
        }
    }

    /// Create a height map from row-major samples
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `values.len() != width * depth`.
    pub fn from_values(width: usize, depth: usize, values: Vec<f32>) -> Result<Self> {
        if values.len() != width * depth {
            return Err(GraphError::InvalidConfig(format!(
                "height map needs {} samples for {}x{}, got {}",
                width * depth,
                width,
                depth,
                values.len()
            )));
        }
        Ok(Self {
            values,
            width,
            depth,
        })
    }

    /// Extent along x
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extent along z
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Sample at integer grid coordinates
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.values[z * self.width + x]
    }

    /// Overwrite one sample
    #[inline]
    pub fn set(&mut self, x: usize, z: usize, height: f32) {
        self.values[z * self.width + x] = height;
    }

    /// Sample under a world position, `None` outside the extent
    fn sample(&self, position: Vec3) -> Option<f32> {
        let x = position.x.floor();
        let z = position.z.floor();
        if x < 0.0 || z < 0.0 {
            return None;
        }
        let (x, z) = (x as usize, z as usize);
        if x >= self.width || z >= self.depth {
            return None;
        }
        Some(self.get(x, z))
    }
}

/// Overwrite every cell center and vertex elevation from the height field
///
/// Positions whose grid cell falls outside the field's extent keep their
/// prior elevation. Planar coordinates are never moved.
pub fn project_heights(graph: &mut MapGraph, heightmap: &HeightMap) {
    for cell in &mut graph.cells {
        if let Some(height) = heightmap.sample(cell.center) {
            cell.center.y = height;
        }
    }
    for vertex in &mut graph.vertices {
        if let Some(height) = heightmap.sample(vertex.position) {
            vertex.position.y = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_graph;
    use crate::config::GraphConfig;
    use crate::geom::Bounds;
    use crate::voronoi::VoronoiInput;
    use glam::Vec2;

    fn single_cell_graph() -> MapGraph {
        let input = VoronoiInput::new(
            Bounds::from_size(10.0, 10.0),
            vec![Vec2::new(5.0, 5.0)],
            vec![],
        );
        build_graph(&input, &GraphConfig::default()).unwrap()
    }

    fn ramp(width: usize, depth: usize) -> HeightMap {
        let mut map = HeightMap::new(width, depth);
        for z in 0..depth {
            for x in 0..width {
                map.set(x, z, (x + z) as f32);
            }
        }
        map
    }

    #[test]
    fn test_from_values_length_mismatch() {
        assert!(HeightMap::from_values(4, 4, vec![0.0; 15]).is_err());
        assert!(HeightMap::from_values(4, 4, vec![0.0; 16]).is_ok());
    }

    #[test]
    fn test_projection_overwrites_elevation() {
        let mut graph = single_cell_graph();
        // 11x11 so the far corners (floor 10) are still inside the field
        let map = ramp(11, 11);

        project_heights(&mut graph, &map);

        let cell = graph.cells()[0];
        assert_eq!(cell.center.y, 10.0); // (5, 5)
        assert_eq!(cell.center.x, 5.0);
        assert_eq!(cell.center.z, 5.0);

        for vertex in graph.vertices() {
            let expected = vertex.position.x.floor() + vertex.position.z.floor();
            assert_eq!(vertex.position.y, expected);
        }
    }

    #[test]
    fn test_positions_outside_extent_keep_elevation() {
        let mut graph = single_cell_graph();
        // Corner vertices at x or z == 10 floor outside a 5x5 field
        let map = ramp(5, 5);

        project_heights(&mut graph, &map);

        let origin = graph
            .vertices()
            .iter()
            .find(|v| v.position.x == 0.0 && v.position.z == 0.0)
            .unwrap();
        assert_eq!(origin.position.y, 0.0);

        let far = graph
            .vertices()
            .iter()
            .find(|v| v.position.x == 10.0 && v.position.z == 10.0)
            .unwrap();
        assert_eq!(far.position.y, 0.0);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let mut once = single_cell_graph();
        let map = ramp(11, 11);
        project_heights(&mut once, &map);

        let mut twice = once.clone();
        project_heights(&mut twice, &map);

        assert_eq!(once.vertices(), twice.vertices());
        assert_eq!(once.cells(), twice.cells());
    }
}
