//! Map graph data model
//!
//! A [`MapGraph`] is a closed, doubly-linked polygonal graph: one cell per
//! Voronoi site, each cell a clockwise cycle of directed half-edges, adjacent
//! cells cross-linked through their shared edges.
//!
//! # Design Notes
//!
//! The pointer-chained structure of the original half-edge representation
//! maps onto flat arenas: vertices, cells and edges live in growable tables
//! and reference each other through `u32` index handles. This sidesteps
//! reference-cycle lifetime issues entirely; no entity is ever deleted, so
//! plain indices are stable for the lifetime of the graph.

use glam::Vec3;

use crate::geom::Bounds;

/// Handle to a [`Vertex`] in a [`MapGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub(crate) u32);

/// Handle to a [`Cell`] in a [`MapGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(pub(crate) u32);

/// Handle to an [`Edge`] in a [`MapGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) u32);

impl VertexId {
    /// Position in [`MapGraph::vertices`]
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl CellId {
    /// Position in [`MapGraph::cells`]
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    /// Position in [`MapGraph::edges`]
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A deduplicated graph vertex
///
/// Identity is the planar position quantized to the millimetre grid; two raw
/// points within that tolerance become the same vertex. The `y` component is
/// elevation, zero until [`project_heights`](crate::project_heights) runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// World position; x/z planar, y elevation
    pub position: Vec3,
}

/// Terrain classification of a cell
///
/// Written by an external biome stage after construction, except for
/// [`CellKind::Error`], which the opposite-linking pass sets on cells with a
/// topology defect so downstream stages can detect and skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Not yet classified (initial state)
    #[default]
    Unclassified,
    /// Inland water
    FreshWater,
    /// Ocean
    SaltWater,
    /// General land
    Grass,
    /// Coastal transition
    Beach,
    /// Elevated terrain
    Mountain,
    /// High altitude cap
    Snow,
    /// Topology defect detected during construction
    Error,
}

impl CellKind {
    /// Check if this kind is water
    pub fn is_water(&self) -> bool {
        matches!(self, CellKind::FreshWater | CellKind::SaltWater)
    }

    /// Check if this kind is walkable land
    pub fn is_land(&self) -> bool {
        matches!(
            self,
            CellKind::Grass | CellKind::Beach | CellKind::Mountain | CellKind::Snow
        )
    }
}

/// One map cell, owning a closed cycle of boundary edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Site position; x/z planar, y elevation (assigned later)
    pub center: Vec3,
    /// Terrain classification tag
    pub kind: CellKind,
    /// Entry point into this cell's edge cycle
    pub first_edge: EdgeId,
    /// Number of edges in the cycle, recorded at construction
    pub edge_count: usize,
}

/// A directed half-edge owned by exactly one cell
///
/// `next`/`previous` chain the edges of the owning cell into a closed cycle.
/// `neighbor` points at the co-located, oppositely directed edge of the
/// adjacent cell, and is `None` only for edges on the domain outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Owning cell
    pub cell: CellId,
    /// Vertex this edge points at
    pub destination: VertexId,
    /// Following edge in the owning cell's cycle
    pub next: EdgeId,
    /// Preceding edge in the owning cell's cycle
    pub previous: EdgeId,
    /// Reverse-direction edge of the adjacent cell, if any
    pub neighbor: Option<EdgeId>,
}

/// A complete map graph produced by [`build_graph`](crate::build_graph)
///
/// # Example
///
/// ```rust,no_run
/// use voronoi_map_graph::*;
///
/// # fn get_input() -> VoronoiInput { unimplemented!() }
/// let input = get_input();
/// let graph = build_graph(&input, &GraphConfig::default()).unwrap();
///
/// for cell_id in graph.cell_ids() {
///     let walked = graph.cell_edges(cell_id).count();
///     assert_eq!(walked, graph.cell(cell_id).edge_count);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MapGraph {
    pub(crate) bounds: Bounds,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) cells: Vec<Cell>,
    pub(crate) edges: Vec<Edge>,
}

impl MapGraph {
    pub(crate) fn new(bounds: Bounds, vertices: Vec<Vertex>, cells: Vec<Cell>, edges: Vec<Edge>) -> Self {
        Self {
            bounds,
            vertices,
            cells,
            edges,
        }
    }

    /// The domain rectangle this graph was built against
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// All vertices, indexed by [`VertexId`]
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All cells, indexed by [`CellId`]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All edges, indexed by [`EdgeId`]
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a vertex
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Look up a cell
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Look up an edge
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Iterate over all cell handles
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len() as u32).map(CellId)
    }

    /// Iterate over all edge handles
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    /// The vertex an edge leaves from (its predecessor's destination)
    #[inline]
    pub fn edge_start(&self, id: EdgeId) -> VertexId {
        self.edge(self.edge(id).previous).destination
    }

    /// Walk a cell's edge cycle once, starting at its entry edge
    ///
    /// Yields at most `edge_count` edges even if the cycle is defective, so
    /// iteration over a cell flagged [`CellKind::Error`] still terminates.
    pub fn cell_edges(&self, id: CellId) -> CellEdges<'_> {
        let cell = self.cell(id);
        CellEdges {
            graph: self,
            first: cell.first_edge,
            next: Some(cell.first_edge),
            remaining: cell.edge_count,
        }
    }

    /// Cells adjacent to the given cell, one entry per linked boundary edge
    pub fn neighbor_cells(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.cell_edges(id)
            .filter_map(|e| self.edge(e).neighbor)
            .map(|n| self.edge(n).cell)
    }

    /// Overwrite a cell's classification (used by the external biome stage)
    pub fn set_cell_kind(&mut self, id: CellId, kind: CellKind) {
        self.cells[id.index()].kind = kind;
    }
}

/// Iterator over one cell's edge cycle, see [`MapGraph::cell_edges`]
pub struct CellEdges<'a> {
    graph: &'a MapGraph,
    first: EdgeId,
    next: Option<EdgeId>,
    remaining: usize,
}

impl<'a> Iterator for CellEdges<'a> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        let following = self.graph.edge(current).next;
        self.next = (following != self.first).then_some(following);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal hand-built graph: one triangular cell
    fn triangle_graph() -> MapGraph {
        let vertices = vec![
            Vertex {
                position: Vec3::new(4.0, 0.0, 4.0),
            },
            Vertex {
                position: Vec3::new(6.0, 0.0, 4.0),
            },
            Vertex {
                position: Vec3::new(5.0, 0.0, 6.0),
            },
        ];
        let edges = vec![
            Edge {
                cell: CellId(0),
                destination: VertexId(1),
                next: EdgeId(1),
                previous: EdgeId(2),
                neighbor: None,
            },
            Edge {
                cell: CellId(0),
                destination: VertexId(2),
                next: EdgeId(2),
                previous: EdgeId(0),
                neighbor: None,
            },
            Edge {
                cell: CellId(0),
                destination: VertexId(0),
                next: EdgeId(0),
                previous: EdgeId(1),
                neighbor: None,
            },
        ];
        let cells = vec![Cell {
            center: Vec3::new(5.0, 0.0, 4.5),
            kind: CellKind::Unclassified,
            first_edge: EdgeId(0),
            edge_count: 3,
        }];
        MapGraph::new(Bounds::from_size(10.0, 10.0), vertices, cells, edges)
    }

    #[test]
    fn test_cell_edges_walks_cycle_once() {
        let graph = triangle_graph();
        let walked: Vec<EdgeId> = graph.cell_edges(CellId(0)).collect();
        assert_eq!(walked, vec![EdgeId(0), EdgeId(1), EdgeId(2)]);
    }

    #[test]
    fn test_edge_start() {
        let graph = triangle_graph();
        assert_eq!(graph.edge_start(EdgeId(0)), VertexId(0));
        assert_eq!(graph.edge_start(EdgeId(1)), VertexId(1));
        assert_eq!(graph.edge_start(EdgeId(2)), VertexId(2));
    }

    #[test]
    fn test_cycle_symmetry() {
        let graph = triangle_graph();
        for e in graph.edge_ids() {
            assert_eq!(graph.edge(graph.edge(e).next).previous, e);
            assert_eq!(graph.edge(graph.edge(e).previous).next, e);
        }
    }

    #[test]
    fn test_set_cell_kind() {
        let mut graph = triangle_graph();
        graph.set_cell_kind(CellId(0), CellKind::Grass);
        assert_eq!(graph.cell(CellId(0)).kind, CellKind::Grass);
    }

    #[test]
    fn test_cell_kind_helpers() {
        assert!(CellKind::SaltWater.is_water());
        assert!(CellKind::FreshWater.is_water());
        assert!(!CellKind::Grass.is_water());

        assert!(CellKind::Grass.is_land());
        assert!(CellKind::Snow.is_land());
        assert!(!CellKind::SaltWater.is_land());

        // Sentinels are neither
        assert!(!CellKind::Unclassified.is_land());
        assert!(!CellKind::Error.is_land());
        assert!(!CellKind::Error.is_water());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_cell_kind_serialization() {
        let json = serde_json::to_string(&CellKind::Beach).unwrap();
        let restored: CellKind = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, CellKind::Beach);
    }
}
