//! Graph assembly: cells, edges and the shared vertex registry
//!
//! Consumes resolved outlines one site at a time, interning vertices through
//! the quantized dedup registry, chaining each cell's edges into a cycle and
//! stitching clipped outlines closed along the domain rectangle.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::geom::{quantize, Bounds, Corner, PointKey, Segment};
use crate::graph::{Cell, CellId, CellKind, Edge, EdgeId, MapGraph, Vertex, VertexId};
use crate::voronoi::VoronoiSource;

/// Which site owns each domain corner
///
/// A corner belongs to the single cell whose site is nearest to it; only that
/// cell inserts the corner vertex while closing its outline, so every corner
/// ends up in exactly one cycle.
#[derive(Debug, Clone, Copy)]
pub(super) struct CornerOwners {
    owners: [usize; 4],
}

impl CornerOwners {
    /// Resolve all four owners through the source's nearest-site query
    ///
    /// # Errors
    ///
    /// `MissingCornerOwner` if the source cannot answer for a corner. There
    /// is no geometrically sound recovery for an unowned corner, so this
    /// aborts the whole build.
    pub(super) fn resolve<V: VoronoiSource>(voronoi: &V, bounds: Bounds) -> Result<Self> {
        let mut owners = [0usize; 4];
        for corner in crate::geom::CORNER_CYCLE {
            let position = bounds.corner(corner);
            let site = voronoi
                .nearest_site(position)
                .ok_or(GraphError::MissingCornerOwner {
                    x: position.x,
                    z: position.y,
                })?;
            owners[corner.cycle_index()] = site;
        }
        Ok(Self { owners })
    }

    #[cfg(test)]
    pub(super) fn from_array(owners: [usize; 4]) -> Self {
        Self { owners }
    }

    pub(super) fn owner(&self, corner: Corner) -> usize {
        self.owners[corner.cycle_index()]
    }
}

/// Mutable build state: entity arenas plus the two shared registries
pub(super) struct GraphAssembler {
    bounds: Bounds,
    config: GraphConfig,
    vertices: Vec<Vertex>,
    /// Quantized position -> vertex, append-only for the whole build
    vertex_registry: HashMap<PointKey, VertexId>,
    cells: Vec<Cell>,
    edges: Vec<Edge>,
    /// Quantized start position -> edges leaving there, for opposite linking
    pub(super) edges_by_start: HashMap<PointKey, Vec<EdgeId>>,
}

impl GraphAssembler {
    pub(super) fn new(bounds: Bounds, config: GraphConfig) -> Self {
        Self {
            bounds,
            config,
            vertices: Vec::new(),
            vertex_registry: HashMap::new(),
            cells: Vec::new(),
            edges: Vec::new(),
            edges_by_start: HashMap::new(),
        }
    }

    pub(super) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(super) fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub(super) fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(super) fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub(super) fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(super) fn mark_cell_defective(&mut self, id: CellId) {
        self.cells[id.index()].kind = CellKind::Error;
    }

    #[cfg(test)]
    pub(super) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Intern a planar point, reusing the vertex if one already exists on
    /// the same quantized grid position
    fn intern_vertex(&mut self, p: Vec2) -> VertexId {
        let key = PointKey::of(p);
        if let Some(&id) = self.vertex_registry.get(&key) {
            return id;
        }
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            position: Vec3::new(p.x, 0.0, p.y),
        });
        self.vertex_registry.insert(key, id);
        id
    }

    /// Create an edge from `start` to `end`, chain it to `previous` and
    /// index it by its start position
    ///
    /// `next`/`previous` are self-referential until chained; cycle closure
    /// fixes the two remaining links at the end of the cell.
    fn add_edge(&mut self, previous: Option<EdgeId>, start: Vec2, end: Vec2, cell: CellId) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.intern_vertex(start);
        let destination = self.intern_vertex(end);
        self.edges.push(Edge {
            cell,
            destination,
            next: id,
            previous: id,
            neighbor: None,
        });
        self.edges_by_start.entry(PointKey::of(start)).or_default().push(id);

        if let Some(previous) = previous {
            self.edges[previous.index()].next = id;
            self.edges[id.index()].previous = previous;
        }
        id
    }

    /// Build one cell from its resolved outline
    pub(super) fn build_cell(
        &mut self,
        site: usize,
        center: Vec2,
        outline: &[Segment],
        owners: &CornerOwners,
    ) -> Result<CellId> {
        let cell_id = CellId(self.cells.len() as u32);
        let edges_before = self.edges.len();

        let mut first: Option<EdgeId> = None;
        let mut previous: Option<EdgeId> = None;

        for (i, segment) in outline.iter().enumerate() {
            let start = quantize(segment.start);
            let end = quantize(segment.end);
            // Quantization can collapse a near-degenerate segment entirely
            if start == end {
                continue;
            }

            previous = Some(self.add_edge(previous, start, end, cell_id));
            if first.is_none() {
                first = previous;
            }

            // Where this segment ends and the next begins; a mismatch means
            // the outline was clipped at the domain rectangle
            let gap_end = quantize(outline[(i + 1) % outline.len()].start);
            if end != gap_end {
                previous = Some(self.close_gap(site, cell_id, previous, end, gap_end, owners));
            }
        }

        // A site with no surviving segments covers the whole domain (single
        // site diagram); its cycle is the rectangle through its corners
        if outline.is_empty() {
            (first, previous) = self.close_rectangle(site, cell_id, owners);
        }

        let (Some(first), Some(last)) = (first, previous) else {
            return Err(GraphError::GenerationFailed(format!(
                "site {} produced no boundary edges",
                site
            )));
        };

        // Close the cycle
        self.edges[last.index()].next = first;
        self.edges[first.index()].previous = last;

        self.cells.push(Cell {
            center: Vec3::new(center.x, 0.0, center.y),
            kind: CellKind::default(),
            first_edge: first,
            edge_count: self.edges.len() - edges_before,
        });
        Ok(cell_id)
    }

    /// Stitch a clipped gap closed, walking the rectangle corners clockwise
    ///
    /// Starting from the side the gap begins on, each corner is inserted iff
    /// this site owns it and the walk is not already standing on it; the
    /// final edge bridges to the gap end.
    fn close_gap(
        &mut self,
        site: usize,
        cell: CellId,
        previous: Option<EdgeId>,
        start: Vec2,
        end: Vec2,
        owners: &CornerOwners,
    ) -> EdgeId {
        let mut previous = previous;
        let mut cursor = start;

        if let Some(side) = self.bounds.side_of(start) {
            for corner in Corner::clockwise_from(side) {
                if owners.owner(corner) != site {
                    continue;
                }
                let position = quantize(self.bounds.corner(corner));
                if cursor == position {
                    continue;
                }
                previous = Some(self.add_edge(previous, cursor, position, cell));
                cursor = position;
            }
        }

        self.add_edge(previous, cursor, end, cell)
    }

    /// Cycle through every corner this site owns, in clockwise order
    fn close_rectangle(
        &mut self,
        site: usize,
        cell: CellId,
        owners: &CornerOwners,
    ) -> (Option<EdgeId>, Option<EdgeId>) {
        let owned: Vec<Vec2> = crate::geom::CORNER_CYCLE
            .iter()
            .filter(|&&corner| owners.owner(corner) == site)
            .map(|&corner| quantize(self.bounds.corner(corner)))
            .collect();
        if owned.len() < 2 {
            return (None, None);
        }

        let mut first = None;
        let mut previous = None;
        for i in 0..owned.len() {
            let next = (i + 1) % owned.len();
            previous = Some(self.add_edge(previous, owned[i], owned[next], cell));
            if first.is_none() {
                first = previous;
            }
        }
        (first, previous)
    }

    /// Tear down the registries and hand over the finished arenas
    pub(super) fn finish(self) -> MapGraph {
        MapGraph::new(self.bounds, self.vertices, self.cells, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembler() -> GraphAssembler {
        GraphAssembler::new(Bounds::from_size(10.0, 10.0), GraphConfig::default())
    }

    #[test]
    fn test_vertex_dedup() {
        let mut assembler = assembler();
        let a = assembler.intern_vertex(Vec2::new(5.0, 5.0));
        let b = assembler.intern_vertex(quantize(Vec2::new(5.0002, 4.9997)));
        let c = assembler.intern_vertex(Vec2::new(5.002, 5.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(assembler.vertices().len(), 2);
    }

    #[test]
    fn test_closed_outline_builds_closed_cycle() {
        let mut assembler = assembler();
        let owners = CornerOwners::from_array([99, 99, 99, 99]);
        let outline = vec![
            Segment::new(Vec2::new(4.0, 6.0), Vec2::new(6.0, 6.0)),
            Segment::new(Vec2::new(6.0, 6.0), Vec2::new(6.0, 4.0)),
            Segment::new(Vec2::new(6.0, 4.0), Vec2::new(4.0, 4.0)),
            Segment::new(Vec2::new(4.0, 4.0), Vec2::new(4.0, 6.0)),
        ];

        let cell = assembler
            .build_cell(0, Vec2::new(5.0, 5.0), &outline, &owners)
            .unwrap();

        let cell_data = assembler.cells()[cell.index()];
        assert_eq!(cell_data.edge_count, 4);

        // next/previous symmetry over the whole arena
        for (i, edge) in assembler.edges().iter().enumerate() {
            let id = EdgeId(i as u32);
            assert_eq!(assembler.edges()[edge.next.index()].previous, id);
            assert_eq!(assembler.edges()[edge.previous.index()].next, id);
        }
    }

    #[test]
    fn test_gap_closes_through_owned_corner() {
        let mut assembler = assembler();
        // This site owns the bottom-left corner only
        let owners = CornerOwners::from_array([1, 2, 0, 3]);
        // Two segments meeting at (5,5), clipped open along the rectangle
        // between (5,0) and (0,5)
        let outline = vec![
            Segment::new(Vec2::new(0.0, 5.0), Vec2::new(5.0, 5.0)),
            Segment::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 0.0)),
        ];

        let cell = assembler
            .build_cell(0, Vec2::new(2.5, 2.5), &outline, &owners)
            .unwrap();

        // Two raw edges, the corner edge and the bridge back to the start
        assert_eq!(assembler.cells()[cell.index()].edge_count, 4);

        let destinations: Vec<Vec2> = assembler
            .edges()
            .iter()
            .map(|e| {
                let p = assembler.vertices()[e.destination.index()].position;
                Vec2::new(p.x, p.z)
            })
            .collect();
        assert!(destinations.contains(&Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_unowned_corner_not_inserted() {
        let mut assembler = assembler();
        let owners = CornerOwners::from_array([9, 9, 9, 9]);
        let outline = vec![
            Segment::new(Vec2::new(0.0, 5.0), Vec2::new(5.0, 5.0)),
            Segment::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 0.0)),
        ];

        let cell = assembler
            .build_cell(0, Vec2::new(2.5, 2.5), &outline, &owners)
            .unwrap();

        // No corner walk: the gap closes with a single bridging edge
        assert_eq!(assembler.cells()[cell.index()].edge_count, 3);
    }

    #[test]
    fn test_empty_outline_covers_rectangle() {
        let mut assembler = assembler();
        let owners = CornerOwners::from_array([0, 0, 0, 0]);

        let cell = assembler
            .build_cell(0, Vec2::new(5.0, 5.0), &[], &owners)
            .unwrap();

        assert_eq!(assembler.cells()[cell.index()].edge_count, 4);
    }

    #[test]
    fn test_empty_outline_without_corners_fails() {
        let mut assembler = assembler();
        let owners = CornerOwners::from_array([7, 7, 7, 7]);

        let result = assembler.build_cell(0, Vec2::new(5.0, 5.0), &[], &owners);
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_segment_skipped() {
        let mut assembler = assembler();
        let owners = CornerOwners::from_array([9, 9, 9, 9]);
        // Middle segment collapses to a point under quantization
        let outline = vec![
            Segment::new(Vec2::new(4.0, 6.0), Vec2::new(6.0, 6.0)),
            Segment::new(Vec2::new(6.0, 6.0), Vec2::new(6.0, 6.0003)),
            Segment::new(Vec2::new(6.0, 6.0), Vec2::new(4.0, 6.0)),
        ];

        let cell = assembler
            .build_cell(0, Vec2::new(5.0, 6.0), &outline, &owners)
            .unwrap();
        assert_eq!(assembler.cells()[cell.index()].edge_count, 2);
    }
}
