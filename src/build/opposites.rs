//! Opposite linking: cross-linking co-located edges of adjacent cells
//!
//! Runs after every cell's cycle is closed, because it needs the complete
//! edge-by-start-position index. For each unlinked edge it looks for the
//! reverse-direction edge of the neighboring cell; edges on the domain
//! outline legitimately have none. Anything else is a topology defect and
//! flags the owning cell instead of aborting the build.

use glam::Vec2;

use crate::geom::PointKey;
use crate::graph::EdgeId;

use super::builder::GraphAssembler;

/// Link every interior edge to its reverse edge in the adjacent cell
pub(super) fn connect_opposites(assembler: &mut GraphAssembler) {
    let bounds = assembler.bounds();
    let neighbor_snap = assembler.config().neighbor_snap;

    for index in 0..assembler.edges().len() {
        let edge_id = EdgeId(index as u32);
        let edge = assembler.edges()[index];
        if edge.neighbor.is_some() {
            continue;
        }

        let start = planar(assembler, assembler.edges()[edge.previous.index()].destination);
        let end = planar(assembler, edge.destination);

        // Candidates leave from this edge's destination; the right one ends
        // where this edge starts, within the loose matching tolerance. The
        // tolerance absorbs rounding both cells picked up independently
        // while clipping; exact matching leaves holes in the graph.
        let mut opposite = None;
        if let Some(candidates) = assembler.edges_by_start.get(&PointKey::of(end)) {
            for &candidate in candidates {
                let destination = planar(assembler, assembler.edges()[candidate.index()].destination);
                if (destination.x - start.x).abs() < neighbor_snap
                    && (destination.y - start.y).abs() < neighbor_snap
                {
                    opposite = Some(candidate);
                }
            }
        }

        match opposite {
            Some(opposite) => {
                assembler.edges_mut()[index].neighbor = Some(opposite);
                assembler.edges_mut()[opposite.index()].neighbor = Some(edge_id);
            }
            None => {
                // Only edges touching the domain outline may stay unlinked
                if !bounds.on_outline(start) && !bounds.on_outline(end) {
                    let cell = edge.cell;
                    log::warn!(
                        "edge {} -> {} of cell {} has no opposite and is not on the domain outline",
                        start,
                        end,
                        cell.index()
                    );
                    assembler.mark_cell_defective(cell);
                }
            }
        }
    }
}

fn planar(assembler: &GraphAssembler, vertex: crate::graph::VertexId) -> Vec2 {
    let position = assembler.vertices()[vertex.index()].position;
    Vec2::new(position.x, position.z)
}
