//! Boundary resolution: turning a site's unordered edge soup into an outline
//!
//! The clipping stage delivers each site's boundary as an unordered bag of
//! undirected segments. This pass orients every segment clockwise around the
//! site center, sorts them into traversal order and removes degenerate
//! slivers, producing a gap-tolerant outline. Gaps left where the clip met
//! the domain rectangle are closed later by the graph builder.

use std::cmp::Ordering;

use glam::Vec2;

use crate::geom::{clockwise_key, signed_angle, PointKey, Segment};

/// Order and orient one site's raw boundary segments into a clockwise outline
///
/// Segments shorter than `snap_distance` are dropped; when that severs the
/// outline, the surrounding segments are spliced back together if their
/// endpoints are within the same tolerance.
pub(crate) fn resolve_outline(segments: &[Segment], center: Vec2, snap_distance: f32) -> Vec<Segment> {
    let mut outline: Vec<Segment> = segments
        .iter()
        .map(|s| orient_clockwise(*s, center))
        .collect();

    outline.sort_by(|a, b| compare_clockwise(a, b, center));

    snap_outline(outline, snap_distance)
}

/// Flip a segment if traversing start to end runs counter-clockwise around
/// the center, so the cell interior stays on the traveler's right
fn orient_clockwise(segment: Segment, center: Vec2) -> Segment {
    let angle = signed_angle(segment.start - center, segment.end - center);
    if angle > 0.0 {
        segment.reversed()
    } else {
        segment
    }
}

/// Clockwise-ascending ordering on segment start directions
///
/// Uses an absolute angle key rather than pairwise signed angles: the
/// pairwise comparison is not a total order over a full turn, and sorting
/// with it makes the outline order depend on the input permutation. Ties
/// (two segments leaving the center in the same direction) fall back to the
/// quantized start and end positions for determinism.
fn compare_clockwise(a: &Segment, b: &Segment, center: Vec2) -> Ordering {
    let key_a = clockwise_key(a.start - center);
    let key_b = clockwise_key(b.start - center);
    key_a
        .total_cmp(&key_b)
        .then_with(|| point_order(a.start, b.start))
        .then_with(|| point_order(a.end, b.end))
}

fn point_order(a: Vec2, b: Vec2) -> Ordering {
    let ka = PointKey::of(a);
    let kb = PointKey::of(b);
    ka.cmp(&kb)
}

/// Remove degenerate segments, splicing the outline closed across removals
///
/// Scans backward so removals do not disturb the indices still to visit.
fn snap_outline(mut outline: Vec<Segment>, snap_distance: f32) -> Vec<Segment> {
    let mut i = outline.len();
    while i > 0 {
        i -= 1;
        if outline[i].length() >= snap_distance {
            continue;
        }
        let count = outline.len();
        let previous = if i == 0 { count - 1 } else { i - 1 };
        let next = if i + 1 >= count { 0 } else { i + 1 };
        if outline[previous].end.distance(outline[next].start) < snap_distance {
            let spliced = outline[next].start;
            outline[previous].end = spliced;
        }
        outline.remove(i);
    }
    outline
}
