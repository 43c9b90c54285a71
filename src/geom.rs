//! Planar geometry primitives for the domain rectangle
//!
//! The map lives in the x/z plane; `y` carries elevation. Everything here
//! works on the planar projection (`glam::Vec2` with `y` meaning world `z`).

use glam::Vec2;

/// Quantization grid for vertex identity: one millimetre in world units
pub(crate) const QUANT: f32 = 1000.0;

/// Snap a planar point to the millimetre grid used for vertex identity
pub(crate) fn quantize(p: Vec2) -> Vec2 {
    (p * QUANT).round() / QUANT
}

/// Integer grid key of a quantized position, usable as a hash map key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PointKey {
    x: i32,
    z: i32,
}

impl PointKey {
    pub(crate) fn of(p: Vec2) -> Self {
        Self {
            x: (p.x * QUANT).round() as i32,
            z: (p.y * QUANT).round() as i32,
        }
    }
}

/// Signed angle from `from` to `to`, positive counter-clockwise
pub(crate) fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}

/// Clockwise-ascending sort key for a direction vector
///
/// Negating the counter-clockwise atan2 angle turns descending CCW order
/// into an ascending key. The cut lies at the negative x axis; since cell
/// outlines are cyclic, where the ordering starts does not matter.
pub(crate) fn clockwise_key(v: Vec2) -> f32 {
    -v.y.atan2(v.x)
}

/// An undirected boundary segment as delivered by the Voronoi clipping stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// First endpoint (becomes the traversal start once oriented)
    pub start: Vec2,
    /// Second endpoint
    pub end: Vec2,
}

impl Segment {
    /// Create a segment between two planar points
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// The same segment traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

/// One side of the domain rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// z == max
    Top,
    /// x == max
    Right,
    /// z == min
    Bottom,
    /// x == min
    Left,
}

/// One corner of the domain rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// (max x, max z)
    TopRight,
    /// (max x, min z)
    BottomRight,
    /// (min x, min z)
    BottomLeft,
    /// (min x, max z)
    TopLeft,
}

/// Corners in clockwise traversal order (z up, x right)
pub(crate) const CORNER_CYCLE: [Corner; 4] = [
    Corner::TopRight,
    Corner::BottomRight,
    Corner::BottomLeft,
    Corner::TopLeft,
];

impl Corner {
    /// Index into [`CORNER_CYCLE`]
    pub(crate) fn cycle_index(self) -> usize {
        match self {
            Corner::TopRight => 0,
            Corner::BottomRight => 1,
            Corner::BottomLeft => 2,
            Corner::TopLeft => 3,
        }
    }

    /// The four corners in clockwise order, starting at the corner a
    /// clockwise walk along `side` runs into first
    pub(crate) fn clockwise_from(side: Side) -> [Corner; 4] {
        let start = match side {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        };
        [
            CORNER_CYCLE[start],
            CORNER_CYCLE[(start + 1) % 4],
            CORNER_CYCLE[(start + 2) % 4],
            CORNER_CYCLE[(start + 3) % 4],
        ]
    }
}

/// The rectangular domain the Voronoi diagram was clipped against
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Minimum x/z corner
    pub min: Vec2,
    /// Maximum x/z corner
    pub max: Vec2,
}

impl Bounds {
    /// Create bounds from min/max corners
    ///
    /// Corner coordinates should sit on the millimetre quantization grid,
    /// otherwise clipped points cannot compare exactly equal to them.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Axis-aligned bounds of the given width and height with min at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    /// Domain width (x extent)
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Domain height (z extent)
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Planar position of a corner
    pub fn corner(&self, corner: Corner) -> Vec2 {
        match corner {
            Corner::TopRight => Vec2::new(self.max.x, self.max.y),
            Corner::BottomRight => Vec2::new(self.max.x, self.min.y),
            Corner::BottomLeft => Vec2::new(self.min.x, self.min.y),
            Corner::TopLeft => Vec2::new(self.min.x, self.max.y),
        }
    }

    /// Which side of the rectangle a point lies on, if any
    ///
    /// Exact comparison: positions handed in here have been quantized, as
    /// were the clipped endpoints that produced them. A corner point reports
    /// the first matching side in top, right, bottom, left order.
    pub fn side_of(&self, p: Vec2) -> Option<Side> {
        if p.y == self.max.y {
            Some(Side::Top)
        } else if p.x == self.max.x {
            Some(Side::Right)
        } else if p.y == self.min.y {
            Some(Side::Bottom)
        } else if p.x == self.min.x {
            Some(Side::Left)
        } else {
            None
        }
    }

    /// Whether a point lies exactly on the rectangle outline
    pub fn on_outline(&self, p: Vec2) -> bool {
        self.side_of(p).is_some()
    }
}
