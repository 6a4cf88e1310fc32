// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calipers Distance: directional gap geometry between two boxes.
//!
//! Given the box of a "compared" element and the box of a "target" element,
//! [`compute_gaps`] produces the measuring lines the distance tool draws
//! between them: up to one segment per direction (up/down/left/right), each
//! with a raw pixel length and an anchor position for display.
//!
//! Per direction there are two mutually exclusive cases:
//!
//! - **Disjoint**: the compared box lies entirely beyond the target on that
//!   axis; the segment spans the empty gap between facing edges.
//! - **Partial overlap**: the compared edge lies strictly inside the
//!   target's span; the segment measures from the target's near edge to the
//!   compared edge (the visible inset).
//!
//! If neither holds — boxes flush against each other or fully aligned on the
//! axis — no segment is emitted for that direction. The function is pure:
//! the output depends only on the two input rectangles.
//!
//! ## Example
//!
//! ```
//! use calipers_distance::{compute_gaps, Direction};
//! use kurbo::Rect;
//!
//! // Compared sits 80px above the target.
//! let compared = Rect::new(10.0, 100.0, 60.0, 120.0);
//! let target = Rect::new(10.0, 200.0, 60.0, 220.0);
//!
//! let gaps = compute_gaps(compared, target);
//! assert_eq!(gaps.len(), 1);
//! assert_eq!(gaps[0].direction, Direction::Down);
//! assert_eq!(gaps[0].length, 80.0);
//! assert_eq!((gaps[0].anchor.x, gaps[0].anchor.y), (35.0, 120.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Direction of a measuring line, relative to the compared box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Above the compared box's top edge.
    Up,
    /// Below the compared box's bottom edge.
    Down,
    /// Left of the compared box's left edge.
    Left,
    /// Right of the compared box's right edge.
    Right,
}

impl Direction {
    /// Whether the segment runs along the vertical axis.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// One measuring line between the compared and target boxes.
///
/// `anchor` is the segment's start point: vertical segments extend downward
/// from it by `length`, horizontal segments extend rightward. The cross-axis
/// coordinate is centered on the compared box's midline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GapSegment {
    /// Which edge of the compared box this segment measures from.
    pub direction: Direction,
    /// Raw pixel length; display conversion happens at the overlay layer.
    pub length: f64,
    /// Start point of the segment in page coordinates.
    pub anchor: Point,
}

impl GapSegment {
    /// The degenerate line rect of this segment, for the rendering sink.
    pub fn line_rect(&self) -> Rect {
        if self.direction.is_vertical() {
            Rect::new(self.anchor.x, self.anchor.y, self.anchor.x, self.anchor.y + self.length)
        } else {
            Rect::new(self.anchor.x, self.anchor.y, self.anchor.x + self.length, self.anchor.y)
        }
    }
}

/// Computes the visible gap segments between a compared and a target box.
///
/// Returns 0 to 4 segments; directions are independent, so a box contained
/// in the target yields all four insets while flush boxes yield none.
pub fn compute_gaps(compared: Rect, target: Rect) -> SmallVec<[GapSegment; 4]> {
    let mut segments = SmallVec::new();
    let mid_x = compared.x0 + compared.width() / 2.0;
    let mid_y = compared.y0 + compared.height() / 2.0;

    // Up: compared entirely below the target, or its top edge inset into the
    // target's vertical span from below.
    if compared.y0 > target.y1 {
        segments.push(GapSegment {
            direction: Direction::Up,
            length: compared.y0 - target.y1,
            anchor: Point::new(mid_x, target.y1),
        });
    } else if compared.y0 > target.y0 && compared.y0 < target.y1 && compared.y1 < target.y1 {
        segments.push(GapSegment {
            direction: Direction::Up,
            length: compared.y0 - target.y0,
            anchor: Point::new(mid_x, target.y0),
        });
    }

    // Down: compared entirely above the target, or its bottom edge inset
    // into the target's span from above.
    if compared.y1 < target.y0 {
        segments.push(GapSegment {
            direction: Direction::Down,
            length: target.y0 - compared.y1,
            anchor: Point::new(mid_x, compared.y1),
        });
    } else if compared.y1 > target.y0 && compared.y1 < target.y1 && compared.y0 >= target.y0 {
        segments.push(GapSegment {
            direction: Direction::Down,
            length: target.y1 - compared.y1,
            anchor: Point::new(mid_x, compared.y1),
        });
    }

    // Left: same structure on the horizontal axis.
    if compared.x0 > target.x1 {
        segments.push(GapSegment {
            direction: Direction::Left,
            length: compared.x0 - target.x1,
            anchor: Point::new(target.x1, mid_y),
        });
    } else if compared.x0 > target.x0 && compared.x0 < target.x1 && compared.x1 <= target.x1 {
        segments.push(GapSegment {
            direction: Direction::Left,
            length: compared.x0 - target.x0,
            anchor: Point::new(target.x0, mid_y),
        });
    }

    // Right.
    if compared.x1 < target.x0 {
        segments.push(GapSegment {
            direction: Direction::Right,
            length: target.x0 - compared.x1,
            anchor: Point::new(compared.x1, mid_y),
        });
    } else if compared.x1 > target.x0 && compared.x1 < target.x1 && compared.x0 >= target.x0 {
        segments.push(GapSegment {
            direction: Direction::Right,
            length: target.x1 - compared.x1,
            anchor: Point::new(compared.x1, mid_y),
        });
    }

    segments
}
