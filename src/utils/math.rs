//! # Grid Mathematics
//!
//! Integer line rasterization used by line-of-sight checks.

use crate::game::Position;

/// Integer Bresenham walk from `start` towards `end`.
///
/// Yields every visited point strictly before the endpoint, starting with
/// `start` itself. The endpoint is never yielded, so a line from a point to
/// itself is empty. Each step reduces the Chebyshev distance to `end` by one,
/// so the walk always terminates.
///
/// # Examples
///
/// ```
/// use burrow::{BresenhamLine, Position};
///
/// let points: Vec<_> = BresenhamLine::new(Position::new(0, 0), Position::new(3, 0)).collect();
/// assert_eq!(points, vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]);
/// ```
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    current: Position,
    end: Position,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
}

impl BresenhamLine {
    /// Creates a walk between two points.
    pub fn new(start: Position, end: Position) -> Self {
        // Widened so that extreme coordinates cannot overflow
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = (i64::from(end.y) - i64::from(start.y)).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx - dy,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.current == self.end {
            return None;
        }

        let visited = self.current;
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.current.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }

        Some(visited)
    }
}
