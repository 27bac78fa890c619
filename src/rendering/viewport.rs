//! # Viewport Rendering
//!
//! Composes floor symbols and agent symbols into clipped rows of text.

use crate::game::{AgentRoster, FloorGrid, OccupancyIndex, Position};
use std::ops::Range;

/// The part of a floor to render.
///
/// Unset dimensions default to the full floor. Without a center the view is
/// anchored at the top-left corner of the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Requested width in tiles
    pub width: Option<u32>,
    /// Requested height in tiles
    pub height: Option<u32>,
    /// Tile to center the view on
    pub center: Option<Position>,
}

impl Viewport {
    /// A view of the whole floor.
    pub fn full() -> Self {
        Self::default()
    }

    /// A view of at most `width` by `height` tiles.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            center: None,
        }
    }

    /// Centers the view on a tile.
    pub fn centered_on(mut self, center: Position) -> Self {
        self.center = Some(center);
        self
    }

    /// Computes the column and row ranges visible on a floor of the given size.
    ///
    /// A centered view starts half a viewport before its center, clamped at
    /// zero, and is cut off at the far edge of the floor without shifting
    /// back. Views near the right or bottom edge are therefore narrower than
    /// requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Position, Viewport};
    ///
    /// let view = Viewport::sized(10, 4).centered_on(Position::new(18, 1));
    /// assert_eq!(view.clip(20, 10), (13..20, 0..4));
    /// ```
    pub fn clip(&self, floor_width: u32, floor_height: u32) -> (Range<i32>, Range<i32>) {
        let columns = Self::clip_axis(
            self.width.unwrap_or(floor_width),
            floor_width,
            self.center.map(|center| center.x),
        );
        let rows = Self::clip_axis(
            self.height.unwrap_or(floor_height),
            floor_height,
            self.center.map(|center| center.y),
        );
        (columns, rows)
    }

    fn clip_axis(view: u32, floor: u32, center: Option<i32>) -> Range<i32> {
        let view = i64::from(view);
        let floor = i64::from(floor);
        let start = match center {
            Some(center) => (i64::from(center) - view / 2).max(0),
            None => 0,
        };
        let end = (start + view).min(floor).max(start);
        // Both bounds lie in 0..=u32::MAX; anything past i32::MAX is off any floor anyway
        let clamp = |value: i64| value.min(i64::from(i32::MAX)) as i32;
        clamp(start)..clamp(end)
    }
}

/// Draws a floor and the agents on it as rows of characters.
pub struct ViewportRenderer<'a, R: AgentRoster + ?Sized> {
    floor: &'a FloorGrid,
    occupancy: &'a OccupancyIndex,
    agents: &'a R,
}

impl<'a, R: AgentRoster + ?Sized> ViewportRenderer<'a, R> {
    /// Creates a renderer reading from a floor, its occupancy and the agent table.
    pub fn new(floor: &'a FloorGrid, occupancy: &'a OccupancyIndex, agents: &'a R) -> Self {
        Self {
            floor,
            occupancy,
            agents,
        }
    }

    /// Renders the visible part of the floor.
    ///
    /// Every row has the same length. A tile shows the symbol of the first
    /// agent standing on it if that agent has one; otherwise the tile's own
    /// symbol is shown, even when later agents on the tile have symbols.
    pub fn render(&self, viewport: &Viewport) -> Vec<String> {
        let (columns, rows) = viewport.clip(self.floor.width, self.floor.height);

        rows.map(|y| {
            columns
                .clone()
                .map(|x| self.symbol_at(Position::new(x, y)))
                .collect()
        })
        .collect()
    }

    /// Renders the whole floor.
    pub fn render_full(&self) -> Vec<String> {
        self.render(&Viewport::full())
    }

    fn symbol_at(&self, pos: Position) -> char {
        let agent_symbol = self
            .occupancy
            .agents_at(pos)
            .first()
            .and_then(|&id| self.agents.symbol_of(id));

        agent_symbol
            .or_else(|| self.floor.get_tile(pos).map(|tile| tile.symbol()))
            .unwrap_or(' ')
    }

    /// Describes the floor: number, size, room count, stairs and spawn point.
    pub fn map_info(&self) -> String {
        self.floor.info().to_string()
    }
}
