//! # Tile Catalog
//!
//! The closed set of tile kinds and their fixed properties.

use serde::{Deserialize, Serialize};

/// Kinds of tile a floor is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    StairsDown,
    StairsUp,
}

/// Fixed properties shared by every tile of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProperties {
    pub walkable: bool,
    pub transparent: bool,
    pub symbol: char,
}

const WALL: TileProperties = TileProperties {
    walkable: false,
    transparent: false,
    symbol: '#',
};

const FLOOR: TileProperties = TileProperties {
    walkable: true,
    transparent: true,
    symbol: '.',
};

const STAIRS_DOWN: TileProperties = TileProperties {
    walkable: true,
    transparent: true,
    symbol: '>',
};

const STAIRS_UP: TileProperties = TileProperties {
    walkable: true,
    transparent: true,
    symbol: '<',
};

impl TileKind {
    /// Every tile kind, in catalog order.
    pub const ALL: [TileKind; 4] = [
        TileKind::Wall,
        TileKind::Floor,
        TileKind::StairsDown,
        TileKind::StairsUp,
    ];

    /// Returns the catalog entry for this kind.
    pub const fn properties(self) -> TileProperties {
        match self {
            TileKind::Wall => WALL,
            TileKind::Floor => FLOOR,
            TileKind::StairsDown => STAIRS_DOWN,
            TileKind::StairsUp => STAIRS_UP,
        }
    }

    /// Whether agents can stand on this tile.
    pub const fn is_walkable(self) -> bool {
        self.properties().walkable
    }

    /// Whether this tile lets line of sight through.
    pub const fn is_transparent(self) -> bool {
        self.properties().transparent
    }

    /// Display character for this tile.
    pub const fn symbol(self) -> char {
        self.properties().symbol
    }

    /// Looks up the kind drawn with `symbol`.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::TileKind;
    ///
    /// assert_eq!(TileKind::from_symbol('>'), Some(TileKind::StairsDown));
    /// assert_eq!(TileKind::from_symbol('@'), None);
    /// ```
    pub fn from_symbol(symbol: char) -> Option<TileKind> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_blocks_everything() {
        assert!(!TileKind::Wall.is_walkable());
        assert!(!TileKind::Wall.is_transparent());
        assert_eq!(TileKind::Wall.symbol(), '#');
    }

    #[test]
    fn test_open_tiles() {
        for kind in [TileKind::Floor, TileKind::StairsDown, TileKind::StairsUp] {
            assert!(kind.is_walkable(), "{:?} should be walkable", kind);
            assert!(kind.is_transparent(), "{:?} should be transparent", kind);
        }
        assert_eq!(TileKind::Floor.symbol(), '.');
        assert_eq!(TileKind::StairsDown.symbol(), '>');
        assert_eq!(TileKind::StairsUp.symbol(), '<');
    }

    #[test]
    fn test_symbols_round_trip_through_catalog() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(TileKind::from_symbol(' '), None);
    }
}
