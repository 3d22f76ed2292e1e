//! Tile views exposed by the map oracle.

/// What the borg believes occupies a map tile.
///
/// This is the perception layer's knowledge, not ground truth: tiles the
/// agent has never seen are [`TileKind::Unknown`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    /// Never observed.
    #[default]
    Unknown,
    Floor,
    Wall,
    Rubble,
    StairUp,
    StairDown,
    /// Town shop entrance.
    Shop,
    /// Protective ward glyph on the floor.
    Glyph,
    /// Spider web; landing in one pins the agent.
    Web,
    /// A trap; `armed` is false once it has been triggered or disarmed.
    Trap {
        armed: bool,
    },
}

/// Snapshot of one tile plus its occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileView {
    pub kind: TileKind,
    /// A monster is standing here.
    pub occupied: bool,
}

impl TileView {
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            occupied: false,
        }
    }

    pub const fn occupied(kind: TileKind) -> Self {
        Self {
            kind,
            occupied: true,
        }
    }

    /// True if a random jump may legally deposit the agent here.
    ///
    /// Walls, webs, and monster-occupied tiles are rejected by the game
    /// itself; the samplers mirror that rule rather than model it.
    pub const fn is_landable(&self) -> bool {
        if self.occupied {
            return false;
        }
        matches!(
            self.kind,
            TileKind::Floor
                | TileKind::StairUp
                | TileKind::StairDown
                | TileKind::Glyph
                | TileKind::Trap { armed: false }
        )
    }

    /// True if the agent could step here to retreat.
    ///
    /// Used by the surround estimator to count escape directions: walls,
    /// unknown ground, shops, live traps, and monster-occupied tiles all
    /// fail to count as a way out.
    pub const fn is_safe_step(&self) -> bool {
        if self.occupied {
            return false;
        }
        matches!(
            self.kind,
            TileKind::Floor
                | TileKind::StairUp
                | TileKind::StairDown
                | TileKind::Glyph
                | TileKind::Trap { armed: false }
        )
    }

    pub const fn is_stairs(&self) -> bool {
        matches!(self.kind, TileKind::StairUp | TileKind::StairDown)
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self.kind, TileKind::Unknown)
    }
}
