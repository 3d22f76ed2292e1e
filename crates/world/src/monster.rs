//! Monster views exposed by the monster oracle.

use crate::common::Position;

/// Snapshot of one tracked monster as the perception layer knows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterView {
    pub position: Position,
    /// False while the monster is asleep or otherwise unaware.
    pub awake: bool,
    /// Ghosts and the like that move through walls. Encirclement logic
    /// excludes them: safe-grid counting cannot block them anyway.
    pub passes_walls: bool,
    /// Named, singular monster.
    pub unique: bool,
}

impl MonsterView {
    pub const fn at(position: Position) -> Self {
        Self {
            position,
            awake: true,
            passes_walls: false,
            unique: false,
        }
    }

    pub const fn asleep(mut self) -> Self {
        self.awake = false;
        self
    }

    pub const fn wall_passer(mut self) -> Self {
        self.passes_walls = true;
        self
    }
}
