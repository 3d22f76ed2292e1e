//! Traits describing read-only world data.
//!
//! Oracles expose the map as the agent knows it, the tracked monster list,
//! and the danger heuristic. The [`WorldEnv`] aggregate bundles them so the
//! decision core can reach everything it needs without hard coupling to
//! concrete engine implementations.

use crate::common::Position;
use crate::monster::MonsterView;
use crate::tile::TileView;

/// Map oracle exposing the level as the perception layer knows it.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Returns the view of a tile. Out-of-bounds queries return an
    /// unknown, unoccupied tile.
    fn tile(&self, position: Position) -> TileView;

    /// Line of sight between two positions over known terrain.
    fn line_of_sight(&self, from: Position, to: Position) -> bool;

    /// True once the level is considered fully explored (and warded where
    /// it matters). The long-range landing sampler uses this as license to
    /// accept unknown destination tiles.
    fn fully_explored(&self) -> bool {
        false
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

/// Monster oracle exposing the tracked-monster list.
pub trait MonsterOracle: Send + Sync {
    /// Monsters the perception layer is currently tracking near the agent.
    fn tracked_monsters(&self) -> Vec<MonsterView>;
}

/// Danger oracle: expected damage if the agent stood at `position` for
/// `turns` turns.
///
/// Higher is strictly worse; the estimate has no side effects and is
/// recomputed per query. The two assumption flags let callers ask "what if
/// the monsters could see me / knew where I was" for hypothetical tiles.
pub trait DangerOracle: Send + Sync {
    fn danger(&self, position: Position, turns: u32, assume_visible: bool, assume_aware: bool)
    -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Raised when a `WorldEnv` is queried for an oracle it was not given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("map oracle not available")]
    MapNotAvailable,
    #[error("monster oracle not available")]
    MonstersNotAvailable,
    #[error("danger oracle not available")]
    DangerNotAvailable,
}

/// Aggregates the read-only oracles required by the decision core.
#[derive(Clone, Copy)]
pub struct WorldEnv<'a> {
    map: Option<&'a dyn MapOracle>,
    monsters: Option<&'a dyn MonsterOracle>,
    danger: Option<&'a dyn DangerOracle>,
}

impl<'a> WorldEnv<'a> {
    pub fn new(
        map: Option<&'a dyn MapOracle>,
        monsters: Option<&'a dyn MonsterOracle>,
        danger: Option<&'a dyn DangerOracle>,
    ) -> Self {
        Self {
            map,
            monsters,
            danger,
        }
    }

    pub fn with_all(
        map: &'a dyn MapOracle,
        monsters: &'a dyn MonsterOracle,
        danger: &'a dyn DangerOracle,
    ) -> Self {
        Self::new(Some(map), Some(monsters), Some(danger))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            monsters: None,
            danger: None,
        }
    }

    /// Returns the map oracle, or an error if not available.
    pub fn map(&self) -> Result<&'a dyn MapOracle, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the monster oracle, or an error if not available.
    pub fn monsters(&self) -> Result<&'a dyn MonsterOracle, OracleError> {
        self.monsters.ok_or(OracleError::MonstersNotAvailable)
    }

    /// Returns the danger oracle, or an error if not available.
    pub fn danger(&self) -> Result<&'a dyn DangerOracle, OracleError> {
        self.danger.ok_or(OracleError::DangerNotAvailable)
    }
}
