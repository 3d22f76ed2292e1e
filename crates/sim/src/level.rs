//! Scripted level the harness feeds to the decision core.
//!
//! One fixed cavern layout plus a danger oracle derived from monster
//! distance. The point is reproducibility, not realism: under a fixed
//! seed every run produces the same decision trace.

use borg_world::{
    DangerOracle, MapDimensions, MapOracle, MonsterOracle, MonsterView, Position, TileKind,
    TileView,
};

pub const WIDTH: u32 = 80;
pub const HEIGHT: u32 = 48;

/// Bordered cavern with wall ribs every sixteen columns and a single
/// staircase down near the far corner.
pub struct DemoMap {
    dims: MapDimensions,
    stairs: Position,
}

impl DemoMap {
    pub fn new() -> Self {
        Self {
            dims: MapDimensions::new(WIDTH, HEIGHT),
            stairs: Position::new(70, 40),
        }
    }
}

impl MapOracle for DemoMap {
    fn dimensions(&self) -> MapDimensions {
        self.dims
    }

    fn tile(&self, p: Position) -> TileView {
        if !self.dims.contains(p) {
            return TileView::new(TileKind::Unknown);
        }
        let edge = p.x == 0 || p.y == 0 || p.x == WIDTH as i32 - 1 || p.y == HEIGHT as i32 - 1;
        // Ribs have a doorway every sixth row.
        let rib = p.x % 16 == 0 && p.y % 6 != 3;
        if edge || rib {
            return TileView::new(TileKind::Wall);
        }
        if p == self.stairs {
            return TileView::new(TileKind::StairDown);
        }
        TileView::new(TileKind::Floor)
    }

    fn line_of_sight(&self, _from: Position, _to: Position) -> bool {
        true
    }
}

/// Snapshot of the pack for one decision step.
pub struct Pack(pub Vec<MonsterView>);

impl MonsterOracle for Pack {
    fn tracked_monsters(&self) -> Vec<MonsterView> {
        self.0.clone()
    }
}

/// Danger as a distance falloff from each awake monster.
pub struct ThreatField<'a> {
    monsters: &'a [MonsterView],
}

impl<'a> ThreatField<'a> {
    pub fn new(monsters: &'a [MonsterView]) -> Self {
        Self { monsters }
    }
}

impl DangerOracle for ThreatField<'_> {
    fn danger(&self, p: Position, turns: u32, _visible: bool, _aware: bool) -> u32 {
        let per_turn: u32 = self
            .monsters
            .iter()
            .filter(|m| m.awake)
            .map(|m| 60u32.saturating_sub(6 * p.chebyshev(m.position).unsigned_abs()))
            .sum();
        per_turn * turns.max(1)
    }
}
