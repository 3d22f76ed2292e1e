//! Shared fixtures for unit tests: tiny oracle and capability stubs.

use std::collections::{HashMap, HashSet};

use borg_world::{
    DangerOracle, MapDimensions, MapOracle, MonsterOracle, MonsterView, Position, TileKind,
    TileView,
};

use crate::capability::{
    ActivationKind, Capabilities, Key, PotionKind, RodKind, ScrollKind, SpellKind, StaffKind,
};

/// Fully known open floor of the given dimensions.
pub struct OpenMap(pub MapDimensions);

impl MapOracle for OpenMap {
    fn dimensions(&self) -> MapDimensions {
        self.0
    }
    fn tile(&self, position: Position) -> TileView {
        if self.0.contains(position) {
            TileView::new(TileKind::Floor)
        } else {
            TileView::new(TileKind::Unknown)
        }
    }
    fn line_of_sight(&self, _from: Position, _to: Position) -> bool {
        true
    }
}

/// Open floor with per-tile overrides.
pub struct GridMap {
    pub dims: MapDimensions,
    pub tiles: HashMap<Position, TileView>,
}

impl GridMap {
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dims: MapDimensions::new(width, height),
            tiles: HashMap::new(),
        }
    }

    pub fn set(&mut self, position: Position, tile: TileView) {
        self.tiles.insert(position, tile);
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dims
    }
    fn tile(&self, position: Position) -> TileView {
        if !self.dims.contains(position) {
            return TileView::new(TileKind::Unknown);
        }
        self.tiles
            .get(&position)
            .copied()
            .unwrap_or(TileView::new(TileKind::Floor))
    }
    fn line_of_sight(&self, _from: Position, _to: Position) -> bool {
        true
    }
}

pub struct NoMonsters;

impl MonsterOracle for NoMonsters {
    fn tracked_monsters(&self) -> Vec<MonsterView> {
        Vec::new()
    }
}

pub struct Monsters(pub Vec<MonsterView>);

impl MonsterOracle for Monsters {
    fn tracked_monsters(&self) -> Vec<MonsterView> {
        self.0.clone()
    }
}

/// Uniform danger everywhere.
pub struct FlatDanger(pub u32);

impl DangerOracle for FlatDanger {
    fn danger(&self, _p: Position, _t: u32, _v: bool, _a: bool) -> u32 {
        self.0
    }
}

/// Uniform danger with per-tile overrides.
pub struct TableDanger {
    pub base: u32,
    pub spots: HashMap<Position, u32>,
}

impl DangerOracle for TableDanger {
    fn danger(&self, p: Position, _t: u32, _v: bool, _a: bool) -> u32 {
        *self.spots.get(&p).unwrap_or(&self.base)
    }
}

/// Capability stub that owns everything and always succeeds.
pub struct AllCaps;

impl Capabilities for AllCaps {
    fn knows_spell(&self, _s: SpellKind) -> bool {
        true
    }
    fn spell_fail(&self, _s: SpellKind) -> u8 {
        5
    }
    fn has_scroll(&self, _s: ScrollKind) -> bool {
        true
    }
    fn has_staff(&self, _s: StaffKind) -> bool {
        true
    }
    fn has_rod(&self, _r: RodKind) -> bool {
        true
    }
    fn has_activation(&self, _a: ActivationKind) -> bool {
        true
    }
    fn has_potion(&self, _p: PotionKind) -> bool {
        true
    }
    fn cast_spell(&mut self, _s: SpellKind, _f: u8) -> bool {
        true
    }
    fn read_scroll(&mut self, _s: ScrollKind) -> bool {
        true
    }
    fn use_staff(&mut self, _s: StaffKind) -> bool {
        true
    }
    fn use_staff_unchecked(&mut self, _s: StaffKind) -> bool {
        true
    }
    fn zap_rod(&mut self, _r: RodKind) -> bool {
        true
    }
    fn activate(&mut self, _a: ActivationKind) -> bool {
        true
    }
    fn quaff(&mut self, _p: PotionKind) -> bool {
        true
    }
    fn set_target(&mut self, _p: Position) -> bool {
        true
    }
    fn press(&mut self, _k: Key) -> bool {
        true
    }
}

/// Capability stub with an explicit inventory and a log of every committed
/// action, for asserting which cascade entry actually fired.
#[derive(Default)]
pub struct ScriptedCaps {
    pub spells: HashSet<SpellKind>,
    pub fails: HashMap<SpellKind, u8>,
    pub scrolls: HashSet<ScrollKind>,
    pub staffs: HashSet<StaffKind>,
    pub rods: HashSet<RodKind>,
    pub activations: HashSet<ActivationKind>,
    pub potions: HashSet<PotionKind>,
    pub log: Vec<String>,
}

impl Capabilities for ScriptedCaps {
    fn knows_spell(&self, s: SpellKind) -> bool {
        self.spells.contains(&s)
    }
    fn spell_fail(&self, s: SpellKind) -> u8 {
        self.fails.get(&s).copied().unwrap_or(10)
    }
    fn has_scroll(&self, s: ScrollKind) -> bool {
        self.scrolls.contains(&s)
    }
    fn has_staff(&self, s: StaffKind) -> bool {
        self.staffs.contains(&s)
    }
    fn has_rod(&self, r: RodKind) -> bool {
        self.rods.contains(&r)
    }
    fn has_activation(&self, a: ActivationKind) -> bool {
        self.activations.contains(&a)
    }
    fn has_potion(&self, p: PotionKind) -> bool {
        self.potions.contains(&p)
    }
    fn cast_spell(&mut self, s: SpellKind, max_fail: u8) -> bool {
        if !self.spells.contains(&s) || self.spell_fail(s) > max_fail {
            return false;
        }
        self.log.push(format!("cast {s}"));
        true
    }
    fn read_scroll(&mut self, s: ScrollKind) -> bool {
        if !self.scrolls.remove(&s) {
            return false;
        }
        self.log.push(format!("read_scroll {s}"));
        true
    }
    fn use_staff(&mut self, s: StaffKind) -> bool {
        if !self.staffs.contains(&s) {
            return false;
        }
        self.log.push(format!("use_staff {s}"));
        true
    }
    fn use_staff_unchecked(&mut self, s: StaffKind) -> bool {
        if !self.staffs.contains(&s) {
            return false;
        }
        self.log.push(format!("use_staff_unchecked {s}"));
        true
    }
    fn zap_rod(&mut self, r: RodKind) -> bool {
        if !self.rods.contains(&r) {
            return false;
        }
        self.log.push(format!("zap_rod {r}"));
        true
    }
    fn activate(&mut self, a: ActivationKind) -> bool {
        if !self.activations.contains(&a) {
            return false;
        }
        self.log.push(format!("activate {a}"));
        true
    }
    fn quaff(&mut self, p: PotionKind) -> bool {
        if !self.potions.remove(&p) {
            return false;
        }
        self.log.push(format!("quaff {p}"));
        true
    }
    fn set_target(&mut self, p: Position) -> bool {
        self.log.push(format!("target {},{}", p.x, p.y));
        true
    }
    fn press(&mut self, k: Key) -> bool {
        self.log.push(format!("press {k:?}"));
        true
    }
}
