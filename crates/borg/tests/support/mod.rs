//! Test harness: a tiny scripted world and capability surface.

use std::collections::{HashMap, HashSet};

use borg_world::{
    AgentState, DangerOracle, MapDimensions, MapOracle, MonsterOracle, MonsterView, Position,
    ResourceMeter, Tick, TileKind, TileView, WorldEnv,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use borg::capability::{
    ActivationKind, Capabilities, Key, PotionKind, RodKind, ScrollKind, SpellKind, StaffKind,
};
use borg::{BorgContext, EscapeDecider, TurnGlobals};

/// Fully known floor with per-tile overrides.
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

    pub fn set(&mut self, position: Position, kind: TileKind) {
        self.tiles.insert(position, TileView::new(kind));
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

pub struct Monsters(pub Vec<MonsterView>);

impl MonsterOracle for Monsters {
    fn tracked_monsters(&self) -> Vec<MonsterView> {
        self.0.clone()
    }
}

/// Uniform danger with per-tile overrides.
pub struct Danger {
    pub base: u32,
    pub spots: HashMap<Position, u32>,
}

impl DangerOracle for Danger {
    fn danger(&self, p: Position, _turns: u32, _visible: bool, _aware: bool) -> u32 {
        *self.spots.get(&p).unwrap_or(&self.base)
    }
}

/// Capability surface with an explicit inventory and a log of committed
/// actions, in commit order.
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

/// One decision step's worth of world plus a healthy mid-game agent.
pub struct Harness {
    pub map: GridMap,
    pub monsters: Monsters,
    pub danger: Danger,
    pub caps: ScriptedCaps,
    pub rng: SmallRng,
    pub agent: AgentState,
    pub globals: TurnGlobals,
}

impl Harness {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self {
            map: GridMap::open(64, 64),
            monsters: Monsters(Vec::new()),
            danger: Danger {
                base: 0,
                spots: HashMap::new(),
            },
            caps: ScriptedCaps::default(),
            rng: SmallRng::seed_from_u64(7),
            agent: AgentState {
                hp: ResourceMeter::full(100),
                level: 30,
                depth: 20,
                position: Position::new(30, 30),
                escapes: 5,
                turn: Tick::new(1000),
                known_stairs: 2,
                ..AgentState::default()
            },
            globals: TurnGlobals {
                avoidance: 100,
                ..TurnGlobals::default()
            },
        }
    }

    /// Runs one escape decision with the default policy table.
    pub fn decide(&mut self, b_q: u32) -> bool {
        let decider = EscapeDecider::default();
        let mut ctx = BorgContext::new(
            &mut self.agent,
            WorldEnv::with_all(&self.map, &self.monsters, &self.danger),
            &mut self.caps,
            &mut self.rng,
            self.globals,
        )
        .expect("all oracles present");
        decider.decide(&mut ctx, b_q)
    }
}
