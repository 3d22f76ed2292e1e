//! Capability surface backed by a small scripted inventory.
//!
//! Actions debit the inventory and record the movement effect they would
//! have in the real game; the sim loop collects the pending effect after
//! each committed decision and applies it to the agent itself.

use std::collections::HashSet;

use borg_world::Position;

use borg::capability::{
    ActivationKind, Capabilities, Key, PotionKind, RodKind, ScrollKind, SpellKind, StaffKind,
};

/// Movement the committed action produces, applied by the sim loop.
#[derive(Clone, Copy, Debug)]
pub enum Effect {
    /// Random jump within phase range.
    Hop,
    /// Random jump within teleport range.
    Jump,
    /// Controlled landing on a chosen tile.
    Blink(Position),
    /// Leave the level entirely.
    LevelExit,
    /// Take the staircase under the agent.
    Stairs,
    /// No displacement (quaffing, etc.).
    Still,
}

pub struct SimCaps {
    knows: HashSet<SpellKind>,
    pub sp: u32,
    pub max_sp: u32,
    pub phase_scrolls: u32,
    pub teleport_scrolls: u32,
    pub level_scrolls: u32,
    pub staff_charges: u32,
    target: Option<Position>,
    pending: Option<Effect>,
}

impl SimCaps {
    /// Mid-game mage kit: the jumps are spells, with scrolls as backup.
    pub fn mage_loadout() -> Self {
        Self {
            knows: HashSet::from([
                SpellKind::PhaseDoor,
                SpellKind::Teleport,
                SpellKind::DimensionDoor,
            ]),
            sp: 30,
            max_sp: 30,
            phase_scrolls: 4,
            teleport_scrolls: 2,
            level_scrolls: 1,
            staff_charges: 3,
            target: None,
            pending: None,
        }
    }

    /// Takes the movement effect of the last committed action, if any.
    pub fn take_effect(&mut self) -> Option<Effect> {
        self.pending.take()
    }

    fn spell_cost(spell: SpellKind) -> u32 {
        match spell {
            SpellKind::PhaseDoor => 2,
            SpellKind::Portal | SpellKind::ShadowShift => 4,
            SpellKind::Teleport => 6,
            SpellKind::DimensionDoor => 8,
            SpellKind::TeleportLevel => 10,
        }
    }

    fn spell_effect(&mut self, spell: SpellKind) -> Effect {
        match spell {
            SpellKind::PhaseDoor | SpellKind::ShadowShift => Effect::Hop,
            SpellKind::Portal | SpellKind::Teleport => Effect::Jump,
            SpellKind::DimensionDoor => self.target.take().map_or(Effect::Jump, Effect::Blink),
            SpellKind::TeleportLevel => Effect::LevelExit,
        }
    }
}

impl Capabilities for SimCaps {
    fn knows_spell(&self, spell: SpellKind) -> bool {
        self.knows.contains(&spell) && self.sp >= Self::spell_cost(spell)
    }

    fn spell_fail(&self, spell: SpellKind) -> u8 {
        match spell {
            SpellKind::PhaseDoor => 8,
            SpellKind::Portal | SpellKind::ShadowShift => 12,
            SpellKind::Teleport => 15,
            SpellKind::DimensionDoor => 20,
            SpellKind::TeleportLevel => 25,
        }
    }

    fn has_scroll(&self, scroll: ScrollKind) -> bool {
        match scroll {
            ScrollKind::PhaseDoor => self.phase_scrolls > 0,
            ScrollKind::Teleport => self.teleport_scrolls > 0,
            ScrollKind::TeleportLevel => self.level_scrolls > 0,
            ScrollKind::DeepDescent => false,
        }
    }

    fn has_staff(&self, staff: StaffKind) -> bool {
        match staff {
            StaffKind::Teleportation => self.staff_charges > 0,
        }
    }

    fn has_rod(&self, _rod: RodKind) -> bool {
        false
    }

    fn has_activation(&self, _activation: ActivationKind) -> bool {
        false
    }

    fn has_potion(&self, _potion: PotionKind) -> bool {
        false
    }

    fn cast_spell(&mut self, spell: SpellKind, max_fail: u8) -> bool {
        if !self.knows_spell(spell) || self.spell_fail(spell) > max_fail {
            return false;
        }
        self.sp -= Self::spell_cost(spell);
        let effect = self.spell_effect(spell);
        self.pending = Some(effect);
        true
    }

    fn read_scroll(&mut self, scroll: ScrollKind) -> bool {
        let (count, effect) = match scroll {
            ScrollKind::PhaseDoor => (&mut self.phase_scrolls, Effect::Hop),
            ScrollKind::Teleport => (&mut self.teleport_scrolls, Effect::Jump),
            ScrollKind::TeleportLevel => (&mut self.level_scrolls, Effect::LevelExit),
            ScrollKind::DeepDescent => return false,
        };
        if *count == 0 {
            return false;
        }
        *count -= 1;
        self.pending = Some(effect);
        true
    }

    fn use_staff(&mut self, staff: StaffKind) -> bool {
        if !self.has_staff(staff) {
            return false;
        }
        self.staff_charges -= 1;
        self.pending = Some(Effect::Jump);
        true
    }

    fn use_staff_unchecked(&mut self, staff: StaffKind) -> bool {
        self.use_staff(staff)
    }

    fn zap_rod(&mut self, _rod: RodKind) -> bool {
        false
    }

    fn activate(&mut self, _activation: ActivationKind) -> bool {
        false
    }

    fn quaff(&mut self, _potion: PotionKind) -> bool {
        false
    }

    fn set_target(&mut self, position: Position) -> bool {
        self.target = Some(position);
        true
    }

    fn press(&mut self, key: Key) -> bool {
        match key {
            Key::StairsUp | Key::StairsDown => {
                self.pending = Some(Effect::Stairs);
                true
            }
            Key::Confirm => true,
        }
    }
}
