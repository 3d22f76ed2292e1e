//! Capability surface: the "try to use resource X" actions.
//!
//! Each action encapsulates the full in-game transaction — legality
//! checks, the percentage failure roll, resource consumption — and reports
//! only whether it committed. The cascade treats "resource missing" and
//! "resource present but the roll failed" identically: both read as
//! `false` and fall through to the next entry.
//!
//! This trait is the only permitted mutator of consumables (spell points,
//! charges, scroll counts). The orchestrator itself touches nothing but
//! behavioral flags and the escape budget counter.

use borg_world::Position;

/// Escape-relevant spells, by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum SpellKind {
    /// Short-range uncontrolled random jump.
    PhaseDoor,
    /// Medium-range uncontrolled jump.
    Portal,
    /// Long-range uncontrolled jump.
    Teleport,
    /// Short shadow-step jump (necromancer).
    ShadowShift,
    /// Medium-range controlled (targeted) jump.
    DimensionDoor,
    /// Leave the level entirely, up or down.
    TeleportLevel,
}

/// Escape-relevant scrolls, by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum ScrollKind {
    PhaseDoor,
    Teleport,
    TeleportLevel,
    DeepDescent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum StaffKind {
    Teleportation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum RodKind {
    Escaping,
}

/// Activatable equipment effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum ActivationKind {
    Teleport,
    PhaseDoor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum PotionKind {
    RestoreMana,
}

/// Raw keys the borg may press directly (stair use, confirmations).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    StairsUp,
    StairsDown,
    Confirm,
}

/// Named escape actions the host engine executes on the borg's behalf.
///
/// Action methods return `true` exactly when the action was committed and
/// its side effects (resource consumption, position change) have been
/// applied atomically by the engine. Predicates are free of side effects.
pub trait Capabilities {
    // ========================================================================
    // Predicates
    // ========================================================================

    /// The spell is known and castable in principle (book carried, not
    /// forbidden by status).
    fn knows_spell(&self, spell: SpellKind) -> bool;

    /// Failure chance of the spell in percent (0-100).
    fn spell_fail(&self, spell: SpellKind) -> u8;

    fn has_scroll(&self, scroll: ScrollKind) -> bool;

    fn has_staff(&self, staff: StaffKind) -> bool;

    fn has_rod(&self, rod: RodKind) -> bool;

    fn has_activation(&self, activation: ActivationKind) -> bool;

    fn has_potion(&self, potion: PotionKind) -> bool;

    /// Some short-range random jump is available.
    ///
    /// The landing-safety evaluators require this before sampling: with no
    /// way to phase, "is phasing safe" is vacuously not worth answering.
    fn can_phase(&self) -> bool {
        self.knows_spell(SpellKind::PhaseDoor)
            || self.knows_spell(SpellKind::Portal)
            || self.knows_spell(SpellKind::ShadowShift)
            || self.has_scroll(ScrollKind::PhaseDoor)
            || self.has_activation(ActivationKind::PhaseDoor)
    }

    /// Some long-range jump is available.
    fn can_teleport(&self) -> bool {
        self.knows_spell(SpellKind::Teleport)
            || self.knows_spell(SpellKind::DimensionDoor)
            || self.has_scroll(ScrollKind::Teleport)
            || self.has_staff(StaffKind::Teleportation)
            || self.has_rod(RodKind::Escaping)
            || self.has_activation(ActivationKind::Teleport)
    }

    // ========================================================================
    // Actions (true = committed, resource consumed)
    // ========================================================================

    /// Casts the spell if known and its failure chance is at most
    /// `max_fail` percent; the in-game failure roll still applies.
    fn cast_spell(&mut self, spell: SpellKind, max_fail: u8) -> bool;

    fn read_scroll(&mut self, scroll: ScrollKind) -> bool;

    /// Uses the staff only if a charge-and-failure check passes first.
    fn use_staff(&mut self, staff: StaffKind) -> bool;

    /// Uses the staff unconditionally, accepting the activation risk.
    fn use_staff_unchecked(&mut self, staff: StaffKind) -> bool;

    fn zap_rod(&mut self, rod: RodKind) -> bool;

    fn activate(&mut self, activation: ActivationKind) -> bool;

    fn quaff(&mut self, potion: PotionKind) -> bool;

    /// Aims subsequent targeted effects at the given position.
    fn set_target(&mut self, position: Position) -> bool;

    /// Presses a raw key (stair use, confirmation prompts).
    fn press(&mut self, key: Key) -> bool;
}
