//! The mutable agent record.
//!
//! [`AgentState`] is the single record describing the character the borg is
//! playing: vitals, class, depth, status flags, behavioral goal flags, and
//! the handful of counters the escape subsystem maintains. There is exactly
//! one logical agent per session; the record lives in the host and is
//! passed by mutable reference into the decision core.

use crate::common::{Position, ResourceMeter, Tick};
use crate::status::AgentStatus;

/// Character class of the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    #[default]
    Warrior,
    Mage,
    Priest,
    Rogue,
    Ranger,
    Paladin,
    Blackguard,
    Necromancer,
}

impl ClassKind {
    /// True for classes that cast spells at all (have a mana pool worth
    /// watching).
    pub const fn is_spellcaster(self) -> bool {
        !matches!(self, ClassKind::Warrior)
    }

    /// True for classes whose escapes come primarily from books rather
    /// than devices — these get the emergency-phase allowance at low
    /// character level.
    pub const fn is_book_caster(self) -> bool {
        matches!(
            self,
            ClassKind::Mage | ClassKind::Priest | ClassKind::Necromancer
        )
    }
}

/// Behavioral goal flags.
///
/// Within the escape subsystem these are monotonic: the cascade only ever
/// sets them to `true` during a crisis. Clearing them again (on reaching
/// stairs, on a new level) is the host engine's responsibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalFlags {
    /// Actively running from the current fight.
    pub fleeing: bool,
    /// Intending to leave the level as soon as practical.
    pub leaving: bool,
    /// A word-of-recall is in flight.
    pub recalling: bool,
    /// Override: ignore surround/encirclement warnings.
    pub ignoring: bool,
}

/// Singleton record for the player character the borg is driving.
#[derive(Clone, Debug, Default)]
pub struct AgentState {
    /// Hit points.
    pub hp: ResourceMeter,
    /// Spell points.
    pub sp: ResourceMeter,
    /// Character level (1-50).
    pub level: u32,
    /// Dungeon depth in levels; 0 is the town.
    pub depth: u32,
    pub class: ClassKind,
    pub position: Position,
    pub status: AgentStatus,
    pub goal: GoalFlags,

    /// Count of escapes spent during the current crisis. The host bumps it
    /// after every committed escape; the decision core pre-decrements it
    /// for phase-only hops, which are cheap enough not to count.
    pub escapes: i32,

    /// Current game turn.
    pub turn: Tick,
    /// Turn at which the agent last entered an anti-summon corridor.
    pub antisummon_at: Tick,
    /// Turns spent on the current level.
    pub time_on_level: u32,
    /// Number of stairs the agent knows about on this level.
    pub known_stairs: u32,
    /// True if the agent has a ranged attack worth shooting with.
    pub has_missile: bool,
}

impl AgentState {
    /// Current HP as a percentage of maximum.
    pub const fn hp_percent(&self) -> u32 {
        self.hp.percent()
    }

    /// True while the agent is in the town rather than the dungeon.
    pub const fn in_town(&self) -> bool {
        self.depth == 0
    }

    /// True if the status snapshot includes the given condition.
    pub const fn has_status(&self, status: AgentStatus) -> bool {
        self.status.contains(status)
    }
}
