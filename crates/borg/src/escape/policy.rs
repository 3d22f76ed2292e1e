//! Named tier policy table.
//!
//! Every threshold and tolerance the escape cascade uses lives here under
//! a name, instead of as arithmetic buried in control flow. Thresholds are
//! expressed as tenths of `avoidance` (the engine-maintained baseline of
//! tolerable threat), so `Ratio10(45)` reads as "4.5 times avoidance".
//!
//! The default table is `const`-constructible; an alternate table can be
//! deserialized from RON for tuning runs.

use serde::{Deserialize, Serialize};

/// Danger threshold as a numerator over ten applied to `avoidance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio10(pub u32);

impl Ratio10 {
    /// The danger value at which this ratio fires, with `bonus` added to
    /// the numerator (the risky-play loosening).
    pub const fn floor(self, avoidance: u32, bonus: u32) -> u32 {
        avoidance * (self.0 + bonus) / 10
    }
}

/// Threshold pair: normal play versus fighting a unique.
///
/// Uniques raise the bar — disengaging from a named monster throws away
/// progress, so the cascade tolerates more danger before bailing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThreshold {
    pub base: Ratio10,
    pub fighting_unique: Ratio10,
}

impl TierThreshold {
    pub const fn new(base: u32, fighting_unique: u32) -> Self {
        Self {
            base: Ratio10(base),
            fighting_unique: Ratio10(fighting_unique),
        }
    }

    /// True when the danger estimate reaches this tier's floor.
    pub const fn matches(&self, b_q: u32, avoidance: u32, fighting_unique: bool, bonus: u32) -> bool {
        let ratio = if fighting_unique {
            self.fighting_unique
        } else {
            self.base
        };
        b_q >= ratio.floor(avoidance, bonus)
    }
}

/// Tier 1: imminent-death bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPolicy {
    pub threshold: TierThreshold,
    /// Replaces the unique threshold during the endgame boss fights.
    pub endgame: Ratio10,
    /// Depth at and below which the endgame threshold applies.
    pub endgame_depth: u32,
    /// Spell fail tolerance on the first cascade pass.
    pub max_fail: u8,
    /// Loosened tolerance for the retry pass.
    pub retry_max_fail: u8,
    /// `emergency` handed to the teleport landing sampler.
    pub teleport_emergency: u32,
}

/// Tiers 1.1-1.3: last-stand bracket for low-level characters at
/// critically low HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastStandPolicy {
    /// HP percentage at or below which the bracket opens.
    pub hp_percent: u32,
    /// Character level at or below which the bracket opens.
    pub max_level: u32,
    pub threshold: TierThreshold,
    /// Fail tolerance for the forced casts; death is the alternative.
    pub forced_fail: u8,
    /// SP percentage below which a Restore Mana quaff comes first.
    pub low_sp_percent: u32,
}

/// Tier 2: moderate-danger bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeratePolicy {
    pub threshold: TierThreshold,
    pub max_fail: u8,
    pub teleport_emergency: u32,
    pub phase_emergency: u32,
}

/// Tier 3: elevated-danger bracket (also entered on heavy stun or an
/// afraid warrior with nothing to shoot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatedPolicy {
    pub threshold: TierThreshold,
    pub max_fail: u8,
    /// Loosened tolerance for the second phase attempt.
    pub loose_fail: u8,
    pub teleport_emergency: u32,
    pub phase_emergency: u32,
    /// Looser sampler tolerance for the second phase attempt.
    pub loose_phase_emergency: u32,
}

/// Tier 4: compromised bracket — the danger ratio alone would be
/// tolerable, but the character is low level or badly hurt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompromisedPolicy {
    pub threshold: TierThreshold,
    /// Character level below which the bracket opens.
    pub max_level: u32,
    /// HP percentage below which the bracket opens regardless of level.
    pub hp_percent: u32,
    pub max_fail: u8,
    pub teleport_emergency: u32,
    pub phase_emergency: u32,
    /// Book casters at or below this level get the emergency phase.
    pub caster_level: u32,
}

/// Tier 5: novice bracket for characters below level ten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovicePolicy {
    pub threshold: TierThreshold,
    pub max_level: u32,
    pub max_fail: u8,
    pub teleport_emergency: u32,
    pub phase_emergency: u32,
    /// Book casters at or below this level get the emergency phase.
    pub caster_level: u32,
}

/// Tier 6: out-of-mana bracket for big-pool spellcasters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaOutPolicy {
    pub threshold: TierThreshold,
    /// SP percentage at or below which the bracket opens.
    pub sp_percent: u32,
    /// Minimum maximum-SP for the bracket to apply at all.
    pub min_max_sp: u32,
    pub max_fail: u8,
    pub teleport_emergency: u32,
    pub phase_emergency: u32,
}

/// Tier 7: shoot-and-scoot disengage after a ranged exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkirmishPolicy {
    pub max_fail: u8,
    /// Strict sampler tolerance; a skirmish hop must be genuinely safe.
    pub phase_emergency: u32,
}

/// The full escape policy table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPolicy {
    /// Added to threshold numerators when the player opted into risky play.
    pub risky_bonus: u32,
    /// Successful escapes within this many ticks of entering an
    /// anti-summon corridor reset the corridor timer.
    pub antisummon_window: u64,
    /// Depth of the final boss's sea of runes.
    pub boss_depth: u32,
    /// Minimum HP percentage to hold the sea of runes instead of fleeing.
    pub boss_hold_hp_percent: u32,
    /// Adjacent ward glyphs that make the position worth holding.
    pub boss_hold_glyphs: u32,
    pub critical: CriticalPolicy,
    pub last_stand: LastStandPolicy,
    pub moderate: ModeratePolicy,
    pub elevated: ElevatedPolicy,
    pub compromised: CompromisedPolicy,
    pub novice: NovicePolicy,
    pub mana_out: ManaOutPolicy,
    pub skirmish: SkirmishPolicy,
}

impl TierPolicy {
    pub const DEFAULT: Self = Self {
        risky_bonus: 3,
        antisummon_window: 50,
        boss_depth: 100,
        boss_hold_hp_percent: 50,
        boss_hold_glyphs: 3,
        critical: CriticalPolicy {
            threshold: TierThreshold::new(15, 30),
            endgame: Ratio10(45),
            endgame_depth: 95,
            max_fail: 25,
            retry_max_fail: 65,
            teleport_emergency: 75,
        },
        last_stand: LastStandPolicy {
            hp_percent: 15,
            max_level: 20,
            threshold: TierThreshold::new(10, 10),
            forced_fail: 85,
            low_sp_percent: 10,
        },
        moderate: ModeratePolicy {
            threshold: TierThreshold::new(3, 13),
            max_fail: 25,
            teleport_emergency: 50,
            phase_emergency: 20,
        },
        elevated: ElevatedPolicy {
            threshold: TierThreshold::new(10, 13),
            max_fail: 35,
            loose_fail: 65,
            teleport_emergency: 50,
            phase_emergency: 20,
            loose_phase_emergency: 40,
        },
        compromised: CompromisedPolicy {
            threshold: TierThreshold::new(8, 12),
            max_level: 15,
            hp_percent: 25,
            max_fail: 35,
            teleport_emergency: 40,
            phase_emergency: 20,
            caster_level: 10,
        },
        novice: NovicePolicy {
            threshold: TierThreshold::new(7, 10),
            max_level: 10,
            max_fail: 35,
            teleport_emergency: 40,
            phase_emergency: 20,
            caster_level: 5,
        },
        mana_out: ManaOutPolicy {
            threshold: TierThreshold::new(5, 10),
            sp_percent: 10,
            min_max_sp: 100,
            max_fail: 25,
            teleport_emergency: 30,
            phase_emergency: 20,
        },
        skirmish: SkirmishPolicy {
            max_fail: 25,
            phase_emergency: 10,
        },
    };

    /// The numerator bonus in effect for the given risk appetite.
    pub const fn bonus(&self, risky_play: bool) -> u32 {
        if risky_play { self.risky_bonus } else { 0 }
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
