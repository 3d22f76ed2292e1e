//! The tiered escape orchestrator.
//!
//! [`EscapeDecider::decide`] is the subsystem's top-level entry point,
//! called once per game turn with `b_q`, the caller's danger estimate for
//! the best adjacent square. It walks a sequence of escalating danger
//! brackets; the first bracket whose condition matches tries its ordered
//! attempt list, and the first committed action ends the turn with `true`.
//!
//! Brackets are deliberately NOT mutually exclusive: when a bracket's
//! attempts all decline, control falls through into the next bracket's
//! condition within the same call, possibly after setting the fleeing and
//! leaving flags. A crisis the agent cannot jump out of still escalates.
//!
//! Every "could not / need not escape" outcome is a `false` return; the
//! caller then proceeds to its non-escape logic (fight, walk away, rest).

pub mod attempts;
pub mod policy;

use borg_world::{AgentStatus, ClassKind, Tick, TileKind};

use crate::capability::{Key, PotionKind, ScrollKind, SpellKind};
use crate::context::BorgContext;
use crate::tactics::{caution_phase, caution_teleport, is_surrounded, try_dimension_door};
use attempts::{phase_cascade, teleport_cascade};
use policy::TierPolicy;

/// Danger horizon, in turns, used for every landing-safety evaluation the
/// orchestrator requests.
const ESCAPE_TURNS: u32 = 2;

/// Danger bracket that committed an escape, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Tier {
    /// Imminent death: heavy stun or a danger ratio far past avoidance.
    #[strum(serialize = "1")]
    Critical,
    /// Last stand: top up mana before a forced cast.
    #[strum(serialize = "1.1")]
    LastStandMana,
    /// Last stand: force the big jumps at terrible odds.
    #[strum(serialize = "1.2")]
    LastStandTeleport,
    /// Last stand: emergency phase, safety checks waived.
    #[strum(serialize = "1.3")]
    LastStandPhase,
    /// Moderate danger with teleport resources in hand.
    #[strum(serialize = "2")]
    Moderate,
    /// Elevated danger, heavy stun, or a cornered afraid warrior.
    #[strum(serialize = "3")]
    Elevated,
    /// Tolerable ratio but a compromised character (low level or HP).
    #[strum(serialize = "4")]
    Compromised,
    /// Novice character below level ten.
    #[strum(serialize = "5")]
    Novice,
    /// Big-pool spellcaster running on fumes.
    #[strum(serialize = "6")]
    ManaOut,
    /// Shoot-and-scoot disengage after a ranged exchange.
    #[strum(serialize = "7")]
    Skirmish,
}

/// Top-level escape decision engine.
///
/// Stateless apart from its policy table; all mutable state lives in the
/// [`BorgContext`] passed to [`decide`](Self::decide).
pub struct EscapeDecider {
    policy: TierPolicy,
}

impl EscapeDecider {
    pub fn new(policy: TierPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Decides whether to escape this turn, and does so if warranted.
    ///
    /// Returns `true` exactly when one escape action was committed; the
    /// caller's turn is then over. Returns `false` when no bracket matched
    /// or every attempt in the matching brackets declined.
    pub fn decide(&self, ctx: &mut BorgContext<'_>, b_q: u32) -> bool {
        let p = &self.policy;

        // In town with an ailment a shop can fix, escaping is the wrong
        // tool; let the shopping logic run instead.
        if ctx.agent.in_town() && ctx.agent.status.needs_town_cure() {
            return false;
        }

        // On the final boss's level, a healthy agent standing in its
        // prepared sea of runes holds the position rather than scattering.
        if ctx.agent.depth == p.boss_depth
            && ctx.agent.hp_percent() >= p.boss_hold_hp_percent
        {
            let on_boss_mark = ctx.globals.boss_position == Some(ctx.agent.position);
            if on_boss_mark || ctx.adjacent_glyphs() >= p.boss_hold_glyphs {
                tracing::debug!("holding the sea of runes, refusing to escape");
                return false;
            }
        }

        // Starving just below the town with no stairs known: jumping
        // levels is the only move that can still reach food in time.
        if ctx.agent.has_status(AgentStatus::WEAK)
            && ctx.agent.depth == 1
            && ctx.agent.known_stairs == 0
        {
            let forced = p.last_stand.forced_fail;
            if ctx.caps.cast_spell(SpellKind::TeleportLevel, forced)
                || ctx.caps.read_scroll(ScrollKind::TeleportLevel)
                || ctx.caps.read_scroll(ScrollKind::DeepDescent)
            {
                tracing::info!("starving with no stairs known, jumping levels");
                return true;
            }
            return false;
        }

        let avoidance = ctx.globals.avoidance;
        let bonus = p.bonus(ctx.globals.risky_play);
        let unique = ctx.globals.fighting_unique > 0;
        let heavy_stun = ctx.agent.has_status(AgentStatus::HEAVY_STUNNED);

        // ====================================================================
        // Tier 1: critical
        // ====================================================================

        let critical = heavy_stun
            || if unique && ctx.agent.depth >= p.critical.endgame_depth {
                b_q >= p.critical.endgame.floor(avoidance, bonus)
            } else {
                p.critical.threshold.matches(b_q, avoidance, unique, bonus)
            };

        if critical {
            // Standing on stairs is a free, guaranteed escape.
            if ctx.on_stairs() {
                let key = match ctx.map().tile(ctx.agent.position).kind {
                    TileKind::StairUp => Key::StairsUp,
                    _ => Key::StairsDown,
                };
                if ctx.caps.press(key) {
                    return self.commit(ctx, Tier::Critical, "stairs", false);
                }
            }

            // No landing-safety vetting here: any teleport beats standing
            // in lethal danger, and the level exits do not land on this
            // level at all.
            if let Some(method) = teleport_cascade(p.critical.max_fail, true, true).run(ctx) {
                return self.commit(ctx, Tier::Critical, method, false);
            }
            // Same list again with the fail tolerance loosened: a bad
            // cast beats standing in this.
            if let Some(method) = teleport_cascade(p.critical.retry_max_fail, true, true).run(ctx) {
                return self.commit(ctx, Tier::Critical, method, false);
            }

            // Phase family at the loose tolerance. An evaluator-approved
            // phase in this bracket counts as a full escape, not a hop.
            if caution_phase(ctx, p.critical.teleport_emergency, ESCAPE_TURNS) {
                if let Some(method) = phase_cascade(p.critical.retry_max_fail).run(ctx) {
                    return self.commit(ctx, Tier::Critical, method, false);
                }
            }

            // Desperate phase: safety evaluation skipped outright.
            if let Some(method) = phase_cascade(p.critical.retry_max_fail).run(ctx) {
                return self.commit(ctx, Tier::Critical, method, true);
            }
        }

        // ====================================================================
        // Tiers 1.1-1.3: last stand
        // ====================================================================

        if ctx.agent.hp_percent() <= p.last_stand.hp_percent
            && ctx.agent.level <= p.last_stand.max_level
            && p.last_stand.threshold.matches(b_q, avoidance, unique, bonus)
        {
            if ctx.agent.sp.percent() < p.last_stand.low_sp_percent
                && ctx.caps.has_potion(PotionKind::RestoreMana)
                && ctx.caps.quaff(PotionKind::RestoreMana)
            {
                return self.commit(ctx, Tier::LastStandMana, "restore mana", false);
            }

            let forced = p.last_stand.forced_fail;
            if try_dimension_door(ctx, forced) {
                return self.commit(ctx, Tier::LastStandTeleport, "dimension door", false);
            }
            for (spell, method) in [
                (SpellKind::Teleport, "teleport spell"),
                (SpellKind::Portal, "portal spell"),
                (SpellKind::ShadowShift, "shadow shift"),
            ] {
                if ctx.caps.cast_spell(spell, forced) {
                    return self.commit(ctx, Tier::LastStandTeleport, method, false);
                }
            }

            if let Some(method) = phase_cascade(forced).run(ctx) {
                return self.commit(ctx, Tier::LastStandPhase, method, true);
            }
        }

        // ====================================================================
        // Tier 2: moderate, teleport in hand
        // ====================================================================

        if ctx.caps.can_teleport()
            && p.moderate.threshold.matches(b_q, avoidance, unique, bonus)
        {
            let jump_ok = caution_teleport(ctx, p.moderate.teleport_emergency, ESCAPE_TURNS);
            if let Some(method) = teleport_cascade(p.moderate.max_fail, false, jump_ok).run(ctx) {
                return self.commit(ctx, Tier::Moderate, method, false);
            }
            if caution_phase(ctx, p.moderate.phase_emergency, ESCAPE_TURNS) {
                if let Some(method) = phase_cascade(p.moderate.max_fail).run(ctx) {
                    return self.commit(ctx, Tier::Moderate, method, true);
                }
            }
        }

        // ====================================================================
        // Tier 3: elevated
        // ====================================================================

        let fear_locked = ctx.agent.has_status(AgentStatus::AFRAID)
            && !ctx.agent.has_missile
            && ctx.agent.class == ClassKind::Warrior;

        if heavy_stun
            || fear_locked
            || p.elevated.threshold.matches(b_q, avoidance, unique, bonus)
        {
            if caution_phase(ctx, p.elevated.phase_emergency, ESCAPE_TURNS) {
                if let Some(method) = phase_cascade(p.elevated.max_fail).run(ctx) {
                    return self.commit(ctx, Tier::Elevated, method, true);
                }
            }
            let jump_ok = caution_teleport(ctx, p.elevated.teleport_emergency, ESCAPE_TURNS);
            if let Some(method) = teleport_cascade(p.elevated.max_fail, true, jump_ok).run(ctx) {
                return self.commit(ctx, Tier::Elevated, method, false);
            }
            if caution_phase(ctx, p.elevated.loose_phase_emergency, ESCAPE_TURNS) {
                if let Some(method) = phase_cascade(p.elevated.loose_fail).run(ctx) {
                    return self.commit(ctx, Tier::Elevated, method, true);
                }
            }
            self.give_up_on_level(ctx);
        }

        // ====================================================================
        // Tier 4: compromised character
        // ====================================================================

        if (ctx.agent.level < p.compromised.max_level
            || ctx.agent.hp_percent() < p.compromised.hp_percent)
            && p.compromised.threshold.matches(b_q, avoidance, unique, bonus)
        {
            if caution_phase(ctx, p.compromised.phase_emergency, ESCAPE_TURNS) {
                if let Some(method) = phase_cascade(p.compromised.max_fail).run(ctx) {
                    return self.commit(ctx, Tier::Compromised, method, true);
                }
            }
            let jump_ok = caution_teleport(ctx, p.compromised.teleport_emergency, ESCAPE_TURNS);
            if let Some(method) = teleport_cascade(p.compromised.max_fail, false, jump_ok).run(ctx) {
                return self.commit(ctx, Tier::Compromised, method, false);
            }
            self.give_up_on_level(ctx);

            // Low-level book casters get one unchecked phase: their whole
            // escape kit is that one spell.
            if ctx.agent.class.is_book_caster() && ctx.agent.level <= p.compromised.caster_level {
                if let Some(method) = phase_cascade(p.compromised.max_fail).run(ctx) {
                    return self.commit(ctx, Tier::Compromised, method, true);
                }
            }
        }

        // ====================================================================
        // Tier 5: novice
        // ====================================================================

        if ctx.agent.level < p.novice.max_level
            && p.novice.threshold.matches(b_q, avoidance, unique, bonus)
        {
            if caution_phase(ctx, p.novice.phase_emergency, ESCAPE_TURNS) {
                if let Some(method) = phase_cascade(p.novice.max_fail).run(ctx) {
                    return self.commit(ctx, Tier::Novice, method, true);
                }
            }
            let jump_ok = caution_teleport(ctx, p.novice.teleport_emergency, ESCAPE_TURNS);
            if let Some(method) = teleport_cascade(p.novice.max_fail, false, jump_ok).run(ctx) {
                return self.commit(ctx, Tier::Novice, method, false);
            }
            self.give_up_on_level(ctx);

            if ctx.agent.class.is_spellcaster() && ctx.agent.level <= p.novice.caster_level {
                if let Some(method) = phase_cascade(p.novice.max_fail).run(ctx) {
                    return self.commit(ctx, Tier::Novice, method, true);
                }
            }
        }

        // ====================================================================
        // Tier 6: spell points exhausted
        // ====================================================================

        if ctx.agent.class.is_spellcaster()
            && ctx.agent.sp.maximum >= p.mana_out.min_max_sp
            && ctx.agent.sp.percent() <= p.mana_out.sp_percent
            && p.mana_out.threshold.matches(b_q, avoidance, unique, bonus)
        {
            if caution_phase(ctx, p.mana_out.phase_emergency, ESCAPE_TURNS) {
                if let Some(method) = phase_cascade(p.mana_out.max_fail).run(ctx) {
                    return self.commit(ctx, Tier::ManaOut, method, true);
                }
            }
            let jump_ok = caution_teleport(ctx, p.mana_out.teleport_emergency, ESCAPE_TURNS);
            if let Some(method) = teleport_cascade(p.mana_out.max_fail, false, jump_ok).run(ctx) {
                return self.commit(ctx, Tier::ManaOut, method, false);
            }
        }

        // ====================================================================
        // Tier 7: shoot and scoot
        // ====================================================================

        if (ctx.caps.knows_spell(SpellKind::PhaseDoor)
            || ctx.caps.knows_spell(SpellKind::Portal))
            && self.skirmish_viable(ctx)
        {
            for (spell, method) in [
                (SpellKind::PhaseDoor, "phase door spell"),
                (SpellKind::Portal, "portal spell"),
            ] {
                if ctx.caps.cast_spell(spell, p.skirmish.max_fail) {
                    return self.commit(ctx, Tier::Skirmish, method, true);
                }
            }
        }

        false
    }

    /// True when breaking off a ranged exchange with a short hop is both
    /// useful and safe: the agent shoots, something is closing in but not
    /// yet adjacent, no encirclement is forming, and the phase annulus
    /// passes a strict safety check.
    fn skirmish_viable(&self, ctx: &mut BorgContext<'_>) -> bool {
        if !ctx.agent.has_missile || is_surrounded(ctx) {
            return false;
        }
        let me = ctx.agent.position;
        let mut advancing = false;
        for monster in ctx.monsters().tracked_monsters() {
            if !monster.awake || !ctx.map().line_of_sight(me, monster.position) {
                continue;
            }
            let distance = me.chebyshev(monster.position);
            if distance == 1 {
                // Already in melee; tier 7 is not a melee answer.
                return false;
            }
            advancing = true;
        }
        advancing && caution_phase(ctx, self.policy.skirmish.phase_emergency, ESCAPE_TURNS)
    }

    /// Marks the level as lost: flee on foot and leave when practical.
    ///
    /// Suppressed while an outclassing unique is engaged or a vault is on
    /// the level. Set-once: flags are never cleared here.
    fn give_up_on_level(&self, ctx: &mut BorgContext<'_>) {
        if ctx.globals.unique_threat || ctx.globals.vault_on_level {
            return;
        }
        if !ctx.agent.goal.fleeing {
            tracing::debug!("escapes exhausted, fleeing the level on foot");
        }
        ctx.agent.goal.fleeing = true;
        ctx.agent.goal.leaving = true;
    }

    /// Records a committed escape and applies its shared side effects.
    ///
    /// Always returns `true` so tier bodies can `return self.commit(..)`.
    fn commit(&self, ctx: &mut BorgContext<'_>, tier: Tier, method: &str, phase_only: bool) -> bool {
        tracing::info!("danger level {tier}: escaping via {method}");

        // A jump out of a freshly entered anti-summon corridor clears the
        // corridor timer; the panic that put the agent there is over.
        if ctx.agent.antisummon_at > Tick::ZERO
            && ctx.agent.turn.since(ctx.agent.antisummon_at) < self.policy.antisummon_window
        {
            ctx.agent.antisummon_at = Tick::ZERO;
        }

        if phase_only {
            // Phase hops do not count against the full-escape budget.
            ctx.agent.escapes -= 1;
        }

        true
    }
}

impl Default for EscapeDecider {
    fn default() -> Self {
        Self::new(TierPolicy::DEFAULT)
    }
}
