//! Monte Carlo landing-safety evaluators for random jumps.
//!
//! Phase door and teleport drop the agent on a tile the game RNG picks;
//! the exact landing cannot be predicted. These evaluators approximate
//! the *probability* of landing somewhere lethal instead: sample candidate
//! landing tiles in the jump's distance annulus, score each against the
//! danger oracle, and compare the count of scary outcomes against a
//! caller-supplied `emergency` tolerance. A truly desperate caller passes
//! a high tolerance and accepts a jump a cautious caller would refuse.
//!
//! The evaluators consume only the injected RNG: they never move the
//! agent or spend a resource, so a repeated call under the same seed and
//! world state returns the same answer.

use borg_world::Position;
use rand::Rng;

use crate::context::BorgContext;

/// Maximum distance of a phase door jump, in tiles.
pub const PHASE_RANGE: i32 = 10;

/// Maximum distance of a full teleport, in tiles.
pub const TELEPORT_RANGE: i32 = 100;

/// Sampled landing trials per evaluation.
const TRIALS: u32 = 100;

/// Placement attempts per trial before the trial counts as scary.
const PLACEMENT_TRIES: u32 = 100;

/// Below this maximum HP, landing on unseen ground is itself scary.
const FRAGILE_MAX_HP: u32 = 30;

/// Turns on one level after which unknown landing tiles become acceptable
/// for a long-range jump. By then the unexplored remainder is small and
/// the agent has bigger problems than the dark.
const LONG_STAY_TURNS: u32 = 2000;

/// Estimates whether a phase door jump is safe enough.
///
/// Returns `false` immediately when no phase ability exists. Otherwise
/// runs the sampler over the phase annulus and reports "safe" when at
/// most `emergency` of the trials came up scary. `turns` is forwarded to
/// the danger oracle (how long the agent expects to sit on the landing
/// tile before acting again).
pub fn caution_phase(ctx: &mut BorgContext<'_>, emergency: u32, turns: u32) -> bool {
    if !ctx.caps.can_phase() {
        return false;
    }
    // Short jumps may land in the dark; that risk is priced per-trial.
    scary_landings(ctx, PHASE_RANGE, turns, true) <= emergency
}

/// Estimates whether a full teleport is safe enough.
///
/// Same sampler as [`caution_phase`] over the teleport annulus, with one
/// easing rule: once the level is fully explored (and warded where it
/// matters) or the agent has been on it a long time, unknown destination
/// tiles become acceptable candidates rather than rejects.
pub fn caution_teleport(ctx: &mut BorgContext<'_>, emergency: u32, turns: u32) -> bool {
    if !ctx.caps.can_teleport() {
        return false;
    }
    let accept_unknown =
        ctx.map().fully_explored() || ctx.agent.time_on_level > LONG_STAY_TURNS;
    scary_landings(ctx, TELEPORT_RANGE, turns, accept_unknown) <= emergency
}

/// Runs the sampling loop and returns how many of the trials were scary.
///
/// Each trial rejection-samples up to [`PLACEMENT_TRIES`] offsets for one
/// at true distance in `[range/2, range]` that lands on an in-bounds,
/// landable tile (unknown tiles count as landable only when
/// `accept_unknown`). A trial is scary when:
///
/// - no valid candidate was found within the placement budget, or
/// - the candidate is unknown terrain and the agent's maximum HP is below
///   [`FRAGILE_MAX_HP`], or
/// - the danger oracle prices the candidate above the agent's current HP.
fn scary_landings(ctx: &mut BorgContext<'_>, range: i32, turns: u32, accept_unknown: bool) -> u32 {
    let origin = ctx.agent.position;
    let hp = ctx.agent.hp.current;
    let fragile = ctx.agent.hp.maximum < FRAGILE_MAX_HP;

    let min_d2 = i64::from(range / 2) * i64::from(range / 2);
    let max_d2 = i64::from(range) * i64::from(range);

    let mut scary = 0u32;
    for _ in 0..TRIALS {
        let mut landing: Option<(Position, bool)> = None;

        for _ in 0..PLACEMENT_TRIES {
            let dx = ctx.rng.gen_range(-range..=range);
            let dy = ctx.rng.gen_range(-range..=range);
            let candidate = origin.offset(dx, dy);

            let d2 = origin.distance_squared(candidate);
            if d2 < min_d2 || d2 > max_d2 {
                continue;
            }
            if !ctx.map().contains(candidate) {
                continue;
            }

            let tile = ctx.map().tile(candidate);
            if tile.is_unknown() {
                if accept_unknown {
                    landing = Some((candidate, true));
                    break;
                }
                continue;
            }
            if !tile.is_landable() {
                continue;
            }
            landing = Some((candidate, false));
            break;
        }

        match landing {
            None => scary += 1,
            Some((_, true)) if fragile => scary += 1,
            Some((candidate, _)) => {
                let danger = ctx
                    .danger_oracle()
                    .danger(candidate, turns, true, true);
                if danger > hp {
                    scary += 1;
                }
            }
        }
    }

    scary
}
