//! Controlled-teleport target picker.
//!
//! Dimension door is the one jump whose landing the agent chooses. The
//! picker brute-force scans a bounded window around the agent for the
//! tile with the lowest short-horizon danger. Deliberately an exhaustive
//! local optimization, not a pathfinder: the window is small enough to
//! scan every turn.

use borg_world::Position;

use crate::capability::SpellKind;
use crate::context::BorgContext;

/// Half-width of the search window, in tiles.
const DOOR_WINDOW: i32 = 50;

/// Danger horizon used for both the candidates and the current region.
const DOOR_TURNS: u32 = 2;

/// Scans the window for the landing tile with the lowest danger.
///
/// Returns the best position and its danger score, or `None` if the
/// window holds no legal landing tile at all. Ties keep the first
/// candidate in scan order, so the result is deterministic.
pub fn dimension_door_target(ctx: &BorgContext<'_>) -> Option<(Position, u32)> {
    let origin = ctx.agent.position;
    let mut best: Option<(Position, u32)> = None;

    for dy in -DOOR_WINDOW..=DOOR_WINDOW {
        for dx in -DOOR_WINDOW..=DOOR_WINDOW {
            if dx == 0 && dy == 0 {
                continue;
            }
            let candidate = origin.offset(dx, dy);
            if !ctx.map().contains(candidate) {
                continue;
            }
            let tile = ctx.map().tile(candidate);
            if tile.is_unknown() {
                // The spell will not land the agent on ground it has never
                // seen; skip rather than gamble.
                continue;
            }
            if !tile.is_landable() {
                continue;
            }
            let danger = ctx.danger_at(candidate, DOOR_TURNS);
            match best {
                Some((_, best_danger)) if best_danger <= danger => {}
                _ => best = Some((candidate, danger)),
            }
        }
    }

    best
}

/// Casts dimension door at the best window tile if that strictly improves
/// on the danger of the current region.
///
/// Targets the tile and casts on success; declines (without spending
/// anything) when the spell is unknown, no candidate exists, or the best
/// candidate is no better than standing ground.
pub fn try_dimension_door(ctx: &mut BorgContext<'_>, max_fail: u8) -> bool {
    if !ctx.caps.knows_spell(SpellKind::DimensionDoor) {
        return false;
    }

    let here = ctx.danger_at(ctx.agent.position, DOOR_TURNS);
    let Some((target, danger)) = dimension_door_target(ctx) else {
        return false;
    };
    if danger >= here {
        tracing::debug!(danger, here, "dimension door offers no improvement");
        return false;
    }

    if !ctx.caps.set_target(target) {
        return false;
    }
    ctx.caps.cast_spell(SpellKind::DimensionDoor, max_fail)
}
