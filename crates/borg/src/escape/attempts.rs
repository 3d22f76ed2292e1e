//! Ordered escape attempt lists.
//!
//! Each builder returns a [`Cascade`] over [`BorgContext`] whose entries
//! delegate to exactly one capability call. Ordering encodes preference:
//! renewable resources (spells) before consumables (scrolls), checked
//! device uses before forced ones, and leaving the level dead last.

use cascade::{Cascade, Guard, Try};

use crate::capability::{ActivationKind, RodKind, ScrollKind, SpellKind, StaffKind};
use crate::context::BorgContext;
use crate::tactics::try_dimension_door;
use borg_world::AgentStatus;

/// Reads a scroll unless confusion makes reading impossible.
fn read_scroll(ctx: &mut BorgContext<'_>, scroll: ScrollKind) -> bool {
    if ctx.agent.has_status(AgentStatus::CONFUSED) {
        return false;
    }
    ctx.caps.read_scroll(scroll)
}

/// Long-range jump cascade: controlled jump first, then spells in rising
/// SP cost, then consumables and devices.
///
/// `allow_random_jump` is the caller's verdict from the landing sampler:
/// when `false`, the uncontrolled jumps are withheld. Dimension door (its
/// target is chosen, with its own improvement gate) and the level exits
/// (no landing on this level at all) are unaffected by it.
///
/// When `include_level_exit` is set, level-abandoning actions (teleport
/// level, deep descent) are appended at the very end, gated on the agent
/// not already riding a recall; an imminent recall makes leaving the
/// level by other means a waste.
pub fn teleport_cascade<'a>(
    max_fail: u8,
    include_level_exit: bool,
    allow_random_jump: bool,
) -> Cascade<'a, BorgContext<'a>> {
    let mut cascade = Cascade::new().push("dimension door", move |ctx: &mut BorgContext| {
        try_dimension_door(ctx, max_fail)
    });

    if allow_random_jump {
        cascade = cascade
            .push("teleport spell", move |ctx: &mut BorgContext| {
                ctx.caps.cast_spell(SpellKind::Teleport, max_fail)
            })
            .push("portal spell", move |ctx: &mut BorgContext| {
                ctx.caps.cast_spell(SpellKind::Portal, max_fail)
            })
            .push("shadow shift", move |ctx: &mut BorgContext| {
                ctx.caps.cast_spell(SpellKind::ShadowShift, max_fail)
            })
            .push("teleport scroll", |ctx: &mut BorgContext| {
                read_scroll(ctx, ScrollKind::Teleport)
            })
            .push("teleport staff", |ctx: &mut BorgContext| {
                ctx.caps.use_staff(StaffKind::Teleportation)
            })
            .push("teleport staff (forced)", |ctx: &mut BorgContext| {
                ctx.caps.use_staff_unchecked(StaffKind::Teleportation)
            })
            .push("rod of escaping", |ctx: &mut BorgContext| {
                ctx.caps.zap_rod(RodKind::Escaping)
            })
            .push("teleport activation", |ctx: &mut BorgContext| {
                ctx.caps.activate(ActivationKind::Teleport)
            });
    }

    if include_level_exit {
        let not_recalling = |ctx: &BorgContext| !ctx.agent.goal.recalling;
        cascade = cascade
            .then(Box::new(Guard::new(
                not_recalling,
                Box::new(Try::new("teleport level spell", move |ctx: &mut BorgContext| {
                    ctx.caps.cast_spell(SpellKind::TeleportLevel, max_fail)
                })),
            )))
            .then(Box::new(Guard::new(
                not_recalling,
                Box::new(Try::new("teleport level scroll", |ctx: &mut BorgContext| {
                    read_scroll(ctx, ScrollKind::TeleportLevel)
                })),
            )))
            .then(Box::new(Guard::new(
                not_recalling,
                Box::new(Try::new("deep descent scroll", |ctx: &mut BorgContext| {
                    read_scroll(ctx, ScrollKind::DeepDescent)
                })),
            )));
    }

    cascade
}

/// Short-range jump cascade.
pub fn phase_cascade<'a>(max_fail: u8) -> Cascade<'a, BorgContext<'a>> {
    Cascade::new()
        .push("phase door spell", move |ctx: &mut BorgContext| {
            ctx.caps.cast_spell(SpellKind::PhaseDoor, max_fail)
        })
        .push("phase door scroll", |ctx: &mut BorgContext| {
            read_scroll(ctx, ScrollKind::PhaseDoor)
        })
        .push("phase door activation", |ctx: &mut BorgContext| {
            ctx.caps.activate(ActivationKind::PhaseDoor)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TurnGlobals;
    use crate::testutil::{FlatDanger, NoMonsters, OpenMap, ScriptedCaps};
    use borg_world::{AgentState, MapDimensions, Position, ResourceMeter, WorldEnv};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    struct Fixture {
        map: OpenMap,
        monsters: NoMonsters,
        oracle: FlatDanger,
        caps: ScriptedCaps,
        rng: SmallRng,
        agent: AgentState,
        globals: TurnGlobals,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                map: OpenMap(MapDimensions::new(64, 64)),
                monsters: NoMonsters,
                oracle: FlatDanger(0),
                caps: ScriptedCaps::default(),
                rng: SmallRng::seed_from_u64(1),
                agent: AgentState {
                    hp: ResourceMeter::new(50, 50),
                    position: Position::new(30, 30),
                    ..AgentState::default()
                },
                globals: TurnGlobals::default(),
            }
        }

        fn ctx(&mut self) -> BorgContext<'_> {
            BorgContext::new(
                &mut self.agent,
                WorldEnv::with_all(&self.map, &self.monsters, &self.oracle),
                &mut self.caps,
                &mut self.rng,
                self.globals,
            )
            .unwrap()
        }
    }

    #[test]
    fn scroll_wins_when_spells_are_out() {
        let mut fx = Fixture::new();
        fx.caps.scrolls.insert(ScrollKind::Teleport);
        let winner = teleport_cascade(25, false, true).run(&mut fx.ctx());
        assert_eq!(winner, Some("teleport scroll"));
        assert_eq!(fx.caps.log, vec!["read_scroll Teleport"]);
    }

    #[test]
    fn confusion_blocks_scrolls_but_not_devices() {
        let mut fx = Fixture::new();
        fx.caps.scrolls.insert(ScrollKind::Teleport);
        fx.caps.staffs.insert(StaffKind::Teleportation);
        fx.agent.status |= AgentStatus::CONFUSED;
        let winner = teleport_cascade(25, false, true).run(&mut fx.ctx());
        assert_eq!(winner, Some("teleport staff"));
    }

    #[test]
    fn devices_pick_up_when_the_books_run_dry() {
        let mut fx = Fixture::new();
        fx.caps.rods.insert(RodKind::Escaping);
        assert_eq!(
            teleport_cascade(25, false, true).run(&mut fx.ctx()),
            Some("rod of escaping")
        );

        fx.caps.rods.clear();
        fx.caps.activations.insert(ActivationKind::Teleport);
        assert_eq!(
            teleport_cascade(25, false, true).run(&mut fx.ctx()),
            Some("teleport activation")
        );
        assert_eq!(fx.caps.log, vec!["zap_rod Escaping", "activate Teleport"]);
    }

    #[test]
    fn withholding_random_jumps_spares_controlled_entries() {
        // With the sampler verdict negative, the uncontrolled jumps are
        // absent, but leaving the level entirely is still on the table.
        let mut fx = Fixture::new();
        fx.caps.spells.insert(SpellKind::Teleport);
        assert_eq!(teleport_cascade(25, true, false).run(&mut fx.ctx()), None);

        fx.caps.scrolls.insert(ScrollKind::TeleportLevel);
        assert_eq!(
            teleport_cascade(25, true, false).run(&mut fx.ctx()),
            Some("teleport level scroll")
        );
        assert_eq!(
            teleport_cascade(25, false, true).run(&mut fx.ctx()),
            Some("teleport spell")
        );
    }

    #[test]
    fn level_exit_entries_only_appear_when_requested() {
        let mut fx = Fixture::new();
        fx.caps.scrolls.insert(ScrollKind::TeleportLevel);
        assert_eq!(teleport_cascade(25, false, true).run(&mut fx.ctx()), None);
        assert_eq!(
            teleport_cascade(25, true, true).run(&mut fx.ctx()),
            Some("teleport level scroll")
        );
    }

    #[test]
    fn recall_in_flight_suppresses_level_exits() {
        let mut fx = Fixture::new();
        fx.caps.scrolls.insert(ScrollKind::TeleportLevel);
        fx.agent.goal.recalling = true;
        let winner = teleport_cascade(25, true, true).run(&mut fx.ctx());
        assert_eq!(winner, None);
    }

    #[test]
    fn phase_cascade_prefers_the_spell() {
        let mut fx = Fixture::new();
        fx.caps.spells.insert(SpellKind::PhaseDoor);
        fx.caps.scrolls.insert(ScrollKind::PhaseDoor);
        let winner = phase_cascade(25).run(&mut fx.ctx());
        assert_eq!(winner, Some("phase door spell"));
    }
}
