//! Encirclement risk estimator.

use arrayvec::ArrayVec;
use borg_world::Position;

use crate::context::BorgContext;

/// Radius within which monsters count toward encirclement.
const SURROUND_RADIUS: i32 = 3;

/// Decides whether the agent risks being encircled with no retreat.
///
/// Counts awake, visible, non-wall-passing monsters within Chebyshev
/// distance 3 against the number of neighboring tiles the agent could
/// still step to. Wall-passers are excluded: counting escape grids cannot
/// block something that walks through the walls anyway.
///
/// One deliberate exception: exactly one open grid with exactly one
/// adjacent monster is a defensible corridor chokepoint, not a trap.
///
/// Advisory only — no side effects beyond a log line.
pub fn is_surrounded(ctx: &BorgContext<'_>) -> bool {
    if ctx.agent.goal.ignoring {
        return false;
    }

    let me = ctx.agent.position;
    let mut monsters = 0u32;
    let mut adjacent_monsters = 0u32;

    for monster in ctx.monsters().tracked_monsters() {
        if !monster.awake || monster.passes_walls {
            continue;
        }
        let distance = me.chebyshev(monster.position);
        if distance > SURROUND_RADIUS {
            continue;
        }
        if !ctx.map().line_of_sight(me, monster.position) {
            continue;
        }
        monsters += 1;
        if distance == 1 {
            adjacent_monsters += 1;
        }
    }

    if monsters == 0 {
        return false;
    }

    let open: ArrayVec<Position, 8> = me
        .neighbors()
        .filter(|&p| ctx.map().tile(p).is_safe_step())
        .collect();
    let safe_grids = open.len() as u32;

    // A single corridor mouth held against a single attacker is the best
    // place to be, not a reason to burn an escape.
    if safe_grids == 1 && adjacent_monsters == 1 {
        tracing::debug!(monsters, "holding a corridor chokepoint, not surrounded");
        return false;
    }

    if monsters > safe_grids {
        tracing::debug!(monsters, safe_grids, "surround risk detected");
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TurnGlobals;
    use crate::testutil::{AllCaps, FlatDanger, GridMap, Monsters};
    use borg_world::{AgentState, MonsterView, ResourceMeter, TileKind, TileView, WorldEnv};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn check(map: &GridMap, monsters: Vec<MonsterView>, ignoring: bool) -> bool {
        let monsters = Monsters(monsters);
        let oracle = FlatDanger(0);
        let mut caps = AllCaps;
        let mut rng = SmallRng::seed_from_u64(1);
        let mut agent = AgentState {
            hp: ResourceMeter::new(50, 50),
            position: Position::new(10, 10),
            ..AgentState::default()
        };
        agent.goal.ignoring = ignoring;
        let ctx = BorgContext::new(
            &mut agent,
            WorldEnv::with_all(map, &monsters, &oracle),
            &mut caps,
            &mut rng,
            TurnGlobals::default(),
        )
        .unwrap();
        is_surrounded(&ctx)
    }

    /// Walls everywhere around (10,10) except the listed open neighbors.
    fn pocket(open: &[Position]) -> GridMap {
        let mut map = GridMap::open(40, 40);
        for p in Position::new(10, 10).neighbors() {
            if !open.contains(&p) {
                map.set(p, TileView::new(TileKind::Wall));
            }
        }
        map
    }

    #[test]
    fn open_floor_with_one_monster_is_fine() {
        let map = GridMap::open(40, 40);
        let pack = vec![MonsterView::at(Position::new(11, 10))];
        assert!(!check(&map, pack, false));
    }

    #[test]
    fn more_monsters_than_exits_is_surrounded() {
        // Two open grids, three monsters in range.
        let map = pocket(&[Position::new(11, 10), Position::new(9, 10)]);
        let pack = vec![
            MonsterView::at(Position::new(11, 10)),
            MonsterView::at(Position::new(12, 10)),
            MonsterView::at(Position::new(10, 12)),
        ];
        assert!(check(&map, pack, false));
    }

    #[test]
    fn growing_the_pack_never_clears_the_flag() {
        // Once monsters > safe grids (outside the chokepoint case), adding
        // more monsters keeps it surrounded.
        let map = pocket(&[Position::new(11, 10), Position::new(9, 10)]);
        let mut pack = vec![
            MonsterView::at(Position::new(11, 10)),
            MonsterView::at(Position::new(12, 10)),
            MonsterView::at(Position::new(10, 12)),
        ];
        for extra in 0..4 {
            pack.push(MonsterView::at(Position::new(12, 12 - extra)));
            assert!(check(&map, pack.clone(), false));
        }
    }

    #[test]
    fn single_corridor_chokepoint_is_defensible() {
        // One open grid, one adjacent monster: hold the line.
        let map = pocket(&[Position::new(11, 10)]);
        let pack = vec![MonsterView::at(Position::new(11, 10))];
        assert!(!check(&map, pack, false));
    }

    #[test]
    fn asleep_and_wall_passing_monsters_do_not_count() {
        let map = pocket(&[Position::new(11, 10)]);
        let pack = vec![
            MonsterView::at(Position::new(9, 9)).asleep(),
            MonsterView::at(Position::new(9, 10)).wall_passer(),
            MonsterView::at(Position::new(9, 11)).asleep(),
        ];
        assert!(!check(&map, pack, false));
    }

    #[test]
    fn ignoring_override_suppresses_the_check() {
        let map = pocket(&[Position::new(11, 10), Position::new(9, 10)]);
        let pack = vec![
            MonsterView::at(Position::new(11, 10)),
            MonsterView::at(Position::new(12, 10)),
            MonsterView::at(Position::new(10, 12)),
        ];
        assert!(check(&map, pack.clone(), false));
        assert!(!check(&map, pack, true));
    }
}
