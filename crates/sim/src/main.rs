//! Headless harness that runs the escape core on a scripted level.
//!
//! Spawns a pack of monsters that close on the agent turn by turn, hands
//! the decision core a danger estimate each turn, and applies whatever
//! escape it commits. Useful for watching the tier cascade behave under a
//! policy table without a game attached:
//!
//! ```bash
//! RUST_LOG=debug cargo run -p borg-sim -- --turns 60 --seed 3
//! cargo run -p borg-sim -- --policy reckless.ron
//! ```

mod caps;
mod level;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use borg::{BorgContext, EscapeDecider, TierPolicy, TurnGlobals};
use borg_world::{
    AgentState, ClassKind, DangerOracle, MapOracle, MonsterView, Position, ResourceMeter, Tick,
    WorldEnv,
};

use caps::{Effect, SimCaps};
use level::{DemoMap, Pack, ThreatField};

/// Headless harness for the borg escape core.
#[derive(Parser)]
#[command(name = "borg-sim", version, about)]
struct Cli {
    /// Turns to simulate.
    #[arg(long, default_value_t = 60)]
    turns: u32,

    /// Seed for the landing samplers and the sim's own rolls.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Depth the scripted level pretends to be at.
    #[arg(long, default_value_t = 20)]
    depth: u32,

    /// RON file overriding the default tier policy table.
    #[arg(long)]
    policy: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let policy = match &cli.policy {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading policy table {}", path.display()))?;
            ron::from_str(&text)
                .with_context(|| format!("parsing policy table {}", path.display()))?
        }
        None => TierPolicy::DEFAULT,
    };

    run(&cli, policy)
}

fn run(cli: &Cli, policy: TierPolicy) -> Result<()> {
    let map = DemoMap::new();
    let mut rng = SmallRng::seed_from_u64(cli.seed);
    let decider = EscapeDecider::new(policy);
    let mut caps = SimCaps::mage_loadout();

    let mut agent = AgentState {
        hp: ResourceMeter::full(120),
        sp: ResourceMeter::new(caps.sp, caps.max_sp),
        level: 25,
        depth: cli.depth,
        class: ClassKind::Mage,
        position: Position::new(10, 10),
        turn: Tick::new(1),
        known_stairs: 1,
        ..AgentState::default()
    };

    // A pack approaching from the east, plus one sleeper.
    let mut monsters = vec![
        MonsterView::at(Position::new(24, 10)),
        MonsterView::at(Position::new(26, 12)),
        MonsterView::at(Position::new(25, 8)),
        MonsterView::at(Position::new(40, 30)).asleep(),
    ];

    for _ in 0..cli.turns {
        let field = ThreatField::new(&monsters);
        let pack = Pack(monsters.clone());
        let b_q = field.danger(agent.position, 2, true, true);
        let globals = TurnGlobals {
            // The classic baseline: tolerate up to current HP worth of danger.
            avoidance: agent.hp.current,
            ..TurnGlobals::default()
        };

        agent.sp = ResourceMeter::new(caps.sp, caps.max_sp);
        let escaped = {
            let mut ctx = BorgContext::new(
                &mut agent,
                WorldEnv::with_all(&map, &pack, &field),
                &mut caps,
                &mut rng,
                globals,
            )?;
            decider.decide(&mut ctx, b_q)
        };

        if escaped {
            match caps.take_effect() {
                Some(Effect::Hop) => {
                    agent.position = random_landing(&mut rng, &map, agent.position, 10);
                }
                Some(Effect::Jump) => {
                    agent.position = random_landing(&mut rng, &map, agent.position, 100);
                }
                Some(Effect::Blink(target)) => agent.position = target,
                Some(Effect::LevelExit) | Some(Effect::Stairs) => {
                    tracing::info!(turn = %agent.turn, "left the level");
                    return Ok(());
                }
                Some(Effect::Still) | None => {}
            }
            tracing::info!(turn = %agent.turn, position = %agent.position, b_q, "escaped");
        } else {
            tracing::debug!(turn = %agent.turn, b_q, hp = agent.hp.current, "standing ground");
        }

        // Adjacent monsters get their hits in, then the pack closes.
        let hits = monsters
            .iter()
            .filter(|m| m.awake && m.position.chebyshev(agent.position) == 1)
            .count() as u32;
        agent.hp.current = agent.hp.current.saturating_sub(7 * hits);
        if agent.hp.current == 0 {
            tracing::warn!(turn = %agent.turn, "agent died");
            return Ok(());
        }

        for monster in &mut monsters {
            if monster.awake {
                monster.position = step_toward(&map, monster.position, agent.position);
            }
        }

        agent.turn = agent.turn + 1;
        agent.time_on_level += 1;
    }

    tracing::info!(
        hp = agent.hp.current,
        escapes = agent.escapes,
        fleeing = agent.goal.fleeing,
        "simulation finished"
    );
    Ok(())
}

/// Picks a random landable tile within `range`, staying put if the roll
/// budget runs out.
fn random_landing(rng: &mut SmallRng, map: &DemoMap, origin: Position, range: i32) -> Position {
    for _ in 0..100 {
        let candidate = origin.offset(rng.gen_range(-range..=range), rng.gen_range(-range..=range));
        if map.tile(candidate).is_landable() {
            return candidate;
        }
    }
    origin
}

/// One greedy king-move toward the target, standing still when blocked.
fn step_toward(map: &DemoMap, from: Position, toward: Position) -> Position {
    let step = Position::new(
        from.x + (toward.x - from.x).signum(),
        from.y + (toward.y - from.y).signum(),
    );
    if step != toward && map.tile(step).is_safe_step() {
        step
    } else {
        from
    }
}
