//! Decision context for one escape evaluation.
//!
//! [`BorgContext`] is the explicit mutable context threaded through the
//! subsystem in place of process-wide globals: every function receives it
//! by reference, which preserves the single-writer semantics of the
//! one-agent, one-thread model while keeping the state injectable for
//! tests.

use borg_world::{
    AgentState, DangerOracle, MapOracle, MonsterOracle, OracleError, Position, TileKind, WorldEnv,
};
use rand::rngs::SmallRng;

use crate::capability::Capabilities;

/// Read-only per-turn globals maintained by the surrounding engine.
///
/// These are recomputed by the engine before each decision step; the core
/// never writes them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnGlobals {
    /// Baseline threat the agent is willing to tolerate. Tier thresholds
    /// are multiples of this value.
    pub avoidance: u32,
    /// Number of unique monsters currently engaged.
    pub fighting_unique: u32,
    /// The engaged unique outclasses the agent's character level, which
    /// suppresses the give-up-on-the-level flags.
    pub unique_threat: bool,
    /// A vault is present on this level; abandoning it is a waste.
    pub vault_on_level: bool,
    /// Player opted into riskier play; tier thresholds loosen.
    pub risky_play: bool,
    /// Marked position of the final boss, when on its level.
    pub boss_position: Option<Position>,
}

/// Mutable blackboard threaded through the escape subsystem.
///
/// Bundles the agent record, the read-only world oracles, the capability
/// surface, the injected RNG, and the per-turn globals. Constructed fresh
/// each decision step; nothing in it outlives the turn.
pub struct BorgContext<'a> {
    pub agent: &'a mut AgentState,
    map: &'a dyn MapOracle,
    monsters: &'a dyn MonsterOracle,
    danger: &'a dyn DangerOracle,
    pub caps: &'a mut dyn Capabilities,
    /// Seedable RNG for the Monte Carlo landing samplers. Injected so the
    /// samplers are deterministic under a fixed seed.
    pub rng: &'a mut SmallRng,
    pub globals: TurnGlobals,
}

impl<'a> BorgContext<'a> {
    /// Builds a context from a [`WorldEnv`], validating up front that all
    /// three oracles are present.
    ///
    /// # Errors
    ///
    /// Returns the [`OracleError`] for the first missing oracle.
    pub fn new(
        agent: &'a mut AgentState,
        env: WorldEnv<'a>,
        caps: &'a mut dyn Capabilities,
        rng: &'a mut SmallRng,
        globals: TurnGlobals,
    ) -> Result<Self, OracleError> {
        Ok(Self {
            agent,
            map: env.map()?,
            monsters: env.monsters()?,
            danger: env.danger()?,
            caps,
            rng,
            globals,
        })
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn monsters(&self) -> &'a dyn MonsterOracle {
        self.monsters
    }

    pub fn danger_oracle(&self) -> &'a dyn DangerOracle {
        self.danger
    }

    // ========================================================================
    // Query helpers
    // ========================================================================

    /// Danger at a position over `turns` turns, assuming monsters can see
    /// and are aware of the agent there.
    pub fn danger_at(&self, position: Position, turns: u32) -> u32 {
        self.danger.danger(position, turns, true, true)
    }

    /// Number of ward glyphs on the eight neighboring tiles.
    pub fn adjacent_glyphs(&self) -> u32 {
        self.agent
            .position
            .neighbors()
            .filter(|&p| matches!(self.map.tile(p).kind, TileKind::Glyph))
            .count() as u32
    }

    /// True when the agent is standing on a staircase.
    pub fn on_stairs(&self) -> bool {
        self.map.tile(self.agent.position).is_stairs()
    }
}
