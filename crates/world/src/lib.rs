//! World model and oracle contracts for the borg decision core.
//!
//! `borg-world` defines the types through which the borg observes the game
//! it is playing: grid positions, the mutable [`AgentState`] record, tile
//! and monster views, and the read-only oracle traits ([`MapOracle`],
//! [`MonsterOracle`], [`DangerOracle`]) that the surrounding engine
//! implements. The decision core never talks to the engine directly; it
//! only queries these contracts.
pub mod agent;
pub mod common;
pub mod env;
pub mod monster;
pub mod status;
pub mod tile;

pub use agent::{AgentState, ClassKind, GoalFlags};
pub use common::{Position, ResourceMeter, Tick};
pub use env::{DangerOracle, MapDimensions, MapOracle, MonsterOracle, OracleError, WorldEnv};
pub use monster::MonsterView;
pub use status::AgentStatus;
pub use tile::{TileKind, TileView};
