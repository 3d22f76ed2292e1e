//! Tactical sub-deciders.
//!
//! Leaf-level judgments the escape orchestrator consults before spending a
//! resource: encirclement risk, whether a random jump is likely to land
//! somewhere lethal, and where a controlled jump should aim. The judgments
//! themselves touch no state beyond the injected RNG; only
//! [`try_dimension_door`] goes on to commit a cast once its target check
//! passes.

pub mod door;
pub mod jump;
pub mod surround;

pub use door::{dimension_door_target, try_dimension_door};
pub use jump::{caution_phase, caution_teleport};
pub use surround::is_surrounded;
