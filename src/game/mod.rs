//! Deterministic forward model of the duel: robot and projectile
//! snapshots, the one-tick transition function and the heuristic policy
//! used to fill in the opponent's move during search.

pub mod instructions;
pub mod policy;
pub mod projectile;
pub mod robot;
pub mod state;

pub use instructions::{InstructionList, Instructions};
pub use projectile::Projectile;
pub use robot::{RobotState, RobotStatus, ScoreLedger};
pub use state::Gamestate;
