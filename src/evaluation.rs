//! Converts simulated snapshots into scalar utilities for the search.
//!
//! The reward is a weighted sum over each robot's score ledger plus an
//! energy term; the engine's comparative utility weighs our score against
//! the opponent's.

use crate::game::robot::RobotState;
use crate::game::state::Gamestate;

/// Weights applied to the score-ledger terms. Configuration constants,
/// not derived quantities.
#[derive(Clone, Debug)]
pub struct ScoreWeights {
    /// Points per point of bullet damage dealt.
    pub bullet_damage: f64,
    /// Points for outliving the opponent.
    pub survival: f64,
    /// Points per movement-quality point.
    pub movement: f64,
    /// Points per heading/gun-direction point.
    pub gun_direction: f64,
    /// Points per attempted shot.
    pub shoot_attempt: f64,
    /// Points per point of remaining energy.
    pub energy: f64,
    /// Weight of our own score in the comparative utility.
    pub player: f64,
    /// Weight of the opponent's score in the comparative utility.
    pub enemy: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            bullet_damage: 1.0,
            survival: 50.0,
            movement: 1.5,
            gun_direction: 0.4,
            shoot_attempt: 0.1,
            energy: 0.05,
            player: 1.0,
            enemy: 0.5,
        }
    }
}

/// Weighted score of a single robot's ledger.
#[must_use]
pub fn robot_score(robot: &RobotState, weights: &ScoreWeights) -> f64 {
    let ledger = &robot.scores;
    ledger.bullet_damage * weights.bullet_damage
        + ledger.survival * weights.survival
        + ledger.movement * weights.movement
        + ledger.gun_direction * weights.gun_direction
        + ledger.shoot_attempt * weights.shoot_attempt
        + robot.energy * weights.energy
}

/// Comparative utility of a snapshot from our perspective.
#[must_use]
pub fn utility(state: &Gamestate, weights: &ScoreWeights) -> f64 {
    robot_score(&state.us, weights) * weights.player
        - robot_score(&state.enemy, weights) * weights.enemy
}
