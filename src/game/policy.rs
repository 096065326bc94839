//! Heuristic opponent policy.
//!
//! Fills in the non-searched side of the duel during expansion and
//! playout. Deliberately a pure function of the snapshot: calling it
//! twice on the same `Gamestate` yields the same instructions, so search
//! results depend only on the driver's own random source.

use crate::config::{BattleConfig, MAX_GUN_ROTATION, MAX_RADAR_ROTATION, MAX_VELOCITY};
use crate::game::instructions::{Instructions, CATALOG_FIRE_POWER};
use crate::game::robot::RobotStatus;
use crate::game::state::Gamestate;
use crate::geometry;

/// Aim error below which the gun snaps onto the target and may fire.
const AIM_TOLERANCE: f64 = 5.0;

/// Aim error below which the turn requests the exact remaining delta.
const EXACT_TURN_BAND: f64 = 20.0;

/// Picks the enemy's instructions for the next tick.
#[must_use]
pub fn enemy_instructions(state: &Gamestate, config: &BattleConfig) -> Instructions {
    let enemy = &state.enemy;
    if enemy.status != RobotStatus::Healthy {
        return Instructions::hold();
    }

    let velocity_change = if threatened(state, config, enemy.velocity) {
        dodge(state, config)
    } else {
        perturbation(enemy.velocity, enemy.x, enemy.y)
    };

    let target = geometry::xy_to_degree(state.us.x, state.us.y, enemy.x, enemy.y);
    let gun_delta = geometry::angle_delta(enemy.gun_heading, target);
    let radar_delta = geometry::angle_delta(enemy.radar_heading, target);

    let fire_power = if gun_delta.abs() <= AIM_TOLERANCE && enemy.can_fire() {
        CATALOG_FIRE_POWER
    } else {
        0.0
    };

    Instructions {
        move_distance: enemy.velocity + velocity_change,
        robot_degrees: 0.0,
        gun_degrees: banded_turn(gun_delta, MAX_GUN_ROTATION),
        radar_degrees: banded_turn(radar_delta, MAX_RADAR_ROTATION),
        fire_power,
        velocity_change,
    }
}

/// Tries acceleration and deceleration alternatives and picks the one
/// putting the most distance between the enemy and the closest incoming
/// projectile's next position. Ties go to the first candidate.
fn dodge(state: &Gamestate, config: &BattleConfig) -> f64 {
    let enemy = &state.enemy;
    let mut best_delta = 0.0;
    let mut best_distance = clearance(state, config, enemy.velocity);
    for delta in [1.0, -1.0, -2.0] {
        if !legal_velocity_change(enemy.velocity, delta) {
            continue;
        }
        let distance = clearance(state, config, enemy.velocity + delta);
        if distance > best_distance {
            best_delta = delta;
            best_distance = distance;
        }
    }
    best_delta
}

/// Distance from the enemy's straight-line next position to the nearest
/// hostile projectile's next position.
fn clearance(state: &Gamestate, config: &BattleConfig, velocity: f64) -> f64 {
    let enemy = &state.enemy;
    let (dx, dy) = geometry::degree_to_xy(enemy.heading, velocity);
    let (next_x, next_y) = (enemy.x + dx, enemy.y + dy);

    state
        .projectiles
        .iter()
        .filter(|projectile| projectile.active && projectile.owner != enemy.name)
        .map(|projectile| projectile.advance(config))
        .map(|projectile| (projectile.x - next_x).hypot(projectile.y - next_y))
        .fold(f64::INFINITY, f64::min)
}

/// Whether driving straight at the given speed runs the enemy into any
/// hostile projectile's next position.
fn threatened(state: &Gamestate, config: &BattleConfig, velocity: f64) -> bool {
    let enemy = &state.enemy;
    let (dx, dy) = geometry::degree_to_xy(enemy.heading, velocity);
    let (next_x, next_y) = (enemy.x + dx, enemy.y + dy);

    state
        .projectiles
        .iter()
        .filter(|projectile| projectile.active && projectile.owner != enemy.name)
        .map(|projectile| projectile.advance(config))
        .any(|projectile| projectile.hits(config, next_x, next_y))
}

/// Three aiming bands: snap inside [`AIM_TOLERANCE`], the exact delta
/// inside [`EXACT_TURN_BAND`], saturated at the per-tick maximum beyond.
fn banded_turn(delta: f64, max_rotation: f64) -> f64 {
    if delta.abs() <= EXACT_TURN_BAND {
        delta
    } else {
        max_rotation.copysign(delta)
    }
}

/// Small velocity perturbation used when no projectile threatens. Derived
/// from the position so the policy stays a pure function.
fn perturbation(velocity: f64, x: f64, y: f64) -> f64 {
    #[allow(clippy::cast_possible_truncation)]
    let seed = (x + y).abs() as i64;
    let delta = match seed % 3 {
        0 => -1.0,
        1 => 0.0,
        _ => 1.0,
    };
    if legal_velocity_change(velocity, delta) {
        delta
    } else {
        0.0
    }
}

/// Mirrors the kinematic legality rules of the instruction catalog.
fn legal_velocity_change(velocity: f64, delta: f64) -> bool {
    let new_velocity = velocity + delta;
    if velocity > 0.0 && new_velocity < 0.0 || velocity < 0.0 && new_velocity > 0.0 {
        return false;
    }
    new_velocity.abs() <= MAX_VELOCITY
}
