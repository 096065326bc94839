//! The discrete instruction space searched by the engine and its legality
//! filter.

use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::config::{max_body_rotation, MAX_VELOCITY};

/// Fire power used by every catalog entry that shoots.
pub const CATALOG_FIRE_POWER: f64 = 1.0;

/// Velocity-change steps offered by the catalog.
const VELOCITY_STEPS: [f64; 4] = [-2.0, -1.0, 0.0, 1.0];

/// Body turns: `-10..=10` at 2 degree intervals.
const BODY_TURN_INTERVAL: f64 = 2.0;
const BODY_TURN_RANGE: f64 = 10.0;

/// Gun turns: `-20..=20` at 5 degree intervals.
const GUN_TURN_INTERVAL: f64 = 5.0;
const GUN_TURN_RANGE: f64 = 20.0;

/// Radar turns: `-40..=40` at 20 degree intervals.
const RADAR_TURN_INTERVAL: f64 = 20.0;
const RADAR_TURN_RANGE: f64 = 40.0;

/// Upper bound on the catalog size: 4 velocity steps + 11 body turns + 9
/// gun turns + 5 radar turns, each with and without firing.
pub const MAX_INSTRUCTIONS: usize = 64;

/// A bounded list of instructions. The catalog is static, so the list
/// never allocates.
pub type InstructionList = ArrayVec<Instructions, MAX_INSTRUCTIONS>;

/// One tick worth of actuator commands for a single robot.
///
/// `move_distance` is what the host adapter feeds to its movement call;
/// `velocity_change` is what the simulation applies to reach that
/// distance. Legality never depends on simulation side effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instructions {
    /// Distance to travel this tick (the post-update velocity).
    pub move_distance: f64,
    /// Body rotation in degrees, clockwise-positive.
    pub robot_degrees: f64,
    /// Gun rotation in degrees, clockwise-positive.
    pub gun_degrees: f64,
    /// Radar rotation in degrees, clockwise-positive.
    pub radar_degrees: f64,
    /// Fire power; 0 means no shot.
    pub fire_power: f64,
    /// Velocity delta applied this tick.
    pub velocity_change: f64,
}

impl Instructions {
    /// An instruction that keeps every actuator still.
    #[must_use]
    pub const fn hold() -> Self {
        Self {
            move_distance: 0.0,
            robot_degrees: 0.0,
            gun_degrees: 0.0,
            radar_degrees: 0.0,
            fire_power: 0.0,
            velocity_change: 0.0,
        }
    }

    fn velocity_step(current_velocity: f64, delta: f64, fire_power: f64) -> Self {
        Self {
            move_distance: current_velocity + delta,
            velocity_change: delta,
            fire_power,
            ..Self::hold()
        }
    }

    fn body_turn(current_velocity: f64, degrees: f64, fire_power: f64) -> Self {
        Self {
            move_distance: current_velocity,
            robot_degrees: degrees,
            fire_power,
            ..Self::hold()
        }
    }

    fn gun_turn(current_velocity: f64, degrees: f64, fire_power: f64) -> Self {
        Self {
            move_distance: current_velocity,
            gun_degrees: degrees,
            fire_power,
            ..Self::hold()
        }
    }

    fn radar_turn(current_velocity: f64, degrees: f64, fire_power: f64) -> Self {
        Self {
            move_distance: current_velocity,
            radar_degrees: degrees,
            fire_power,
            ..Self::hold()
        }
    }

    /// Checks whether this instruction is legal for a robot moving at
    /// `velocity` whose gun readiness is `can_fire`.
    ///
    /// Total for all representable velocities, including 0 and the caps.
    #[must_use]
    pub fn is_possible(&self, velocity: f64, can_fire: bool) -> bool {
        let new_velocity = velocity + self.velocity_change;
        // A moving robot cannot flip its direction of travel through zero
        // in a single step.
        if velocity > 0.0 && new_velocity < 0.0 || velocity < 0.0 && new_velocity > 0.0 {
            return false;
        }
        if new_velocity.abs() > MAX_VELOCITY {
            return false;
        }
        if self.fire_power > 0.0 && !can_fire {
            return false;
        }
        if self.robot_degrees.abs() > max_body_rotation(velocity) {
            return false;
        }
        true
    }

    /// Enumerates every legal instruction for the given robot state.
    #[must_use]
    pub fn catalog(velocity: f64, can_fire: bool) -> InstructionList {
        let fire_options = [0.0, CATALOG_FIRE_POWER];

        let mut list = InstructionList::new();
        let velocity_steps = VELOCITY_STEPS
            .iter()
            .cartesian_product(fire_options)
            .map(|(&delta, fire)| Self::velocity_step(velocity, delta, fire));
        let body_turns = steps(BODY_TURN_RANGE, BODY_TURN_INTERVAL)
            .cartesian_product(fire_options)
            .map(|(degrees, fire)| Self::body_turn(velocity, degrees, fire));
        let gun_turns = steps(GUN_TURN_RANGE, GUN_TURN_INTERVAL)
            .cartesian_product(fire_options)
            .map(|(degrees, fire)| Self::gun_turn(velocity, degrees, fire));
        let radar_turns = steps(RADAR_TURN_RANGE, RADAR_TURN_INTERVAL)
            .cartesian_product(fire_options)
            .map(|(degrees, fire)| Self::radar_turn(velocity, degrees, fire));

        list.extend(
            velocity_steps
                .chain(body_turns)
                .chain(gun_turns)
                .chain(radar_turns)
                .filter(|instruction| instruction.is_possible(velocity, can_fire)),
        );
        list
    }
}

/// Symmetric turn steps `-range..=range` at the given interval.
fn steps(range: f64, interval: f64) -> impl Iterator<Item = f64> + Clone {
    let count = (2.0 * range / interval) as i32;
    (0..=count).map(move |i| -range + f64::from(i) * interval)
}
