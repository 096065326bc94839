//! Robot snapshots and per-robot score bookkeeping.

use std::fmt;

use anyhow::{ensure, Result};

use crate::config::{BattleConfig, MAX_VELOCITY};
use crate::geometry;

/// Life-cycle state of a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RobotStatus {
    /// Operating normally.
    Healthy,
    /// Drained its energy through its own gun; alive but inert.
    Disabled,
    /// Energy driven to zero by damage. Terminal.
    Destroyed,
}

/// Named score accumulators for one robot. The metric set is closed, so a
/// plain struct replaces the string-keyed ledger of earlier designs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreLedger {
    /// 1 once the opponent is destroyed while this robot survives.
    pub survival: f64,
    /// Total bullet damage dealt to the opponent.
    pub bullet_damage: f64,
    /// Movement quality: accelerating is rewarded, stalling against walls
    /// is penalized.
    pub movement: f64,
    /// Accumulated penalty for gun-aim error towards the opponent.
    pub gun_direction: f64,
    /// Number of shots attempted.
    pub shoot_attempt: f64,
}

/// Immutable snapshot of a single robot.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotState {
    /// Identity tag, e.g. the robot name reported by the battle engine.
    pub name: String,
    /// Remaining energy, clamped at 0.
    pub energy: f64,
    /// Signed speed along the body heading, in `[-8, 8]`.
    pub velocity: f64,
    /// Position within arena bounds.
    pub x: f64,
    /// Position within arena bounds.
    pub y: f64,
    /// Body heading in `[0, 360)`.
    pub heading: f64,
    /// Gun heading in `[0, 360)`.
    pub gun_heading: f64,
    /// Radar heading in `[0, 360)`.
    pub radar_heading: f64,
    /// Gun cooldown; firing is only permitted at exactly 0.
    pub gun_heat: f64,
    /// Life-cycle status.
    pub status: RobotStatus,
    /// Accumulated score terms.
    pub scores: ScoreLedger,
}

impl RobotState {
    /// Creates a healthy robot at the given position with full energy and
    /// all headings at 0.
    #[must_use]
    pub fn new(name: &str, energy: f64, x: f64, y: f64) -> Self {
        Self {
            name: name.to_owned(),
            energy,
            velocity: 0.0,
            x,
            y,
            heading: 0.0,
            gun_heading: 0.0,
            radar_heading: 0.0,
            gun_heat: 0.0,
            status: RobotStatus::Healthy,
            scores: ScoreLedger::default(),
        }
    }

    /// Builds a snapshot from live telemetry reported by the host battle
    /// engine for our own robot.
    ///
    /// # Errors
    ///
    /// Fails when the telemetry violates the model invariants (velocity
    /// cap, negative gun heat, position outside the arena).
    #[allow(clippy::too_many_arguments)]
    pub fn from_telemetry(
        config: &BattleConfig,
        name: &str,
        energy: f64,
        velocity: f64,
        x: f64,
        y: f64,
        heading: f64,
        gun_heading: f64,
        radar_heading: f64,
        gun_heat: f64,
    ) -> Result<Self> {
        ensure!(
            velocity.abs() <= MAX_VELOCITY,
            "telemetry velocity {velocity} exceeds the cap"
        );
        ensure!(gun_heat >= 0.0, "telemetry gun heat {gun_heat} is negative");
        ensure!(
            config.contains(x, y),
            "telemetry position ({x}, {y}) is outside the arena"
        );
        let status = if energy <= 0.0 {
            RobotStatus::Destroyed
        } else {
            RobotStatus::Healthy
        };
        Ok(Self {
            name: name.to_owned(),
            energy,
            velocity,
            x,
            y,
            heading: geometry::normalize_degrees(heading),
            gun_heading: geometry::normalize_degrees(gun_heading),
            radar_heading: geometry::normalize_degrees(radar_heading),
            gun_heat,
            status,
            scores: ScoreLedger::default(),
        })
    }

    /// Builds an opponent estimate from a radar scan event: a bearing
    /// relative to the observer's heading plus a distance, converted into
    /// an absolute position.
    #[must_use]
    pub fn from_scan(
        observer: &Self,
        name: &str,
        bearing: f64,
        distance: f64,
        energy: f64,
        velocity: f64,
        heading: f64,
    ) -> Self {
        let angle = geometry::normalize_degrees(observer.heading + bearing);
        let (dx, dy) = geometry::degree_to_xy(angle, distance);
        Self {
            name: name.to_owned(),
            energy,
            velocity,
            x: observer.x + dx,
            y: observer.y + dy,
            heading: geometry::normalize_degrees(heading),
            gun_heading: geometry::normalize_degrees(heading),
            radar_heading: geometry::normalize_degrees(heading),
            gun_heat: 0.0,
            status: if energy <= 0.0 {
                RobotStatus::Destroyed
            } else {
                RobotStatus::Healthy
            },
            scores: ScoreLedger::default(),
        }
    }

    /// Whether the gun is cool enough to fire.
    #[must_use]
    pub fn can_fire(&self) -> bool {
        self.gun_heat == 0.0 && self.status == RobotStatus::Healthy
    }

    /// Whether the robot has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.status == RobotStatus::Destroyed
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} e={:.1} v={:.1} at ({:.1}, {:.1}) heading {:.1}",
            self.name, self.energy, self.velocity, self.x, self.y, self.heading
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_validation() {
        let config = BattleConfig::default();
        assert!(RobotState::from_telemetry(
            &config, "us", 100.0, 0.0, 25.0, 25.0, 0.0, 0.0, 0.0, 0.0
        )
        .is_ok());
        // Velocity over the cap.
        assert!(RobotState::from_telemetry(
            &config, "us", 100.0, 9.0, 25.0, 25.0, 0.0, 0.0, 0.0, 0.0
        )
        .is_err());
        // Outside the arena.
        assert!(RobotState::from_telemetry(
            &config, "us", 100.0, 0.0, -1.0, 25.0, 0.0, 0.0, 0.0, 0.0
        )
        .is_err());
    }

    #[test]
    fn telemetry_normalizes_headings() {
        let config = BattleConfig::default();
        let robot = RobotState::from_telemetry(
            &config, "us", 100.0, 0.0, 25.0, 25.0, 370.0, -10.0, 720.0, 0.0,
        )
        .unwrap();
        assert!((robot.heading - 10.0).abs() < 1.0e-9);
        assert!((robot.gun_heading - 350.0).abs() < 1.0e-9);
        assert!((robot.radar_heading - 0.0).abs() < 1.0e-9);
    }

    #[test]
    fn scan_places_enemy_on_bearing() {
        let observer = RobotState::new("us", 100.0, 100.0, 100.0);
        // Observer heading 0; bearing 90 puts the enemy due east.
        let enemy = RobotState::from_scan(&observer, "them", 90.0, 50.0, 80.0, 0.0, 180.0);
        assert!((enemy.x - 150.0).abs() < 1.0e-9);
        assert!((enemy.y - 100.0).abs() < 1.0e-9);
        assert_eq!(enemy.status, RobotStatus::Healthy);
    }

    #[test]
    fn fire_readiness() {
        let mut robot = RobotState::new("us", 100.0, 10.0, 10.0);
        assert!(robot.can_fire());
        robot.gun_heat = 1.2;
        assert!(!robot.can_fire());
        robot.gun_heat = 0.0;
        robot.status = RobotStatus::Disabled;
        assert!(!robot.can_fire());
    }
}
