//! Projectile snapshots and derived ballistics.

use crate::config::BattleConfig;
use crate::geometry;

/// A bullet in flight. Everything except the position is fixed at firing
/// time; once deactivated a projectile never reactivates.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Name of the robot that fired it.
    pub owner: String,
    /// Flight heading in `[0, 360)`, fixed at firing time.
    pub heading: f64,
    /// Fire power; strictly positive.
    pub power: f64,
    /// Current position.
    pub x: f64,
    /// Current position.
    pub y: f64,
    /// Cleared when the projectile leaves the arena or hits a robot.
    pub active: bool,
}

impl Projectile {
    /// Creates an in-flight projectile fired by `owner` from `(x, y)`.
    #[must_use]
    pub fn new(owner: &str, x: f64, y: f64, heading: f64, power: f64) -> Self {
        debug_assert!(power > 0.0);
        Self {
            owner: owner.to_owned(),
            heading: geometry::normalize_degrees(heading),
            power,
            x,
            y,
            active: true,
        }
    }

    /// Flight speed in pixels per tick: `20 - 3 * power`.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        20.0 - 3.0 * self.power
    }

    /// Damage dealt on a hit: `4 * power + 2 * max(power - 1, 0)`.
    #[must_use]
    pub fn damage(&self) -> f64 {
        4.0 * self.power + 2.0 * (self.power - 1.0).max(0.0)
    }

    /// Energy the owner regains when this projectile hits: `3 * power`.
    #[must_use]
    pub fn energy_return(&self) -> f64 {
        3.0 * self.power
    }

    /// Gun heat generated by firing this projectile: `1 + power / 5`.
    #[must_use]
    pub fn heat_generated(&self) -> f64 {
        1.0 + self.power / 5.0
    }

    /// Advances the projectile one tick along its heading, deactivating it
    /// when it leaves the arena. Inactive projectiles do not move.
    #[must_use]
    pub fn advance(&self, config: &BattleConfig) -> Self {
        if !self.active {
            return self.clone();
        }
        let (dx, dy) = geometry::degree_to_xy(self.heading, self.velocity());
        let x = self.x + dx;
        let y = self.y + dy;
        Self {
            x,
            y,
            active: config.contains(x, y),
            ..self.clone()
        }
    }

    /// Whether the projectile is within `hit_radius` of the given point.
    #[must_use]
    pub fn hits(&self, config: &BattleConfig, x: f64, y: f64) -> bool {
        self.active && (self.x - x).hypot(self.y - y) <= config.hit_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_formula() {
        assert!((Projectile::new("us", 0.0, 0.0, 0.0, 1.0).damage() - 4.0).abs() < f64::EPSILON);
        assert!((Projectile::new("us", 0.0, 0.0, 0.0, 3.0).damage() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn damage_is_monotone_in_power() {
        let mut previous = 0.0;
        for tenth in 1..=30 {
            let power = f64::from(tenth) / 10.0;
            let damage = Projectile::new("us", 0.0, 0.0, 0.0, power).damage();
            assert!(damage > previous, "damage not increasing at power {power}");
            previous = damage;
        }
    }

    #[test]
    fn velocity_formula() {
        assert!((Projectile::new("us", 0.0, 0.0, 0.0, 1.0).velocity() - 17.0).abs() < f64::EPSILON);
        assert!((Projectile::new("us", 0.0, 0.0, 0.0, 3.0).velocity() - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deactivates_outside_arena() {
        let config = BattleConfig::with_arena(100.0, 100.0);
        // Heading 270 = towards negative x; 17 px/tick from x=10 exits.
        let projectile = Projectile::new("us", 10.0, 50.0, 270.0, 1.0);
        let advanced = projectile.advance(&config);
        assert!(!advanced.active);
        // Inactive projectiles stay put.
        let frozen = advanced.advance(&config);
        assert_eq!(frozen.x, advanced.x);
        assert!(!frozen.active);
    }

    #[test]
    fn hit_test_uses_radius() {
        let config = BattleConfig::with_arena(100.0, 100.0);
        let projectile = Projectile::new("us", 50.0, 50.0, 0.0, 1.0);
        assert!(projectile.hits(&config, 60.0, 50.0));
        assert!(!projectile.hits(&config, 80.0, 50.0));
        let mut spent = projectile;
        spent.active = false;
        assert!(!spent.hits(&config, 50.0, 50.0));
    }
}
