//! Battle-level configuration threaded explicitly into the simulation and
//! the search instead of living in process-wide mutable state.

/// Physical parameters of the simulated battle.
///
/// The defaults correspond to a standard battlefield; the host adapter
/// overrides the arena dimensions with the values reported by the battle
/// engine at startup.
#[derive(Clone, Debug)]
pub struct BattleConfig {
    /// Arena width in pixels. Positions are clamped to `[0, width]`.
    pub width: f64,
    /// Arena height in pixels. Positions are clamped to `[0, height]`.
    pub height: f64,
    /// Gun heat removed per tick.
    pub cooling_rate: f64,
    /// Distance within which a projectile counts as hitting a robot.
    pub hit_radius: f64,
}

/// The amount of energy a robot starts a round with.
pub const STARTING_ENERGY: f64 = 100.0;

/// Absolute velocity cap, in pixels per tick.
pub const MAX_VELOCITY: f64 = 8.0;

/// The maximum amount a robot can turn its gun in one tick.
pub const MAX_GUN_ROTATION: f64 = 20.0;

/// The maximum amount a robot can turn its radar in one tick.
pub const MAX_RADAR_ROTATION: f64 = 45.0;

/// Body turn rate degrades with speed: `10 - 0.75 * |velocity|` degrees.
#[must_use]
pub fn max_body_rotation(velocity: f64) -> f64 {
    10.0 - 0.75 * velocity.abs()
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            cooling_rate: 0.1,
            hit_radius: 18.0,
        }
    }
}

impl BattleConfig {
    /// Creates a config for the given arena dimensions, keeping the default
    /// physics constants.
    #[must_use]
    pub fn with_arena(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Clamps a point to the arena. Returns the clamped point and whether
    /// clamping moved it.
    #[must_use]
    pub fn clamp_position(&self, x: f64, y: f64) -> (f64, f64, bool) {
        let clamped_x = x.clamp(0.0, self.width);
        let clamped_y = y.clamp(0.0, self.height);
        let moved = (clamped_x - x).abs() > crate::geometry::TOLERANCE
            || (clamped_y - y).abs() > crate::geometry::TOLERANCE;
        (clamped_x, clamped_y, moved)
    }

    /// Whether a point lies within the arena bounds.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}
