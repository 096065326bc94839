//! Angle and vector conversions shared by all physics code.
//!
//! Headings follow the compass convention of the battle engine: 0 degrees
//! points "up" (positive y), angles grow clockwise and are kept in
//! `[0, 360)`.

/// Magnitudes below this snap to exactly 0 so that floating noise does not
/// accumulate over thousands of simulated ticks.
pub const TOLERANCE: f64 = 1.0e-15;

/// Converts a compass heading and a radius into an `(dx, dy)` displacement.
#[must_use]
pub fn degree_to_xy(degrees: f64, radius: f64) -> (f64, f64) {
    // Change from compass degrees to trigonometric x/y degrees. Adding a
    // full turn below 90 keeps the intermediate angle non-negative.
    let modified = if degrees < 90.0 {
        degrees + 360.0
    } else {
        degrees
    };
    let radians = ((modified - 90.0) % 360.0).to_radians();

    let x = radians.cos() * radius;
    let y = (-radians).sin() * radius;

    (snap(x), snap(y))
}

/// Computes the compass heading from `(origin_x, origin_y)` towards
/// `(x, y)`, in `[0, 360)`. Exact inverse of [`degree_to_xy`].
#[must_use]
pub fn xy_to_degree(x: f64, y: f64, origin_x: f64, origin_y: f64) -> f64 {
    let delta_x = origin_x - x;
    let delta_y = origin_y - y;

    let degrees = delta_y.atan2(delta_x).to_degrees();
    (180.0 - degrees + 90.0) % 360.0
}

/// Renormalizes an arbitrary angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Shortest signed rotation taking heading `from` to heading `to`, in
/// `[-180, 180)`. Positive means clockwise.
#[must_use]
pub fn angle_delta(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

fn snap(value: f64) -> f64 {
    if value.abs() < TOLERANCE {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1.0e-9;

    #[test]
    fn cardinal_directions() {
        let (x, y) = degree_to_xy(0.0, 5.0);
        assert!((x - 0.0).abs() < EPSILON && (y - 5.0).abs() < EPSILON);

        let (x, y) = degree_to_xy(90.0, 5.0);
        assert!((x - 5.0).abs() < EPSILON && (y - 0.0).abs() < EPSILON);

        let (x, y) = degree_to_xy(180.0, 5.0);
        assert!((x - 0.0).abs() < EPSILON && (y + 5.0).abs() < EPSILON);

        let (x, y) = degree_to_xy(270.0, 5.0);
        assert!((x + 5.0).abs() < EPSILON && (y - 0.0).abs() < EPSILON);
    }

    #[test]
    fn snaps_tiny_components_to_zero() {
        let (x, _) = degree_to_xy(0.0, 1.0);
        assert_eq!(x, 0.0);
        let (_, y) = degree_to_xy(90.0, 1.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn round_trip() {
        let (origin_x, origin_y) = (400.0, 300.0);
        for tenth in 0..3600 {
            let heading = f64::from(tenth) / 10.0;
            let (dx, dy) = degree_to_xy(heading, 42.0);
            let recovered = xy_to_degree(origin_x + dx, origin_y + dy, origin_x, origin_y);
            let mut error = (recovered - heading).abs();
            if error > 180.0 {
                error = 360.0 - error;
            }
            assert!(
                error < 1.0e-6,
                "heading {heading} came back as {recovered}"
            );
        }
    }

    #[test]
    fn shortest_rotation() {
        assert!((angle_delta(10.0, 30.0) - 20.0).abs() < EPSILON);
        assert!((angle_delta(30.0, 10.0) + 20.0).abs() < EPSILON);
        assert!((angle_delta(350.0, 10.0) - 20.0).abs() < EPSILON);
        assert!((angle_delta(10.0, 350.0) + 20.0).abs() < EPSILON);
        assert!((angle_delta(0.0, 180.0) + 180.0).abs() < EPSILON);
    }

    #[test]
    fn normalization() {
        assert!((normalize_degrees(365.0) - 5.0).abs() < EPSILON);
        assert!((normalize_degrees(-5.0) - 355.0).abs() < EPSILON);
        assert!((normalize_degrees(720.0) - 0.0).abs() < EPSILON);
        assert!(normalize_degrees(359.999) < 360.0);
    }
}
