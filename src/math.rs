use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Angle helpers
// ---------------------------------------------------------------------------

/// Wrap an angle into [-pi, pi).
///
/// Every angle comparison in the crate goes through this single primitive,
/// so yaw commands and yaw errors always take the shortest rotational path.
pub fn wrap_to_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}
