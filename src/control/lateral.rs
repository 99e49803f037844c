use nalgebra::Vector2;

use crate::config::GainSet;

// ---------------------------------------------------------------------------
// Lateral position controller (outermost loop, north-east plane)
// ---------------------------------------------------------------------------

/// PD law on horizontal position and velocity error, plus feed-forward.
///
/// Returns an inertial-frame acceleration command in the north-east plane.
/// Nothing is saturated here; the roll/pitch and body-rate stages own the
/// physical limits.
pub fn lateral_position_control(
    gains: &GainSet,
    pos_cmd: Vector2<f64>,
    vel_cmd: Vector2<f64>,
    pos: Vector2<f64>,
    vel: Vector2<f64>,
    accel_ff: Vector2<f64>,
) -> Vector2<f64> {
    let e_pos = pos_cmd - pos;
    let e_vel = vel_cmd - vel;
    gains.k_p_xy().component_mul(&e_pos) + gains.k_d_xy().component_mul(&e_vel) + accel_ff
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_error_is_exact_fixed_point() {
        let gains = GainSet::default();
        let pos = Vector2::new(3.0, -2.0);
        let vel = Vector2::new(0.4, 0.1);
        let accel = lateral_position_control(&gains, pos, vel, pos, vel, Vector2::zeros());
        assert_eq!(accel, Vector2::zeros());
    }

    #[test]
    fn pd_terms_sum_per_axis() {
        let gains = GainSet::default(); // k_p 4.2, k_d 3.0
        let accel = lateral_position_control(
            &gains,
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 2.0),
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(0.5, 0.0),
        );
        assert_relative_eq!(accel.x, 4.2 + 0.5, epsilon = 1e-12);
        assert_relative_eq!(accel.y, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn feed_forward_passes_through() {
        let gains = GainSet::default();
        let ff = Vector2::new(-1.5, 2.5);
        let pos = Vector2::new(1.0, 1.0);
        let vel = Vector2::zeros();
        let accel = lateral_position_control(&gains, pos, vel, pos, vel, ff);
        assert_relative_eq!(accel, ff);
    }
}
