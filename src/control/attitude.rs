use log::warn;
use nalgebra::{Matrix2, Vector2};

use crate::config::GainSet;
use crate::state::Attitude;

use super::MIN_TILT_PROJECTION;

/// Thrust magnitudes below this are treated as "motors off": no amount of
/// tilt converts zero thrust into horizontal acceleration.
const MIN_CONTROL_THRUST: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Roll/pitch controller: horizontal acceleration -> body rates p, q
// ---------------------------------------------------------------------------

/// Roll/pitch rate command with its singular-geometry flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollPitchCommand {
    pub pq: Vector2<f64>, // [p, q] rad/s
    pub singular: bool,
}

/// Convert a horizontal acceleration command into body roll/pitch rates.
///
/// Thrust acts along body Z, so horizontal acceleration requires tilt. With
/// `c = -thrust / mass` (specific force along body Z; negative because
/// thrust opposes the NED down axis) the commanded tilt components are
/// `accel_cmd / c`, compared against the current tilt `(R02, R12)`, the
/// projection of the body Z axis onto the world horizontal plane. The tilt
/// error scaled by the attitude gains gives a desired tilt rate, which maps
/// into body p/q through the yaw-dependent block of the rotation matrix so
/// the same world-frame tilt rate commands the right axes at any heading.
pub fn roll_pitch_control(
    gains: &GainSet,
    accel_cmd: Vector2<f64>,
    attitude: &Attitude,
    thrust: f64,
) -> RollPitchCommand {
    if thrust.abs() < MIN_CONTROL_THRUST {
        warn!("roll/pitch control with zero thrust, commanding zero rates");
        return RollPitchCommand {
            pq: Vector2::zeros(),
            singular: true,
        };
    }

    let r = attitude.rotation_matrix();
    let c = -thrust / gains.mass;
    let b_cmd = accel_cmd / c;
    let b = Vector2::new(r[(0, 2)], r[(1, 2)]);
    let b_dot = gains.k_p_tilt().component_mul(&(b_cmd - b));

    // World tilt rate -> body rates, restricted to the yaw-dependent block.
    let jacobian = Matrix2::new(
        r[(1, 0)], -r[(0, 0)],
        r[(1, 1)], -r[(0, 1)],
    );

    let b_z = r[(2, 2)];
    let singular = b_z.abs() < MIN_TILT_PROJECTION;
    let b_z = if singular {
        warn!("roll/pitch control near singular attitude (b_z = {b_z:.2e})");
        MIN_TILT_PROJECTION.copysign(b_z)
    } else {
        b_z
    };

    RollPitchCommand {
        pq: jacobian * b_dot / b_z,
        singular,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn zero_thrust_commands_zero_rates() {
        let gains = GainSet::default();
        let out = roll_pitch_control(
            &gains,
            Vector2::new(2.0, -1.0),
            &Attitude::level(),
            0.0,
        );
        assert_eq!(out.pq, Vector2::zeros());
        assert!(out.singular);
    }

    #[test]
    fn level_hover_with_no_error_holds_rates_at_zero() {
        let gains = GainSet::default();
        let out = roll_pitch_control(
            &gains,
            Vector2::zeros(),
            &Attitude::level(),
            gains.hover_thrust(),
        );
        assert_relative_eq!(out.pq, Vector2::zeros(), epsilon = 1e-12);
        assert!(!out.singular);
    }

    #[test]
    fn northward_accel_pitches_nose_down() {
        let gains = GainSet::default();
        // Heading north, level, asking for +north acceleration: the vehicle
        // must pitch nose down (negative q). No roll involved.
        let out = roll_pitch_control(
            &gains,
            Vector2::new(1.0, 0.0),
            &Attitude::level(),
            gains.hover_thrust(),
        );
        assert_relative_eq!(out.pq.x, 0.0, epsilon = 1e-12);
        assert!(out.pq.y < 0.0);
    }

    #[test]
    fn heading_rotates_tilt_into_roll() {
        let gains = GainSet::default();
        // Same +north acceleration, but heading east: now the correction is
        // a roll, not a pitch.
        let east = Attitude::new(0.0, 0.0, FRAC_PI_2);
        let out = roll_pitch_control(
            &gains,
            Vector2::new(1.0, 0.0),
            &east,
            gains.hover_thrust(),
        );
        assert!(out.pq.x.abs() > 1e-3);
        assert_relative_eq!(out.pq.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rates_scale_with_attitude_gain() {
        let soft = GainSet::builder().tilt_gains(3.0, 3.0).build();
        let stiff = GainSet::builder().tilt_gains(12.0, 12.0).build();
        let accel = Vector2::new(0.8, 0.0);
        let thrust = soft.hover_thrust();
        let a = roll_pitch_control(&soft, accel, &Attitude::level(), thrust);
        let b = roll_pitch_control(&stiff, accel, &Attitude::level(), thrust);
        assert_relative_eq!(b.pq.y, 4.0 * a.pq.y, epsilon = 1e-12);
    }
}
