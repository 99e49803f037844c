use log::{debug, warn};

use crate::config::GainSet;
use crate::state::Attitude;

use super::MIN_TILT_PROJECTION;

// ---------------------------------------------------------------------------
// Altitude controller: vertical PD + gravity compensation -> thrust
// ---------------------------------------------------------------------------

/// Collective thrust command with its diagnostic flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeCommand {
    pub thrust: f64,     // N, inside [thrust_min, thrust_max]
    pub saturated: bool, // raw thrust hit a limit
    pub singular: bool,  // tilt projection guard engaged
}

/// Generate the collective thrust from altitude and climb-rate error.
///
/// Altitude arguments are positive-up. The PD term only expresses the
/// correction relative to free flight, so gravity (negative, per NED) is
/// subtracted to get the true required specific force before projecting it
/// onto the world vertical through `b_z = R[(2,2)]`, the cosine of the
/// combined tilt. Near-inverted attitudes would send `b_z` through zero;
/// the projection is clamped to a minimum magnitude instead of letting the
/// division produce non-finite thrust.
pub fn altitude_control(
    gains: &GainSet,
    altitude_cmd: f64,
    vspeed_cmd: f64,
    altitude: f64,
    vspeed: f64,
    attitude: &Attitude,
    accel_ff: f64,
) -> AltitudeCommand {
    let e_z = altitude_cmd - altitude;
    let e_z_dot = vspeed_cmd - vspeed;
    let net_accel = gains.k_p_z * e_z + gains.k_d_z * e_z_dot + accel_ff;

    let b_z = attitude.rotation_matrix()[(2, 2)];
    let singular = b_z.abs() < MIN_TILT_PROJECTION;
    let b_z = if singular {
        warn!(
            "altitude control near singular attitude (b_z = {b_z:.2e}), clamping projection"
        );
        MIN_TILT_PROJECTION.copysign(b_z)
    } else {
        b_z
    };

    let raw = (net_accel - gains.gravity) / b_z * gains.mass;
    let saturated = raw < gains.thrust_min || raw > gains.thrust_max;
    if saturated {
        debug!("thrust saturated: {raw:.2} N clipped to [{}, {}]", gains.thrust_min, gains.thrust_max);
    }

    AltitudeCommand {
        thrust: raw.clamp(gains.thrust_min, gains.thrust_max),
        saturated,
        singular,
    }
}
