use crate::config::GainSet;
use crate::math::wrap_to_pi;

// ---------------------------------------------------------------------------
// Yaw controller: heading error -> yaw rate r
// ---------------------------------------------------------------------------

/// Proportional yaw-rate command along the shortest rotational path.
///
/// Yaw is periodic with period 2*pi: both angles and the resulting error are
/// wrapped into [-pi, pi), so a command of +3 rad against a heading of
/// -3 rad turns through the +/-pi boundary instead of sweeping through zero.
pub fn yaw_control(gains: &GainSet, yaw_cmd: f64, yaw: f64) -> f64 {
    let e_yaw = wrap_to_pi(wrap_to_pi(yaw_cmd) - wrap_to_pi(yaw));
    gains.k_p_yaw * e_yaw
}
