use log::debug;
use nalgebra::Vector3;

use crate::config::GainSet;

// ---------------------------------------------------------------------------
// Body-rate controller (innermost loop): rate error -> torques
// ---------------------------------------------------------------------------

/// Torque command with per-axis saturation flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorqueCommand {
    pub torque: Vector3<f64>,  // N*m, each axis inside +/- torque_max
    pub saturated: [bool; 3],
}

/// Proportional rate loop weighted by the inertia diagonal.
///
/// `torque = moi .* (k_p_rate .* (rate_cmd - rate))`, each axis clipped
/// independently to `+/- torque_max`. Proportional-only: the outer loops
/// are expected to feed a smooth rate trajectory into this stage.
pub fn body_rate_control(
    gains: &GainSet,
    rate_cmd: Vector3<f64>,
    rate: Vector3<f64>,
) -> TorqueCommand {
    let raw = gains
        .moi
        .component_mul(&gains.k_p_rate().component_mul(&(rate_cmd - rate)));

    let mut torque = raw;
    let mut saturated = [false; 3];
    for axis in 0..3 {
        if raw[axis].abs() > gains.torque_max {
            torque[axis] = raw[axis].clamp(-gains.torque_max, gains.torque_max);
            saturated[axis] = true;
        }
    }
    if saturated.iter().any(|&s| s) {
        debug!("torque saturated on axes {saturated:?}: raw = {raw:?}");
    }

    TorqueCommand { torque, saturated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn proportional_inertia_weighted() {
        let gains = GainSet::default(); // moi.x = 0.005, k_p_p = 20
        let out = body_rate_control(
            &gains,
            Vector3::new(0.5, 0.0, 0.0),
            Vector3::zeros(),
        );
        assert_relative_eq!(out.torque.x, 0.005 * 20.0 * 0.5, epsilon = 1e-12);
        assert_relative_eq!(out.torque.y, 0.0);
        assert_relative_eq!(out.torque.z, 0.0);
        assert_eq!(out.saturated, [false; 3]);
    }

    #[test]
    fn matched_rates_need_no_torque() {
        let gains = GainSet::default();
        let rate = Vector3::new(0.3, -0.1, 0.05);
        let out = body_rate_control(&gains, rate, rate);
        assert_relative_eq!(out.torque, Vector3::zeros());
    }

    #[test]
    fn each_axis_clips_independently() {
        let gains = GainSet::default(); // torque_max = 1.0
        let out = body_rate_control(
            &gains,
            Vector3::new(100.0, -0.5, -200.0),
            Vector3::zeros(),
        );
        assert_relative_eq!(out.torque.x, gains.torque_max);
        assert_relative_eq!(out.torque.y, 0.005 * 20.0 * -0.5, epsilon = 1e-12);
        assert_relative_eq!(out.torque.z, -gains.torque_max);
        assert_eq!(out.saturated, [true, false, true]);
    }
}
