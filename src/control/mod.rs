pub mod altitude;
pub mod attitude;
pub mod body_rate;
pub mod lateral;
pub mod yaw;

pub use altitude::{altitude_control, AltitudeCommand};
pub use attitude::{roll_pitch_control, RollPitchCommand};
pub use body_rate::{body_rate_control, TorqueCommand};
pub use lateral::lateral_position_control;
pub use yaw::yaw_control;

use nalgebra::{Vector2, Vector3};

use crate::config::GainSet;
use crate::state::{Command, VehicleState};
use crate::trajectory::Trajectory;

/// Minimum magnitude of the vertical tilt projection `R[(2,2)]` before the
/// singular-geometry guard clamps it (vehicle near 90 degrees of tilt).
pub(crate) const MIN_TILT_PROJECTION: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Per-tick record of clipping and singular-geometry guards.
///
/// These are expected, non-fatal events surfaced for tuning and supervision;
/// the accompanying command is always usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Saturation {
    /// Thrust clipped against its configured limits.
    pub thrust: bool,
    /// Torque clipped, per body axis.
    pub torque: [bool; 3],
    /// Altitude stage clamped a near-zero vertical tilt projection.
    pub singular_tilt: bool,
    /// Roll/pitch stage guard engaged (zero thrust or extreme tilt).
    pub singular_thrust: bool,
}

impl Saturation {
    pub fn any(&self) -> bool {
        self.thrust
            || self.torque.iter().any(|&t| t)
            || self.singular_tilt
            || self.singular_thrust
    }
}

/// A command together with the diagnostics gathered while producing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlOutput {
    pub command: Command,
    pub saturation: Saturation,
}

// ---------------------------------------------------------------------------
// Controller trait
// ---------------------------------------------------------------------------

/// Trait for flight control laws.
///
/// Implement this to plug a custom control law into the tick loop in place
/// of the cascade.
pub trait Controller {
    /// Compute the actuation command for one control tick.
    fn control(&self, trajectory: &Trajectory, state: &VehicleState, time: f64) -> ControlOutput;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Cascaded controller: the full pipeline
// ---------------------------------------------------------------------------

/// The cascaded nonlinear control law.
///
/// A thin immutable wrapper around a [`GainSet`]; every stage is a pure
/// function, so `update` takes `&self` and carries nothing across ticks.
/// Per tick the cascade runs sampler -> {lateral, altitude} -> roll/pitch ->
/// yaw -> body rate, handing thrust plus three torques to the mixer.
#[derive(Debug, Clone)]
pub struct CascadeController {
    gains: GainSet,
}

impl CascadeController {
    pub fn new(gains: GainSet) -> Self {
        Self { gains }
    }

    pub fn gains(&self) -> &GainSet {
        &self.gains
    }

    /// Run one control tick.
    pub fn update(&self, trajectory: &Trajectory, state: &VehicleState, time: f64) -> ControlOutput {
        let setpoint = trajectory.sample(time);

        // Outer loops: horizontal acceleration and collective thrust.
        let accel_cmd = lateral_position_control(
            &self.gains,
            setpoint.pos.xy(),
            setpoint.vel.xy(),
            state.pos.xy(),
            state.vel.xy(),
            Vector2::zeros(),
        );

        // Altitude is positive-up; NED carries it in -z.
        let alt = altitude_control(
            &self.gains,
            -setpoint.pos.z,
            -setpoint.vel.z,
            -state.pos.z,
            -state.vel.z,
            &state.attitude,
            0.0,
        );

        // Middle loop: tilt to roll/pitch rates; yaw closes independently.
        let rp = roll_pitch_control(&self.gains, accel_cmd, &state.attitude, alt.thrust);
        let r_cmd = yaw_control(&self.gains, setpoint.yaw, state.attitude.yaw);
        let rate_cmd = Vector3::new(rp.pq.x, rp.pq.y, r_cmd);

        // Inner loop: rates to torques.
        let tq = body_rate_control(&self.gains, rate_cmd, state.omega);

        ControlOutput {
            command: Command {
                thrust: alt.thrust,
                torque: tq.torque,
            },
            saturation: Saturation {
                thrust: alt.saturated,
                torque: tq.saturated,
                singular_tilt: alt.singular,
                singular_thrust: rp.singular,
            },
        }
    }
}

impl Default for CascadeController {
    fn default() -> Self {
        Self::new(GainSet::default())
    }
}

impl Controller for CascadeController {
    fn control(&self, trajectory: &Trajectory, state: &VehicleState, time: f64) -> ControlOutput {
        self.update(trajectory, state, time)
    }

    fn name(&self) -> &str {
        "CascadeController"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::presets;
    use approx::assert_relative_eq;

    #[test]
    fn hover_at_setpoint_is_a_fixed_point() {
        let controller = CascadeController::default();
        let pos = Vector3::new(1.0, -2.0, -5.0);
        let trajectory = presets::hover(pos, 0.0);
        let state = VehicleState::at_rest(pos);

        let out = controller.update(&trajectory, &state, 3.0);
        assert_relative_eq!(
            out.command.thrust,
            controller.gains().hover_thrust(),
            epsilon = 1e-9
        );
        assert_relative_eq!(out.command.torque, Vector3::zeros(), epsilon = 1e-9);
        assert!(!out.saturation.any());
    }

    #[test]
    fn command_stays_inside_actuator_limits() {
        let controller = CascadeController::default();
        let gains = controller.gains();
        // Far from the plan, tumbling: everything should clip, not explode.
        let trajectory = presets::hover(Vector3::new(500.0, -500.0, -100.0), 2.0);
        let state = VehicleState {
            pos: Vector3::new(-200.0, 300.0, 50.0),
            vel: Vector3::new(40.0, -40.0, 20.0),
            attitude: crate::state::Attitude::new(0.4, -0.3, -2.0),
            omega: Vector3::new(3.0, -3.0, 1.0),
        };

        let out = controller.update(&trajectory, &state, 0.0);
        assert!(out.command.thrust >= gains.thrust_min);
        assert!(out.command.thrust <= gains.thrust_max);
        for axis in 0..3 {
            assert!(out.command.torque[axis].abs() <= gains.torque_max);
        }
        assert!(out.saturation.any());
    }

    #[test]
    fn below_altitude_target_raises_thrust() {
        let controller = CascadeController::default();
        let trajectory = presets::hover(Vector3::new(0.0, 0.0, -10.0), 0.0);
        // Level, at the right spot horizontally, but 5 m too low.
        let state = VehicleState::at_rest(Vector3::new(0.0, 0.0, -5.0));

        let out = controller.update(&trajectory, &state, 0.0);
        assert!(out.command.thrust > controller.gains().hover_thrust());
    }

    #[test]
    fn square_trajectory_produces_finite_commands_all_along() {
        let controller = CascadeController::default();
        let trajectory = presets::square(10.0, 5.0, 4.0);
        let state = VehicleState::at_rest(Vector3::new(0.5, 0.2, -4.5));

        let mut t = 0.0;
        while t <= 16.0 {
            let out = controller.update(&trajectory, &state, t);
            assert!(out.command.thrust.is_finite());
            assert!(out.command.torque.iter().all(|v| v.is_finite()));
            t += 0.25;
        }
    }

    #[test]
    fn trait_object_dispatch() {
        let controller = CascadeController::default();
        let dyn_controller: &dyn Controller = &controller;
        assert_eq!(dyn_controller.name(), "CascadeController");

        let trajectory = presets::hover(Vector3::new(0.0, 0.0, -2.0), 0.0);
        let state = VehicleState::at_rest(Vector3::new(0.0, 0.0, -2.0));
        let out = dyn_controller.control(&trajectory, &state, 0.0);
        assert!(out.command.thrust > 0.0);
    }
}
