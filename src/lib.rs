//! Cascaded nonlinear flight control law for a quadrotor.
//!
//! Given a planned trajectory and the vehicle's estimated state, the cascade
//! produces collective thrust and body-axis torque commands once per control
//! tick: sampler -> {lateral, altitude} -> roll/pitch -> yaw -> body rate.
//! Trajectory planning, state estimation, and motor mixing live outside this
//! crate.

pub mod config;
pub mod control;
pub mod error;
pub mod math;
pub mod state;
pub mod trajectory;

// Convenience re-exports of the everyday types
pub mod types {
    pub use crate::config::{GainSet, GainSetBuilder};
    pub use crate::control::{CascadeController, ControlOutput, Controller, Saturation};
    pub use crate::error::ControlError;
    pub use crate::state::{Attitude, Command, VehicleState};
    pub use crate::trajectory::{Setpoint, Trajectory, Waypoint};
}
