use nalgebra::{Matrix3, Rotation3, Vector3};

// ---------------------------------------------------------------------------
// Vehicle state: estimator output consumed once per control tick
// ---------------------------------------------------------------------------

/// Attitude as ZYX (yaw-pitch-roll) Euler angles, radians.
///
/// Frame convention is North-East-Down for the inertial frame and the usual
/// front-right-down body frame, so positive pitch is nose up and the body Z
/// axis points through the belly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Attitude {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Level attitude, heading north.
    pub fn level() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Body-to-inertial rotation matrix, R = Rz(yaw) * Ry(pitch) * Rx(roll).
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        Rotation3::from_euler_angles(self.roll, self.pitch, self.yaw).into_inner()
    }

    /// Body Z-axis (thrust axis) expressed in the inertial frame.
    pub fn body_z(&self) -> Vector3<f64> {
        self.rotation_matrix() * Vector3::z()
    }
}

/// Full vehicle state at a single control tick.
/// Positions and velocities are inertial NED; `omega` holds the body-frame
/// angular rates [p, q, r]. The controller never retains this across ticks.
#[derive(Debug, Clone, Copy)]
pub struct VehicleState {
    pub pos: Vector3<f64>,   // m
    pub vel: Vector3<f64>,   // m/s
    pub attitude: Attitude,  // rad
    pub omega: Vector3<f64>, // rad/s, body frame
}

impl VehicleState {
    /// Vehicle at rest at `pos`, level, heading north.
    pub fn at_rest(pos: Vector3<f64>) -> Self {
        Self {
            pos,
            vel: Vector3::zeros(),
            attitude: Attitude::level(),
            omega: Vector3::zeros(),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuation command: the cascade's per-tick output
// ---------------------------------------------------------------------------

/// Collective thrust plus body-axis torques, handed to the motor-mixing layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Command {
    pub thrust: f64,          // N, always >= 0 after clipping
    pub torque: Vector3<f64>, // N*m about body [x, y, z]
}
