use nalgebra::{Vector2, Vector3};

// ---------------------------------------------------------------------------
// GainSet: frozen controller configuration
// ---------------------------------------------------------------------------

/// All tunable gains and physical constants of the cascade.
///
/// Constructed once (directly, via [`GainSet::builder`], or from the
/// reference tuning in [`Default`]) and read-only afterwards; the control
/// stages are pure functions over a `&GainSet`, so one instance may be
/// shared freely across threads or vehicles.
#[derive(Debug, Clone, PartialEq)]
pub struct GainSet {
    // Lateral position loop (PD, per axis)
    pub k_p_x: f64,
    pub k_d_x: f64,
    pub k_p_y: f64,
    pub k_d_y: f64,

    // Altitude loop (PD)
    pub k_p_z: f64,
    pub k_d_z: f64,

    // Roll/pitch tilt loop (P)
    pub k_p_roll: f64,
    pub k_p_pitch: f64,

    // Body-rate loop (P, per axis)
    pub k_p_p: f64,
    pub k_p_q: f64,
    pub k_p_r: f64,

    // Yaw loop (P)
    pub k_p_yaw: f64,

    // Physical constants and actuator limits
    pub mass: f64,            // kg
    pub moi: Vector3<f64>,    // [Ixx, Iyy, Izz] principal moments, kg*m^2
    pub gravity: f64,         // m/s^2, negative in NED (down is +z)
    pub thrust_min: f64,      // N, small positive floor avoids motor stall
    pub thrust_max: f64,      // N
    pub torque_max: f64,      // N*m, per axis
}

impl GainSet {
    pub fn builder() -> GainSetBuilder {
        GainSetBuilder::new()
    }

    /// Thrust that exactly balances gravity when level.
    pub fn hover_thrust(&self) -> f64 {
        self.mass * self.gravity.abs()
    }

    pub(crate) fn k_p_xy(&self) -> Vector2<f64> {
        Vector2::new(self.k_p_x, self.k_p_y)
    }

    pub(crate) fn k_d_xy(&self) -> Vector2<f64> {
        Vector2::new(self.k_d_x, self.k_d_y)
    }

    /// Tilt-error gains: the north tilt component is corrected by pitching,
    /// the east component by rolling.
    pub(crate) fn k_p_tilt(&self) -> Vector2<f64> {
        Vector2::new(self.k_p_pitch, self.k_p_roll)
    }

    pub(crate) fn k_p_rate(&self) -> Vector3<f64> {
        Vector3::new(self.k_p_p, self.k_p_q, self.k_p_r)
    }
}

/// Reference tuning for a 0.5 kg test quadrotor.
impl Default for GainSet {
    fn default() -> Self {
        Self {
            k_p_x: 4.2,
            k_d_x: 3.0,
            k_p_y: 4.2,
            k_d_y: 3.0,
            k_p_z: 3.6,
            k_d_z: 2.1,
            k_p_roll: 6.0,
            k_p_pitch: 6.0,
            k_p_p: 20.0,
            k_p_q: 20.0,
            k_p_r: 3.0,
            k_p_yaw: 1.5,
            mass: 0.5,
            moi: Vector3::new(0.005, 0.005, 0.01),
            gravity: -9.81,
            thrust_min: 0.1,
            thrust_max: 10.0,
            torque_max: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Fluent construction starting from the reference tuning.
pub struct GainSetBuilder {
    gains: GainSet,
}

impl GainSetBuilder {
    pub fn new() -> Self {
        Self { gains: GainSet::default() }
    }

    pub fn lateral_gains(mut self, k_p: f64, k_d: f64) -> Self {
        self.gains.k_p_x = k_p;
        self.gains.k_p_y = k_p;
        self.gains.k_d_x = k_d;
        self.gains.k_d_y = k_d;
        self
    }

    pub fn altitude_gains(mut self, k_p: f64, k_d: f64) -> Self {
        self.gains.k_p_z = k_p;
        self.gains.k_d_z = k_d;
        self
    }

    pub fn tilt_gains(mut self, k_p_roll: f64, k_p_pitch: f64) -> Self {
        self.gains.k_p_roll = k_p_roll;
        self.gains.k_p_pitch = k_p_pitch;
        self
    }

    pub fn rate_gains(mut self, k_p_p: f64, k_p_q: f64, k_p_r: f64) -> Self {
        self.gains.k_p_p = k_p_p;
        self.gains.k_p_q = k_p_q;
        self.gains.k_p_r = k_p_r;
        self
    }

    pub fn yaw_gain(mut self, k_p_yaw: f64) -> Self {
        self.gains.k_p_yaw = k_p_yaw;
        self
    }

    pub fn mass(mut self, mass: f64) -> Self {
        self.gains.mass = mass;
        self
    }

    pub fn moi(mut self, moi: Vector3<f64>) -> Self {
        self.gains.moi = moi;
        self
    }

    pub fn gravity(mut self, gravity: f64) -> Self {
        self.gains.gravity = gravity;
        self
    }

    pub fn thrust_limits(mut self, min: f64, max: f64) -> Self {
        self.gains.thrust_min = min;
        self.gains.thrust_max = max;
        self
    }

    pub fn torque_max(mut self, torque_max: f64) -> Self {
        self.gains.torque_max = torque_max;
        self
    }

    pub fn build(self) -> GainSet {
        self.gains
    }
}

impl Default for GainSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
