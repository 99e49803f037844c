// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced to the caller when the control law cannot proceed.
///
/// Singular geometry (near-inverted attitude, vanishing thrust) and actuator
/// saturation are deliberately *not* errors: the cascade guards or clips the
/// affected value, flags it in [`crate::control::Saturation`], and lets the
/// next tick's fresh state correct the drift.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// A trajectory needs at least one waypoint to be sampled.
    #[error("trajectory contains no waypoints")]
    EmptyTrajectory,
    /// Waypoint timestamps must be non-decreasing.
    #[error("trajectory timestamp decreases at waypoint {index}")]
    NonMonotonicTimestamps { index: usize },
}
