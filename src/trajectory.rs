use nalgebra::Vector3;

use crate::error::ControlError;

// ---------------------------------------------------------------------------
// Trajectory: timestamped waypoints from the planner
// ---------------------------------------------------------------------------

/// A single planner waypoint: NED position, heading, and the time at which
/// the vehicle should be there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub pos: Vector3<f64>, // m, NED
    pub yaw: f64,          // rad
    pub time: f64,         // s
}

impl Waypoint {
    pub fn new(pos: Vector3<f64>, yaw: f64, time: f64) -> Self {
        Self { pos, yaw, time }
    }
}

/// Instantaneous targets produced by sampling a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint {
    pub pos: Vector3<f64>, // m, NED
    pub vel: Vector3<f64>, // m/s
    pub yaw: f64,          // rad
}

/// An ordered, validated sequence of waypoints.
///
/// Construction rejects empty sequences and decreasing timestamps, so a
/// `Trajectory` in hand can always be sampled. Duplicate timestamps are
/// allowed; the sampler resolves them deterministically.
#[derive(Debug, Clone)]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
}

impl Trajectory {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, ControlError> {
        if waypoints.is_empty() {
            return Err(ControlError::EmptyTrajectory);
        }
        for (i, pair) in waypoints.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(ControlError::NonMonotonicTimestamps { index: i + 1 });
            }
        }
        Ok(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Sample position, velocity, and yaw targets at `current_time`.
    ///
    /// The waypoint whose timestamp is nearest to `current_time` anchors the
    /// active segment: times before the anchor interpolate from the previous
    /// waypoint (yaw taken from it), times at or after interpolate towards
    /// the next. Position is piecewise-linear, so the velocity command is
    /// the constant slope of the active segment. Beyond either end the
    /// nearest waypoint is held with zero velocity, and a zero-length
    /// segment (duplicate timestamps) is held the same way rather than
    /// dividing by zero.
    pub fn sample(&self, current_time: f64) -> Setpoint {
        let anchor = self.nearest_index(current_time);
        let last = self.waypoints.len() - 1;

        let (i0, i1, yaw) = if current_time < self.waypoints[anchor].time {
            if anchor == 0 {
                // Query precedes the whole plan: hold the first waypoint.
                (0, 0, self.waypoints[0].yaw)
            } else {
                (anchor - 1, anchor, self.waypoints[anchor - 1].yaw)
            }
        } else if anchor == last {
            // Past the end: hold the final waypoint.
            (anchor, anchor, self.waypoints[anchor].yaw)
        } else {
            (anchor, anchor + 1, self.waypoints[anchor].yaw)
        };

        let w0 = &self.waypoints[i0];
        let w1 = &self.waypoints[i1];
        let span = w1.time - w0.time;

        if i0 == i1 || span <= 0.0 {
            return Setpoint {
                pos: w0.pos,
                vel: Vector3::zeros(),
                yaw,
            };
        }

        let delta = w1.pos - w0.pos;
        Setpoint {
            pos: w0.pos + delta * ((current_time - w0.time) / span),
            vel: delta / span,
            yaw,
        }
    }

    /// Index of the waypoint whose timestamp is closest to `t`; ties go to
    /// the earlier waypoint.
    fn nearest_index(&self, t: f64) -> usize {
        let mut best = 0;
        let mut best_dist = (self.waypoints[0].time - t).abs();
        for (i, wp) in self.waypoints.iter().enumerate().skip(1) {
            let dist = (wp.time - t).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Preset trajectories
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// Hold a single position and heading indefinitely.
    pub fn hover(pos: Vector3<f64>, yaw: f64) -> Trajectory {
        Trajectory {
            waypoints: vec![Waypoint::new(pos, yaw, 0.0)],
        }
    }

    /// Closed square circuit at constant altitude, nose along each leg.
    ///
    /// `altitude` is height above the NED origin (positive up), `leg_time`
    /// the seconds allotted to each of the four sides.
    pub fn square(side: f64, altitude: f64, leg_time: f64) -> Trajectory {
        let z = -altitude;
        let corners = [
            (0.0, 0.0, 0.0),
            (side, 0.0, 0.0),
            (side, side, FRAC_PI_2),
            (0.0, side, PI),
            (0.0, 0.0, -FRAC_PI_2),
        ];
        let waypoints = corners
            .iter()
            .enumerate()
            .map(|(i, &(n, e, yaw))| {
                Waypoint::new(Vector3::new(n, e, z), yaw, i as f64 * leg_time)
            })
            .collect();
        Trajectory { waypoints }
    }
}
