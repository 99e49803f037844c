use nalgebra::Vector3;

use quad_control::trajectory::presets;
use quad_control::types::{CascadeController, VehicleState};

fn main() {
    // -----------------------------------------------------------------------
    // Controller: reference tuning for the 0.5 kg test quadrotor
    // -----------------------------------------------------------------------
    let controller = CascadeController::default();
    let gains = controller.gains();

    // -----------------------------------------------------------------------
    // Trajectory: 10 m square at 5 m altitude, 4 s per leg
    // -----------------------------------------------------------------------
    let trajectory = presets::square(10.0, 5.0, 4.0);

    // A snapshot state slightly off the first corner, as an estimator would
    // hand over each tick. There is no plant model here: the demo shows the
    // commands the cascade produces, not a closed-loop flight.
    let state = VehicleState::at_rest(Vector3::new(0.4, -0.3, -4.6));

    // -----------------------------------------------------------------------
    // Print per-tick commands along the plan
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  QUADROTOR CASCADE CONTROLLER — square circuit demo");
    println!("====================================================================");
    println!();
    println!(
        "  mass {:.2} kg   hover thrust {:.2} N   limits [{:.1}, {:.1}] N, ±{:.1} N·m",
        gains.mass,
        gains.hover_thrust(),
        gains.thrust_min,
        gains.thrust_max,
        gains.torque_max
    );
    println!();
    println!("   t(s)    setpoint N,E,D (m)       thrust(N)   torque x,y,z (N·m)");
    println!("  ──────────────────────────────────────────────────────────────────");

    let mut t = 0.0;
    while t <= 16.0 {
        let setpoint = trajectory.sample(t);
        let out = controller.update(&trajectory, &state, t);
        let tq = out.command.torque;
        println!(
            "  {:5.1}   {:6.2} {:6.2} {:6.2}    {:8.3}    {:+.3} {:+.3} {:+.3}{}",
            t,
            setpoint.pos.x,
            setpoint.pos.y,
            setpoint.pos.z,
            out.command.thrust,
            tq.x,
            tq.y,
            tq.z,
            if out.saturation.any() { "   [sat]" } else { "" }
        );
        t += 2.0;
    }
    println!();
}
