//! Interactive plots of the heated tank and its control loop.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot -- loop
//! cargo run --example plot --features plot -- tank
//! cargo run --example plot --features plot -- tank 2
//! cargo run --example plot --features plot -- sweep
//! RUST_LOG=heatloop_sim=debug cargo run --example plot --features plot -- sweep
//! ```
//!
//! # Modes
//!
//! - **loop**: The reference scenario: the tank is driven from 25 to 50 and
//!   the inlet drops from 25 to 15 halfway through. Shows temperature,
//!   setpoint, heater power and inlet temperature.
//!
//! - **tank [dt]**: Open-loop heating of the tank at constant power,
//!   integrated with forward Euler and RK4 at step `dt` (default `1.0`) and
//!   overlaid on the exact exponential response.
//!
//! - **sweep**: The reference scenario for three controller gains, run in
//!   parallel. Aggressive gains saturate; enable debug logs to see it.

use std::error::Error;

use heatloop_components::thermal::{
    Integration, StirredTank, TankConfig, TankInput, TankOutput, TankProblem,
};
use heatloop_core::Observer;
use heatloop_observers::{PlotObserver, SaturationCounter, ShowConfig};
use heatloop_sim::{Action, Event, Scenario, Simulation, run_batch};
use heatloop_solvers::transient::{self, euler, rk4};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "loop".into());
    match mode.as_str() {
        "loop" => closed_loop(),
        "tank" => {
            let dt = std::env::args()
                .nth(2)
                .as_deref()
                .map(str::parse::<f64>)
                .transpose()
                .unwrap_or_else(|_| {
                    eprintln!("Invalid step size, expected a number such as 0.5");
                    std::process::exit(1);
                })
                .unwrap_or(1.0);
            open_loop(dt)
        }
        "sweep" => sweep(),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: plot [loop|tank [dt]|sweep]");
            std::process::exit(1);
        }
    }
}

fn closed_loop() -> Result<(), Box<dyn Error>> {
    let simulation = Simulation::new(Scenario::canonical())?;

    let mut plot = PlotObserver::new(["Temperature", "Setpoint", "Heater power", "Inlet"]);
    let mut saturation = SaturationCounter::new();
    simulation.run_observed(|event: &Event| -> Option<Action> {
        let _: Option<Action> = plot.observe(event);
        saturation.observe(event)
    })?;
    println!("Saturated steps: {}", saturation.total());

    plot.show(
        ShowConfig::new()
            .title("Inlet disturbance rejection")
            .legend()
            .x_label("time"),
    )?;
    Ok(())
}

fn open_loop(dt: f64) -> Result<(), Box<dyn Error>> {
    let tank = StirredTank::new(
        TankConfig {
            density: 1.0,
            specific_heat: 1.0,
            volume: 10.0,
            flow_rate: 1.0,
        },
        Integration::default(),
    )?;
    let initial = TankInput {
        time: 0.0,
        temperature: 25.0,
        inlet_temperature: 25.0,
        heater_power: 25.0,
    };
    let horizon = 60.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (horizon / dt).round() as usize;

    let mut plot = PlotObserver::new(["Forward Euler", "RK4", "Exact"]);

    euler::solve(
        &tank,
        &TankProblem,
        initial,
        dt,
        steps,
        |event: &transient::Event<TankInput, TankOutput>| {
            let input = event.snapshot.input;
            plot.record(input.time, [Some(input.temperature), None, None]);
            None
        },
    )?;
    rk4::solve(
        &tank,
        &TankProblem,
        initial,
        dt,
        steps,
        |event: &transient::Event<TankInput, TankOutput>| {
            let input = event.snapshot.input;
            let exact = tank.steady_state_temperature(25.0, 25.0)
                - 25.0 * (-input.time / tank.residence_time()).exp();
            plot.record(input.time, [None, Some(input.temperature), Some(exact)]);
            None
        },
    )?;

    plot.show(
        ShowConfig::new()
            .title(format!("Open-loop heating, dt = {dt}"))
            .legend()
            .x_label("time")
            .y_label("temperature"),
    )?;
    Ok(())
}

fn sweep() -> Result<(), Box<dyn Error>> {
    let gains = [0.5, 1.5, 20.0];
    let scenarios = gains.map(|gain| {
        let mut scenario = Scenario::canonical();
        scenario.controller.gain = gain;
        scenario
    });

    let names = gains.map(|gain| format!("Ki = {gain}"));
    let mut plot = PlotObserver::new(names.each_ref().map(String::as_str));
    let results = run_batch(&scenarios)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    for index in 0..Scenario::canonical().samples {
        let time = results[0].time()[index];
        let mut traces = [None; 3];
        for (slot, series) in traces.iter_mut().zip(&results) {
            *slot = Some(series.temperature()[index]);
        }
        plot.record(time, traces);
    }

    plot.show(
        ShowConfig::new()
            .title("Gain sweep")
            .legend()
            .x_label("time")
            .y_label("temperature"),
    )?;
    Ok(())
}
