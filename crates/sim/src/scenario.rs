use heatloop_components::{
    controller::PiConfig,
    thermal::{Integration, TankConfig},
};

use crate::Schedule;

/// Everything needed to run one closed-loop simulation.
///
/// A scenario is unchecked data. [`Simulation::new`](crate::Simulation::new)
/// validates it as a whole before any step runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Physical constants of the tank.
    pub tank: TankConfig,

    /// How the tank is integrated between samples.
    pub integration: Integration,

    /// Controller tuning and output limits.
    pub controller: PiConfig,

    /// Length of the simulated horizon.
    pub duration: f64,

    /// Number of samples on the grid, including the initial one.
    pub samples: usize,

    /// Tank temperature at sample 0.
    pub initial_temperature: f64,

    /// Target temperature, one value per sample.
    pub setpoint: Schedule,

    /// Inlet stream temperature, one value per sample.
    pub inlet_temperature: Schedule,
}

impl Scenario {
    /// The reference disturbance-rejection scenario.
    ///
    /// A 10 L tank of water (ρ = 1 kg/L, C_p = 1 kcal/(kg·K)) with a 1 L/s
    /// through-flow starts at 25 °C and is driven to a 50 °C setpoint by a
    /// PI controller (`Ki = 1.5`, `taui = 25.23`, output in `[0, 500]`).
    /// At sample 150 the inlet temperature drops from 25 °C to 15 °C. The
    /// grid has 301 samples over 300 s.
    #[must_use]
    pub fn canonical() -> Self {
        let samples = 301;

        Self {
            tank: TankConfig {
                density: 1.0,
                specific_heat: 1.0,
                volume: 10.0,
                flow_rate: 1.0,
            },
            integration: Integration::default(),
            controller: PiConfig {
                gain: 1.5,
                integral_time: 25.23,
                bias: 0.0,
                output_min: 0.0,
                output_max: 500.0,
            },
            duration: 300.0,
            samples,
            initial_temperature: 25.0,
            setpoint: Schedule::constant(50.0, samples),
            inlet_temperature: Schedule::step_change(samples, 150, 25.0, 15.0),
        }
    }
}
