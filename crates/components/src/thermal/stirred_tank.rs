mod integration;
mod problem;

use heatloop_core::{
    Model,
    constraint::{Constrained, ConstraintError, StrictlyPositive},
};
use heatloop_solvers::transient::{euler, rk4};
use thiserror::Error;

pub use integration::{Integration, IntegrationError, MAX_REFINEMENTS, Method};
pub use problem::TankProblem;

/// A continuously stirred tank with an inlet stream and an immersed heater.
///
/// The tank contents are perfectly mixed, so the outlet leaves at the tank
/// temperature `T`. Its temperature obeys
///
/// ```text
/// dT/dt = (T_in - T) / τ_p + (K_p / τ_p) · Q
/// ```
///
/// where `τ_p = V / q` is the residence time and `K_p = 1 / (ρ · C_p)` is the
/// process gain. Any consistent unit system works; the tank never converts.
///
/// The tank holds no state between calls. Heater power is applied as given;
/// limiting it is the controller's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StirredTank {
    pub density: Constrained<f64, StrictlyPositive>,
    pub specific_heat: Constrained<f64, StrictlyPositive>,
    pub volume: Constrained<f64, StrictlyPositive>,
    pub flow_rate: Constrained<f64, StrictlyPositive>,
    pub integration: Integration,
}

/// Physical constants of the tank and its fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TankConfig {
    /// Fluid density `ρ`.
    pub density: f64,
    /// Fluid specific heat capacity `C_p`.
    pub specific_heat: f64,
    /// Tank volume `V`.
    pub volume: f64,
    /// Volumetric flow rate through the tank `q`.
    pub flow_rate: f64,
}

/// Error returned when a [`TankConfig`] holds a non-physical constant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TankConfigError {
    #[error("invalid density: {0}")]
    Density(#[source] ConstraintError),

    #[error("invalid specific heat: {0}")]
    SpecificHeat(#[source] ConstraintError),

    #[error("invalid volume: {0}")]
    Volume(#[source] ConstraintError),

    #[error("invalid flow rate: {0}")]
    FlowRate(#[source] ConstraintError),
}

/// Inputs required to evaluate the tank's instantaneous response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankInput {
    /// Time elapsed within the current sub-interval.
    pub time: f64,

    /// Temperature of the tank contents.
    pub temperature: f64,

    /// Temperature of the incoming stream.
    pub inlet_temperature: f64,

    /// Heater power delivered to the tank.
    pub heater_power: f64,
}

/// The tank's instantaneous response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankOutput {
    /// Time derivative of the tank temperature.
    pub temperature_rate: f64,
}

/// Errors raised while evaluating or integrating the tank.
#[derive(Debug, Error)]
pub enum TankError {
    #[error("temperature rate is not finite at T = {temperature} (rate = {rate})")]
    NonFiniteRate { temperature: f64, rate: f64 },

    /// The two finest passes still disagree, `substeps` being the finer one.
    #[error("integration did not converge with {substeps} sub-steps: {coarse} vs {fine}")]
    NotConverged {
        coarse: f64,
        fine: f64,
        substeps: usize,
    },
}

impl StirredTank {
    /// Creates a new `StirredTank` from physical constants and an integration setting.
    ///
    /// # Errors
    ///
    /// Returns a [`TankConfigError`] naming the first constant that is not
    /// finite and strictly positive.
    pub fn new(config: TankConfig, integration: Integration) -> Result<Self, TankConfigError> {
        let TankConfig {
            density,
            specific_heat,
            volume,
            flow_rate,
        } = config;

        Ok(Self {
            density: Constrained::new(density).map_err(TankConfigError::Density)?,
            specific_heat: Constrained::new(specific_heat)
                .map_err(TankConfigError::SpecificHeat)?,
            volume: Constrained::new(volume).map_err(TankConfigError::Volume)?,
            flow_rate: Constrained::new(flow_rate).map_err(TankConfigError::FlowRate)?,
            integration,
        })
    }

    /// Residence time `τ_p = V / q`.
    #[must_use]
    pub fn residence_time(&self) -> f64 {
        self.volume.into_inner() / self.flow_rate.into_inner()
    }

    /// Process gain `K_p = 1 / (ρ · C_p)`.
    #[must_use]
    pub fn process_gain(&self) -> f64 {
        1.0 / (self.density.into_inner() * self.specific_heat.into_inner())
    }

    /// Temperature the tank settles at for constant inlet temperature and power.
    #[must_use]
    pub fn steady_state_temperature(&self, inlet_temperature: f64, heater_power: f64) -> f64 {
        inlet_temperature + self.process_gain() * heater_power
    }

    /// Advances the tank temperature over one integration sub-interval.
    ///
    /// Inlet temperature and heater power are held constant over the whole
    /// sub-interval. See [`Integration`] for how the sub-step is refined
    /// until the result converges.
    ///
    /// # Errors
    ///
    /// - [`TankError::NonFiniteRate`] if any input is not finite.
    /// - [`TankError::NotConverged`] if the finest allowed sub-step still
    ///   disagrees with the one before it.
    pub fn advance(
        &self,
        temperature: f64,
        inlet_temperature: f64,
        heater_power: f64,
    ) -> Result<f64, TankError> {
        let initial = TankInput {
            time: 0.0,
            temperature,
            inlet_temperature,
            heater_power,
        };
        self.call(&initial)?;

        let max_substeps = self.integration.max_substeps();
        let mut substeps = self.integration.substeps();
        let mut coarse = self.integrate(initial, substeps);

        loop {
            substeps = substeps.saturating_mul(2);
            let fine = self.integrate(initial, substeps);
            if self.integration.agree(coarse, fine) {
                return Ok(fine);
            }
            if substeps >= max_substeps {
                return Err(TankError::NotConverged {
                    coarse,
                    fine,
                    substeps,
                });
            }
            coarse = fine;
        }
    }

    /// Integrates over the sub-interval with a fixed number of steps.
    ///
    /// Returns NaN if the pass diverged, which happens when the sub-step is
    /// too long for an explicit method on a fast tank.
    fn integrate(&self, initial: TankInput, steps: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let dt = self.integration.interval() / steps as f64;

        let solution = match self.integration.method() {
            Method::Euler => euler::solve_unobserved(self, &TankProblem, initial, dt, steps),
            Method::Rk4 => rk4::solve_unobserved(self, &TankProblem, initial, dt, steps),
        };

        match solution {
            Ok(solution) => solution
                .last()
                .map_or(initial.temperature, |snapshot| snapshot.input.temperature),
            Err(_) => f64::NAN,
        }
    }
}

impl Model for StirredTank {
    type Input = TankInput;
    type Output = TankOutput;
    type Error = TankError;

    fn call(&self, input: &TankInput) -> Result<TankOutput, TankError> {
        let TankInput {
            temperature,
            inlet_temperature,
            heater_power,
            ..
        } = *input;

        let tau = self.residence_time();
        let rate = (inlet_temperature - temperature) / tau + self.process_gain() / tau * heater_power;

        if !rate.is_finite() {
            return Err(TankError::NonFiniteRate { temperature, rate });
        }

        Ok(TankOutput {
            temperature_rate: rate,
        })
    }
}
