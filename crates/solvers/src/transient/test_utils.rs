//! Shared fixtures for integrator tests.

use heatloop_core::{DerivativeOf, Model, OdeProblem};
use thiserror::Error;

/// Model input: body temperature and elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Input {
    pub(super) temperature: f64,
    pub(super) time: f64,
}

impl Input {
    pub(super) fn at_rest(temperature: f64) -> Self {
        Self {
            temperature,
            time: 0.0,
        }
    }
}

/// Model output: rate of temperature change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Output {
    pub(super) rate: f64,
}

/// Newton cooling toward an ambient temperature.
///
/// `dT/dt = (ambient - T) / time_constant`, with the closed-form solution
/// `T(t) = ambient + (T0 - ambient) * exp(-t / time_constant)`.
pub(super) struct Cooling {
    pub(super) ambient: f64,
    pub(super) time_constant: f64,
}

impl Cooling {
    pub(super) fn exact(&self, initial: f64, time: f64) -> f64 {
        self.ambient + (initial - self.ambient) * (-time / self.time_constant).exp()
    }
}

#[derive(Debug, Error)]
#[error("temperature {0} is below absolute zero")]
pub(super) struct BelowFloor(pub(super) f64);

impl Model for Cooling {
    type Input = Input;
    type Output = Output;
    type Error = BelowFloor;

    fn call(&self, input: &Input) -> Result<Output, BelowFloor> {
        // Below absolute zero the model refuses to evaluate.
        if input.temperature < -273.15 {
            return Err(BelowFloor(input.temperature));
        }
        Ok(Output {
            rate: (self.ambient - input.temperature) / self.time_constant,
        })
    }
}

/// Problem wiring the cooling model's state, derivative, and input.
pub(super) struct CoolingProblem;

impl OdeProblem for CoolingProblem {
    type Input = Input;
    type Output = Output;
    type Delta = f64;
    type State = f64;
    type Error = std::convert::Infallible;

    fn state(&self, input: &Input) -> Result<f64, Self::Error> {
        Ok(input.temperature)
    }

    fn derivative(
        &self,
        _input: &Input,
        output: &Output,
    ) -> Result<DerivativeOf<f64, f64>, Self::Error> {
        Ok(output.rate)
    }

    fn build_input(&self, base: &Input, state: &f64, delta: &f64) -> Result<Input, Self::Error> {
        Ok(Input {
            temperature: *state,
            time: base.time + delta,
        })
    }
}
