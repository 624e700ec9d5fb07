use std::convert::Infallible;

use heatloop_core::{DerivativeOf, OdeProblem};

use super::{TankInput, TankOutput};

/// Adapts [`StirredTank`](super::StirredTank) to the transient integrators.
///
/// The state is the tank temperature. Inlet temperature and heater power are
/// carried unchanged through the step, so they are held constant across the
/// whole sub-interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct TankProblem;

impl OdeProblem for TankProblem {
    type Input = TankInput;
    type Output = TankOutput;
    type Delta = f64;
    type State = f64;
    type Error = Infallible;

    fn state(&self, input: &TankInput) -> Result<f64, Infallible> {
        Ok(input.temperature)
    }

    fn derivative(
        &self,
        _input: &TankInput,
        output: &TankOutput,
    ) -> Result<DerivativeOf<f64, f64>, Infallible> {
        Ok(output.temperature_rate)
    }

    fn build_input(
        &self,
        base: &TankInput,
        state: &f64,
        delta: &f64,
    ) -> Result<TankInput, Infallible> {
        Ok(TankInput {
            time: base.time + delta,
            temperature: *state,
            ..*base
        })
    }
}
