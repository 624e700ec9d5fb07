use heatloop_core::Observer;
use thiserror::Error;

use crate::traits::{CanAbort, HasTemperature};

/// Aborts a run as soon as the temperature leaves `[low, high]`.
///
/// Useful as a safety net in parameter sweeps, where an unstable tuning
/// would otherwise run to the end of the grid. The offending temperature is
/// kept in [`TemperatureBand::violation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBand {
    low: f64,
    high: f64,
    violation: Option<f64>,
}

/// Bounds that cannot form a band.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BandError {
    #[error("band bounds must be finite, got [{low}, {high}]")]
    NonFinite { low: f64, high: f64 },

    #[error("band lower bound {low} exceeds upper bound {high}")]
    Inverted { low: f64, high: f64 },
}

impl TemperatureBand {
    /// Creates a band over `[low, high]`, both ends inclusive.
    ///
    /// # Errors
    ///
    /// Fails if either bound is not finite or if `low > high`, since such a
    /// band would abort every run on its first event.
    pub fn new(low: f64, high: f64) -> Result<Self, BandError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(BandError::NonFinite { low, high });
        }
        if low > high {
            return Err(BandError::Inverted { low, high });
        }
        Ok(Self {
            low,
            high,
            violation: None,
        })
    }

    /// First temperature seen outside the band, if any.
    #[must_use]
    pub fn violation(&self) -> Option<f64> {
        self.violation
    }
}

impl<E: HasTemperature, A: CanAbort> Observer<E, A> for TemperatureBand {
    fn observe(&mut self, event: &E) -> Option<A> {
        let temperature = event.temperature();
        if (self.low..=self.high).contains(&temperature) {
            return None;
        }
        self.violation.get_or_insert(temperature);
        Some(A::abort())
    }
}

impl<E: HasTemperature, A: CanAbort> Observer<E, A> for &mut TemperatureBand {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use heatloop_components::thermal::{Integration, StirredTank, TankConfig, TankProblem};
    use heatloop_sim::{Error, Scenario, Simulation};
    use heatloop_solvers::transient::{Status, rk4};

    #[test]
    fn aborts_a_simulation_that_leaves_the_band() {
        let simulation = Simulation::new(Scenario::canonical()).unwrap();
        let mut band = TemperatureBand::new(20.0, 48.0).unwrap();

        let err = simulation.run_observed(&mut band).unwrap_err();

        assert!(matches!(err, Error::Aborted { .. }));
        assert!(band.violation().unwrap() > 48.0);
    }

    #[test]
    fn wide_band_lets_the_run_finish() {
        let simulation = Simulation::new(Scenario::canonical()).unwrap();
        let mut band = TemperatureBand::new(0.0, 100.0).unwrap();

        assert!(simulation.run_observed(&mut band).is_ok());
        assert_eq!(band.violation(), None);
    }

    #[test]
    fn stops_the_tank_integrator_too() {
        let tank = StirredTank::new(
            TankConfig {
                density: 1.0,
                specific_heat: 1.0,
                volume: 10.0,
                flow_rate: 1.0,
            },
            Integration::default(),
        )
        .unwrap();
        let initial = heatloop_components::thermal::TankInput {
            time: 0.0,
            temperature: 25.0,
            inlet_temperature: 25.0,
            heater_power: 100.0,
        };
        let mut band = TemperatureBand::new(0.0, 30.0).unwrap();

        let solution = rk4::solve(&tank, &TankProblem, initial, 0.5, 100, &mut band).unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        let last = solution.last().unwrap().input.temperature;
        assert!(last > 30.0);
        assert_relative_eq!(band.violation().unwrap(), last);
    }

    #[test]
    fn degenerate_band_holds_a_single_temperature() {
        let band = TemperatureBand::new(50.0, 50.0).unwrap();
        assert_eq!(band.violation(), None);
    }

    #[test]
    fn rejects_bounds_that_cannot_form_a_band() {
        assert_eq!(
            TemperatureBand::new(60.0, 40.0),
            Err(BandError::Inverted {
                low: 60.0,
                high: 40.0
            })
        );
        assert!(matches!(
            TemperatureBand::new(f64::NAN, 40.0),
            Err(BandError::NonFinite { .. })
        ));
        assert!(matches!(
            TemperatureBand::new(0.0, f64::INFINITY),
            Err(BandError::NonFinite { .. })
        ));
    }
}
