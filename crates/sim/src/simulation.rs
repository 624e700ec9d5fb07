use heatloop_components::{
    controller::{PiController, PiInput, PiState},
    thermal::StirredTank,
};
use heatloop_core::{Observer, Snapshot};
use tracing::{debug, error, info, info_span, trace};

use crate::{Action, Error, Event, ResultSeries, Scenario, Schedule, SimulationClock};

/// A validated scenario, ready to run.
///
/// Each run starts from the initial temperature and an empty controller
/// accumulator, so a `Simulation` can be run any number of times with the
/// same result.
#[derive(Debug, Clone)]
pub struct Simulation {
    tank: StirredTank,
    controller: PiController,
    clock: SimulationClock,
    initial_temperature: f64,
    setpoint: Schedule,
    inlet_temperature: Schedule,
}

impl Simulation {
    /// Validates a scenario.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found: an invalid time grid,
    /// tank, or controller, a non-finite initial temperature, or a schedule
    /// whose length differs from the sample count or which holds a
    /// non-finite value.
    pub fn new(scenario: Scenario) -> Result<Self, Error> {
        let Scenario {
            tank,
            integration,
            controller,
            duration,
            samples,
            initial_temperature,
            setpoint,
            inlet_temperature,
        } = scenario;

        let clock = SimulationClock::new(duration, samples)?;
        let tank = StirredTank::new(tank, integration)?;
        let controller = PiController::new(controller)?;

        if !initial_temperature.is_finite() {
            return Err(Error::InitialTemperature(initial_temperature));
        }
        check_schedule("setpoint", &setpoint, samples)?;
        check_schedule("inlet temperature", &inlet_temperature, samples)?;

        Ok(Self {
            tank,
            controller,
            clock,
            initial_temperature,
            setpoint,
            inlet_temperature,
        })
    }

    #[must_use]
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    #[must_use]
    pub fn tank(&self) -> &StirredTank {
        &self.tank
    }

    #[must_use]
    pub fn controller(&self) -> &PiController {
        &self.controller
    }

    /// Runs the simulation to the end of the grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Step`] if the tank cannot be advanced at some step.
    pub fn run(&self) -> Result<ResultSeries, Error> {
        self.run_observed(())
    }

    /// Runs the simulation, emitting an [`Event`] after every step.
    ///
    /// Step `i` (from `0` to `samples - 2`) reads the temperature at sample
    /// `i` together with the setpoint and inlet temperature at index `i`,
    /// runs the controller, advances the tank with the clamped command, and
    /// writes sample `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Step`] if the tank cannot be advanced, or
    /// [`Error::Aborted`] if the observer returns [`Action::Abort`].
    pub fn run_observed<Obs>(&self, mut observer: Obs) -> Result<ResultSeries, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let samples = self.clock.samples();
        let dt = self.clock.dt();

        let span = info_span!("simulation", samples, dt);
        let _enter = span.enter();
        info!(
            initial_temperature = self.initial_temperature,
            "starting simulation"
        );

        let mut series = ResultSeries::new(self.clock.times(), self.initial_temperature);
        let mut temperature = self.initial_temperature;
        let mut state = PiState::default();

        let schedules = self
            .setpoint
            .values()
            .iter()
            .zip(self.inlet_temperature.values())
            .take(samples - 1);

        for (index, (&setpoint, &inlet_temperature)) in schedules.enumerate() {
            let step = index + 1;

            let input = PiInput {
                setpoint,
                measurement: temperature,
                dt,
                state,
            };
            let output = self.controller.step(&input);
            if output.is_saturated() {
                debug!(
                    step,
                    raw_output = output.raw_output,
                    output = output.output,
                    saturation = ?output.saturation,
                    "controller saturated, accumulator held"
                );
            }
            state = output.state;

            temperature = self
                .tank
                .advance(temperature, inlet_temperature, output.output)
                .map_err(|source| {
                    error!(step, error = %source, "tank step failed");
                    Error::Step { step, source }
                })?;

            series.push(temperature, output.error, setpoint, output.output);

            let time = self.clock.time_at(step);
            trace!(step, time, temperature, output = output.output, "step");

            let event = Event {
                step,
                time,
                controller: Snapshot::new(input, output),
                temperature,
                inlet_temperature,
            };
            if let Some(Action::Abort) = observer.observe(&event) {
                info!(step, "simulation aborted by observer");
                return Err(Error::Aborted { step });
            }
        }

        info!(final_temperature = temperature, "simulation complete");
        Ok(series)
    }
}

fn check_schedule(name: &'static str, schedule: &Schedule, samples: usize) -> Result<(), Error> {
    if schedule.len() != samples {
        return Err(Error::ScheduleLength {
            name,
            expected: samples,
            actual: schedule.len(),
        });
    }
    if let Some(index) = schedule.first_non_finite() {
        return Err(Error::ScheduleValue { name, index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use heatloop_components::controller::Saturation;

    /// A short grid where nothing changes: already at the setpoint, zero
    /// bias, so the controller sits at its lower limit and the tank holds.
    fn idle() -> Scenario {
        let samples = 11;
        Scenario {
            duration: 10.0,
            samples,
            initial_temperature: 25.0,
            setpoint: Schedule::constant(25.0, samples),
            inlet_temperature: Schedule::constant(25.0, samples),
            ..Scenario::canonical()
        }
    }

    #[test]
    fn idle_loop_stays_put() {
        let series = Simulation::new(idle()).unwrap().run().unwrap();

        assert_eq!(series.len(), 11);
        for &temperature in series.temperature() {
            assert_relative_eq!(temperature, 25.0);
        }
        assert!(series.output().iter().all(|&output| output == 0.0));
    }

    #[test]
    fn first_step_uses_index_zero_schedules() {
        let scenario = Scenario {
            setpoint: Schedule::from_fn(11, |index| if index == 0 { 40.0 } else { 25.0 }),
            ..idle()
        };
        let simulation = Simulation::new(scenario).unwrap();
        let series = simulation.run().unwrap();

        // e = 15, sum' = 15, Q = 1.5 · 15 + (1.5 / 25.23) · 15
        let expected_output = 22.5 + 1.5 / 25.23 * 15.0;
        assert_relative_eq!(series.setpoint()[1], 40.0);
        assert_relative_eq!(series.error()[1], 15.0);
        assert_relative_eq!(series.output()[1], expected_output, max_relative = 1e-12);
        assert_relative_eq!(
            series.temperature()[1],
            simulation.tank().advance(25.0, 25.0, series.output()[1]).unwrap()
        );
        assert_relative_eq!(series.setpoint()[2], 25.0);
    }

    #[test]
    fn observer_sees_every_step_in_order() {
        let simulation = Simulation::new(idle()).unwrap();

        let mut seen = Vec::new();
        simulation
            .run_observed(|event: &Event| {
                seen.push((event.step, event.time));
                None
            })
            .unwrap();

        let expected: Vec<_> = (1..=10_u32)
            .map(|step| (step as usize, f64::from(step)))
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn observer_can_abort() {
        let simulation = Simulation::new(Scenario::canonical()).unwrap();

        let err = simulation
            .run_observed(|event: &Event| (event.step == 5).then_some(Action::Abort))
            .unwrap_err();

        assert!(matches!(err, Error::Aborted { step: 5 }));
    }

    #[test]
    fn saturation_is_visible_to_observers() {
        let scenario = Scenario {
            controller: heatloop_components::controller::PiConfig {
                gain: 50.0,
                integral_time: 5.0,
                ..Scenario::canonical().controller
            },
            ..Scenario::canonical()
        };
        let simulation = Simulation::new(scenario).unwrap();

        let mut high = 0;
        let mut low = 0;
        let series = simulation
            .run_observed(|event: &Event| {
                let output = event.controller.output;
                match output.saturation {
                    Saturation::High => {
                        assert_eq!(output.output, 500.0);
                        assert_eq!(output.state, event.controller.input.state);
                        high += 1;
                    }
                    Saturation::Low => {
                        assert_eq!(output.output, 0.0);
                        assert_eq!(output.state, event.controller.input.state);
                        low += 1;
                    }
                    Saturation::None => {}
                }
                None
            })
            .unwrap();

        assert!(high > 0, "expected the aggressive tuning to hit the upper limit");
        assert!(low > 0, "expected the aggressive tuning to hit the lower limit");
        assert!(series.output().iter().all(|q| (0.0..=500.0).contains(q)));
    }

    #[test]
    fn rejects_mismatched_schedules() {
        let err = Simulation::new(Scenario {
            inlet_temperature: Schedule::constant(25.0, 300),
            ..Scenario::canonical()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ScheduleLength {
                name: "inlet temperature",
                expected: 301,
                actual: 300
            }
        ));

        let err = Simulation::new(Scenario {
            setpoint: Schedule::constant(50.0, 302),
            ..Scenario::canonical()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ScheduleLength {
                name: "setpoint",
                expected: 301,
                actual: 302
            }
        ));

        let mut setpoint = vec![50.0; 301];
        setpoint[7] = f64::NAN;
        let err = Simulation::new(Scenario {
            setpoint: setpoint.into(),
            ..Scenario::canonical()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ScheduleValue {
                name: "setpoint",
                index: 7
            }
        ));
    }

    #[test]
    fn rejects_non_finite_initial_temperature() {
        let err = Simulation::new(Scenario {
            initial_temperature: f64::INFINITY,
            ..Scenario::canonical()
        })
        .unwrap_err();

        assert!(matches!(err, Error::InitialTemperature(_)));
    }
}
