mod config;
mod types;

use std::convert::Infallible;

use heatloop_core::{
    Model,
    constraint::{Constrained, StrictlyPositive},
};

pub use config::{PiConfig, PiConfigError};
pub use types::{PiInput, PiOutput, PiState, Saturation};

/// A discrete proportional-integral controller with clamped output.
///
/// Each step computes
///
/// ```text
/// e      = setpoint - measurement
/// sum'   = sum + e · dt
/// Q      = bias + Ki · e + (Ki / taui) · sum'
/// ```
///
/// and clamps `Q` to `[output_min, output_max]`. If the raw command reaches
/// either limit (inclusive), the provisional `sum'` is discarded and the
/// accumulator stays at `sum`. Otherwise `sum'` is committed.
///
/// The controller itself is immutable. The accumulator travels in
/// [`PiInput::state`] and comes back in [`PiOutput::state`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiController {
    gain: f64,
    integral_time: Constrained<f64, StrictlyPositive>,
    bias: f64,
    output_min: f64,
    output_max: f64,
}

impl PiController {
    /// Creates a controller from validated tuning.
    ///
    /// # Errors
    ///
    /// Returns a [`PiConfigError`] if any value is not finite, the integral
    /// time is not strictly positive, or `output_min >= output_max`.
    pub fn new(config: PiConfig) -> Result<Self, PiConfigError> {
        let PiConfig {
            gain,
            integral_time,
            bias,
            output_min,
            output_max,
        } = config;

        if !gain.is_finite() {
            return Err(PiConfigError::Gain(gain));
        }
        let integral_time =
            Constrained::new(integral_time).map_err(PiConfigError::IntegralTime)?;
        if !bias.is_finite() {
            return Err(PiConfigError::Bias(bias));
        }
        if !output_min.is_finite() || !output_max.is_finite() || output_min >= output_max {
            return Err(PiConfigError::OutputLimits {
                min: output_min,
                max: output_max,
            });
        }

        Ok(Self {
            gain,
            integral_time,
            bias,
            output_min,
            output_max,
        })
    }

    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    #[must_use]
    pub fn integral_time(&self) -> f64 {
        self.integral_time.into_inner()
    }

    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Output limits as `(min, max)`.
    #[must_use]
    pub fn limits(&self) -> (f64, f64) {
        (self.output_min, self.output_max)
    }

    /// Runs one controller step.
    #[must_use]
    pub fn step(&self, input: &PiInput) -> PiOutput {
        let PiInput {
            setpoint,
            measurement,
            dt,
            state,
        } = *input;

        let error = setpoint - measurement;
        let provisional = state.integral + error * dt;
        let raw_output =
            self.bias + self.gain * error + self.gain / self.integral_time() * provisional;

        let (output, saturation, state) = if raw_output >= self.output_max {
            (self.output_max, Saturation::High, state)
        } else if raw_output <= self.output_min {
            (self.output_min, Saturation::Low, state)
        } else {
            (
                raw_output,
                Saturation::None,
                PiState {
                    integral: provisional,
                },
            )
        };

        PiOutput {
            error,
            raw_output,
            output,
            saturation,
            state,
        }
    }
}

impl Model for PiController {
    type Input = PiInput;
    type Output = PiOutput;
    type Error = Infallible;

    fn call(&self, input: &PiInput) -> Result<PiOutput, Infallible> {
        Ok(self.step(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn config() -> PiConfig {
        PiConfig {
            gain: 1.0,
            integral_time: 1.0,
            bias: 0.0,
            output_min: 0.0,
            output_max: 100.0,
        }
    }

    fn input(setpoint: f64, measurement: f64, integral: f64) -> PiInput {
        PiInput {
            setpoint,
            measurement,
            dt: 1.0,
            state: PiState { integral },
        }
    }

    #[test]
    fn linear_region_commits_the_accumulator() {
        let controller = PiController::new(PiConfig {
            gain: 1.5,
            integral_time: 25.0,
            bias: 10.0,
            ..config()
        })
        .unwrap();

        let output = controller.step(&PiInput {
            setpoint: 50.0,
            measurement: 30.0,
            dt: 2.0,
            state: PiState { integral: 10.0 },
        });

        // e = 20, sum' = 10 + 40 = 50, Q = 10 + 30 + 0.06 · 50 = 43
        assert_relative_eq!(output.error, 20.0);
        assert_relative_eq!(output.raw_output, 43.0);
        assert_relative_eq!(output.output, 43.0);
        assert_eq!(output.saturation, Saturation::None);
        assert_relative_eq!(output.state.integral, 50.0);
        assert!(!output.is_saturated());
    }

    #[test]
    fn high_saturation_rolls_back() {
        let controller = PiController::new(config()).unwrap();

        let output = controller.step(&input(200.0, 0.0, 5.0));

        assert_eq!(output.saturation, Saturation::High);
        assert_eq!(output.output, 100.0);
        assert!(output.raw_output > 100.0);
        assert_eq!(output.state, PiState { integral: 5.0 });
    }

    #[test]
    fn low_saturation_rolls_back() {
        let controller = PiController::new(config()).unwrap();

        let output = controller.step(&input(0.0, 40.0, -3.0));

        assert_eq!(output.saturation, Saturation::Low);
        assert_eq!(output.output, 0.0);
        assert_eq!(output.state, PiState { integral: -3.0 });
    }

    #[test]
    fn exactly_on_a_limit_counts_as_saturated() {
        let controller = PiController::new(PiConfig {
            output_max: 20.0,
            ..config()
        })
        .unwrap();

        // e = 10, sum' = 10, Q = 10 + 10 = 20
        let output = controller.step(&input(10.0, 0.0, 0.0));
        assert_eq!(output.raw_output, 20.0);
        assert_eq!(output.saturation, Saturation::High);
        assert_eq!(output.state, PiState::default());

        let output = controller.step(&input(0.0, 0.0, 0.0));
        assert_eq!(output.raw_output, 0.0);
        assert_eq!(output.saturation, Saturation::Low);
    }

    #[test]
    fn recovers_from_saturation_without_windup() {
        let controller = PiController::new(config()).unwrap();

        let mut state = PiState::default();
        for _ in 0..50 {
            let output = controller.step(&PiInput {
                state,
                ..input(500.0, 0.0, 0.0)
            });
            assert!(output.is_saturated());
            state = output.state;
        }

        // The error reverses sign and the output leaves the upper limit at once.
        let output = controller.step(&PiInput {
            state,
            ..input(40.0, 30.0, 0.0)
        });
        assert_eq!(output.saturation, Saturation::None);
        assert_relative_eq!(output.output, 20.0);
    }

    #[test]
    fn model_call_matches_step() {
        let controller = PiController::new(config()).unwrap();
        let input = input(10.0, 4.0, 1.0);

        assert_eq!(controller.call(&input).unwrap(), controller.step(&input));
    }

    #[test]
    fn rejects_invalid_config() {
        assert_eq!(
            PiController::new(PiConfig {
                gain: f64::NAN,
                ..config()
            })
            .unwrap_err()
            .to_string(),
            "gain must be finite, got NaN"
        );
        assert!(matches!(
            PiController::new(PiConfig {
                integral_time: 0.0,
                ..config()
            }),
            Err(PiConfigError::IntegralTime(_))
        ));
        assert!(matches!(
            PiController::new(PiConfig {
                bias: f64::INFINITY,
                ..config()
            }),
            Err(PiConfigError::Bias(_))
        ));
        assert_eq!(
            PiController::new(PiConfig {
                output_min: 100.0,
                ..config()
            }),
            Err(PiConfigError::OutputLimits {
                min: 100.0,
                max: 100.0
            })
        );
        assert!(matches!(
            PiController::new(PiConfig {
                output_min: f64::NEG_INFINITY,
                ..config()
            }),
            Err(PiConfigError::OutputLimits { .. })
        ));
    }

    proptest! {
        #[test]
        fn output_stays_within_limits_and_rollback_is_exact(
            gain in 0.01..50.0_f64,
            integral_time in 0.1..100.0_f64,
            bias in -50.0..50.0_f64,
            setpoint in -100.0..100.0_f64,
            measurement in -100.0..100.0_f64,
            integral in -1000.0..1000.0_f64,
            dt in 0.01..10.0_f64,
        ) {
            let controller = PiController::new(PiConfig {
                gain,
                integral_time,
                bias,
                output_min: -20.0,
                output_max: 80.0,
            })
            .unwrap();

            let before = PiState { integral };
            let output = controller.step(&PiInput { setpoint, measurement, dt, state: before });

            prop_assert!((-20.0..=80.0).contains(&output.output));
            match output.saturation {
                Saturation::High => {
                    prop_assert_eq!(output.output, 80.0);
                    prop_assert_eq!(output.state, before);
                }
                Saturation::Low => {
                    prop_assert_eq!(output.output, -20.0);
                    prop_assert_eq!(output.state, before);
                }
                Saturation::None => {
                    prop_assert_eq!(output.output, output.raw_output);
                    prop_assert_eq!(
                        output.state.integral,
                        integral + (setpoint - measurement) * dt
                    );
                }
            }
        }
    }
}
