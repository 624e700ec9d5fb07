use thiserror::Error;

/// A fixed time grid of `samples` points spanning `[0, duration]`.
///
/// The step between samples is `duration / (samples - 1)`, so the first
/// sample is at `0` and the last is at `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    duration: f64,
    samples: usize,
}

/// Error returned when a time grid cannot be built.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ClockError {
    #[error("at least 2 samples are required, got {0}")]
    Samples(usize),

    #[error("duration must be finite and strictly positive, got {0}")]
    Duration(f64),
}

impl SimulationClock {
    /// Creates a validated time grid.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Samples`] if `samples < 2`, or
    /// [`ClockError::Duration`] if `duration` is not finite and positive.
    pub fn new(duration: f64, samples: usize) -> Result<Self, ClockError> {
        if samples < 2 {
            return Err(ClockError::Samples(samples));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ClockError::Duration(duration));
        }
        Ok(Self { duration, samples })
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Step between consecutive samples.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dt(&self) -> f64 {
        self.duration / (self.samples - 1) as f64
    }

    /// Time of sample `index`.
    ///
    /// Computed as `index · dt` so every time is independent of rounding in
    /// its neighbours.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.dt()
    }

    /// All sample times in order.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        (0..self.samples).map(|index| self.time_at(index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn canonical_grid_has_unit_steps() {
        let clock = SimulationClock::new(300.0, 301).unwrap();

        assert_relative_eq!(clock.dt(), 1.0);
        assert_relative_eq!(clock.time_at(150), 150.0);

        let times = clock.times();
        assert_eq!(times.len(), 301);
        assert_relative_eq!(times[0], 0.0);
        assert_relative_eq!(times[300], 300.0);
    }

    #[test]
    fn two_samples_span_the_whole_duration() {
        let clock = SimulationClock::new(2.5, 2).unwrap();

        assert_eq!(clock.times(), vec![0.0, 2.5]);
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert_eq!(SimulationClock::new(10.0, 1), Err(ClockError::Samples(1)));
        assert_eq!(SimulationClock::new(10.0, 0), Err(ClockError::Samples(0)));
        assert_eq!(
            SimulationClock::new(0.0, 11),
            Err(ClockError::Duration(0.0))
        );
        assert_eq!(
            SimulationClock::new(-5.0, 11),
            Err(ClockError::Duration(-5.0))
        );
        assert!(matches!(
            SimulationClock::new(f64::NAN, 11),
            Err(ClockError::Duration(_))
        ));
    }
}
