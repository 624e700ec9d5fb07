/// Aligned output sequences of one run.
///
/// Every sequence has one entry per sample. Index 0 holds the initial
/// temperature; `error`, `setpoint` and `output` are `0.0` there because no
/// control action has happened yet. Entry `i + 1` is written by step `i` and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultSeries {
    time: Vec<f64>,
    temperature: Vec<f64>,
    error: Vec<f64>,
    setpoint: Vec<f64>,
    output: Vec<f64>,
}

impl ResultSeries {
    /// Starts a series holding only the initial sample.
    pub(crate) fn new(time: Vec<f64>, initial_temperature: f64) -> Self {
        let capacity = time.len();

        let mut series = Self {
            time,
            temperature: Vec::with_capacity(capacity),
            error: Vec::with_capacity(capacity),
            setpoint: Vec::with_capacity(capacity),
            output: Vec::with_capacity(capacity),
        };
        series.push(initial_temperature, 0.0, 0.0, 0.0);
        series
    }

    pub(crate) fn push(&mut self, temperature: f64, error: f64, setpoint: f64, output: f64) {
        self.temperature.push(temperature);
        self.error.push(error);
        self.setpoint.push(setpoint);
        self.output.push(output);
    }

    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    #[must_use]
    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    /// Tracking error `setpoint - temperature` seen by the controller.
    #[must_use]
    pub fn error(&self) -> &[f64] {
        &self.error
    }

    #[must_use]
    pub fn setpoint(&self) -> &[f64] {
        &self.setpoint
    }

    /// Clamped heater power applied to the tank.
    #[must_use]
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    #[must_use]
    pub fn final_temperature(&self) -> Option<f64> {
        self.temperature.last().copied()
    }
}
