/// A value per sample index, fixed before a run starts.
///
/// Schedules drive the setpoint and the inlet temperature. They are plain
/// sequences: value `i` is the one in effect while stepping from sample `i`
/// to sample `i + 1`.
///
/// # Examples
///
/// ```
/// use heatloop_sim::Schedule;
///
/// let inlet = Schedule::step_change(6, 3, 25.0, 15.0);
///
/// assert_eq!(inlet.values(), &[25.0, 25.0, 25.0, 15.0, 15.0, 15.0]);
/// assert_eq!(inlet.value_at(2), Some(25.0));
/// assert_eq!(inlet.value_at(6), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Schedule {
    values: Vec<f64>,
}

impl Schedule {
    /// The same value at every index.
    #[must_use]
    pub fn constant(value: f64, len: usize) -> Self {
        Self {
            values: vec![value; len],
        }
    }

    /// `before` at indices below `at`, `after` from `at` onward.
    #[must_use]
    pub fn step_change(len: usize, at: usize, before: f64, after: f64) -> Self {
        Self::from_fn(len, |index| if index < at { before } else { after })
    }

    /// Values computed from the index.
    #[must_use]
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> f64) -> Self {
        Self {
            values: (0..len).map(f).collect(),
        }
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the first non-finite value, if any.
    pub(crate) fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|value| !value.is_finite())
    }
}

impl From<Vec<f64>> for Schedule {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}
