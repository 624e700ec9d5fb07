use heatloop_components::controller::Saturation;
use heatloop_core::Observer;
use heatloop_sim::Event;

/// Counts the simulation steps where the controller output was clamped.
///
/// Every counted step is one where the integral accumulator was rolled back.
/// Never returns an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaturationCounter {
    pub high: usize,
    pub low: usize,
    /// First step that hit either limit.
    pub first: Option<usize>,
}

impl SaturationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.high + self.low
    }
}

impl<A> Observer<Event, A> for SaturationCounter {
    fn observe(&mut self, event: &Event) -> Option<A> {
        match event.controller.output.saturation {
            Saturation::High => self.high += 1,
            Saturation::Low => self.low += 1,
            Saturation::None => return None,
        }
        self.first.get_or_insert(event.step);
        None
    }
}

impl<A> Observer<Event, A> for &mut SaturationCounter {
    fn observe(&mut self, event: &Event) -> Option<A> {
        (**self).observe(event)
    }
}
