use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use tracing::{debug, info};

use crate::{Error, ResultSeries, Scenario, Simulation};

/// Runs independent scenarios in parallel on a bounded set of worker threads.
///
/// At most [`thread::available_parallelism`] workers are spawned, and never
/// more than there are scenarios. Each run owns its own tank, controller and
/// accumulator, so runs never share state. Results are returned in the same
/// order as `scenarios`, and a failure in one run does not affect the others.
///
/// ```
/// use heatloop_sim::{Scenario, run_batch};
///
/// let sweep: Vec<_> = [0.5, 1.5, 3.0]
///     .into_iter()
///     .map(|gain| {
///         let mut scenario = Scenario::canonical();
///         scenario.controller.gain = gain;
///         scenario
///     })
///     .collect();
///
/// let results = run_batch(&sweep);
/// assert_eq!(results.len(), 3);
/// assert!(results.iter().all(Result::is_ok));
/// ```
#[must_use]
pub fn run_batch(scenarios: &[Scenario]) -> Vec<Result<ResultSeries, Error>> {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    run_batch_with(scenarios, workers)
}

/// Runs `scenarios` on at most `workers` threads.
///
/// Workers claim scenarios through a shared index, so a slow run never holds
/// up the rest of its chunk.
pub(crate) fn run_batch_with(
    scenarios: &[Scenario],
    workers: usize,
) -> Vec<Result<ResultSeries, Error>> {
    let workers = workers.clamp(1, scenarios.len().max(1));
    info!(runs = scenarios.len(), workers, "starting batch");

    let next = AtomicUsize::new(0);

    let mut finished: Vec<(usize, Result<ResultSeries, Error>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let next = &next;
                scope.spawn(move || {
                    let mut done = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(scenario) = scenarios.get(index) else {
                            break;
                        };
                        debug!(worker, index, "running scenario");
                        let result = Simulation::new(scenario.clone()).and_then(|sim| sim.run());
                        done.push((index, result));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(done) => done,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });

    finished.sort_unstable_by_key(|(index, _)| *index);
    finished.into_iter().map(|(_, result)| result).collect()
}
