//! Background worker that drives a [`ValueAlgorithm`] off the render thread.
//!
//! The worker owns the algorithm (and therefore the grid) outright. Renderers
//! only ever see [`GridView`] copies pushed through a bounded channel; when
//! the renderer lags, the oldest buffered view is evicted to make room, so the
//! numeric loop never blocks and the newest view is always kept.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{debug, info};

use crate::algorithms::ValueAlgorithm;
use crate::error::{GridError, Result};
use crate::view::GridView;

/// How often and how many views the worker publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerOptions {
    /// Publish a view every this many units (sweeps or steps). Zero is treated as one.
    pub publish_every: usize,
    /// Views buffered; once full, the oldest is evicted for each new one.
    pub capacity: usize,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            publish_every: 1,
            capacity: 16,
        }
    }
}

/// Handle to a running worker.
pub struct WorkerHandle<A> {
    views: Receiver<GridView>,
    stop: Arc<AtomicBool>,
    thread: JoinHandle<A>,
}

/// Starts `algorithm` on its own thread.
///
/// An initial view is published before the first unit and a final one after
/// the last. The loop ends when the algorithm reports done or
/// [`WorkerHandle::stop`] is called.
pub fn spawn<A>(mut algorithm: A, options: WorkerOptions) -> WorkerHandle<A>
where
    A: ValueAlgorithm + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(options.capacity.max(1));
    let backlog = rx.clone();
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    let every = options.publish_every.max(1);

    let thread = thread::spawn(move || {
        info!(algorithm = algorithm.name(), "worker started");
        publish(&tx, &backlog, algorithm.view());

        while !algorithm.is_done() && !stop_flag.load(Ordering::Relaxed) {
            algorithm.advance();
            if algorithm.iterations() % every == 0 {
                publish(&tx, &backlog, algorithm.view());
            }
        }

        publish(&tx, &backlog, algorithm.view());
        info!(
            algorithm = algorithm.name(),
            iterations = algorithm.iterations(),
            stopped = stop_flag.load(Ordering::Relaxed),
            "worker finished"
        );
        algorithm
    });

    WorkerHandle {
        views: rx,
        stop,
        thread,
    }
}

fn publish(tx: &Sender<GridView>, backlog: &Receiver<GridView>, mut view: GridView) {
    loop {
        match tx.try_send(view) {
            Ok(()) => return,
            Err(TrySendError::Full(rejected)) => {
                if let Ok(stale) = backlog.try_recv() {
                    debug!(
                        evicted = stale.iteration,
                        iteration = rejected.iteration,
                        "renderer lagging; oldest view evicted"
                    );
                }
                view = rejected;
            }
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}

impl<A> WorkerHandle<A> {
    /// Most recent view published so far, draining older ones. Never blocks.
    pub fn latest(&self) -> Option<GridView> {
        self.views.try_iter().last()
    }

    /// Receiving side of the view channel, for renderers that want every view.
    pub fn views(&self) -> &Receiver<GridView> {
        &self.views
    }

    /// Requests cooperative cancellation after the current unit.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the worker and returns the algorithm with its grid.
    pub fn join(self) -> Result<A> {
        self.thread.join().map_err(|_| GridError::WorkerPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{PolicyEvaluator, TemporalDifferenceWalker};
    use crate::config::{EvaluatorConfig, GridConfig, WalkerConfig};
    use crate::grid::GridWorld;

    fn reference_grid() -> GridWorld {
        GridWorld::from_config(&GridConfig::default()).unwrap()
    }

    #[test]
    fn evaluator_worker_runs_to_convergence() {
        let ev = PolicyEvaluator::new(reference_grid(), EvaluatorConfig::default());
        let handle = spawn(ev, WorkerOptions::default());
        let ev = handle.join().unwrap();
        assert!(ev.is_converged());
    }

    #[test]
    fn views_are_published() {
        let ev = PolicyEvaluator::new(
            reference_grid(),
            EvaluatorConfig {
                max_sweeps: 5,
                convergence_threshold: 0.0,
                ..EvaluatorConfig::default()
            },
        );
        let handle = spawn(
            ev,
            WorkerOptions {
                publish_every: 1,
                capacity: 64,
            },
        );
        let rx = handle.views().clone();
        handle.join().unwrap();
        let iterations: Vec<_> = rx.try_iter().map(|v| v.iteration).collect();
        // initial, one per sweep, final
        assert_eq!(iterations, vec![0, 1, 2, 3, 4, 5, 5]);
    }

    #[test]
    fn stop_cancels_an_unbounded_walk() {
        let walker = TemporalDifferenceWalker::new(
            reference_grid(),
            WalkerConfig {
                max_steps: usize::MAX,
                seed: Some(7),
                ..WalkerConfig::default()
            },
        )
        .unwrap();
        let handle = spawn(walker, WorkerOptions::default());
        handle.stop();
        let walker = handle.join().unwrap();
        assert!(walker.steps() < usize::MAX);
    }

    #[test]
    fn latest_drains_to_newest_view() {
        let ev = PolicyEvaluator::new(
            reference_grid(),
            EvaluatorConfig {
                max_sweeps: 3,
                convergence_threshold: 0.0,
                ..EvaluatorConfig::default()
            },
        );
        let handle = spawn(
            ev,
            WorkerOptions {
                publish_every: 1,
                capacity: 64,
            },
        );
        while !handle.is_finished() {
            thread::yield_now();
        }
        let latest = handle.latest().unwrap();
        assert_eq!(latest.iteration, 3);
        assert!(handle.latest().is_none());
        handle.join().unwrap();
    }

    #[test]
    fn latest_is_final_view_with_small_capacity() {
        let walker = TemporalDifferenceWalker::new(
            reference_grid(),
            WalkerConfig {
                max_steps: 1000,
                seed: Some(11),
                ..WalkerConfig::default()
            },
        )
        .unwrap();
        let handle = spawn(
            walker,
            WorkerOptions {
                publish_every: 1,
                capacity: 4,
            },
        );
        while !handle.is_finished() {
            thread::yield_now();
        }
        assert_eq!(handle.latest().unwrap().iteration, 1000);
        handle.join().unwrap();
    }

    #[test]
    fn full_channel_keeps_newest_views_in_order() {
        let ev = PolicyEvaluator::new(
            reference_grid(),
            EvaluatorConfig {
                max_sweeps: 6,
                convergence_threshold: 0.0,
                ..EvaluatorConfig::default()
            },
        );
        let handle = spawn(
            ev,
            WorkerOptions {
                publish_every: 1,
                capacity: 3,
            },
        );
        let rx = handle.views().clone();
        handle.join().unwrap();
        let iterations: Vec<_> = rx.try_iter().map(|v| v.iteration).collect();
        assert_eq!(iterations, vec![5, 6, 6]);
    }
}
