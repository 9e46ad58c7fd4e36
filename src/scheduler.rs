//! The periodic scheduler: an owned, cancellable ticking task.
//!
//! One run fires immediately at startup, then once per configured
//! interval. Runs execute to completion inside the tick; a shutdown
//! request takes effect at the next loop turn rather than cancelling a
//! run mid-flight. A re-entrancy guard skips a tick whenever the previous
//! run is somehow still active, so runs never overlap even if a run
//! outlives the interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::config::SamplerConfig;
use crate::notify::Notifier;
use crate::pipeline::llm::QuoteExtractor;
use crate::run::run_guarded;

/// Owns everything a scheduled run needs; consumed by [`Scheduler::start`].
pub struct Scheduler {
    config: SamplerConfig,
    extractor: Arc<dyn QuoteExtractor>,
    notifier: Arc<dyn Notifier>,
}

impl Scheduler {
    pub fn new(
        config: SamplerConfig,
        extractor: Arc<dyn QuoteExtractor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            extractor,
            notifier,
        }
    }

    /// Spawn the ticking task and return a handle for shutdown.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let busy = AtomicBool::new(false);
            let mut ticker = interval(self.config.interval());
            // A run that overruns its interval delays the next tick
            // instead of producing a burst of catch-up ticks.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                "Scheduler started: one run now, then every {} minute(s)",
                self.config.interval_minutes
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if busy.swap(true, Ordering::SeqCst) {
                            warn!("Previous run still active; skipping this tick");
                            continue;
                        }
                        run_guarded(
                            &self.config,
                            self.extractor.as_ref(),
                            self.notifier.as_ref(),
                        )
                        .await;
                        busy.store(false, Ordering::SeqCst);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("Scheduler stopping");
                            break;
                        }
                    }
                }
            }
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running scheduler.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Request shutdown and wait for the ticking task to finish.
    ///
    /// A run in progress completes first; no run is cancelled mid-flight.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }

    /// Wait forever (until the task is aborted externally or panics).
    pub async fn join(self) {
        let _ = self.task.await;
    }
}
