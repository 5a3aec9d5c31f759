//! Timer-driven, cancellable analysis loop

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::core::runtime::SignalRuntime;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,
    #[error("scheduler already running")]
    AlreadyRunning,
}

/// Runs `SignalRuntime::run_cycle` every `interval` until stopped
pub struct Scheduler {
    runtime: Arc<SignalRuntime>,
    interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    /// Schedule cycles every `evaluation_interval_seconds` of the runtime config
    pub fn new(runtime: Arc<SignalRuntime>) -> Result<Self, SchedulerError> {
        let interval_seconds = runtime.config().evaluation_interval_seconds;
        if interval_seconds == 0 {
            return Err(SchedulerError::Disabled);
        }
        Ok(Self::with_interval(
            runtime,
            Duration::from_secs(interval_seconds),
        ))
    }

    /// Like `new` but with an arbitrary period
    pub fn with_interval(runtime: Arc<SignalRuntime>, interval: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            runtime,
            interval,
            shutdown_tx,
            handle: Mutex::new(None),
        }
    }

    pub async fn start(&self) -> Result<(), SchedulerError> {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.shutdown_tx.send_replace(false);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let runtime = self.runtime.clone();
        let period = self.interval;

        *handle = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(
                interval_ms = period.as_millis() as u64,
                symbols = ?runtime.config().symbols,
                "Scheduler: started"
            );

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                // Shutdown also interrupts a cycle stuck on a slow fetch
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        warn!("Scheduler: shutdown requested mid-cycle, abandoning it");
                        break;
                    }
                    _ = runtime.run_cycle() => {}
                }
            }

            info!("Scheduler: loop exited");
        }));

        Ok(())
    }

    /// Signal the loop to stop and wait for it to exit
    pub async fn stop(&self) {
        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            self.shutdown_tx.send_replace(true);
            if let Err(e) = handle.await {
                warn!(error = %e, "Scheduler: task ended abnormally");
            }
            info!("Scheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}
