//! Background sampling worker.
//!
//! A dedicated single-worker Tokio runtime ticks the [`Sampler`] at a fixed period and
//! publishes each snapshot into a [`SharedSnapshot`]. Readers never wait on the sensor query.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::config::SamplingConfig;
use crate::error::{MonitorError, Result};

use super::extract::ExtractionPolicy;
use super::reading::{MemoryProbe, SensorReader};
use super::sampler::Sampler;
use super::snapshot::{SensorSnapshot, SharedSnapshot};

const MIN_PERIOD: Duration = Duration::from_millis(10);

struct Worker {
    runtime: tokio::runtime::Runtime,
    shutdown_tx: broadcast::Sender<()>,
    /// Set on stop; a cycle still blocked in the sensor query drops its result
    stopped: Arc<AtomicBool>,
}

pub struct SamplingEngine {
    sampler: Arc<Mutex<Sampler>>,
    snapshot: SharedSnapshot,
    period: Duration,
    stop_timeout: Duration,
    worker: Option<Worker>,
}

impl SamplingEngine {
    pub fn new(
        reader: Box<dyn SensorReader>,
        memory_probe: Box<dyn MemoryProbe>,
        config: &SamplingConfig,
    ) -> Self {
        let policy = ExtractionPolicy {
            cpu_temp_sensors: config.cpu_temp_sensors.clone(),
            gpu_priority: config.gpu_priority.clone(),
        };

        Self {
            sampler: Arc::new(Mutex::new(Sampler::new(
                reader,
                memory_probe,
                policy,
                config.window_capacity,
            ))),
            snapshot: SharedSnapshot::new(),
            period: config.interval().max(MIN_PERIOD),
            stop_timeout: config.stop_timeout(),
            worker: None,
        }
    }

    /// Spawn the background worker. Calling it again while running is a no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Ok(());
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .thread_name("sensor-sampler")
            .build()
            .map_err(|e| MonitorError::runtime(format!("Failed to spawn sampling worker: {}", e)))?;

        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        let stopped = Arc::new(AtomicBool::new(false));

        runtime.spawn(sampling_task(
            Arc::clone(&self.sampler),
            self.snapshot.clone(),
            self.period,
            Arc::clone(&stopped),
            shutdown_rx,
        ));

        log::info!("Sampling engine started ({:?} period)", self.period);

        self.worker = Some(Worker {
            runtime,
            shutdown_tx,
            stopped,
        });

        Ok(())
    }

    /// Signal the worker and wait up to the stop timeout for it to finish
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        worker.stopped.store(true, Ordering::SeqCst);
        // send() only fails when the task already exited
        let _ = worker.shutdown_tx.send(());
        worker.runtime.shutdown_timeout(self.stop_timeout);

        log::info!("Sampling engine stopped");
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Copy of the most recent snapshot, default before the first successful cycle
    pub fn get_snapshot(&self) -> SensorSnapshot {
        self.snapshot.load()
    }

    /// Handle for consumers that outlive a borrow of the engine
    pub fn shared_snapshot(&self) -> SharedSnapshot {
        self.snapshot.clone()
    }
}

impl Drop for SamplingEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn sampling_task(
    sampler: Arc<Mutex<Sampler>>,
    snapshot: SharedSnapshot,
    period: Duration,
    stopped: Arc<AtomicBool>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let sampler = Arc::clone(&sampler);
                let shared = snapshot.clone();
                let stopped = Arc::clone(&stopped);

                // The query may block for a while, keep it off the timer thread
                let cycle = tokio::task::spawn_blocking(move || {
                    sampler.lock().run_cycle(&shared, &stopped)
                });

                tokio::select! {
                    result = cycle => {
                        if let Err(e) = result {
                            log::error!("Sampling cycle aborted: {}", e);
                        }
                    }
                    _ = shutdown.recv() => break,
                }
            }
            _ = shutdown.recv() => break,
        }
    }

    log::debug!("Sampling task exited");
}
