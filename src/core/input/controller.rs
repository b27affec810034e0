use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::{MonitorError, Result};

use super::gesture::{ControlAction, GestureMachine, InputEvent};

/// Upper bound on how long the controller thread waits before re-checking for shutdown
const IDLE_WAIT: Duration = Duration::from_millis(200);

/// Consumes input events from a channel, runs them through the gesture state machine and
/// invokes the action handler on its own thread.
///
/// An inert controller (no input backend available) accepts no events and never fires.
pub struct InputController {
    events_tx: Option<Sender<InputEvent>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputController {
    pub fn spawn<F>(hold_duration: Duration, handler: F) -> Result<Self>
    where
        F: FnMut(ControlAction) + Send + 'static,
    {
        let (events_tx, events_rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let machine = GestureMachine::new(hold_duration);

        let thread_stop = Arc::clone(&stop);
        let thread = std::thread::Builder::new()
            .name("input-controller".to_string())
            .spawn(move || controller_loop(machine, events_rx, thread_stop, handler))
            .map_err(|e| MonitorError::input(format!("Failed to spawn input thread: {}", e)))?;

        Ok(Self {
            events_tx: Some(events_tx),
            stop,
            thread: Some(thread),
        })
    }

    pub fn inert() -> Self {
        Self {
            events_tx: None,
            stop: Arc::new(AtomicBool::new(true)),
            thread: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.thread.is_some()
    }

    /// Sender for an input backend, `None` when inert
    pub fn sender(&self) -> Option<Sender<InputEvent>> {
        self.events_tx.clone()
    }

    /// Stop the controller thread; any armed hold is canceled without firing
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.events_tx = None;

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Input controller thread panicked");
            }
        }
    }
}

impl Drop for InputController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn controller_loop<F>(
    mut machine: GestureMachine,
    events_rx: Receiver<InputEvent>,
    stop: Arc<AtomicBool>,
    mut handler: F,
) where
    F: FnMut(ControlAction),
{
    while !stop.load(Ordering::SeqCst) {
        let now = Instant::now();

        if let Some(action) = machine.poll(now) {
            handler(action);
        }

        let wait = machine
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_WAIT)
            .min(IDLE_WAIT);

        match events_rx.recv_timeout(wait) {
            Ok(event) => {
                if let Some(action) = machine.handle(event, Instant::now()) {
                    handler(action);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    machine.cancel_pending();
    log::debug!("Input controller exited");
}
