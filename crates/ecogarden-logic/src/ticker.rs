//! Background tick driver for hosts without their own loop.
//!
//! Spawns a thread that ticks a shared session at a fixed interval. Dropping
//! or stopping the driver joins the thread, so no tick lands after teardown.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::{ConfigError, GardenConfig};
use crate::session::GardenSession;

/// A session guarded by one mutex covering grid, missions and economy together.
pub type SharedSession = Arc<Mutex<GardenSession>>;

pub fn share(session: GardenSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}

#[derive(Debug)]
pub struct TickDriver {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    /// Tick `session` at `config.tick_interval_secs`.
    pub fn from_config(session: SharedSession, config: &GardenConfig) -> io::Result<Self> {
        let interval = config.tick_interval().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, ConfigError::InvalidTickInterval)
        })?;
        Self::spawn(session, interval)
    }

    /// Tick `session` every `interval` until stopped.
    pub fn spawn(session: SharedSession, interval: Duration) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let delta = interval.as_secs_f64();

        let handle = thread::Builder::new()
            .name("garden-tick".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let report = match session.lock() {
                    Ok(mut guard) => guard.tick(delta),
                    Err(_) => {
                        log::error!("garden session lock poisoned, stopping ticks");
                        break;
                    }
                };
                for slot in report.newly_grown() {
                    log::info!("slot {} is ready to harvest", slot);
                }
            })?;

        log::debug!("tick driver started ({:?} interval)", interval);
        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop ticking and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender wakes the thread with `Disconnected`.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("tick thread panicked");
            }
            log::debug!("tick driver stopped");
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
