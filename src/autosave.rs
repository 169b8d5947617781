//! Periodic persistence of aggregate economic state.
//!
//! The engine itself never blocks on persistence: settlement operations are
//! synchronous and CPU-only, while saving happens in a single background task
//! that reads snapshots. One task means runs can never overlap; a save that
//! outlasts its period simply delays the next tick instead of piling up.

use crate::error::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

/// Something that can persist a snapshot of economic state (the external
/// ledger/storage layer). Implementations should read a snapshot and write it
/// out; they must not hold engine locks for the duration of the save.
pub trait Persister: Send + Sync + 'static {
    fn save(&self) -> Result<()>;
}

/// Handle to the background autosave task. Dropping the handle leaves the
/// task running detached; call [`shutdown`][AutoSaver::shutdown] to stop it
/// and release its timer.
pub struct AutoSaver {
    handle: JoinHandle<()>,
    stop: watch::Sender<bool>,
}

impl AutoSaver {
    /// Spawn the autosave task, saving every `frequency` (first save after
    /// one full period). Must be called from within a tokio runtime.
    pub fn spawn<P: Persister>(persister: Arc<P>, frequency: Duration) -> Self {
        let (stop, mut stopped) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(frequency);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick of a fresh interval fires immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match persister.save() {
                            Ok(()) => debug!("autosave complete"),
                            Err(e) => warn!(error = %e, "autosave failed"),
                        }
                    }
                    _ = stopped.changed() => {
                        debug!("autosave task stopping");
                        break;
                    }
                }
            }
        });
        Self { handle, stop }
    }

    /// Stop the task and wait for it to finish, releasing the timer.
    pub async fn shutdown(self) -> Result<()> {
        // the task may already have gone away; nothing to signal then
        let _ = self.stop.send(true);
        self.handle
            .await
            .map_err(|e| Error::TaskFailed(e.to_string()))
    }
}
