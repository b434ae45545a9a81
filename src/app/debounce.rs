// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/debounce.rs
//
// Cancellable-timer debouncer for coalescing bursts of events.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Coalesces rapid events into one deferred action.
///
/// Each `schedule` call cancels the pending action and starts the quiet
/// period over; only the action scheduled last runs, once the quiet
/// period elapses without another call.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `action` to run after `quiet_period`, cancelling any
    /// previously scheduled action.
    pub fn schedule<F>(&mut self, quiet_period: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            action.await;
        }));
    }

    /// Cancel the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether an action is scheduled and has not yet run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
