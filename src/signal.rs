// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Single-fire termination signal shared by the watch sessions and the controller.

use crate::types::Completion;
use std::sync::Arc;
use tokio::sync::watch;

/// Set at most once per run. Every clone observes the same final value.
#[derive(Debug, Clone)]
pub struct TerminationSignal {
    tx: Arc<watch::Sender<Option<Completion>>>,
}

impl TerminationSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Set the signal. Returns `true` only for the call that actually set it;
    /// concurrent or later calls are no-ops.
    pub fn set(&self, completion: Completion) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(completion);
            true
        })
    }

    pub fn is_set(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// The winning completion, if the signal has been set
    pub fn completion(&self) -> Option<Completion> {
        self.tx.borrow().clone()
    }

    /// Suspend until the signal is set.
    pub async fn wait(&self) -> Completion {
        let mut rx = self.tx.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(completion) = current {
                return completion;
            }
            // `self` keeps the sender alive, so this only returns on a change
            let _ = rx.changed().await;
        }
    }
}

impl Default for TerminationSignal {
    fn default() -> Self {
        Self::new()
    }
}
