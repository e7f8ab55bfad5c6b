// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! List-then-watch session for one kind in one namespace.

use crate::cache::LocalCache;
use crate::error::{Result, WaitError};
use crate::kubernetes::{EventStream, ResourceClient};
use crate::signal::TerminationSignal;
use crate::types::{ChangeEvent, ObservedObject, Snapshot, TargetKind};
use futures::StreamExt;
use tracing::{debug, info};

/// Callbacks invoked for every non-stale change a session observes.
///
/// Sessions run on spawned tasks and are borrowed across awaits, so handlers
/// must be `Sync` as well as `Send`.
pub trait ResourceEventHandler: Send + Sync {
    fn on_add(&mut self, _object: &ObservedObject) {}
    fn on_update(&mut self, _object: &ObservedObject) {}
    fn on_delete(&mut self, _object: &ObservedObject) {}
}

pub struct WatchSession {
    kind: TargetKind,
    namespace: String,
    cache: LocalCache,
    handlers: Vec<Box<dyn ResourceEventHandler>>,
}

impl WatchSession {
    pub fn new(kind: TargetKind, namespace: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            cache: LocalCache::new(),
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: impl ResourceEventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// List the current objects and prepare a watch from the list's version.
    ///
    /// The watch request itself is deferred until the returned stream is polled.
    pub async fn start<C: ResourceClient>(&self, client: &C) -> Result<(Snapshot, EventStream)> {
        let snapshot = client.list(self.kind, &self.namespace).await?;
        let events = client.watch(self.kind, &self.namespace, &snapshot.resource_version);
        Ok((snapshot, events))
    }

    /// Replay `snapshot`, then consume `events` until `signal` is set.
    ///
    /// The snapshot is dispatched in full before the stream is polled, so a
    /// target that is already terminal never opens the watch. A stream error,
    /// or the stream ending, before the signal is set is an error.
    pub async fn run(
        &mut self,
        snapshot: Snapshot,
        mut events: EventStream,
        signal: &TerminationSignal,
    ) -> Result<()> {
        info!(
            "Watching {}s in namespace {} from version {} ({} listed)",
            self.kind,
            self.namespace,
            snapshot.resource_version,
            snapshot.objects.len()
        );

        for object in snapshot.objects {
            if signal.is_set() {
                return Ok(());
            }
            // After a relist, known objects are updates rather than additions
            let event = if self.cache.contains(&object.key()) {
                ChangeEvent::Updated(object)
            } else {
                ChangeEvent::Added(object)
            };
            self.dispatch(event);
        }

        loop {
            if signal.is_set() {
                return Ok(());
            }

            let next = tokio::select! {
                biased;
                _ = signal.wait() => return Ok(()),
                next = events.next() => next,
            };

            match next {
                Some(Ok(event)) => self.dispatch(event),
                Some(Err(e)) => return Err(e),
                None => {
                    return Err(WaitError::WatchClosed {
                        kind: self.kind,
                        namespace: self.namespace.clone(),
                    })
                }
            }
        }
    }

    fn dispatch(&mut self, event: ChangeEvent) {
        if !self.cache.apply(&event) {
            let object = event.object();
            debug!(
                "Skipping stale event for {} {}/{} at version {}",
                object.kind, object.namespace, object.name, object.resource_version
            );
            return;
        }

        for handler in &mut self.handlers {
            match &event {
                ChangeEvent::Added(object) => handler.on_add(object),
                ChangeEvent::Updated(object) => handler.on_update(object),
                ChangeEvent::Deleted(object) => handler.on_delete(object),
            }
        }
    }
}
