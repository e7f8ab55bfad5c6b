// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-memory mirror of the objects seen by one watch session.

use crate::types::{ChangeEvent, ObjectKey, ObservedObject, ResourceVersion};
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Entry {
    Live(ObservedObject),
    /// Deleted at this version; older events for the key are stale
    Deleted(ResourceVersion),
}

impl Entry {
    fn resource_version(&self) -> &ResourceVersion {
        match self {
            Entry::Live(object) => &object.resource_version,
            Entry::Deleted(version) => version,
        }
    }
}

/// Holds, per key, the highest resource version seen so far.
#[derive(Debug, Default)]
pub struct LocalCache {
    entries: HashMap<ObjectKey, Entry>,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an event into the cache.
    ///
    /// Returns `false` when the event is stale or a duplicate, i.e. its version
    /// is not newer than what the cache already holds for the key. Stale events
    /// leave the cache untouched.
    pub fn apply(&mut self, event: &ChangeEvent) -> bool {
        let object = event.object();
        let key = object.key();

        if let Some(current) = self.entries.get(&key) {
            if !object.resource_version.is_unknown()
                && object.resource_version <= *current.resource_version()
            {
                return false;
            }
        }

        let entry = match event {
            ChangeEvent::Added(object) | ChangeEvent::Updated(object) => Entry::Live(object.clone()),
            ChangeEvent::Deleted(object) => Entry::Deleted(object.resource_version.clone()),
        };
        self.entries.insert(key, entry);
        true
    }

    pub fn get(&self, key: &ObjectKey) -> Option<&ObservedObject> {
        match self.entries.get(key) {
            Some(Entry::Live(object)) => Some(object),
            _ => None,
        }
    }

    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, Entry::Live(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
