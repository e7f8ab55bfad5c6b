// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::object::{ObservedObject, ResourceVersion};
use std::fmt;

/// The kinds of cluster objects that can be waited on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetKind {
    Job,
    Secret,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Job => f.write_str("Job"),
            TargetKind::Secret => f.write_str("Secret"),
        }
    }
}

/// A named object the process waits for. Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub kind: TargetKind,
    pub namespace: String,
    pub name: String,
}

impl WatchTarget {
    pub fn job(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Job,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn secret(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Secret,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Whether an observed object is this target
    pub fn matches(&self, object: &ObservedObject) -> bool {
        object.kind == self.kind && object.namespace == self.namespace && object.name == self.name
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}

/// The observation that ended the wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub kind: TargetKind,
    pub namespace: String,
    pub name: String,
    pub resource_version: ResourceVersion,
}

impl Completion {
    pub fn from_object(object: &ObservedObject) -> Self {
        Self {
            kind: object.kind,
            namespace: object.namespace.clone(),
            name: object.name.clone(),
            resource_version: object.resource_version.clone(),
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TargetKind::Job => write!(f, "job {}/{} is completed", self.namespace, self.name),
            TargetKind::Secret => write!(f, "secret {}/{} exists", self.namespace, self.name),
        }
    }
}
