// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::target::TargetKind;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Secret;
use kube::core::PartialObjectMeta;
use kube::ResourceExt;
use std::cmp::Ordering;
use std::fmt;

/// Opaque position in an object's change history.
///
/// The API server hands these out as decimal integers, so versions are ordered
/// by length first and then lexically, which matches numeric order without
/// parsing. The empty version is "unknown" and sorts before everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceVersion(String);

impl ResourceVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }
}

impl Ord for ResourceVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ResourceVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of an object in the local cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub kind: TargetKind,
    pub namespace: String,
    pub name: String,
}

/// Job counters relevant to completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStatusSnapshot {
    pub active: u32,
    pub succeeded: u32,
    pub failed: u32,
}

impl fmt::Display for JobStatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active={} succeeded={} failed={}",
            self.active, self.succeeded, self.failed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSnapshot {
    Job(JobStatusSnapshot),
    /// Secrets are waited on for existence only, so no content is kept
    Secret,
}

/// Immutable view of one version of a cluster object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedObject {
    pub kind: TargetKind,
    pub namespace: String,
    pub name: String,
    pub resource_version: ResourceVersion,
    pub status: StatusSnapshot,
}

impl ObservedObject {
    pub fn key(&self) -> ObjectKey {
        ObjectKey {
            kind: self.kind,
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }

    /// Job counters, `None` for other kinds
    pub fn job_status(&self) -> Option<&JobStatusSnapshot> {
        match &self.status {
            StatusSnapshot::Job(status) => Some(status),
            StatusSnapshot::Secret => None,
        }
    }

    pub fn from_job(job: &Job) -> Self {
        let status = job.status.as_ref();
        let count = |value: Option<i32>| value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0);

        Self {
            kind: TargetKind::Job,
            namespace: job.namespace().unwrap_or_default(),
            name: job.name_any(),
            resource_version: ResourceVersion::new(job.resource_version().unwrap_or_default()),
            status: StatusSnapshot::Job(JobStatusSnapshot {
                active: count(status.and_then(|s| s.active)),
                succeeded: count(status.and_then(|s| s.succeeded)),
                failed: count(status.and_then(|s| s.failed)),
            }),
        }
    }

    /// Secrets are only fetched as metadata, their data is never needed
    pub fn from_secret(secret: &PartialObjectMeta<Secret>) -> Self {
        Self {
            kind: TargetKind::Secret,
            namespace: secret.namespace().unwrap_or_default(),
            name: secret.name_any(),
            resource_version: ResourceVersion::new(secret.resource_version().unwrap_or_default()),
            status: StatusSnapshot::Secret,
        }
    }
}

/// One entry of a watch stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    Added(ObservedObject),
    Updated(ObservedObject),
    Deleted(ObservedObject),
}

impl ChangeEvent {
    pub fn object(&self) -> &ObservedObject {
        match self {
            ChangeEvent::Added(object) | ChangeEvent::Updated(object) | ChangeEvent::Deleted(object) => {
                object
            }
        }
    }
}

/// Result of a list call: the objects plus the version to start watching from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub resource_version: ResourceVersion,
    pub objects: Vec<ObservedObject>,
}
