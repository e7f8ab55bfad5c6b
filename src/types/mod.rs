// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Wait targets and the read-only views of cluster objects observed while waiting.

pub mod object;
pub mod target;

pub use object::{
    ChangeEvent, JobStatusSnapshot, ObjectKey, ObservedObject, ResourceVersion, Snapshot,
    StatusSnapshot,
};
pub use target::{Completion, TargetKind, WatchTarget};
