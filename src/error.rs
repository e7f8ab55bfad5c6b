// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::TargetKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaitError {
    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("No wait target configured, set --jobname and/or --secretname")]
    NoTargets,

    #[error("More than one {0} target configured")]
    DuplicateTarget(TargetKind),

    #[error("Listing {kind}s in namespace {namespace} failed: {source}")]
    ListFailed {
        kind: TargetKind,
        namespace: String,
        source: kube::Error,
    },

    #[error("List of {kind}s in namespace {namespace} carried no resource version")]
    MissingResourceVersion { kind: TargetKind, namespace: String },

    #[error("Watch of {kind}s in namespace {namespace} failed: {message}")]
    WatchFailed {
        kind: TargetKind,
        namespace: String,
        message: String,
    },

    #[error("Watch of {kind}s in namespace {namespace} closed before the wait completed")]
    WatchClosed { kind: TargetKind, namespace: String },

    #[error("Watch session task failed: {0}")]
    SessionAborted(String),
}

pub type Result<T> = std::result::Result<T, WaitError>;
