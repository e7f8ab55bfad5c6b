// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Completion checks for the configured wait target.

use crate::signal::TerminationSignal;
use crate::types::{Completion, ObservedObject, TargetKind, WatchTarget};
use crate::watch::session::ResourceEventHandler;
use tracing::{debug, info};

/// Fires the termination signal once the target reaches its terminal state.
///
/// A Job is terminal once at least one pod succeeded; a Secret is terminal as
/// soon as it is added. Everything not matching the target is ignored.
pub struct CompletionEvaluator {
    target: WatchTarget,
    signal: TerminationSignal,
    fired: bool,
}

impl CompletionEvaluator {
    pub fn new(target: WatchTarget, signal: TerminationSignal) -> Self {
        Self {
            target,
            signal,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    fn is_target(&self, object: &ObservedObject) -> bool {
        !self.fired && self.target.matches(object)
    }

    fn check_job(&mut self, object: &ObservedObject) {
        let Some(status) = object.job_status() else {
            return;
        };

        if status.succeeded > 0 {
            self.fire(object);
        } else {
            info!(
                "Waiting for job {}/{}, current status: {}",
                object.namespace, object.name, status
            );
        }
    }

    fn fire(&mut self, object: &ObservedObject) {
        self.fired = true;
        let completion = Completion::from_object(object);
        if self.signal.set(completion) {
            info!("{} is terminal at version {}", self.target, object.resource_version);
        } else {
            debug!("{} is terminal but the wait already completed", self.target);
        }
    }
}

impl ResourceEventHandler for CompletionEvaluator {
    fn on_add(&mut self, object: &ObservedObject) {
        if !self.is_target(object) {
            return;
        }
        match self.target.kind {
            TargetKind::Job => self.check_job(object),
            TargetKind::Secret => self.fire(object),
        }
    }

    fn on_update(&mut self, object: &ObservedObject) {
        if !self.is_target(object) {
            return;
        }
        match self.target.kind {
            TargetKind::Job => self.check_job(object),
            TargetKind::Secret => debug!("Ignoring update of {}", self.target),
        }
    }

    fn on_delete(&mut self, object: &ObservedObject) {
        if !self.is_target(object) {
            return;
        }
        match self.target.kind {
            TargetKind::Job => info!(
                "Job {}/{} was deleted before completing, still waiting",
                object.namespace, object.name
            ),
            TargetKind::Secret => debug!("Ignoring delete of {}", self.target),
        }
    }
}
