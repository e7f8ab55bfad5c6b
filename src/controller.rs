// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs one watch session per target and waits for the first completion.

use crate::error::{Result, WaitError};
use crate::kubernetes::ResourceClient;
use crate::signal::TerminationSignal;
use crate::types::{Completion, WatchTarget};
use crate::watch::{CompletionEvaluator, WatchSession};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

/// What a session does when its watch stream breaks before completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamFailurePolicy {
    /// Fail the whole run
    #[default]
    FailFast,
    /// Start over with a fresh list+watch, at most `max_restarts` times
    Relist { max_restarts: u32 },
}

impl StreamFailurePolicy {
    fn allows_restart(&self, restarts: u32) -> bool {
        match self {
            StreamFailurePolicy::FailFast => false,
            StreamFailurePolicy::Relist { max_restarts } => restarts < *max_restarts,
        }
    }
}

pub struct WaitController<C> {
    client: Arc<C>,
    policy: StreamFailurePolicy,
}

impl<C: ResourceClient> WaitController<C> {
    pub fn new(client: C, policy: StreamFailurePolicy) -> Self {
        Self {
            client: Arc::new(client),
            policy,
        }
    }

    /// Wait until any target reaches its terminal state.
    ///
    /// Targets are validated before the cluster is contacted. Each call gets
    /// its own termination signal; once it is set every session is stopped.
    /// The first fatal session error stops the others and is returned.
    pub async fn run(&self, targets: &[WatchTarget]) -> Result<Completion> {
        validate_targets(targets)?;

        let signal = TerminationSignal::new();
        let mut sessions = JoinSet::new();
        for target in targets {
            info!("Waiting for {}", target);
            sessions.spawn(watch_target(
                self.client.clone(),
                target.clone(),
                signal.clone(),
                self.policy,
            ));
        }

        loop {
            tokio::select! {
                biased;
                completion = signal.wait() => {
                    sessions.abort_all();
                    return Ok(completion);
                }
                joined = sessions.join_next() => match joined {
                    // Sessions only finish cleanly after the signal is set
                    Some(Ok(Ok(()))) => {}
                    Some(Ok(Err(e))) => {
                        sessions.abort_all();
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        sessions.abort_all();
                        return Err(WaitError::SessionAborted(e.to_string()));
                    }
                    None => return Ok(signal.wait().await),
                },
            }
        }
    }
}

fn validate_targets(targets: &[WatchTarget]) -> Result<()> {
    if targets.is_empty() {
        return Err(WaitError::NoTargets);
    }

    let mut kinds = HashSet::new();
    for target in targets {
        if !kinds.insert(target.kind) {
            return Err(WaitError::DuplicateTarget(target.kind));
        }
    }
    Ok(())
}

/// Session task for a single target
#[instrument(skip_all, fields(target = %target))]
async fn watch_target<C: ResourceClient>(
    client: Arc<C>,
    target: WatchTarget,
    signal: TerminationSignal,
    policy: StreamFailurePolicy,
) -> Result<()> {
    let mut session = WatchSession::new(target.kind, target.namespace.clone());
    session.add_handler(CompletionEvaluator::new(target, signal.clone()));

    let mut restarts = 0;
    loop {
        if signal.is_set() {
            return Ok(());
        }

        let (snapshot, events) = session.start(client.as_ref()).await?;
        match session.run(snapshot, events, &signal).await {
            Ok(()) => return Ok(()),
            Err(e) if policy.allows_restart(restarts) => {
                restarts += 1;
                warn!("{}, restarting with a fresh list (attempt {})", e, restarts);
            }
            Err(e) => return Err(e),
        }
    }
}
