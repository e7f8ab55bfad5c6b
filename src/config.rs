// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env, DEFAULT_NAMESPACE};
use crate::controller::StreamFailurePolicy;
use crate::error::{Result, WaitError};
use crate::types::WatchTarget;
use clap::Parser;
use std::path::PathBuf;

/// Wait for a Kubernetes Job to succeed and/or a Secret to exist, then exit
#[derive(Parser, Debug, Clone)]
#[command(name = "kube-wait", version)]
pub struct Config {
    /// Kubeconfig file. If it cannot be used, the in-cluster config is tried.
    /// Without it the usual KUBECONFIG / ~/.kube/config / in-cluster chain applies.
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use. Without --kubeconfig it is looked up in
    /// KUBECONFIG or ~/.kube/config.
    #[arg(long, env = env::CONTEXT)]
    pub context: Option<String>,

    /// Namespace of the job and secret
    #[arg(short, long, env = env::NAMESPACE, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Job to wait for until it succeeds
    #[arg(long = "jobname", env = env::JOB_NAME)]
    pub job_name: Option<String>,

    /// Secret to wait for until it exists
    #[arg(long = "secretname", env = env::SECRET_NAME)]
    pub secret_name: Option<String>,

    /// Fresh list+watch attempts per session after a broken watch (0 fails fast).
    /// The API server closes idle watches after its own timeout, so set this
    /// when waiting on Jobs that may run longer than that.
    #[arg(long, env = env::MAX_WATCH_RESTARTS, default_value_t = 0)]
    pub max_watch_restarts: u32,
}

impl Config {
    /// The targets to wait for. Blank names count as unset.
    pub fn targets(&self) -> Result<Vec<WatchTarget>> {
        let name = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let mut targets = Vec::new();
        if let Some(job) = name(&self.job_name) {
            targets.push(WatchTarget::job(&self.namespace, job));
        }
        if let Some(secret) = name(&self.secret_name) {
            targets.push(WatchTarget::secret(&self.namespace, secret));
        }

        if targets.is_empty() {
            return Err(WaitError::NoTargets);
        }
        Ok(targets)
    }

    pub fn stream_failure_policy(&self) -> StreamFailurePolicy {
        match self.max_watch_restarts {
            0 => StreamFailurePolicy::FailFast,
            max_restarts => StreamFailurePolicy::Relist { max_restarts },
        }
    }
}
