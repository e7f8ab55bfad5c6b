// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from a kubeconfig file or the in-cluster service account

use crate::config::Config;
use crate::error::{Result, WaitError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Create a Kubernetes client.
#[instrument(skip(config))]
pub async fn create_client(config: &Config) -> Result<Client> {
    let client_config = resolve_config(config).await?;

    info!("Using cluster at {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| WaitError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Pick the client configuration.
///
/// An explicit kubeconfig or context that cannot be used falls back to the
/// in-cluster configuration; with neither the standard inference chain applies.
async fn resolve_config(config: &Config) -> Result<KConfig> {
    let context = config.context.as_deref();
    let loaded = match (&config.kubeconfig, context) {
        (Some(path), _) => load_kubeconfig(path, context).await,
        (None, Some(context)) => load_context(context).await,
        (None, None) => {
            return KConfig::infer()
                .await
                .map_err(|e| WaitError::KubeconfigError(format!("Failed to infer config: {}", e)))
        }
    };

    match loaded {
        Ok(c) => Ok(c),
        Err(e) => {
            warn!("{}, trying in-cluster config", e);
            KConfig::incluster().map_err(|incluster| {
                WaitError::KubeconfigError(format!(
                    "{}; in-cluster config failed too: {}",
                    e, incluster
                ))
            })
        }
    }
}

/// Select a context from the default kubeconfig (KUBECONFIG or ~/.kube/config)
async fn load_context(context: &str) -> Result<KConfig> {
    let options = KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    };

    KConfig::from_kubeconfig(&options).await.map_err(|e| {
        WaitError::KubeconfigError(format!("Failed to use context {}: {}", context, e))
    })
}

/// Read and parse a kubeconfig file
async fn load_kubeconfig(path: &Path, context: Option<&str>) -> Result<KConfig> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        WaitError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let kubeconfig: Kubeconfig = serde_yaml::from_str(&raw)
        .map_err(|e| WaitError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    KConfig::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| WaitError::KubeconfigError(format!("Failed to create config: {}", e)))
}
