// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kube_wait::config::Config;
use kube_wait::controller::WaitController;
use kube_wait::kubernetes::{create_client, KubeResourceClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, defaulting to info so progress lines are visible
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::parse();

    // Validate targets before touching the cluster
    let targets = config.targets()?;

    let client = create_client(&config).await?;
    info!("Connected to Kubernetes cluster");

    let controller = WaitController::new(
        KubeResourceClient::new(client),
        config.stream_failure_policy(),
    );
    let completion = controller.run(&targets).await?;

    info!("{}!", completion);
    Ok(())
}
