// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "default";

/// Environment variables mirroring the command line flags
pub mod env {
    pub const CONTEXT: &str = "KUBE_CONTEXT";
    pub const NAMESPACE: &str = "WAIT_NAMESPACE";
    pub const JOB_NAME: &str = "WAIT_JOB_NAME";
    pub const SECRET_NAME: &str = "WAIT_SECRET_NAME";
    pub const MAX_WATCH_RESTARTS: &str = "WAIT_MAX_WATCH_RESTARTS";
}
