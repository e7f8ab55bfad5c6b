// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client construction and list/watch access.

pub mod client;
pub mod resource_client;

pub use client::create_client;
pub use resource_client::{EventStream, KubeResourceClient, ResourceClient};
