// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch sessions and the completion checks they feed.

pub mod evaluator;
pub mod session;

pub use evaluator::CompletionEvaluator;
pub use session::{ResourceEventHandler, WatchSession};
