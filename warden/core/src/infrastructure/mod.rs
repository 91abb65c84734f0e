// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure Layer
//!
//! Remote service adapters. Everything here implements a port from
//! `crate::domain::gateway`.

pub mod datadog;

pub use datadog::{DatadogClient, DatadogConfig};
