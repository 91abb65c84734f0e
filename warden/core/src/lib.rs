// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Warden Core
//!
//! Team-ownership enforcement for Datadog resources.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain model, sweep pipelines, and Datadog adapters
//!
//! The crate is layered the usual way: `domain` holds the pure model and the
//! gateway ports, `application` holds the sweep services, `infrastructure`
//! holds the Datadog REST implementations of the ports.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
