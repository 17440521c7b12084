//! # API Shared
//!
//! Shared wire types and utilities for the Heart Failure Detection API.
//!
//! Contains:
//! - Response/request wire types (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `hfd-core` (which assembles recommendation payloads) and the
//! `hfd-run` server binary for common response shapes.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
