//! # Strata Server Library
//!
//! Dependency injection wiring and startup helpers for the server binary.

pub mod di;
pub mod startup;
