//! # fsm-core
//!
//! Core types, traits, and utilities for ESFSM Stock.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Result type aliases
//! - Core traits (Entity, Identifiable)
//! - Quantity and selection types
//! - Configuration and tracing setup

pub mod error;
pub mod result;
pub mod traits;
pub mod types;
pub mod config;
pub mod telemetry;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use types::*;
