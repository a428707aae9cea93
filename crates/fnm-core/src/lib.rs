//! # fnm-core
//!
//! Core types and utilities for talking to a FastNetMon Advanced appliance.
//!
//! This crate provides the foundational pieces shared by the appliance
//! client: the error taxonomy, the response envelope contract, option key
//! enumerations with their string coercion rules, and connection
//! configuration.
//!
//! ## Modules
//!
//! - [`error`] - Error types for transport and appliance-reported failures
//! - [`envelope`] - The appliance's uniform JSON response wrapper
//! - [`options`] - Option key enumerations and value coercion
//! - [`uuid`] - Strongly-typed UUID wrappers for appliance resources
//! - [`config`] - Appliance connection configuration
//! - [`client`] - HTTP client tuning

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod options;
pub mod uuid;

// Re-export commonly used types
pub use error::{Error, Result};
