//! Typed asynchronous client for the FastNetMon Advanced REST API.
//!
//! Provides the appliance client ([`FnmClient`]), the host group and
//! FlowSpec wire models, and the schema of the attack callback payload the
//! appliance pushes to webhooks.

#![deny(missing_docs)]

pub mod callback;
pub mod client;
pub mod models;

pub use callback::{AttackDetails, CallbackAction, CallbackEvent, PacketDumpEntry};
pub use client::{FnmClient, FnmClientBuilder};
pub use models::{FlowSpecAction, FlowSpecRule, HostGroup, HostGroupSettings};

/// Convenient result alias that reuses the shared appliance error type.
pub type Result<T> = fnm_core::Result<T>;
