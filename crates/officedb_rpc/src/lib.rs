//! RPC gateway for people, tickets and projects.
//!
//! # Responsibility
//! - Expose typed request/response calls over the core entity services.
//! - Carry per-call deadlines and cancellation into the store layer.
//! - Resolve gateway settings from the environment.

pub mod config;
pub mod context;
pub mod gateway;
pub mod messages;
pub mod status;

pub use config::{ConfigError, GatewayConfig};
pub use context::{CallContext, CancelToken};
pub use gateway::OfficeGateway;
pub use messages::*;
pub use status::{Code, Status};
