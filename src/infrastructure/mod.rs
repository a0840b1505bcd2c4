//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Odin: content fragment reads and localisation requests
//! - IMS: access token validation
//! - Clock: tokio-backed delays
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod clock;
pub mod config;
pub mod http;
pub mod ims;
pub mod odin;
pub mod state;
