//! Application layer - Use cases, ports and DTOs
//!
//! This layer contains:
//! - Services: retrying requester, batch dispatcher, outcome aggregation and
//!   the translation project use case
//! - Ports: traits implemented by infrastructure adapters
//! - DTOs: request/response bodies for the HTTP boundary

pub mod dto;
pub mod ports;
pub mod services;
