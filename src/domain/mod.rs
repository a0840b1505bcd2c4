//! Domain layer - Dispatch vocabulary with no I/O
//!
//! This layer contains:
//! - Value Objects: project ids, translation requests, dispatch config,
//!   per-item state and outcomes

pub mod value_objects;
