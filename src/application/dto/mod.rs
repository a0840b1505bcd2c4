//! Data Transfer Objects - For API boundaries

pub mod translation_project;

pub use translation_project::*;
