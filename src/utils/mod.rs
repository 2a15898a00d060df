//! Shared utilities: configuration, error types and hex decoding.

pub mod config;
pub mod error;
pub mod hex;
