//! Core configuration and error handling for Vigil.
//!
//! This crate provides the shared foundation used by the other Vigil crates:
//! - [`VigilError`] — unified error type using `thiserror`
//! - [`VigilConfig`] — configuration layered from `.vigil.toml`, environment
//!   variables, and CLI flags

mod config;
mod error;

pub use config::{
    DiffConfig, LlmConfig, VigilConfig, ENV_BASE_REF, ENV_MODEL, ENV_TOKEN, ENV_URL,
};
pub use error::VigilError;

/// A convenience `Result` type for Vigil operations.
pub type Result<T> = std::result::Result<T, VigilError>;
