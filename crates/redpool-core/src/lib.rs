//! # redpool-core
//!
//! Core crate for Redpool. Contains configuration schemas, the unified
//! error system, and logging initialization.
//!
//! This crate has **no** internal dependencies on other Redpool crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
