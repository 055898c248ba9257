//! Centralized error handling
//!
//! # Error Categories
//!
//! - **Source Errors**: origin connectivity, cache and fallback file access
//! - **Configuration Errors**: invalid config file or environment values
//!
//! # Usage
//!
//! ```rust
//! use m3u_catalog::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
