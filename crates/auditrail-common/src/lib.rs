//! Auditrail Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging setup for the Auditrail workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`AuditError`] and the [`Result`] alias used by
//!   every store and service in the workspace
//! - **Logging**: [`logging::LogConfig`] and [`logging::init_logging`] for
//!   `tracing` based structured logs
//!
//! # Example
//!
//! ```no_run
//! use auditrail_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     let _guard = init_logging(&config)?;
//!     tracing::info!("audit core ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{AuditError, Result};
