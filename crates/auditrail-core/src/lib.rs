//! Auditrail Core Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns caller-supplied descriptions of state-changing actions into
//! privacy-safe audit entries.
//!
//! # Overview
//!
//! - **Sanitization**: free-text fields are stripped of control characters
//!   and capped at fixed ceilings ([`text`])
//! - **Classification**: actor identifiers map to a coarse [`ActorType`]
//! - **Canonicalization**: values of arbitrary shape reduce to an
//!   order-independent form with a stable encoding ([`canonical`])
//! - **Redaction**: sensitive values are replaced by salted SHA-256 tokens
//!   that stay comparable across entries ([`Redactor`])
//! - **Write path**: entries are appended best-effort; a store outage is
//!   reported and swallowed ([`AuditService`])
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use auditrail_core::{AuditConfig, AuditService, InMemoryAuditStore, RawAuditRecord};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AuditConfig::load()?;
//!     let service = AuditService::from_config(&config, Arc::new(InMemoryAuditStore::new()));
//!
//!     let record = RawAuditRecord::new("/users/9", "profile.update")
//!         .target_ref("/users/9")
//!         .sensitive_metadata("email", "user@example.com")
//!         .diff("display_name", "Ann", "Anne");
//!     service.record(record).await;
//!
//!     let page = service.list(&config.default_query()).await?;
//!     println!("{} entries", page.items.len());
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod builder;
pub mod canonical;
pub mod clock;
pub mod config;
pub mod models;
pub mod redact;
pub mod service;
pub mod store;
pub mod text;
pub mod value;

// Re-export commonly used types
pub use actor::classify_actor;
pub use auditrail_common::{AuditError, Result};
pub use builder::EntryBuilder;
pub use canonical::{canonicalize, Canonical};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AuditConfig;
pub use models::{
    ActorType, AuditLogEntry, AuditQuery, DiffValue, Page, RawAuditRecord, Severity,
};
pub use redact::{Redactor, Salt, TOKEN_PREFIX};
pub use service::{AuditService, TracingWarnSink, WarnSink};
pub use store::{AuditStore, InMemoryAuditStore, JsonLinesAuditStore};
pub use text::sanitize;
pub use value::{AuditValue, Field};
