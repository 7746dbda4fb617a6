//! Audit write and read paths
//!
//! [`AuditService::record`] is best-effort: it builds the entry, tries one
//! append and reports a failure only to the [`WarnSink`]. The caller's own
//! operation must never fail because auditing did. [`AuditService::list`]
//! has no such leniency and returns store errors as they are.

use std::sync::Arc;

use auditrail_common::{AuditError, Result};
use tracing::{debug, warn};

use crate::builder::EntryBuilder;
use crate::clock::SystemClock;
use crate::config::AuditConfig;
use crate::models::{AuditLogEntry, AuditQuery, Page, RawAuditRecord};
use crate::store::AuditStore;

/// Where append failures are reported
pub trait WarnSink: Send + Sync {
    fn warn(&self, message: &str, entry: &AuditLogEntry, error: &AuditError);
}

/// Reports append failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarnSink;

impl WarnSink for TracingWarnSink {
    fn warn(&self, message: &str, entry: &AuditLogEntry, error: &AuditError) {
        warn!(
            action = %entry.action,
            actor = %entry.actor,
            error = %error,
            "{}",
            message
        );
    }
}

/// Audit entry point for application code
pub struct AuditService<S: AuditStore + ?Sized> {
    builder: EntryBuilder,
    store: Arc<S>,
    warn_sink: Arc<dyn WarnSink>,
}

impl<S: AuditStore + ?Sized> Clone for AuditService<S> {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder.clone(),
            store: Arc::clone(&self.store),
            warn_sink: Arc::clone(&self.warn_sink),
        }
    }
}

impl<S: AuditStore + ?Sized> AuditService<S> {
    pub fn new(builder: EntryBuilder, store: Arc<S>) -> Self {
        Self {
            builder,
            store,
            warn_sink: Arc::new(TracingWarnSink),
        }
    }

    /// Service on the system clock with the configured salt and ceilings
    pub fn from_config(config: &AuditConfig, store: Arc<S>) -> Self {
        let builder = EntryBuilder::new(config.salt.clone(), Arc::new(SystemClock))
            .value_max_len(config.metadata_value_max_len);
        Self::new(builder, store)
    }

    pub fn with_warn_sink(mut self, sink: Arc<dyn WarnSink>) -> Self {
        self.warn_sink = sink;
        self
    }

    pub fn builder(&self) -> &EntryBuilder {
        &self.builder
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Build and append an entry. Failures never reach the caller.
    pub async fn record(&self, raw: RawAuditRecord) {
        let entry = self.builder.build(&raw);
        match self.store.append(&entry).await {
            Ok(()) => {
                debug!(
                    action = %entry.action,
                    actor_type = %entry.actor_type,
                    "Audit entry recorded"
                );
            },
            Err(e) => {
                let message = if e.is_store() {
                    "Audit store unavailable, entry dropped"
                } else {
                    "Failed to append audit entry"
                };
                self.warn_sink.warn(message, &entry, &e);
            },
        }
    }

    /// Query the store. Errors are passed through unchanged.
    pub async fn list(&self, query: &AuditQuery) -> Result<Page<AuditLogEntry>> {
        self.store.query(query).await
    }
}
