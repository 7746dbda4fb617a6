//! Shared test helpers for audit integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use auditrail_core::{
    AuditError, AuditLogEntry, AuditQuery, AuditStore, EntryBuilder, FixedClock, Page, Result,
    WarnSink,
};
use chrono::{DateTime, TimeZone, Utc};

pub const TEST_SALT: &str = "s1";

/// The instant every test clock reports
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Entry builder with the test salt and a fixed clock
pub fn test_builder() -> EntryBuilder {
    EntryBuilder::new(TEST_SALT, Arc::new(FixedClock(test_now())))
}

/// One captured warning
#[derive(Debug, Clone)]
pub struct Warning {
    pub message: String,
    pub action: String,
    pub error: String,
}

/// Records every warning it receives
#[derive(Debug, Default)]
pub struct CapturingWarnSink {
    warnings: Mutex<Vec<Warning>>,
}

impl CapturingWarnSink {
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl WarnSink for CapturingWarnSink {
    fn warn(&self, message: &str, entry: &AuditLogEntry, error: &AuditError) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(Warning {
                message: message.to_string(),
                action: entry.action.clone(),
                error: error.to_string(),
            });
        }
    }
}

/// A store that is always down
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl AuditStore for FailingStore {
    async fn append(&self, _entry: &AuditLogEntry) -> Result<()> {
        Err(AuditError::store("append", "connection refused"))
    }

    async fn query(&self, _query: &AuditQuery) -> Result<Page<AuditLogEntry>> {
        Err(AuditError::store("query", "connection refused"))
    }
}
