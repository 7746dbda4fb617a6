//! Audit data models

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::value::AuditValue;

// ============================================================================
// Audit Query Constants
// ============================================================================

/// Default number of audit entries returned per query
pub const DEFAULT_AUDIT_QUERY_LIMIT: usize = 100;

/// Maximum number of audit entries that can be returned in a single query.
pub const MAX_AUDIT_QUERY_LIMIT: usize = 1000;

/// Coarse category of whoever performed the audited action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    User,
    Staff,
    System,
    Service,
    #[default]
    Unknown,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Staff => "staff",
            Self::System => "system",
            Self::Service => "service",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ActorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Normalize a free-form severity hint.
    ///
    /// `warn`/`warning` map to [`Severity::Warn`], `error` to
    /// [`Severity::Error`]; anything else, including an empty hint, is
    /// [`Severity::Info`].
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_lowercase().as_str() {
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A before/after pair describing one changed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DiffValue {
    pub before: AuditValue,
    pub after: AuditValue,
}

impl DiffValue {
    pub fn new(before: impl Into<AuditValue>, after: impl Into<AuditValue>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Caller-supplied description of a state-changing action.
///
/// Nothing about this record is trusted: every field is sanitized,
/// classified or hashed by [`crate::EntryBuilder`] before it is stored.
#[derive(Debug, Clone, Default)]
pub struct RawAuditRecord {
    /// Actor identifier such as `/users/42`, `staff:alice` or `system`
    pub actor: String,
    /// Optional explicit actor category
    pub actor_type_hint: String,
    /// Action name, e.g. `profile.update`
    pub action: String,
    /// Reference to the affected resource
    pub target_ref: String,
    /// Severity hint (`info`, `warn`, `warning`, `error`)
    pub severity_hint: String,
    pub request_id: String,
    pub user_agent: String,
    /// Client IP, always hashed
    pub ip: String,
    /// When the action happened; the builder's clock is used when absent
    pub occurred_at: Option<DateTime<FixedOffset>>,
    pub metadata: HashMap<String, AuditValue>,
    pub diff: HashMap<String, DiffValue>,
    /// Metadata keys whose values must be redacted (case-insensitive)
    pub sensitive_metadata_keys: Vec<String>,
    /// Diff keys whose before/after values must be redacted (case-insensitive)
    pub sensitive_diff_keys: Vec<String>,
}

impl RawAuditRecord {
    /// Start a record for `actor` performing `action`
    pub fn new(actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn actor_type_hint(mut self, hint: impl Into<String>) -> Self {
        self.actor_type_hint = hint.into();
        self
    }

    pub fn target_ref(mut self, target_ref: impl Into<String>) -> Self {
        self.target_ref = target_ref.into();
        self
    }

    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.severity_hint = severity.into();
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    pub fn occurred_at(mut self, at: DateTime<FixedOffset>) -> Self {
        self.occurred_at = Some(at);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<AuditValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn sensitive_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<AuditValue>,
    ) -> Self {
        let key = key.into();
        self.sensitive_metadata_keys.push(key.clone());
        self.metadata.insert(key, value.into());
        self
    }

    pub fn diff(
        mut self,
        key: impl Into<String>,
        before: impl Into<AuditValue>,
        after: impl Into<AuditValue>,
    ) -> Self {
        self.diff.insert(key.into(), DiffValue::new(before, after));
        self
    }

    pub fn sensitive_diff(
        mut self,
        key: impl Into<String>,
        before: impl Into<AuditValue>,
        after: impl Into<AuditValue>,
    ) -> Self {
        let key = key.into();
        self.sensitive_diff_keys.push(key.clone());
        self.diff.insert(key, DiffValue::new(before, after));
        self
    }
}

/// A finished, privacy-safe audit entry as handed to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub actor: String,
    pub actor_type: ActorType,
    pub action: String,
    pub target_ref: String,
    pub severity: Severity,
    pub request_id: String,
    pub user_agent: String,
    /// Always UTC
    pub created_at: DateTime<Utc>,
    /// Sanitized values or redaction tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, AuditValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<BTreeMap<String, DiffValue>>,
    /// Redaction token of the client IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_hash: Option<String>,
}

/// Query parameters for audit logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditQuery {
    /// Filter by target reference
    pub target_ref: Option<String>,
    /// Filter by actor
    pub actor: Option<String>,
    /// Filter by actor type
    pub actor_type: Option<ActorType>,
    /// Filter by action
    pub action: Option<String>,
    /// Start timestamp for range query (inclusive)
    pub start_time: Option<DateTime<Utc>>,
    /// End timestamp for range query (inclusive)
    pub end_time: Option<DateTime<Utc>>,
    /// Maximum number of results to return
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Continuation token from a previous page
    #[serde(default)]
    pub cursor: Option<String>,
}

fn default_limit() -> usize {
    DEFAULT_AUDIT_QUERY_LIMIT
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            target_ref: None,
            actor: None,
            actor_type: None,
            action: None,
            start_time: None,
            end_time: None,
            limit: default_limit(),
            cursor: None,
        }
    }
}

impl AuditQuery {
    /// The effective page size, clamped to `1..=max`
    pub fn effective_limit(&self, max: usize) -> usize {
        self.limit.clamp(1, max.max(1))
    }

    /// Whether `entry` passes every filter that is set
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        fn eq(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().map_or(true, |f| f == value)
        }

        eq(&self.target_ref, &entry.target_ref)
            && eq(&self.actor, &entry.actor)
            && eq(&self.action, &entry.action)
            && self.actor_type.map_or(true, |t| t == entry.actor_type)
            && self.start_time.map_or(true, |t| entry.created_at >= t)
            && self.end_time.map_or(true, |t| entry.created_at <= t)
    }
}

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Pass back as [`AuditQuery::cursor`] to fetch the next page
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}
