//! Turns a [`RawAuditRecord`] into a finished [`AuditLogEntry`]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::actor::classify_actor;
use crate::clock::{Clock, SystemClock};
use crate::models::{AuditLogEntry, DiffValue, RawAuditRecord, Severity};
use crate::redact::{Redactor, Salt};
use crate::text::{
    sanitize, ACTION_MAX_LEN, ACTOR_MAX_LEN, KEY_MAX_LEN, METADATA_VALUE_MAX_LEN,
    REQUEST_ID_MAX_LEN, TARGET_REF_MAX_LEN, USER_AGENT_MAX_LEN,
};
use crate::value::AuditValue;

/// Builds audit entries under a fixed salt and clock.
///
/// Building never fails. Garbled input degrades to empty or omitted
/// fields, and sensitive values only ever leave as redaction tokens.
#[derive(Clone)]
pub struct EntryBuilder {
    redactor: Redactor,
    clock: Arc<dyn Clock>,
    value_max_len: usize,
}

impl std::fmt::Debug for EntryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryBuilder")
            .field("redactor", &self.redactor)
            .field("value_max_len", &self.value_max_len)
            .finish_non_exhaustive()
    }
}

impl EntryBuilder {
    pub fn new(salt: impl Into<Salt>, clock: Arc<dyn Clock>) -> Self {
        Self {
            redactor: Redactor::new(salt),
            clock,
            value_max_len: METADATA_VALUE_MAX_LEN,
        }
    }

    /// Builder on the system clock
    pub fn with_system_clock(salt: impl Into<Salt>) -> Self {
        Self::new(salt, Arc::new(SystemClock))
    }

    /// Override the ceiling for non-sensitive text values
    pub fn value_max_len(mut self, max_len: usize) -> Self {
        self.value_max_len = max_len;
        self
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    pub fn build(&self, record: &RawAuditRecord) -> AuditLogEntry {
        let created_at = record
            .occurred_at
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or_else(|| self.clock.now());

        let ip = record.ip.trim();
        let ip_hash = (!ip.is_empty()).then(|| self.redactor.hash_str(ip));

        let actor = sanitize(&record.actor, ACTOR_MAX_LEN);
        let actor_type = classify_actor(&record.actor_type_hint, &actor);

        AuditLogEntry {
            actor,
            actor_type,
            action: sanitize(&record.action, ACTION_MAX_LEN),
            target_ref: sanitize(&record.target_ref, TARGET_REF_MAX_LEN),
            severity: Severity::from_hint(&record.severity_hint),
            request_id: sanitize(&record.request_id, REQUEST_ID_MAX_LEN),
            user_agent: sanitize(&record.user_agent, USER_AGENT_MAX_LEN),
            created_at,
            metadata: self.build_metadata(record),
            diff: self.build_diff(record),
            ip_hash,
        }
    }

    fn build_metadata(&self, record: &RawAuditRecord) -> Option<BTreeMap<String, AuditValue>> {
        let sensitive = sensitive_set(&record.sensitive_metadata_keys);
        let out = collect_keyed(&record.metadata, |key, value| {
            if sensitive.contains(&key.to_lowercase()) {
                AuditValue::Text(self.redactor.hash(value))
            } else {
                self.shallow_sanitize(value)
            }
        });
        (!out.is_empty()).then_some(out)
    }

    fn build_diff(&self, record: &RawAuditRecord) -> Option<BTreeMap<String, DiffValue>> {
        let sensitive = sensitive_set(&record.sensitive_diff_keys);
        let out = collect_keyed(&record.diff, |key, change| {
            if sensitive.contains(&key.to_lowercase()) {
                DiffValue {
                    before: AuditValue::Text(self.redactor.hash(&change.before)),
                    after: AuditValue::Text(self.redactor.hash(&change.after)),
                }
            } else {
                DiffValue {
                    before: self.shallow_sanitize(&change.before),
                    after: self.shallow_sanitize(&change.after),
                }
            }
        });
        (!out.is_empty()).then_some(out)
    }

    /// Only text is truncated and stripped; structured values pass through.
    fn shallow_sanitize(&self, value: &AuditValue) -> AuditValue {
        match value {
            AuditValue::Text(s) => AuditValue::Text(sanitize(s, self.value_max_len)),
            AuditValue::Opaque { type_name, repr } => AuditValue::Opaque {
                type_name: type_name.clone(),
                repr: sanitize(repr, self.value_max_len),
            },
            other => other.clone(),
        }
    }
}

/// Lower-cased, sanitized, deduplicated sensitive key names
fn sensitive_set(keys: &[String]) -> HashSet<String> {
    keys.iter()
        .map(|k| sanitize(k, KEY_MAX_LEN).to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Sanitize the keys of `input` and map each value through `transform`.
///
/// Raw keys are visited in sorted order, so when two raw keys sanitize to
/// the same key the outcome does not depend on hash map iteration order.
fn collect_keyed<V, T>(
    input: &HashMap<String, V>,
    mut transform: impl FnMut(&str, &V) -> T,
) -> BTreeMap<String, T> {
    let mut raw: Vec<(&String, &V)> = input.iter().collect();
    raw.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = BTreeMap::new();
    for (raw_key, value) in raw {
        let key = sanitize(raw_key, KEY_MAX_LEN);
        if key.is_empty() {
            debug!(raw_key_len = raw_key.len(), "Dropping audit key that sanitizes to empty");
            continue;
        }
        if out.contains_key(&key) {
            debug!(key = %key, "Dropping audit key that collides after sanitization");
            continue;
        }
        let transformed = transform(&key, value);
        out.insert(key, transformed);
    }
    out
}
