//! Order-independent canonical form of an [`AuditValue`]
//!
//! Two values that are equal up to map iteration order canonicalize to
//! the same [`Canonical`], and therefore encode to the same bytes. This is
//! what makes redaction hashes reproducible across runs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::ser::{Error as _, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::value::AuditValue;

/// Canonical shape of a value
#[derive(Debug, Clone, PartialEq)]
pub enum Canonical {
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Canonical>),
    /// Key/value pairs sorted by key
    Pairs(Vec<(String, Canonical)>),
    /// A value with no structure, identified by its type
    Tagged { type_name: String, repr: String },
}

/// Convert a value into its canonical form.
///
/// Maps become key-sorted pairs, with an empty map collapsing to an empty
/// list. Records become name-sorted pairs of their non-skipped fields,
/// using the renamed name where one is set. Lists keep their order.
pub fn canonicalize(value: &AuditValue) -> Canonical {
    match value {
        AuditValue::Nil => Canonical::Nil,
        AuditValue::Bool(b) => Canonical::Bool(*b),
        AuditValue::Int(i) => Canonical::Int(*i),
        AuditValue::Uint(u) => Canonical::Uint(*u),
        AuditValue::Float(f) => Canonical::Float(*f),
        AuditValue::Text(s) => Canonical::Text(s.clone()),
        AuditValue::Bytes(b) => Canonical::Bytes(b.clone()),
        AuditValue::List(items) => Canonical::List(items.iter().map(canonicalize).collect()),
        AuditValue::Map(entries) if entries.is_empty() => Canonical::List(Vec::new()),
        AuditValue::Map(entries) => {
            let pairs = entries
                .iter()
                .map(|(k, v)| (format_key(k), canonicalize(v)))
                .collect();
            Canonical::Pairs(sorted(pairs))
        },
        AuditValue::Record { fields, .. } => {
            let pairs = fields
                .iter()
                .filter(|f| !f.skip)
                .map(|f| (f.exposed_name().to_string(), canonicalize(&f.value)))
                .collect();
            Canonical::Pairs(sorted(pairs))
        },
        AuditValue::Opaque { type_name, repr } => Canonical::Tagged {
            type_name: type_name.clone(),
            repr: repr.clone(),
        },
    }
}

// Distinct source keys may format identically ("1" and 1); the value breaks the tie.
fn sorted(mut pairs: Vec<(String, Canonical)>) -> Vec<(String, Canonical)> {
    pairs.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| format!("{:?}", a.1).cmp(&format!("{:?}", b.1)))
    });
    pairs
}

/// Render a map key as the string it is sorted and stored under
pub fn format_key(key: &AuditValue) -> String {
    match key {
        AuditValue::Text(s) => s.clone(),
        AuditValue::Bool(b) => b.to_string(),
        AuditValue::Int(i) => i.to_string(),
        AuditValue::Uint(u) => u.to_string(),
        AuditValue::Float(f) => f.to_string(),
        // Composite keys sort their own contents first.
        other => format!("{:?}", canonicalize(other)),
    }
}

/// Encode a canonical value as compact JSON.
///
/// Fails only for non-finite floats, which JSON cannot carry.
pub fn encode(value: &Canonical) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(value)
}

impl Serialize for Canonical {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Uint(u) => serializer.serialize_u64(*u),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(f) => Err(S::Error::custom(format!("non-finite float {f}"))),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Bytes(b) => serializer.serialize_str(&STANDARD.encode(b)),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            Self::Pairs(pairs) => {
                let mut seq = serializer.serialize_seq(Some(pairs.len()))?;
                for (key, value) in pairs {
                    seq.serialize_element(&(key, value))?;
                }
                seq.end()
            },
            Self::Tagged { type_name, repr } => {
                serializer.serialize_str(&format!("{type_name}:{repr}"))
            },
        }
    }
}
