//! Type-erased values for metadata and diff payloads
//!
//! Callers attach values of arbitrary shape to an audit record. They are
//! mapped into the closed [`AuditValue`] sum type before anything else
//! touches them, either through the `From` conversions below or through
//! [`AuditValue::from_serialize`], which walks any `serde::Serialize` type.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, TimeZone};
use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::canonical::format_key;

/// A caller-supplied value whose shape is not known in advance.
///
/// Integer and float widths are widened on the way in, so an `i32` and an
/// `i64` holding the same number are the same `AuditValue`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuditValue {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<AuditValue>),
    /// Key/value pairs in whatever order the source produced them
    Map(Vec<(AuditValue, AuditValue)>),
    Record {
        type_name: String,
        fields: Vec<Field>,
    },
    /// A value that could not be introspected
    Opaque {
        type_name: String,
        repr: String,
    },
}

/// One named field of a [`AuditValue::Record`]
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// Serialization name that replaces `name` when present
    pub rename: Option<String>,
    /// Excluded from serialization and hashing
    pub skip: bool,
    pub value: AuditValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<AuditValue>) -> Self {
        Self {
            name: name.into(),
            rename: None,
            skip: false,
            value: value.into(),
        }
    }

    pub fn renamed(mut self, rename: impl Into<String>) -> Self {
        self.rename = Some(rename.into());
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// The name this field is exposed under
    pub fn exposed_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }
}

impl AuditValue {
    /// Build a list from anything convertible
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AuditValue>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a map from key/value pairs
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<AuditValue>,
        V: Into<AuditValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a structured record
    pub fn record(type_name: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Record {
            type_name: type_name.into(),
            fields: fields.into_iter().collect(),
        }
    }

    /// Wrap a value only known through its `Debug` output
    pub fn opaque<T: std::fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Opaque {
            type_name: std::any::type_name::<T>().to_string(),
            repr: format!("{value:?}"),
        }
    }

    /// Map any `Serialize` type into an `AuditValue`.
    ///
    /// Structs become records carrying serde's field names, so
    /// `#[serde(rename)]` and `#[serde(skip)]` behave as they would on the
    /// wire. Never fails: a value whose `Serialize` impl errors degrades to
    /// [`AuditValue::Opaque`] tagged with its type name.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        Self::try_from_serialize(value).unwrap_or_else(|err| Self::Opaque {
            type_name: std::any::type_name::<T>().to_string(),
            repr: err.to_string(),
        })
    }

    /// Like [`AuditValue::from_serialize`] but reports the failure.
    pub fn try_from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, AdapterError> {
        value.serialize(ValueSerializer)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for AuditValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for AuditValue {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for AuditValue {
            fn from(v: $t) -> Self {
                Self::Uint(v as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for AuditValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for AuditValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AuditValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AuditValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for AuditValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<Vec<u8>> for AuditValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for AuditValue {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl<T: Into<AuditValue>> From<Option<T>> for AuditValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}

impl<K: Into<AuditValue>, V: Into<AuditValue>, S> From<HashMap<K, V, S>> for AuditValue {
    fn from(v: HashMap<K, V, S>) -> Self {
        Self::map(v)
    }
}

impl<K: Into<AuditValue>, V: Into<AuditValue>> From<BTreeMap<K, V>> for AuditValue {
    fn from(v: BTreeMap<K, V>) -> Self {
        Self::map(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for AuditValue
where
    Tz::Offset: std::fmt::Display,
{
    fn from(v: DateTime<Tz>) -> Self {
        Self::Text(v.to_rfc3339())
    }
}

impl From<serde_json::Value> for AuditValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match v {
            Json::Null => Self::Nil,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            },
            Json::String(s) => Self::Text(s),
            Json::Array(items) => Self::list(items),
            Json::Object(map) => Self::map(map),
        }
    }
}

// ============================================================================
// Storage representation
// ============================================================================

impl Serialize for AuditValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Uint(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Bytes(b) => serializer.serialize_bytes(b),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(&format_key(k), v)?;
                }
                map.end()
            },
            Self::Record { fields, .. } => {
                let visible: Vec<&Field> = fields.iter().filter(|f| !f.skip).collect();
                let mut map = serializer.serialize_map(Some(visible.len()))?;
                for field in visible {
                    map.serialize_entry(field.exposed_name(), &field.value)?;
                }
                map.end()
            },
            Self::Opaque { repr, .. } => serializer.serialize_str(repr),
        }
    }
}

/// Reads back whatever a store wrote. Bytes and records come back as
/// lists and maps, since the stored form does not keep those tags.
impl<'de> Deserialize<'de> for AuditValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// Serde adapter
// ============================================================================

/// Raised when a `Serialize` impl refuses to produce a value
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AdapterError(String);

impl ser::Error for AdapterError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

struct ValueSerializer;

fn tagged(variant: &'static str, value: AuditValue) -> AuditValue {
    AuditValue::Map(vec![(AuditValue::from(variant), value)])
}

impl Serializer for ValueSerializer {
    type Ok = AuditValue;
    type Error = AdapterError;
    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = RecordBuilder;

    fn serialize_bool(self, v: bool) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_i8(self, v: i8) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_i128(self, v: i128) -> Result<AuditValue, AdapterError> {
        Ok(i64::try_from(v).map_or_else(
            |_| AuditValue::Opaque {
                type_name: "i128".to_string(),
                repr: v.to_string(),
            },
            AuditValue::Int,
        ))
    }

    fn serialize_u8(self, v: u8) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_u128(self, v: u128) -> Result<AuditValue, AdapterError> {
        Ok(u64::try_from(v).map_or_else(
            |_| AuditValue::Opaque {
                type_name: "u128".to_string(),
                repr: v.to_string(),
            },
            AuditValue::Uint,
        ))
    }

    fn serialize_f32(self, v: f32) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_char(self, v: char) -> Result<AuditValue, AdapterError> {
        Ok(AuditValue::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<AuditValue, AdapterError> {
        Ok(v.into())
    }

    fn serialize_none(self) -> Result<AuditValue, AdapterError> {
        Ok(AuditValue::Nil)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<AuditValue, AdapterError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<AuditValue, AdapterError> {
        Ok(AuditValue::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<AuditValue, AdapterError> {
        Ok(AuditValue::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<AuditValue, AdapterError> {
        Ok(variant.into())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<AuditValue, AdapterError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<AuditValue, AdapterError> {
        Ok(tagged(variant, value.serialize(ValueSerializer)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, AdapterError> {
        Ok(SeqBuilder::new(None, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, AdapterError> {
        Ok(SeqBuilder::new(None, len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, AdapterError> {
        Ok(SeqBuilder::new(None, len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, AdapterError> {
        Ok(SeqBuilder::new(Some(variant), len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder, AdapterError> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<RecordBuilder, AdapterError> {
        Ok(RecordBuilder::new(name, None, len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordBuilder, AdapterError> {
        Ok(RecordBuilder::new(name, Some(variant), len))
    }
}

#[doc(hidden)]
pub struct SeqBuilder {
    variant: Option<&'static str>,
    items: Vec<AuditValue>,
}

impl SeqBuilder {
    fn new(variant: Option<&'static str>, len: usize) -> Self {
        Self {
            variant,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), AdapterError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn finish(self) -> AuditValue {
        let list = AuditValue::List(self.items);
        match self.variant {
            Some(variant) => tagged(variant, list),
            None => list,
        }
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = AuditValue;
    type Error = AdapterError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), AdapterError> {
        self.push(value)
    }

    fn end(self) -> Result<AuditValue, AdapterError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = AuditValue;
    type Error = AdapterError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), AdapterError> {
        self.push(value)
    }

    fn end(self) -> Result<AuditValue, AdapterError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = AuditValue;
    type Error = AdapterError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), AdapterError> {
        self.push(value)
    }

    fn end(self) -> Result<AuditValue, AdapterError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = AuditValue;
    type Error = AdapterError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), AdapterError> {
        self.push(value)
    }

    fn end(self) -> Result<AuditValue, AdapterError> {
        Ok(self.finish())
    }
}

#[doc(hidden)]
pub struct MapBuilder {
    entries: Vec<(AuditValue, AuditValue)>,
    pending_key: Option<AuditValue>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = AuditValue;
    type Error = AdapterError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), AdapterError> {
        self.pending_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), AdapterError> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| AdapterError("map value serialized before its key".to_string()))?;
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<AuditValue, AdapterError> {
        Ok(AuditValue::Map(self.entries))
    }
}

#[doc(hidden)]
pub struct RecordBuilder {
    type_name: &'static str,
    variant: Option<&'static str>,
    fields: Vec<Field>,
}

impl RecordBuilder {
    fn new(type_name: &'static str, variant: Option<&'static str>, len: usize) -> Self {
        Self {
            type_name,
            variant,
            fields: Vec::with_capacity(len),
        }
    }

    fn push<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), AdapterError> {
        self.fields
            .push(Field::new(key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn finish(self) -> AuditValue {
        let record = AuditValue::Record {
            type_name: self.type_name.to_string(),
            fields: self.fields,
        };
        match self.variant {
            Some(variant) => tagged(variant, record),
            None => record,
        }
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = AuditValue;
    type Error = AdapterError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), AdapterError> {
        self.push(key, value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), AdapterError> {
        self.fields.push(Field::new(key, AuditValue::Nil).skipped());
        Ok(())
    }

    fn end(self) -> Result<AuditValue, AdapterError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for RecordBuilder {
    type Ok = AuditValue;
    type Error = AdapterError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), AdapterError> {
        self.push(key, value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), AdapterError> {
        self.fields.push(Field::new(key, AuditValue::Nil).skipped());
        Ok(())
    }

    fn end(self) -> Result<AuditValue, AdapterError> {
        Ok(self.finish())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Profile {
        #[serde(rename = "emailAddress")]
        email: String,
        age: u8,
        #[serde(skip)]
        #[allow(dead_code)]
        password_hash: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
        avatar: Option<String>,
    }

    #[derive(Serialize)]
    #[allow(dead_code)]
    enum Change {
        Reset,
        Moved { from: String, to: String },
    }

    struct Refuses;

    impl Serialize for Refuses {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(ser::Error::custom("cannot audit this"))
        }
    }

    #[test]
    fn test_integer_widths_are_widened() {
        assert_eq!(AuditValue::from(7i32), AuditValue::from(7i64));
        assert_eq!(AuditValue::from(7u16), AuditValue::Uint(7));
        assert_eq!(AuditValue::from(1.5f32), AuditValue::Float(1.5));
    }

    #[test]
    fn test_bytes_stay_bytes() {
        assert_eq!(AuditValue::from(b"x".to_vec()), AuditValue::Bytes(vec![b'x']));
        assert_eq!(AuditValue::from_serialize(&"x"), AuditValue::Text("x".into()));
    }

    #[test]
    fn test_option_maps_to_nil() {
        assert!(AuditValue::from(None::<String>).is_nil());
        assert_eq!(AuditValue::from(Some("a")), AuditValue::Text("a".into()));
    }

    #[test]
    fn test_struct_becomes_record_with_serde_names() {
        let profile = Profile {
            email: "a@b.com".into(),
            age: 30,
            password_hash: "secret".into(),
            nickname: None,
            avatar: None,
        };

        let AuditValue::Record { type_name, fields } = AuditValue::from_serialize(&profile) else {
            panic!("expected a record");
        };
        assert_eq!(type_name, "Profile");

        let names: Vec<&str> = fields.iter().map(|f| f.exposed_name()).collect();
        assert!(names.contains(&"emailAddress"));
        assert!(!names.contains(&"password_hash"));

        let nickname = fields.iter().find(|f| f.name == "nickname").unwrap();
        assert!(nickname.skip);
        let avatar = fields.iter().find(|f| f.name == "avatar").unwrap();
        assert!(!avatar.skip);
        assert!(avatar.value.is_nil());
    }

    #[test]
    fn test_enum_variants_are_tagged() {
        assert_eq!(AuditValue::from_serialize(&Change::Reset), AuditValue::Text("Reset".into()));

        let moved = AuditValue::from_serialize(&Change::Moved {
            from: "a".into(),
            to: "b".into(),
        });
        let AuditValue::Map(entries) = moved else {
            panic!("expected a tagged map");
        };
        assert_eq!(entries[0].0, AuditValue::Text("Moved".into()));
    }

    #[test]
    fn test_failed_serialize_degrades_to_opaque() {
        let value = AuditValue::from_serialize(&Refuses);
        let AuditValue::Opaque { type_name, repr } = value else {
            panic!("expected opaque");
        };
        assert!(type_name.ends_with("Refuses"));
        assert_eq!(repr, "cannot audit this");
        assert!(AuditValue::try_from_serialize(&Refuses).is_err());
    }

    #[test]
    fn test_json_conversion() {
        let value = AuditValue::from(json!({"n": 1, "big": u64::MAX, "f": 0.5, "xs": [true, null]}));
        let AuditValue::Map(entries) = value else {
            panic!("expected map");
        };
        let get = |k: &str| {
            entries
                .iter()
                .find(|(key, _)| key.as_str() == Some(k))
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("n"), AuditValue::Int(1));
        assert_eq!(get("big"), AuditValue::Uint(u64::MAX));
        assert_eq!(get("f"), AuditValue::Float(0.5));
        assert_eq!(
            get("xs"),
            AuditValue::List(vec![AuditValue::Bool(true), AuditValue::Nil])
        );
    }

    #[test]
    fn test_serialize_for_storage() {
        let record = AuditValue::record(
            "Account",
            [
                Field::new("plan", "pro"),
                Field::new("internal_id", 9).skipped(),
                Field::new("seats", 3).renamed("seatCount"),
            ],
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"plan": "pro", "seatCount": 3}));

        let map = AuditValue::map([(1, "one"), (2, "two")]);
        assert_eq!(serde_json::to_value(&map).unwrap(), json!({"1": "one", "2": "two"}));
    }

    #[test]
    fn test_deserialize_round_trip_of_plain_values() {
        let original = AuditValue::list([AuditValue::from("a"), AuditValue::from(2i64)]);
        let text = serde_json::to_string(&original).unwrap();
        let back: AuditValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, original);
    }
}
