//! Salted one-way redaction
//!
//! A redaction token is `sha256:` followed by the lowercase hex SHA-256 of
//! the salt concatenated with the value's hash input. The same value under
//! the same salt always produces the same token, so redacted values can
//! still be correlated across entries.

use std::borrow::Cow;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical::{canonicalize, encode};
use crate::value::AuditValue;

/// Prefix of every redaction token
pub const TOKEN_PREFIX: &str = "sha256:";

const DIGEST_HEX_LEN: usize = 64;

/// Secret mixed into every redaction hash
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(Vec<u8>);

impl Salt {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Salt(<redacted>)")
    }
}

impl From<&str> for Salt {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for Salt {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<Vec<u8>> for Salt {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Bytes that go into the hash for `value`.
///
/// Text and bytes are hashed as-is, so `"x"` and `b"x"` share a token.
/// Everything else goes through the canonical encoding, falling back to
/// the canonical form's `Debug` output when that encoding fails.
pub fn hash_input(value: &AuditValue) -> Cow<'_, [u8]> {
    match value {
        AuditValue::Text(s) => Cow::Borrowed(s.as_bytes()),
        AuditValue::Bytes(b) => Cow::Borrowed(b),
        other => {
            let canonical = canonicalize(other);
            match encode(&canonical) {
                Ok(bytes) => Cow::Owned(bytes),
                Err(_) => Cow::Owned(format!("{canonical:?}").into_bytes()),
            }
        },
    }
}

/// Produces redaction tokens under a fixed salt
#[derive(Debug, Clone)]
pub struct Redactor {
    salt: Salt,
}

impl Redactor {
    pub fn new(salt: impl Into<Salt>) -> Self {
        Self { salt: salt.into() }
    }

    /// Redaction token for a value
    pub fn hash(&self, value: &AuditValue) -> String {
        self.digest(&hash_input(value))
    }

    /// Redaction token for a string
    pub fn hash_str(&self, value: &str) -> String {
        self.digest(value.as_bytes())
    }

    /// Redaction token for any `Serialize` type.
    ///
    /// When the value cannot be mapped at all, its type name is hashed so
    /// the call still yields a token.
    pub fn hash_serialize<T: Serialize + ?Sized>(&self, value: &T) -> String {
        match AuditValue::try_from_serialize(value) {
            Ok(v) => self.hash(&v),
            Err(_) => self.digest(std::any::type_name::<T>().as_bytes()),
        }
    }

    /// Whether `s` has the shape of a redaction token
    pub fn is_token(s: &str) -> bool {
        s.strip_prefix(TOKEN_PREFIX).is_some_and(|digest| {
            digest.len() == DIGEST_HEX_LEN
                && digest
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        })
    }

    fn digest(&self, data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(data);
        format!("{}{}", TOKEN_PREFIX, hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::value::Field;
    use serde::ser::{Error as _, Serializer};

    fn expected(salt: &str, input: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(input);
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }

    #[test]
    fn test_text_is_hashed_directly() {
        let redactor = Redactor::new("s1");
        assert_eq!(
            redactor.hash(&AuditValue::from("A@B.com")),
            expected("s1", b"A@B.com")
        );
    }

    #[test]
    fn test_bytes_and_text_share_a_token() {
        let redactor = Redactor::new("salt");
        assert_eq!(
            redactor.hash(&AuditValue::from("x")),
            redactor.hash(&AuditValue::Bytes(b"x".to_vec()))
        );
    }

    #[test]
    fn test_nested_bytes_and_text_hash_differently() {
        let redactor = Redactor::new("salt");
        let bytes = AuditValue::list([AuditValue::Bytes(b"x".to_vec())]);
        let text = AuditValue::list(["x"]);

        assert_ne!(redactor.hash(&bytes), redactor.hash(&text));
        assert_eq!(redactor.hash(&bytes), expected("salt", br#"["eA=="]"#));
        assert_eq!(redactor.hash(&text), expected("salt", br#"["x"]"#));
    }

    #[test]
    fn test_structured_values_hash_canonical_json() {
        let redactor = Redactor::new("salt");
        let value = AuditValue::map([("b", 2), ("a", 1)]);
        assert_eq!(redactor.hash(&value), expected("salt", br#"[["a",1],["b",2]]"#));
    }

    #[test]
    fn test_salt_changes_token() {
        let value = AuditValue::from("secret");
        assert_ne!(Redactor::new("a").hash(&value), Redactor::new("b").hash(&value));
    }

    #[test]
    fn test_non_finite_float_still_hashes() {
        let redactor = Redactor::new("salt");
        let token = redactor.hash(&AuditValue::Float(f64::NAN));
        assert!(Redactor::is_token(&token));
        assert_eq!(token, expected("salt", b"Float(NaN)"));
    }

    #[test]
    fn test_hash_serialize_matches_value_hash() {
        let redactor = Redactor::new("salt");
        assert_eq!(
            redactor.hash_serialize("A@B.com"),
            redactor.hash(&AuditValue::from("A@B.com"))
        );

        let record = AuditValue::record("Card", [Field::new("last4", "4242")]);
        #[derive(serde::Serialize)]
        struct Card {
            last4: &'static str,
        }
        assert_eq!(redactor.hash_serialize(&Card { last4: "4242" }), redactor.hash(&record));
    }

    #[test]
    fn test_hash_serialize_falls_back_to_type_name() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
                Err(S::Error::custom("nope"))
            }
        }

        let redactor = Redactor::new("salt");
        let token = redactor.hash_serialize(&Broken);
        assert_eq!(
            token,
            expected("salt", std::any::type_name::<Broken>().as_bytes())
        );
    }

    #[test]
    fn test_is_token() {
        let token = Redactor::new("salt").hash_str("x");
        assert!(Redactor::is_token(&token));
        assert!(!Redactor::is_token("sha256:abc"));
        assert!(!Redactor::is_token(&token.to_uppercase()));
        assert!(!Redactor::is_token("x"));
    }

    #[test]
    fn test_salt_debug_is_redacted() {
        let redactor = Redactor::new("super-secret");
        assert!(!format!("{redactor:?}").contains("super-secret"));
    }
}
