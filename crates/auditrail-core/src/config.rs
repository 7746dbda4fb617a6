//! Configuration management

use auditrail_common::AuditError;

use crate::models::{AuditQuery, DEFAULT_AUDIT_QUERY_LIMIT, MAX_AUDIT_QUERY_LIMIT};
use crate::redact::Salt;
use crate::text::METADATA_VALUE_MAX_LEN;

/// Environment variable holding the redaction salt
pub const SALT_ENV: &str = "AUDIT_HASH_SALT";

/// Audit configuration
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Redaction salt; its `Debug` output never shows the value
    pub salt: Salt,
    /// Ceiling for non-sensitive metadata and diff text values
    pub metadata_value_max_len: usize,
    pub query_default_limit: usize,
    pub query_max_limit: usize,
}

impl AuditConfig {
    /// Configuration with the given salt and default limits
    pub fn with_salt(salt: impl Into<Salt>) -> Self {
        Self {
            salt: salt.into(),
            metadata_value_max_len: METADATA_VALUE_MAX_LEN,
            query_default_limit: DEFAULT_AUDIT_QUERY_LIMIT,
            query_max_limit: MAX_AUDIT_QUERY_LIMIT,
        }
    }

    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let salt = lookup(SALT_ENV)
            .ok_or_else(|| AuditError::config(format!("{SALT_ENV} must be set")))?;

        let config = Self {
            salt: Salt::from(salt),
            metadata_value_max_len: lookup("AUDIT_METADATA_VALUE_MAX_LEN")
                .and_then(|s| s.parse().ok())
                .unwrap_or(METADATA_VALUE_MAX_LEN),
            query_default_limit: lookup("AUDIT_QUERY_DEFAULT_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_AUDIT_QUERY_LIMIT),
            query_max_limit: lookup("AUDIT_QUERY_MAX_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_AUDIT_QUERY_LIMIT),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> auditrail_common::Result<()> {
        if self.salt.is_empty() {
            return Err(AuditError::config(format!("{SALT_ENV} cannot be empty")));
        }

        if self.query_max_limit == 0 {
            return Err(AuditError::config("Query max limit must be greater than 0"));
        }

        if self.query_default_limit == 0 {
            return Err(AuditError::config(
                "Query default limit must be greater than 0",
            ));
        }

        if self.query_default_limit > self.query_max_limit {
            return Err(AuditError::config(format!(
                "Query default limit ({}) cannot be greater than max limit ({})",
                self.query_default_limit, self.query_max_limit
            )));
        }

        if self.metadata_value_max_len == 0 {
            tracing::warn!("Metadata value ceiling is 0 - text values will not be truncated");
        }

        Ok(())
    }

    /// An unfiltered query using the configured default page size
    pub fn default_query(&self) -> AuditQuery {
        AuditQuery {
            limit: self.query_default_limit,
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuditConfig::from_lookup(lookup(&[(SALT_ENV, "pepper")])).unwrap();
        assert_eq!(config.salt, Salt::from("pepper"));
        assert_eq!(config.metadata_value_max_len, 512);
        assert_eq!(config.query_default_limit, 100);
        assert_eq!(config.query_max_limit, 1000);
        assert_eq!(config.default_query().limit, 100);
    }

    #[test]
    fn test_overrides() {
        let config = AuditConfig::from_lookup(lookup(&[
            (SALT_ENV, "pepper"),
            ("AUDIT_METADATA_VALUE_MAX_LEN", "64"),
            ("AUDIT_QUERY_DEFAULT_LIMIT", "10"),
            ("AUDIT_QUERY_MAX_LIMIT", "20"),
        ]))
        .unwrap();
        assert_eq!(config.metadata_value_max_len, 64);
        assert_eq!(config.query_default_limit, 10);
        assert_eq!(config.query_max_limit, 20);
    }

    #[test]
    fn test_missing_or_empty_salt_is_rejected() {
        assert!(AuditConfig::from_lookup(lookup(&[])).is_err());
        assert!(AuditConfig::from_lookup(lookup(&[(SALT_ENV, "")])).is_err());
    }

    #[test]
    fn test_default_limit_above_max_is_rejected() {
        let err = AuditConfig::from_lookup(lookup(&[
            (SALT_ENV, "pepper"),
            ("AUDIT_QUERY_DEFAULT_LIMIT", "500"),
            ("AUDIT_QUERY_MAX_LIMIT", "50"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("cannot be greater"));
    }

    #[test]
    fn test_validate_reports_config_errors() {
        let mut config = AuditConfig::with_salt("pepper");
        assert!(config.validate().is_ok());

        config.query_max_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
        assert!(!err.is_store());

        let err = AuditConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_salt() {
        let config = AuditConfig::with_salt("pepper");
        assert!(!format!("{config:?}").contains("pepper"));
    }
}
