//! Append-only audit stores
//!
//! [`AuditStore`] is the boundary to whatever durably keeps audit entries.
//! Two implementations ship with the crate: an in-memory store for tests
//! and embedding, and a JSON-lines file store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use auditrail_common::{AuditError, Result};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::models::{AuditLogEntry, AuditQuery, Page, MAX_AUDIT_QUERY_LIMIT};

/// Durable home of audit entries
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one entry
    async fn append(&self, entry: &AuditLogEntry) -> Result<()>;

    /// Fetch one page of entries matching `query`, newest first
    async fn query(&self, query: &AuditQuery) -> Result<Page<AuditLogEntry>>;
}

/// Filter, order newest first and cut one page out of `entries`.
///
/// `entries` must be in append order. The cursor is the offset of the
/// next page within the filtered result.
fn paginate(
    entries: impl Iterator<Item = AuditLogEntry>,
    query: &AuditQuery,
    max_limit: usize,
) -> Result<Page<AuditLogEntry>> {
    let offset = match query.cursor.as_deref() {
        None | Some("") => 0,
        Some(cursor) => cursor
            .parse::<usize>()
            .map_err(|_| AuditError::InvalidCursor(cursor.to_string()))?,
    };
    let limit = query.effective_limit(max_limit);

    let mut matching: Vec<AuditLogEntry> = entries.filter(|e| query.matches(e)).collect();
    matching.reverse();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = matching.len();
    let items: Vec<AuditLogEntry> = matching.into_iter().skip(offset).take(limit).collect();
    let consumed = offset.saturating_add(items.len());
    let next_cursor = (consumed < total).then(|| consumed.to_string());

    Ok(Page { items, next_cursor })
}

// ============================================================================
// In-memory store
// ============================================================================

/// Keeps entries in process memory
#[derive(Debug)]
pub struct InMemoryAuditStore {
    entries: RwLock<Vec<AuditLogEntry>>,
    max_limit: usize,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::with_max_limit(MAX_AUDIT_QUERY_LIMIT)
    }

    pub fn with_max_limit(max_limit: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            max_limit,
        }
    }

    /// Every stored entry in append order
    pub async fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryAuditStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn append(&self, entry: &AuditLogEntry) -> Result<()> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn query(&self, query: &AuditQuery) -> Result<Page<AuditLogEntry>> {
        let entries = self.entries.read().await;
        paginate(entries.iter().cloned(), query, self.max_limit)
    }
}

// ============================================================================
// JSON-lines file store
// ============================================================================

/// Writes each entry as one JSON object per line
#[derive(Debug)]
pub struct JsonLinesAuditStore {
    file: Mutex<File>,
    path: PathBuf,
    max_limit: usize,
}

impl JsonLinesAuditStore {
    /// Open `path` for appending, creating it and its parent directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be opened.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(path = %parent.display(), "Creating audit log directory");
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path).await?;
        debug!(path = %path.display(), "Audit log opened");

        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
            max_limit: MAX_AUDIT_QUERY_LIMIT,
        })
    }

    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditStore for JsonLinesAuditStore {
    async fn append(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;

        if let Err(e) = file.sync_data().await {
            warn!(error = %e, "Failed to sync audit log");
        }

        debug!(action = %entry.action, "Audit entry appended");
        Ok(())
    }

    async fn query(&self, query: &AuditQuery) -> Result<Page<AuditLogEntry>> {
        // Hold the writer lock so a half-written line is never read.
        let _guard = self.file.lock().await;
        let content = tokio::fs::read_to_string(&self.path).await?;

        let entries = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<AuditLogEntry>)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        paginate(entries.into_iter(), query, self.max_limit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::{ActorType, Severity};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()
    }

    fn entry(action: &str, minutes: i64) -> AuditLogEntry {
        AuditLogEntry {
            actor: "/users/1".to_string(),
            actor_type: ActorType::User,
            action: action.to_string(),
            target_ref: "/orders/7".to_string(),
            severity: Severity::Info,
            request_id: String::new(),
            user_agent: String::new(),
            created_at: base_time() + Duration::minutes(minutes),
            metadata: None,
            diff: None,
            ip_hash: None,
        }
    }

    #[tokio::test]
    async fn test_in_memory_returns_newest_first() {
        let store = InMemoryAuditStore::new();
        store.append(&entry("a", 0)).await.unwrap();
        store.append(&entry("b", 2)).await.unwrap();
        store.append(&entry("c", 1)).await.unwrap();

        let page = store.query(&AuditQuery::default()).await.unwrap();
        let actions: Vec<&str> = page.items.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["b", "c", "a"]);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_latest_append_first() {
        let store = InMemoryAuditStore::new();
        store.append(&entry("first", 0)).await.unwrap();
        store.append(&entry("second", 0)).await.unwrap();

        let page = store.query(&AuditQuery::default()).await.unwrap();
        assert_eq!(page.items[0].action, "second");
    }

    #[tokio::test]
    async fn test_pagination_with_cursor() {
        let store = InMemoryAuditStore::new();
        for i in 0..5 {
            store.append(&entry(&format!("e{i}"), i)).await.unwrap();
        }

        let mut query = AuditQuery {
            limit: 2,
            ..Default::default()
        };
        let first = store.query(&query).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.items[0].action, "e4");
        assert_eq!(first.next_cursor.as_deref(), Some("2"));

        query.cursor = first.next_cursor;
        let second = store.query(&query).await.unwrap();
        assert_eq!(second.items[0].action, "e2");

        query.cursor = second.next_cursor;
        let third = store.query(&query).await.unwrap();
        assert_eq!(third.items.len(), 1);
        assert!(third.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_invalid_cursor_is_rejected() {
        let store = InMemoryAuditStore::new();
        let query = AuditQuery {
            cursor: Some("not-a-number".to_string()),
            ..Default::default()
        };
        let err = store.query(&query).await.unwrap_err();
        assert!(matches!(err, AuditError::InvalidCursor(_)));
    }

    #[tokio::test]
    async fn test_limit_is_clamped_to_store_max() {
        let store = InMemoryAuditStore::with_max_limit(3);
        for i in 0..5 {
            store.append(&entry("e", i)).await.unwrap();
        }
        let query = AuditQuery {
            limit: 50,
            ..Default::default()
        };
        assert_eq!(store.query(&query).await.unwrap().items.len(), 3);
    }

    #[tokio::test]
    async fn test_json_lines_store_creates_directory_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/audit.jsonl");

        let store = JsonLinesAuditStore::open(&path).await.unwrap();
        assert!(path.parent().unwrap().exists());
        assert_eq!(store.path(), path);

        store.append(&entry("order.create", 0)).await.unwrap();
        store.append(&entry("order.cancel", 5)).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.lines().count(), 2);

        let query = AuditQuery {
            action: Some("order.cancel".to_string()),
            ..Default::default()
        };
        let page = store.query(&query).await.unwrap();
        assert_eq!(page.items, vec![entry("order.cancel", 5)]);
    }

    #[tokio::test]
    async fn test_json_lines_store_reports_corrupt_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("audit.jsonl");
        tokio::fs::write(&path, "{not json}\n").await.unwrap();

        let store = JsonLinesAuditStore::open(&path).await.unwrap();
        let err = store.query(&AuditQuery::default()).await.unwrap_err();
        assert!(matches!(err, AuditError::Serialization(_)));
    }
}
