//! SQLite memory store
//!
//! Durable implementation of the [`MemoryStore`] port. Every session's
//! history lives in a single `history` table keyed by an autoincrement id,
//! so id order is insertion order.
//!
//! Uses an r2d2 connection pool; all database work runs on the blocking
//! thread pool via `spawn_blocking`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use council_application::{MemoryStore, StoreError};
use council_domain::{Message, MessageRole, fit_to_budget};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

type DbPool = Pool<SqliteConnectionManager>;

const POOL_SIZE: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Columns read back into a [`Message`], in [`RawRow`] order
const MESSAGE_COLUMNS: &str = "session_id, role, content, timestamp, token_count, embedding";

/// Format written by SQLite's `CURRENT_TIMESTAMP` in older databases
const LEGACY_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// SQLite-backed message history
pub struct SqliteMemoryStore {
    pool: Arc<DbPool>,
}

impl SqliteMemoryStore {
    /// Open (or create) the database file at `path`.
    ///
    /// Connections use WAL journaling and a busy timeout. The schema is
    /// created or migrated before this returns.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            conn.execute_batch("PRAGMA journal_mode = WAL;")
        });
        let pool = Pool::builder()
            .max_size(POOL_SIZE)
            .build(manager)
            .map_err(|e| {
                StoreError::Unavailable(format!("Failed to create connection pool: {}", e))
            })?;

        info!("Opened memory store at {}", path.display());
        Self::from_pool(pool)
    }

    /// In-memory database for tests.
    ///
    /// Every in-memory connection is its own database, so the pool holds
    /// exactly one.
    pub fn in_memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create connection pool: {}", e))
        })?;
        Self::from_pool(pool)
    }

    fn from_pool(pool: DbPool) -> Result<Self, StoreError> {
        let conn = pool.get().map_err(pool_error)?;
        init_schema(&conn)?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Run `f` with a pooled connection on the blocking thread pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(pool_error)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl MemoryStore for SqliteMemoryStore {
    async fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message, StoreError> {
        let session_id = session_id.to_string();
        let content = content.to_string();

        self.with_connection(move |conn| {
            // Writer lock up front; a deferred read-then-write cannot wait on busy
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(query_error)?;
            let message = insert_message(&tx, &session_id, role, &content)?;
            tx.commit().map_err(query_error)?;
            Ok(message)
        })
        .await
    }

    async fn append_exchange(
        &self,
        session_id: &str,
        prompt: &str,
        response: &str,
    ) -> Result<(Message, Message), StoreError> {
        let session_id = session_id.to_string();
        let prompt = prompt.to_string();
        let response = response.to_string();

        self.with_connection(move |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(query_error)?;
            let user = insert_message(&tx, &session_id, MessageRole::User, &prompt)?;
            let assistant = insert_message(&tx, &session_id, MessageRole::Assistant, &response)?;
            tx.commit().map_err(query_error)?;
            Ok((user, assistant))
        })
        .await
    }

    async fn context(
        &self,
        session_id: &str,
        max_tokens: usize,
    ) -> Result<Vec<Message>, StoreError> {
        let session_id = session_id.to_string();

        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM history WHERE session_id = ?1 ORDER BY id DESC",
                    MESSAGE_COLUMNS
                ))
                .map_err(query_error)?;
            let rows = stmt
                .query_map(params![session_id], RawRow::from_row)
                .map_err(query_error)?;

            // Rows stream newest first; the scan stops once the budget is spent
            let mut failure = None;
            let newest_first = rows.map_while(|row| {
                match row.map_err(query_error).and_then(RawRow::into_message) {
                    Ok(message) => Some(message),
                    Err(e) => {
                        failure = Some(e);
                        None
                    }
                }
            });
            let window = fit_to_budget(newest_first, max_tokens);

            match failure {
                Some(e) => Err(e),
                None => {
                    debug!(
                        "Context for session {}: {} message(s) within {} tokens",
                        session_id,
                        window.len(),
                        max_tokens
                    );
                    Ok(window)
                }
            }
        })
        .await
    }

    async fn full_history(&self, session_id: &str) -> Result<Vec<Message>, StoreError> {
        let session_id = session_id.to_string();

        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {} FROM history WHERE session_id = ?1 ORDER BY id ASC",
                    MESSAGE_COLUMNS
                ))
                .map_err(query_error)?;
            let rows = stmt
                .query_map(params![session_id], RawRow::from_row)
                .map_err(query_error)?;

            rows.map(|row| row.map_err(query_error).and_then(RawRow::into_message))
                .collect()
        })
        .await
    }

    async fn message_count(&self, session_id: &str) -> Result<usize, StoreError> {
        let session_id = session_id.to_string();

        self.with_connection(move |conn| {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM history WHERE session_id = ?1",
                    params![session_id],
                    |row| row.get(0),
                )
                .map_err(query_error)?;
            Ok(count.max(0) as usize)
        })
        .await
    }
}

// ==================== Schema ====================

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id TEXT NOT NULL,
            role TEXT NOT NULL,
            content TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            token_count INTEGER NOT NULL DEFAULT 0,
            embedding BLOB
        );
        CREATE INDEX IF NOT EXISTS idx_history_session ON history(session_id, id);",
    )
    .map_err(|e| StoreError::Unavailable(format!("Failed to create history table: {}", e)))?;

    // SQLite has no ADD COLUMN IF NOT EXISTS; check via PRAGMA first
    if !table_has_column(conn, "history", "token_count") {
        info!("Migrating history table: adding token_count");
        conn.execute_batch(
            "BEGIN;
             ALTER TABLE history ADD COLUMN token_count INTEGER NOT NULL DEFAULT 0;
             UPDATE history SET token_count = length(content) / 4;
             COMMIT;",
        )
        .map_err(|e| StoreError::Unavailable(format!("Failed to migrate history: {}", e)))?;
    }

    if !table_has_column(conn, "history", "embedding") {
        info!("Migrating history table: adding embedding");
        conn.execute_batch("ALTER TABLE history ADD COLUMN embedding BLOB;")
            .map_err(|e| StoreError::Unavailable(format!("Failed to migrate history: {}", e)))?;
    }

    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> bool {
    let sql = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&sql) else {
        return false;
    };
    let Ok(rows) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    rows.flatten().any(|name| name == column)
}

// ==================== Rows ====================

/// Insert one message with a timestamp that never precedes the session's last
fn insert_message(
    conn: &Connection,
    session_id: &str,
    role: MessageRole,
    content: &str,
) -> Result<Message, StoreError> {
    let last: Option<String> = conn
        .query_row(
            "SELECT timestamp FROM history WHERE session_id = ?1 ORDER BY id DESC LIMIT 1",
            params![session_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(query_error)?;

    let now = Utc::now();
    let timestamp = match last.as_deref().map(parse_timestamp).transpose()? {
        Some(last) if last > now => last,
        _ => now,
    };

    let message = Message::new(session_id, role, content, timestamp);
    conn.execute(
        "INSERT INTO history (session_id, role, content, timestamp, token_count)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            message.session_id,
            message.role.as_str(),
            message.content,
            format_timestamp(&message.timestamp),
            message.token_count as i64,
        ],
    )
    .map_err(query_error)?;

    Ok(message)
}

struct RawRow {
    session_id: String,
    role: String,
    content: String,
    timestamp: String,
    token_count: Option<i64>,
    embedding: Option<Vec<u8>>,
}

impl RawRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            session_id: row.get(0)?,
            role: row.get(1)?,
            content: row.get(2)?,
            timestamp: row.get(3)?,
            token_count: row.get(4)?,
            embedding: row.get(5)?,
        })
    }

    fn into_message(self) -> Result<Message, StoreError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: council_domain::DomainError| StoreError::Corrupt(e.to_string()))?;
        let timestamp = parse_timestamp(&self.timestamp)?;

        let mut message = Message::new(self.session_id, role, self.content, timestamp);
        if let Some(count) = self.token_count {
            message.token_count = count.max(0) as usize;
        }
        message.embedding = self.embedding;
        Ok(message)
    }
}

/// RFC 3339 in UTC with microseconds, so text order is time order
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    LEGACY_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| StoreError::Corrupt(format!("Unparseable timestamp '{}'", raw)))
}

fn pool_error(e: r2d2::Error) -> StoreError {
    StoreError::Unavailable(format!("Failed to get connection: {}", e))
}

fn query_error(e: rusqlite::Error) -> StoreError {
    StoreError::Query(e.to_string())
}
