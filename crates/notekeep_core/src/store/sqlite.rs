use super::{check_quota, KvStore, StoreResult};
use crate::db::DbError;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed store, one `kv_entries` row per key.
pub struct SqliteKvStore {
    conn: Connection,
    quota: Option<usize>,
}

impl SqliteKvStore {
    /// Wraps a migrated connection (see `db::open_db`).
    ///
    /// # Errors
    /// - `DbError::MissingRequiredTable` when `kv_entries` does not exist.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_store_table(&conn)?;
        Ok(Self { conn, quota: None })
    }

    /// Limits total stored characters (keys + values) to `quota`.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Returns the configured quota, if any.
    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    /// Returns the underlying connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }

    fn usage_excluding(&self, key: &str) -> StoreResult<usize> {
        let usage: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(key) + LENGTH(value)), 0)
             FROM kv_entries
             WHERE key <> ?1;",
            [key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(usage).unwrap_or(0))
    }
}

impl KvStore for SqliteKvStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.quota.is_some() {
            let others = self.usage_excluding(key)?;
            if let Err(err) = check_quota(self.quota, others, key, value) {
                error!("event=kv_set module=store status=error error_code=quota_exceeded error={err}");
                return Err(err);
            }
        }

        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_set module=store status=ok value_chars={}",
            value.chars().count()
        );
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn ensure_store_table(conn: &Connection) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_entries'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(DbError::MissingRequiredTable("kv_entries").into());
    }
    Ok(())
}
