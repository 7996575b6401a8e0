//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::StorageError;
use crate::migrations::run_migrations;
use crate::timestamp::now_timestamp;
use crate::Result;

/// Handle to the local store. Clones share one connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file and bring the schema up to date.
    ///
    /// Safe to call on every start: table creation never touches existing rows.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| StorageError::Unavailable(format!("{}: {}", path.display(), e)))?;

        Self::init(&conn, true)
            .map_err(|e| StorageError::Unavailable(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Opened note store");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::init(&conn, false).map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init(conn: &Connection, wal: bool) -> Result<()> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        if wal {
            let _: String =
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        }

        run_migrations(conn)
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Run `f` with foreign-key enforcement switched off, restoring it afterwards
    /// whether or not `f` succeeds. Must not be used inside a transaction, where
    /// SQLite ignores the pragma.
    pub fn with_foreign_keys_suspended<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        conn.pragma_update(None, "foreign_keys", "OFF")?;
        let result = f(&conn);
        restore_foreign_keys(&conn)?;
        result
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = now_timestamp();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })
    }

    pub fn delete_setting(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

const FOREIGN_KEY_RESTORE_ATTEMPTS: usize = 3;

/// Switch enforcement back on, retrying before giving up. Reads the pragma
/// back so a silently ignored update (e.g. inside an open transaction) counts
/// as a failure.
fn restore_foreign_keys(conn: &Connection) -> Result<()> {
    let mut last_error = None;

    for attempt in 1..=FOREIGN_KEY_RESTORE_ATTEMPTS {
        let restored = conn
            .pragma_update(None, "foreign_keys", "ON")
            .and_then(|_| conn.query_row("PRAGMA foreign_keys", [], |row| row.get::<_, i64>(0)));

        match restored {
            Ok(1) => return Ok(()),
            Ok(_) => {
                tracing::warn!(attempt, "Foreign key enforcement still off after restore");
                last_error = Some("foreign_keys pragma ignored".to_string());
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Failed to restore foreign key enforcement");
                last_error = Some(e.to_string());
            }
        }
    }

    let reason = last_error.unwrap_or_default();
    tracing::error!(error = %reason, "Foreign key enforcement could not be restored");
    Err(StorageError::Unavailable(format!(
        "foreign key enforcement could not be restored: {reason}"
    )))
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
