//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! that migrations are run and the owner row is bootstrapped before any
//! other operation.
//!
//! The owner identity is fixed when the database file is first created and
//! is immutable afterwards: reopening an existing store with a different
//! owner fails with [`StoreError::OwnerMismatch`] rather than rebinding
//! ownership.  Transferring ownership is deliberately not a store
//! operation.

use std::path::{Path, PathBuf};

use casebook_shared::types::UserId;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`] plus the cached owner identity.
pub struct Database {
    conn: Connection,
    owner: UserId,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/casebook/casebook.db`
    /// - macOS:   `~/Library/Application Support/com.casebook.casebook/casebook.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\casebook\casebook\data\casebook.db`
    pub fn new(owner: &UserId) -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "casebook", "casebook").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("casebook.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path, owner)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path, owner: &UserId) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        // Run schema migrations.
        migrations::run_migrations(&conn)?;

        // Bootstrap the singleton state row on first creation.  On later
        // opens the stored owner wins; a different caller-supplied owner
        // is a configuration error, never a rebind.
        conn.execute(
            "INSERT OR IGNORE INTO ledger_state (id, owner) VALUES (1, ?1)",
            params![owner.to_hex()],
        )?;

        let stored_hex: String =
            conn.query_row("SELECT owner FROM ledger_state WHERE id = 1", [], |row| {
                row.get(0)
            })?;
        let stored = UserId::from_hex(&stored_hex)?;

        if stored != *owner {
            tracing::warn!(
                stored = %stored.short(),
                requested = %owner.short(),
                "refusing to open store for a different owner"
            );
            return Err(StoreError::OwnerMismatch);
        }

        Ok(Self {
            conn,
            owner: stored,
        })
    }

    /// The owner identity this store was created for.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Owner gate shared by every mutating operation except liking.
    pub(crate) fn require_owner(&self, caller: &UserId) -> Result<()> {
        if caller != &self.owner {
            return Err(StoreError::Unauthorized);
        }
        Ok(())
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed helpers, but direct access is
    /// occasionally needed for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    /// `true` if a row exists for this case and it is not tombstoned.
    pub(crate) fn case_is_live(&self, id: i64) -> Result<bool> {
        let row: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM cases WHERE id = ?1 AND deleted = 0",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_shared::Identity;

    #[test]
    fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let owner = Identity::generate().user_id();

        let db = Database::open_at(&path, &owner).expect("should open");
        assert!(db.path().is_some());
        assert_eq!(db.owner(), &owner);
    }

    #[test]
    fn owner_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let owner = Identity::generate().user_id();

        drop(Database::open_at(&path, &owner).unwrap());

        let reopened = Database::open_at(&path, &owner).expect("same owner reopens");
        assert_eq!(reopened.owner(), &owner);
    }

    #[test]
    fn reopen_with_different_owner_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let owner = Identity::generate().user_id();
        let intruder = Identity::generate().user_id();

        drop(Database::open_at(&path, &owner).unwrap());

        match Database::open_at(&path, &intruder) {
            Err(StoreError::OwnerMismatch) => {}
            Err(other) => panic!("expected OwnerMismatch, got {other:?}"),
            Ok(_) => panic!("expected OwnerMismatch, store opened anyway"),
        }
    }
}
