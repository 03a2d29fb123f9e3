//! The single "main info" document.
//!
//! One opaque text blob describing the owner (JSON in practice).  The
//! store never parses it and replaces it wholesale on every update.

use casebook_shared::types::UserId;
use rusqlite::params;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Current main-info document, verbatim.  Empty string if never set.
    pub fn main_info(&self) -> Result<String> {
        let doc: String = self.conn().query_row(
            "SELECT main_info FROM ledger_state WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(doc)
    }

    /// Replace the main-info document.  Owner only.
    ///
    /// The contents are not validated -- any text, including empty, is
    /// accepted and stored byte-for-byte.
    pub fn update_main_info(&self, caller: &UserId, doc: &str) -> Result<()> {
        self.require_owner(caller)?;

        self.conn().execute(
            "UPDATE ledger_state SET main_info = ?1 WHERE id = 1",
            params![doc],
        )?;

        tracing::debug!(len = doc.len(), "main info replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use casebook_shared::Identity;

    fn test_db() -> (tempfile::TempDir, Database, UserId) {
        let dir = tempfile::tempdir().unwrap();
        let owner = Identity::generate().user_id();
        let db = Database::open_at(&dir.path().join("test.db"), &owner).unwrap();
        (dir, db, owner)
    }

    #[test]
    fn starts_empty() {
        let (_dir, db, _owner) = test_db();
        assert_eq!(db.main_info().unwrap(), "");
    }

    #[test]
    fn owner_overwrites_wholesale() {
        let (_dir, db, owner) = test_db();

        let doc = serde_json::json!({
            "about": "Hello there! Here am I",
            "contacts": { "email": "user@gmail.com", "tg": "/user" },
        })
        .to_string();

        db.update_main_info(&owner, &doc).unwrap();
        assert_eq!(db.main_info().unwrap(), doc);

        // A second update replaces, never merges.
        db.update_main_info(&owner, "{}").unwrap();
        assert_eq!(db.main_info().unwrap(), "{}");
    }

    #[test]
    fn empty_document_is_accepted() {
        let (_dir, db, owner) = test_db();
        db.update_main_info(&owner, "something").unwrap();
        db.update_main_info(&owner, "").unwrap();
        assert_eq!(db.main_info().unwrap(), "");
    }

    #[test]
    fn non_owner_is_rejected_and_state_unchanged() {
        let (_dir, db, owner) = test_db();
        let stranger = Identity::generate().user_id();

        db.update_main_info(&owner, "original").unwrap();

        match db.update_main_info(&stranger, "hijacked") {
            Err(StoreError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        assert_eq!(db.main_info().unwrap(), "original");
    }
}
