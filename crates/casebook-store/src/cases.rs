//! CRUD operations for [`Case`] records.
//!
//! Cases are created by the owner, content-edited in place, and removed
//! by tombstone only: the row is kept so its id can never be reassigned
//! and enumeration order stays stable.

use casebook_shared::types::{CaseId, UserId};
use rusqlite::params;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::Case;

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new case and return its assigned id.  Owner only.
    ///
    /// Ids are assigned `1, 2, 3, ...` in creation order regardless of
    /// intervening deletions.  A rejected call consumes no id.
    pub fn add_case(
        &self,
        caller: &UserId,
        info: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<CaseId> {
        self.require_owner(caller)?;
        if start_date == 0 {
            return Err(StoreError::InvalidInput("start date can not be 0"));
        }

        self.conn().execute(
            "INSERT INTO cases (info, start_date, end_date) VALUES (?1, ?2, ?3)",
            params![info, start_date, end_date],
        )?;
        let id = CaseId(self.conn().last_insert_rowid() as u64);

        tracing::info!(case_id = %id, "case added");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single live case by id.
    ///
    /// A tombstoned id and a never-assigned id both fail with
    /// [`StoreError::NotFound`]; callers cannot tell them apart.
    pub fn case(&self, id: CaseId) -> Result<Case> {
        self.conn()
            .query_row(
                "SELECT id, info, start_date, end_date, likes
                 FROM cases
                 WHERE id = ?1 AND deleted = 0",
                params![id.0 as i64],
                row_to_case,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
                other => StoreError::Sqlite(other),
            })
    }

    /// List every live case, ascending id (= insertion) order.
    pub fn cases(&self) -> Result<Vec<Case>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, info, start_date, end_date, likes
             FROM cases
             WHERE deleted = 0
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_case)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Number of live cases.
    pub fn total_cases(&self) -> Result<u64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM cases WHERE deleted = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Overwrite a live case's content fields in place.  Owner only.
    ///
    /// `likes` and the tombstone flag are untouched: endorsements survive
    /// content edits.
    pub fn update_case(
        &self,
        caller: &UserId,
        id: CaseId,
        info: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<()> {
        self.require_owner(caller)?;
        if !self.case_is_live(id.0 as i64)? {
            return Err(StoreError::NotFound(id));
        }
        if start_date == 0 {
            return Err(StoreError::InvalidInput("start date can not be 0"));
        }

        self.conn().execute(
            "UPDATE cases SET info = ?2, start_date = ?3, end_date = ?4 WHERE id = ?1",
            params![id.0 as i64, info, start_date, end_date],
        )?;

        tracing::info!(case_id = %id, "case updated");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Delete (tombstone)
    // ------------------------------------------------------------------

    /// Tombstone a live case.  Owner only.
    ///
    /// The case's like count is subtracted from the running total in the
    /// same transaction; the row itself is retained so the id is never
    /// reassigned.  Tombstoning is terminal -- nothing revives a case.
    pub fn remove_case(&self, caller: &UserId, id: CaseId) -> Result<()> {
        self.require_owner(caller)?;

        let tx = self.conn().unchecked_transaction()?;

        let likes: i64 = tx
            .query_row(
                "SELECT likes FROM cases WHERE id = ?1 AND deleted = 0",
                params![id.0 as i64],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
                other => StoreError::Sqlite(other),
            })?;

        tx.execute(
            "UPDATE cases SET deleted = 1 WHERE id = ?1",
            params![id.0 as i64],
        )?;
        tx.execute(
            "UPDATE ledger_state SET total_likes = total_likes - ?1 WHERE id = 1",
            params![likes],
        )?;

        tx.commit()?;

        tracing::info!(case_id = %id, released_likes = likes, "case removed");
        Ok(())
    }
}

fn row_to_case(row: &rusqlite::Row<'_>) -> rusqlite::Result<Case> {
    let id: i64 = row.get(0)?;
    let info: String = row.get(1)?;
    let start_date: i64 = row.get(2)?;
    let end_date: i64 = row.get(3)?;
    let likes: i64 = row.get(4)?;

    Ok(Case {
        id: CaseId(id as u64),
        info,
        start_date,
        end_date,
        likes: likes as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_shared::Identity;

    fn test_db() -> (tempfile::TempDir, Database, UserId) {
        let dir = tempfile::tempdir().unwrap();
        let owner = Identity::generate().user_id();
        let db = Database::open_at(&dir.path().join("test.db"), &owner).unwrap();
        (dir, db, owner)
    }

    fn case_info(name: &str) -> String {
        serde_json::json!({
            "name": name,
            "employer": "Uddug Team",
            "url": "https://example.org",
        })
        .to_string()
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let (_dir, db, owner) = test_db();

        for expected in 1..=4u64 {
            let id = db.add_case(&owner, &case_info("x"), 100, 0).unwrap();
            assert_eq!(id, CaseId(expected));
        }
    }

    #[test]
    fn add_returns_stored_shape() {
        let (_dir, db, owner) = test_db();
        let info = case_info("CV");

        let id = db.add_case(&owner, &info, 1_674_172_800, 1_674_432_000).unwrap();
        let case = db.case(id).unwrap();

        assert_eq!(case.id, id);
        assert_eq!(case.info, info);
        assert_eq!(case.start_date, 1_674_172_800);
        assert_eq!(case.end_date, 1_674_432_000);
        assert_eq!(case.likes, 0);
    }

    #[test]
    fn zero_start_date_is_rejected_and_consumes_no_id() {
        let (_dir, db, owner) = test_db();

        match db.add_case(&owner, &case_info("bad"), 0, 500) {
            Err(StoreError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }

        // The failed add must not burn an id.
        let id = db.add_case(&owner, &case_info("good"), 100, 0).unwrap();
        assert_eq!(id, CaseId(1));
    }

    #[test]
    fn end_before_start_is_permitted() {
        let (_dir, db, owner) = test_db();
        let id = db.add_case(&owner, &case_info("odd"), 200, 100).unwrap();
        assert_eq!(db.case(id).unwrap().end_date, 100);
    }

    #[test]
    fn non_owner_cannot_add() {
        let (_dir, db, _owner) = test_db();
        let stranger = Identity::generate().user_id();

        match db.add_case(&stranger, &case_info("x"), 100, 0) {
            Err(StoreError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        assert_eq!(db.total_cases().unwrap(), 0);
    }

    #[test]
    fn update_overwrites_content_and_preserves_likes() {
        let (_dir, db, owner) = test_db();
        let viewer = Identity::generate().user_id();

        let id = db.add_case(&owner, &case_info("CV"), 100, 200).unwrap();
        db.set_like(&viewer, id).unwrap();

        let new_info = case_info("On-chain CV");
        db.update_case(&owner, id, &new_info, 100, 200).unwrap();

        let case = db.case(id).unwrap();
        assert_eq!(case.info, new_info);
        assert_eq!(case.likes, 1);
    }

    #[test]
    fn update_rejects_zero_start_date() {
        let (_dir, db, owner) = test_db();
        let id = db.add_case(&owner, &case_info("CV"), 100, 200).unwrap();

        match db.update_case(&owner, id, &case_info("CV"), 0, 200) {
            Err(StoreError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert_eq!(db.case(id).unwrap().start_date, 100);
    }

    #[test]
    fn update_unknown_and_deleted_ids_collapse_to_not_found() {
        let (_dir, db, owner) = test_db();

        // Never assigned.
        match db.update_case(&owner, CaseId(1), "x", 100, 0) {
            Err(StoreError::NotFound(CaseId(1))) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }

        // Tombstoned.
        let id = db.add_case(&owner, &case_info("CV"), 100, 0).unwrap();
        db.remove_case(&owner, id).unwrap();
        match db.update_case(&owner, id, "x", 100, 0) {
            Err(StoreError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn non_owner_cannot_update_or_remove() {
        let (_dir, db, owner) = test_db();
        let stranger = Identity::generate().user_id();
        let id = db.add_case(&owner, &case_info("CV"), 100, 0).unwrap();

        assert!(matches!(
            db.update_case(&stranger, id, "x", 100, 0),
            Err(StoreError::Unauthorized)
        ));
        assert!(matches!(
            db.remove_case(&stranger, id),
            Err(StoreError::Unauthorized)
        ));
        assert_eq!(db.case(id).unwrap().info, case_info("CV"));
    }

    #[test]
    fn enumeration_skips_tombstones_and_keeps_order() {
        let (_dir, db, owner) = test_db();

        db.add_case(&owner, &case_info("case1"), 100, 0).unwrap();
        db.add_case(&owner, &case_info("case2"), 200, 0).unwrap();
        db.add_case(&owner, &case_info("case3"), 300, 0).unwrap();

        db.remove_case(&owner, CaseId(2)).unwrap();

        let cases = db.cases().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].start_date, 100);
        assert_eq!(cases[1].start_date, 300);
        assert_eq!(db.total_cases().unwrap(), 2);

        // Ids keep growing past the tombstone; 2 is never reassigned.
        let id = db.add_case(&owner, &case_info("case4"), 400, 0).unwrap();
        assert_eq!(id, CaseId(4));
    }

    #[test]
    fn remove_is_terminal() {
        let (_dir, db, owner) = test_db();
        let id = db.add_case(&owner, &case_info("CV"), 100, 0).unwrap();

        db.remove_case(&owner, id).unwrap();

        assert!(matches!(db.case(id), Err(StoreError::NotFound(_))));
        assert!(matches!(
            db.remove_case(&owner, id),
            Err(StoreError::NotFound(_))
        ));
    }
}
