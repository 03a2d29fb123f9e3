//! Like registrations.
//!
//! Any identity, the owner included, may like a live case exactly once.
//! Likes are never revocable and individual registrations are not
//! queryable; only the aggregate counters are exposed.

use casebook_shared::types::{CaseId, UserId};
use chrono::Utc;
use rusqlite::params;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::Like;

impl Database {
    /// Register `caller`'s like on a live case.
    ///
    /// Fails with [`StoreError::NotFound`] for unknown or tombstoned ids
    /// (checked first, matching the rest of the surface) and with
    /// [`StoreError::AlreadyLiked`] on a duplicate registration.  A
    /// duplicate is a hard rejection: neither counter moves.
    ///
    /// Both counters and the registration row commit in one transaction.
    pub fn set_like(&self, caller: &UserId, id: CaseId) -> Result<Like> {
        let now = Utc::now();

        let tx = self.conn().unchecked_transaction()?;

        // Same connection as the transaction, so the check sees its state.
        if !self.case_is_live(id.0 as i64)? {
            return Err(StoreError::NotFound(id));
        }

        // The composite primary key turns a second like from the same
        // identity into a constraint violation.
        if let Err(e) = tx.execute(
            "INSERT INTO likes (case_id, liker, created_at) VALUES (?1, ?2, ?3)",
            params![id.0 as i64, caller.to_hex(), now.to_rfc3339()],
        ) {
            return Err(match e {
                rusqlite::Error::SqliteFailure(inner, _)
                    if inner.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    StoreError::AlreadyLiked(id)
                }
                other => StoreError::Sqlite(other),
            });
        }

        tx.execute(
            "UPDATE cases SET likes = likes + 1 WHERE id = ?1",
            params![id.0 as i64],
        )?;
        tx.execute(
            "UPDATE ledger_state SET total_likes = total_likes + 1 WHERE id = 1",
            [],
        )?;

        tx.commit()?;

        Ok(Like {
            case_id: id,
            liker: *caller,
            created_at: now,
        })
    }

    /// The incrementally maintained sum of likes over all live cases.
    pub fn total_likes(&self) -> Result<u64> {
        let total: i64 = self.conn().query_row(
            "SELECT total_likes FROM ledger_state WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(total as u64)
    }
}
