//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a UI or indexer layer without re-mapping.

use casebook_shared::types::{CaseId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// One portfolio/experience entry.
///
/// This is the public shape: the internal tombstone flag is not part of
/// it.  A tombstoned case is simply never returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Case {
    /// Sequential id assigned by the store, starting at 1, never reused.
    pub id: CaseId,
    /// Opaque text blob (JSON in practice).  The store never parses it.
    pub info: String,
    /// Start timestamp, seconds.  Never zero on a stored case.
    pub start_date: i64,
    /// End timestamp, seconds.  Zero means "ongoing".
    pub end_date: i64,
    /// Number of distinct identities currently liking this case.
    pub likes: u64,
}

// ---------------------------------------------------------------------------
// Like registration
// ---------------------------------------------------------------------------

/// One identity's one-time endorsement of one case.  Never revocable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Like {
    /// The liked case.
    pub case_id: CaseId,
    /// Ed25519 public key of the liker (32 bytes), stored as hex.
    pub liker: UserId,
    /// When the registration was recorded.
    pub created_at: DateTime<Utc>,
}
