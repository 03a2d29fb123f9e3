//! v001 -- Initial schema creation.
//!
//! Creates the three core tables: `ledger_state` (singleton row holding
//! the owner, the main-info document and the running like total),
//! `cases`, and `likes`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Ledger state (singleton row, id is always 1)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS ledger_state (
    id          INTEGER PRIMARY KEY CHECK (id = 1),
    owner       TEXT NOT NULL,                -- hex-encoded 32-byte Ed25519 pubkey
    main_info   TEXT NOT NULL DEFAULT '',     -- opaque document, never parsed
    total_likes INTEGER NOT NULL DEFAULT 0    -- running sum over non-deleted cases
);

-- ----------------------------------------------------------------
-- Cases
-- ----------------------------------------------------------------
-- AUTOINCREMENT keeps ids strictly increasing and never reused, even
-- though tombstoned rows are retained anyway.
CREATE TABLE IF NOT EXISTS cases (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    info       TEXT NOT NULL,                 -- opaque blob, never parsed
    start_date INTEGER NOT NULL,              -- seconds, never 0
    end_date   INTEGER NOT NULL,              -- seconds, 0 = ongoing
    likes      INTEGER NOT NULL DEFAULT 0,
    deleted    INTEGER NOT NULL DEFAULT 0     -- tombstone, boolean 0/1
);

-- ----------------------------------------------------------------
-- Like registrations
-- ----------------------------------------------------------------
-- One row per (case, identity); the composite key enforces the
-- at-most-one-like rule.
CREATE TABLE IF NOT EXISTS likes (
    case_id    INTEGER NOT NULL,              -- FK -> cases(id)
    liker      TEXT NOT NULL,                 -- hex-encoded pubkey
    created_at TEXT NOT NULL,                 -- ISO-8601 / RFC-3339

    PRIMARY KEY (case_id, liker),
    FOREIGN KEY (case_id) REFERENCES cases(id)
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
