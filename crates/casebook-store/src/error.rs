use casebook_shared::types::CaseId;
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Caller is not the owner on an owner-gated operation.
    #[error("Unauthorized: caller is not the owner")]
    Unauthorized,

    /// Rejected field value (start date of zero is the "unset" sentinel).
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// Case id was never assigned, or refers to a tombstoned case.
    /// The two conditions are deliberately indistinguishable.
    #[error("Case {0} deleted or invalid id")]
    NotFound(CaseId),

    /// Caller already holds an active like on this case.
    #[error("Already liked case {0}")]
    AlreadyLiked(CaseId),

    /// The database file was created for a different owner identity.
    #[error("Store belongs to a different owner")]
    OwnerMismatch,

    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A stored identity failed to decode.
    #[error("Identity error: {0}")]
    Identity(#[from] casebook_shared::IdentityError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
