//! # casebook-shared
//!
//! Identity and id types shared by every Casebook crate.
//!
//! Caller identities are Ed25519 public keys.  There is no account
//! database: whoever holds the signing key *is* that identity.  The
//! store layer only ever sees the 32-byte public key, hex-encoded.

pub mod identity;
pub mod types;

mod error;

pub use error::IdentityError;
pub use identity::Identity;
pub use types::{CaseId, UserId};
