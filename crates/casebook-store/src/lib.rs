//! # casebook-store
//!
//! Single-owner portfolio ledger backed by SQLite.
//!
//! The store holds one opaque "main info" document plus an ordered
//! collection of soft-deletable case records, each of which any caller
//! identity may endorse with at most one like.  Every mutation except
//! liking is gated on the owner identity fixed when the database is
//! first created.
//!
//! The crate exposes the surface twice: synchronous typed helpers on
//! [`Database`], and the async [`Ledger`] handle that serializes all
//! callers through one lock and broadcasts [`LedgerEvent`]s.

pub mod cases;
pub mod database;
pub mod events;
pub mod ledger;
pub mod likes;
pub mod main_info;
pub mod migrations;
pub mod models;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use events::LedgerEvent;
pub use ledger::Ledger;
pub use models::*;
