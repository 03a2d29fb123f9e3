//! Observable ledger notifications.
//!
//! Events carry no state of their own; an off-store indexer or UI that
//! wants the full record re-reads it through the normal surface.

use casebook_shared::types::{CaseId, UserId};
use serde::Serialize;

/// Notification broadcast by [`Ledger`](crate::ledger::Ledger).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A like was registered on a case.
    LikeSet { case_id: CaseId, liker: UserId },
}
