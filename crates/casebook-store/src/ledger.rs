//! The async single-writer handle.
//!
//! There is exactly one logical ledger per store; [`Ledger`] wraps the
//! [`Database`] in `Arc<tokio::sync::Mutex<_>>` so every caller contends
//! for one lock and each operation commits fully (state plus
//! notification) before the next is observed.  Clones share the same
//! state and event channel.

use std::path::Path;
use std::sync::Arc;

use casebook_shared::types::{CaseId, UserId};
use tokio::sync::{broadcast, Mutex};

use crate::database::Database;
use crate::error::Result;
use crate::events::LedgerEvent;
use crate::models::Case;

/// Capacity of the event channel.  A lagging subscriber loses oldest
/// events first; the ledger itself never blocks on delivery.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Shared handle to one ledger instance.
#[derive(Clone)]
pub struct Ledger {
    db: Arc<Mutex<Database>>,
    events: broadcast::Sender<LedgerEvent>,
}

impl Ledger {
    /// Wrap an opened database in a shared handle.
    pub fn new(db: Database) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            db: Arc::new(Mutex::new(db)),
            events,
        }
    }

    /// Open (or create) the ledger at an explicit path.
    pub fn open_at(path: &Path, owner: &UserId) -> Result<Self> {
        Ok(Self::new(Database::open_at(path, owner)?))
    }

    /// Subscribe to ledger notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// The owner identity this ledger was created for.
    pub async fn owner(&self) -> UserId {
        *self.db.lock().await.owner()
    }

    // ------------------------------------------------------------------
    // Main info
    // ------------------------------------------------------------------

    pub async fn main_info(&self) -> Result<String> {
        self.db.lock().await.main_info()
    }

    pub async fn update_main_info(&self, caller: &UserId, doc: &str) -> Result<()> {
        self.db.lock().await.update_main_info(caller, doc)
    }

    // ------------------------------------------------------------------
    // Cases
    // ------------------------------------------------------------------

    pub async fn add_case(
        &self,
        caller: &UserId,
        info: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<CaseId> {
        self.db
            .lock()
            .await
            .add_case(caller, info, start_date, end_date)
    }

    pub async fn update_case(
        &self,
        caller: &UserId,
        id: CaseId,
        info: &str,
        start_date: i64,
        end_date: i64,
    ) -> Result<()> {
        self.db
            .lock()
            .await
            .update_case(caller, id, info, start_date, end_date)
    }

    pub async fn remove_case(&self, caller: &UserId, id: CaseId) -> Result<()> {
        self.db.lock().await.remove_case(caller, id)
    }

    pub async fn case(&self, id: CaseId) -> Result<Case> {
        self.db.lock().await.case(id)
    }

    pub async fn cases(&self) -> Result<Vec<Case>> {
        self.db.lock().await.cases()
    }

    pub async fn total_cases(&self) -> Result<u64> {
        self.db.lock().await.total_cases()
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    /// Register a like and broadcast [`LedgerEvent::LikeSet`].
    ///
    /// The lock is held across both the write and the send, so
    /// subscribers observe events in commit order.
    pub async fn set_like(&self, caller: &UserId, id: CaseId) -> Result<()> {
        let db = self.db.lock().await;
        let like = db.set_like(caller, id)?;

        tracing::info!(case_id = %like.case_id, liker = %like.liker.short(), "like set");

        // Send fails only when nobody is subscribed; that is fine.
        let _ = self.events.send(LedgerEvent::LikeSet {
            case_id: like.case_id,
            liker: like.liker,
        });
        Ok(())
    }

    pub async fn total_likes(&self) -> Result<u64> {
        self.db.lock().await.total_likes()
    }
}
