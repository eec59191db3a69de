//! The event store: one JSON array of records under one key.

use crate::{
    EventDraft, EventId, EventRecord, EventSummary, KvStore, PersistenceError, Result, SqliteKv,
};
use std::path::Path;
use tokio::sync::Mutex;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "@PowerGuard";

/// Durable, ordered collection of outage events.
///
/// Nothing is cached: every call re-reads the collection from the backend.
/// Mutations are full read-modify-write cycles and pass one at a time
/// through a FIFO gate, so concurrent callers cannot overwrite each other.
pub struct EventStore<K = SqliteKv> {
    kv: K,
    key: String,
    write_gate: Mutex<()>,
}

impl EventStore<SqliteKv> {
    /// Open or create an SQLite-backed store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let kv = SqliteKv::open(path).map_err(PersistenceError::Read)?;
        Ok(Self::new(kv))
    }

    /// Create an in-memory SQLite-backed store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let kv = SqliteKv::in_memory().map_err(PersistenceError::Read)?;
        Ok(Self::new(kv))
    }
}

impl<K: KvStore> EventStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_namespace(kv, DEFAULT_NAMESPACE)
    }

    /// Store events under `"<namespace>:events"`.
    pub fn with_namespace(kv: K, namespace: &str) -> Self {
        Self {
            kv,
            key: format!("{namespace}:events"),
            write_gate: Mutex::new(()),
        }
    }

    /// The key the collection is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    /// Record a new event and return it with its generated id and date.
    pub async fn add(&self, draft: EventDraft) -> Result<EventRecord> {
        let _turn = self.write_gate.lock().await;
        let mut events = self.load().await?;
        let record = EventRecord::from_draft(draft);
        events.push(record.clone());
        self.save(&events).await?;
        tracing::debug!(id = %record.id, location = %record.location, "event added");
        Ok(record)
    }

    /// All events in insertion order.
    ///
    /// An unreadable collection is logged and reported as empty.
    pub async fn get_all(&self) -> Vec<EventRecord> {
        match self.load().await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read events, showing none");
                Vec::new()
            }
        }
    }

    /// All events in insertion order, surfacing read failures.
    pub async fn try_get_all(&self) -> Result<Vec<EventRecord>> {
        self.load().await
    }

    /// The event with the given id, if any.
    pub async fn get(&self, id: EventId) -> Option<EventRecord> {
        self.get_all().await.into_iter().find(|e| e.id == id)
    }

    /// Replace the stored event that has `record.id`, keeping its position.
    ///
    /// Returns `Ok(false)` without writing anything when no event has that
    /// id; this never inserts.
    pub async fn update(&self, record: &EventRecord) -> Result<bool> {
        let _turn = self.write_gate.lock().await;
        let mut events = self.load().await?;
        let Some(slot) = events.iter_mut().find(|e| e.id == record.id) else {
            tracing::debug!(id = %record.id, "update skipped, no such event");
            return Ok(false);
        };
        *slot = record.clone();
        self.save(&events).await?;
        tracing::debug!(id = %record.id, resolved = record.resolved, "event updated");
        Ok(true)
    }

    /// Delete the event with the given id. Returns whether one was removed.
    pub async fn remove(&self, id: EventId) -> Result<bool> {
        let _turn = self.write_gate.lock().await;
        let mut events = self.load().await?;
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Ok(false);
        }
        self.save(&events).await?;
        tracing::debug!(%id, "event removed");
        Ok(true)
    }

    /// Aggregate statistics over the current collection.
    ///
    /// Recomputed on every call; a read fault yields the empty summary.
    pub async fn summary(&self) -> EventSummary {
        EventSummary::from_events(&self.get_all().await)
    }

    async fn load(&self) -> Result<Vec<EventRecord>> {
        let raw = self
            .kv
            .get(&self.key)
            .await
            .map_err(PersistenceError::Read)?;
        match raw {
            Some(json) => Ok(serde_json::from_str(&json).map_err(PersistenceError::Corrupt)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, events: &[EventRecord]) -> Result<()> {
        let json = serde_json::to_string(events).map_err(PersistenceError::Encode)?;
        self.kv
            .set(&self.key, json)
            .await
            .map_err(PersistenceError::Write)?;
        Ok(())
    }
}
