//! Durable storage for PowerGuard outage events.
//!
//! This crate owns the single source of truth every PowerGuard view reads
//! from: the collection of reported power outages, and the summary derived
//! from it.
//!
//! # Core Concepts
//!
//! ## EventStore
//!
//! The [`EventStore`] keeps every [`EventRecord`] as one JSON array under a
//! single key (`"@PowerGuard:events"` by default) in a [`KvStore`]. It holds
//! no cache. Each read goes back to the backend, and each mutation reads the
//! whole collection, modifies it, and writes it back while holding a FIFO
//! gate so concurrent mutations cannot lose each other's changes.
//!
//! Failures are asymmetric on purpose:
//! - writes (`add`, `update`, `remove`) return [`Error::Persistence`];
//! - reads (`get_all`, `get`, `summary`) log the fault and return an empty
//!   result. [`EventStore::try_get_all`] is available for callers that need
//!   to tell "unreadable" from "empty".
//!
//! ## EventRecord
//!
//! One outage: location, estimated and actual duration in hours, damages,
//! [`Causes`], creation date and resolution flag. New events start as an
//! [`EventDraft`]; the store assigns the [`EventId`] and date.
//!
//! ## EventSummary
//!
//! [`EventSummary`] counts events, averages resolved durations and finds the
//! most affected location and the latest date. It is recomputed on demand.
//!
//! # Example
//!
//! ```no_run
//! use storage::{Cause, EventDraft, EventStore};
//!
//! # async fn example() -> storage::Result<()> {
//! let store = EventStore::open("events.db")?;
//!
//! let draft = EventDraft::new("Riverside", 2.5)?
//!     .with_cause(Cause::Thunderstorm)
//!     .with_damages("Downed line on 5th street");
//! let mut event = store.add(draft).await?;
//!
//! event.resolve(3.0)?;
//! store.update(&event).await?;
//!
//! let summary = store.summary().await;
//! println!("{} events, {} resolved", summary.total_events, summary.resolved_events);
//! # Ok(())
//! # }
//! ```

mod cause;
mod error;
mod event;
mod kv;
mod store;
mod summary;

pub use cause::{Cause, Causes, UnknownCause};
pub use error::{Error, KvError, PersistenceError, Result};
pub use event::{EventDraft, EventId, EventRecord};
pub use kv::{KvStore, MemoryKv, SqliteKv};
pub use store::{DEFAULT_NAMESPACE, EventStore};
pub use summary::{EventSummary, average_resolved_duration, most_frequent_location};

#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    fn drafts() -> impl Strategy<Value = Vec<(String, f64, Vec<Cause>)>> {
        prop::collection::vec(
            (
                "[A-Za-z ]{1,12}".prop_filter("non-blank", |s| !s.trim().is_empty()),
                0.1f64..48.0,
                prop::collection::vec(prop::sample::select(Cause::ALL.to_vec()), 0..4),
            ),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn adds_are_read_back_in_call_order(input in drafts()) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let store = EventStore::new(MemoryKv::new());
                let mut created = Vec::new();
                for (location, hours, causes) in &input {
                    let draft = EventDraft::new(location.clone(), *hours)
                        .unwrap()
                        .with_causes(causes.iter().copied().collect());
                    created.push(store.add(draft).await.unwrap());
                }

                let all = store.get_all().await;
                prop_assert_eq!(&all, &created);

                let mut ids: Vec<_> = all.iter().map(|e| e.id).collect();
                ids.sort_by_key(|id| id.0);
                ids.dedup();
                prop_assert_eq!(ids.len(), input.len());

                for (record, (location, hours, _)) in all.iter().zip(&input) {
                    prop_assert_eq!(&record.location, location);
                    prop_assert_eq!(record.estimated_duration, *hours);
                }
                Ok::<(), TestCaseError>(())
            })?;
        }
    }
}
