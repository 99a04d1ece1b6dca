//! Sequential batch resolution of pincodes to coordinates.
//!
//! One batch is active at a time. Each record is resolved through the
//! layered lookup order (pre-supplied → cache → seed table → external
//! geocoder), with a fixed pause between external calls to respect the
//! upstream rate limit. Per-pincode failures are counted and skipped; a
//! batch never aborts.
//!
//! Starting a new batch supersedes any batch still in flight: every
//! emission is gated on a batch-identity token, so a stale batch's
//! late-arriving results can never overwrite fresher state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use salemap_core::{Coordinates, ResolutionProgress, ResolvedRecord, SalesRecord};

use crate::cache::CoordinateCache;
use crate::client::GeocodeClient;
use crate::seed::seed_coordinates;

/// Incremental outputs of a resolution batch, in input order.
#[derive(Debug, Clone)]
pub enum ResolveEvent {
    /// One record gained coordinates.
    Resolved(ResolvedRecord),
    /// Counters after each record, `processed` strictly increasing.
    Progress(ResolutionProgress),
    /// Final counters; emitted exactly once, when `processed == total`.
    Completed(ResolutionProgress),
}

/// Identity of one resolution batch.
///
/// Minted by [`Resolver::begin_batch`]; invalidated when a newer batch
/// begins. The resolver checks it before every emission and between items.
#[derive(Debug, Clone)]
pub struct BatchToken {
    id: u64,
    current: Arc<AtomicU64>,
}

impl BatchToken {
    /// True while no newer batch has been started.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}

/// Where a record's coordinates came from, for per-item logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolutionSource {
    Supplied,
    Cache,
    Seed,
    Lookup,
}

pub struct Resolver {
    client: GeocodeClient,
    cache: Arc<CoordinateCache>,
    country: String,
    lookup_delay: Duration,
    batch_seq: Arc<AtomicU64>,
}

impl Resolver {
    #[must_use]
    pub fn new(
        client: GeocodeClient,
        cache: Arc<CoordinateCache>,
        country: impl Into<String>,
        lookup_delay: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            country: country.into(),
            lookup_delay,
            batch_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Mints a token for a new batch, superseding every earlier token.
    #[must_use]
    pub fn begin_batch(&self) -> BatchToken {
        let id = self.batch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        BatchToken {
            id,
            current: Arc::clone(&self.batch_seq),
        }
    }

    /// Resolves `records` in input order, emitting [`ResolveEvent`]s as it
    /// goes and returning the settled resolved set.
    ///
    /// Returns `None` when the batch was superseded mid-flight; a superseded
    /// batch stops working at the next token check and its partial results
    /// are discarded. An empty input settles immediately.
    pub async fn resolve_batch(
        &self,
        records: &[SalesRecord],
        token: &BatchToken,
        events: &UnboundedSender<ResolveEvent>,
    ) -> Option<Vec<ResolvedRecord>> {
        let total = records.len();
        let mut progress = ResolutionProgress::start(total);
        let mut resolved: Vec<ResolvedRecord> = Vec::with_capacity(total);
        let last_index = total.saturating_sub(1);

        for (index, record) in records.iter().enumerate() {
            if !token.is_current() {
                tracing::debug!(batch = token.id, "batch superseded; discarding remaining work");
                return None;
            }

            let (coords, source) = self.resolve_one(record).await;

            progress.processed += 1;
            match coords {
                Some(coordinates) => {
                    tracing::debug!(
                        pincode = %record.pincode,
                        source = ?source,
                        "resolved"
                    );
                    let item = ResolvedRecord {
                        pincode: record.pincode.clone(),
                        sales: record.sales,
                        coordinates,
                    };
                    resolved.push(item.clone());
                    if token.is_current() {
                        let _ = events.send(ResolveEvent::Resolved(item));
                    }
                }
                None => {
                    progress.failures += 1;
                }
            }

            if token.is_current() {
                let _ = events.send(ResolveEvent::Progress(progress));
            }

            // Pace only the external calls; cache and seed hits are free,
            // and the final item never trails a sleep.
            if source == Some(ResolutionSource::Lookup) && index < last_index {
                tokio::time::sleep(self.lookup_delay).await;
            }
        }

        if !token.is_current() {
            return None;
        }
        let _ = events.send(ResolveEvent::Completed(progress));
        Some(resolved)
    }

    /// Layered lookup for one record. The source is `None` only when the
    /// external call failed or returned nothing.
    async fn resolve_one(
        &self,
        record: &SalesRecord,
    ) -> (Option<Coordinates>, Option<ResolutionSource>) {
        if let Some(coords) = record.coordinates {
            return (Some(coords), Some(ResolutionSource::Supplied));
        }

        if let Some(coords) = self.cache.get(&record.pincode) {
            return (Some(coords), Some(ResolutionSource::Cache));
        }

        if let Some(coords) = seed_coordinates(&record.pincode) {
            self.cache.set(&record.pincode, coords);
            return (Some(coords), Some(ResolutionSource::Seed));
        }

        match self.client.lookup(&record.pincode, &self.country).await {
            Ok(Some(coords)) => {
                self.cache.set(&record.pincode, coords);
                (Some(coords), Some(ResolutionSource::Lookup))
            }
            Ok(None) => {
                tracing::debug!(pincode = %record.pincode, "geocoder returned no result");
                (None, Some(ResolutionSource::Lookup))
            }
            Err(e) => {
                tracing::warn!(pincode = %record.pincode, error = %e, "geocode lookup failed");
                (None, Some(ResolutionSource::Lookup))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    /// A client whose base URL refuses connections, so any external call
    /// surfaces as a failure instead of hanging.
    fn dead_client() -> GeocodeClient {
        GeocodeClient::new(1, "salemap-test/0.1", "http://127.0.0.1:9").unwrap()
    }

    fn resolver() -> Resolver {
        Resolver::new(
            dead_client(),
            Arc::new(CoordinateCache::memory_only()),
            "India",
            Duration::from_millis(0),
        )
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ResolveEvent>) -> Vec<ResolveEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn empty_input_settles_immediately() {
        let resolver = resolver();
        let token = resolver.begin_batch();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let resolved = resolver.resolve_batch(&[], &token, &tx).await.unwrap();
        assert!(resolved.is_empty());

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ResolveEvent::Completed(p) if p.total == 0 && p.processed == 0 && p.failures == 0
        ));
    }

    #[tokio::test]
    async fn pre_supplied_coordinates_skip_every_lookup_tier() {
        let resolver = resolver();
        let mut record = SalesRecord::new("000000", 10.0);
        record.coordinates = Coordinates::new(1.0, 2.0);

        let token = resolver.begin_batch();
        let (tx, _rx) = mpsc::unbounded_channel();
        let resolved = resolver
            .resolve_batch(&[record], &token, &tx)
            .await
            .unwrap();

        assert_eq!(resolved.len(), 1);
        // Nothing was cached: the record never reached the cache tier.
        assert!(resolver.cache.is_empty());
    }

    #[tokio::test]
    async fn seed_hit_resolves_without_external_call_and_promotes_to_cache() {
        let resolver = resolver();
        let token = resolver.begin_batch();
        let (tx, _rx) = mpsc::unbounded_channel();

        let resolved = resolver
            .resolve_batch(&[SalesRecord::new("560001", 100.0)], &token, &tx)
            .await
            .unwrap();

        // A dead client means any external call would have failed; success
        // proves the seed tier answered.
        assert_eq!(resolved.len(), 1);
        assert!((resolved[0].coordinates.lat - 12.9716).abs() < 1e-9);
        assert!(resolver.cache.get("560001").is_some(), "seed hit is written through");
    }

    #[tokio::test]
    async fn failed_lookup_is_counted_and_batch_continues() {
        let resolver = resolver();
        let token = resolver.begin_batch();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let records = vec![
            SalesRecord::new("999999", 10.0), // no seed entry, dead client
            SalesRecord::new("560001", 20.0), // seed hit
        ];
        let resolved = resolver.resolve_batch(&records, &token, &tx).await.unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].pincode, "560001");

        let events = drain(&mut rx);
        let Some(ResolveEvent::Completed(final_progress)) = events.last() else {
            panic!("expected a Completed event, got: {events:?}");
        };
        assert_eq!(final_progress.processed, 2);
        assert_eq!(final_progress.failures, 1);
    }

    #[tokio::test]
    async fn progress_is_monotonic_and_completes_exactly_once() {
        let resolver = resolver();
        let token = resolver.begin_batch();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let records = vec![
            SalesRecord::new("560001", 1.0),
            SalesRecord::new("560002", 2.0),
            SalesRecord::new("560003", 3.0),
        ];
        resolver.resolve_batch(&records, &token, &tx).await.unwrap();

        let events = drain(&mut rx);
        let mut last_processed = 0;
        let mut completions = 0;
        for event in &events {
            match event {
                ResolveEvent::Progress(p) => {
                    assert!(p.processed > last_processed, "processed must strictly increase");
                    last_processed = p.processed;
                }
                ResolveEvent::Completed(p) => {
                    completions += 1;
                    assert!(p.is_complete());
                    assert_eq!(p.processed, 3);
                }
                ResolveEvent::Resolved(_) => {}
            }
        }
        assert_eq!(last_processed, 3);
        assert_eq!(completions, 1);
    }

    #[tokio::test]
    async fn superseded_batch_emits_nothing_and_returns_none() {
        let resolver = resolver();
        let token_a = resolver.begin_batch();
        let _token_b = resolver.begin_batch();
        assert!(!token_a.is_current());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = resolver
            .resolve_batch(&[SalesRecord::new("560001", 1.0)], &token_a, &tx)
            .await;

        assert!(result.is_none());
        assert!(drain(&mut rx).is_empty(), "stale batch must not emit");
    }

    #[tokio::test]
    async fn new_batch_token_invalidates_the_previous_one() {
        let resolver = resolver();
        let token_a = resolver.begin_batch();
        assert!(token_a.is_current());
        let token_b = resolver.begin_batch();
        assert!(!token_a.is_current());
        assert!(token_b.is_current());
    }
}
