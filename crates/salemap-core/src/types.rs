//! Domain types shared across the salemap crates.

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair. Both components are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting NaN and infinite components.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() {
            Some(Self { lat, lon })
        } else {
            None
        }
    }
}

/// One sales figure keyed by pincode, as produced by ingestion.
///
/// `coordinates` is populated when the input already carried a lat/lon pair
/// (e.g., an upload with explicit columns); the resolver accepts such records
/// without any lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Opaque string identity key. No format validation is applied.
    pub pincode: String,
    /// Non-negative sales amount.
    pub sales: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl SalesRecord {
    #[must_use]
    pub fn new(pincode: impl Into<String>, sales: f64) -> Self {
        Self {
            pincode: pincode.into(),
            sales,
            coordinates: None,
        }
    }
}

/// A [`SalesRecord`] whose coordinates are guaranteed present.
///
/// Records that cannot be resolved are excluded from the resolved set rather
/// than carried with absent coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub pincode: String,
    pub sales: f64,
    pub coordinates: Coordinates,
}

/// Progress counters for one resolution batch.
///
/// `processed` and `failures` only ever grow within a batch; a new batch
/// starts from zero with `total` fixed at batch start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionProgress {
    pub processed: usize,
    pub total: usize,
    pub failures: usize,
}

impl ResolutionProgress {
    #[must_use]
    pub fn start(total: usize) -> Self {
        Self {
            processed: 0,
            total,
            failures: 0,
        }
    }

    /// True once every input record has been accounted for.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.processed == self.total
    }
}

/// Sums duplicate pincodes into one record each, preserving first-seen order.
///
/// A later duplicate contributes its sales amount to the existing record; if
/// the existing record has no coordinates and the duplicate supplies some,
/// they are adopted. This runs once at ingest, before resolution.
#[must_use]
pub fn coalesce_records(records: Vec<SalesRecord>) -> Vec<SalesRecord> {
    let mut out: Vec<SalesRecord> = Vec::with_capacity(records.len());
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for record in records {
        match index.get(&record.pincode) {
            Some(&i) => {
                out[i].sales += record.sales;
                if out[i].coordinates.is_none() {
                    out[i].coordinates = record.coordinates;
                }
            }
            None => {
                index.insert(record.pincode.clone(), out.len());
                out.push(record);
            }
        }
    }

    out
}
