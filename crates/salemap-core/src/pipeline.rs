//! Pure derivation from resolved records + filter parameters to the
//! render-ready views: display set, summary stats, heat buckets.
//!
//! Everything here is deterministic and side-effect free; calling
//! [`aggregate`] twice with the same inputs yields identical output.

use serde::{Deserialize, Serialize};

use crate::types::ResolvedRecord;

/// Minimum heat intensity, so low-sales points stay visible on the map.
pub const INTENSITY_FLOOR: f64 = 0.2;
/// Ratio below which a point lands in the low bucket.
pub const BUCKET_LOW_MAX: f64 = 0.33;
/// Ratio below which a point lands in the mid bucket; at or above is high.
pub const BUCKET_MID_MAX: f64 = 0.66;

/// Row cap applied after sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Limit {
    #[default]
    All,
    Top(usize),
}

impl Limit {
    /// Parses a user-supplied limit string.
    ///
    /// `"all"` (any case) and anything non-numeric fail open to [`Limit::All`];
    /// a numeric value caps the display set at that many rows.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            return Limit::All;
        }
        match raw.trim().parse::<usize>() {
            Ok(n) => Limit::Top(n),
            Err(_) => Limit::All,
        }
    }
}

/// View parameters for deriving a display set. Never mutates the records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Substring match on the pincode; empty matches everything.
    pub search_term: String,
    /// Inclusive lower sales bound.
    pub min_sales: Option<f64>,
    /// Inclusive upper sales bound.
    pub max_sales: Option<f64>,
    pub limit: Limit,
}

/// Summary statistics over the display set. All zero when it is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesStats {
    pub total_sales: f64,
    pub average_sales: f64,
    pub max_sales: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketId {
    Low,
    Mid,
    High,
}

/// One weighted point for density-map rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lon: f64,
    /// In `[INTENSITY_FLOOR, 1.0]`, never zero.
    pub intensity: f64,
}

/// A non-empty grouping of points by relative sales intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatBucket {
    pub id: BucketId,
    pub points: Vec<HeatPoint>,
}

/// Output of one [`aggregate`] pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Filtered records, sales descending (stable), truncated to the limit.
    pub display_set: Vec<ResolvedRecord>,
    pub stats: SalesStats,
    /// Low/mid/high buckets in that order; empty buckets omitted.
    pub heat_buckets: Vec<HeatBucket>,
}

/// Derives the display set, stats, and heat buckets for the given filter.
#[must_use]
pub fn aggregate(records: &[ResolvedRecord], filter: &FilterState) -> Aggregation {
    let mut display_set: Vec<ResolvedRecord> = records
        .iter()
        .filter(|r| matches_filter(r, filter))
        .cloned()
        .collect();

    // Stable sort keeps input order for equal sales figures.
    display_set.sort_by(|a, b| b.sales.total_cmp(&a.sales));

    if let Limit::Top(n) = filter.limit {
        display_set.truncate(n);
    }

    Aggregation {
        stats: compute_stats(&display_set),
        heat_buckets: heat_buckets(&display_set),
        display_set,
    }
}

fn matches_filter(record: &ResolvedRecord, filter: &FilterState) -> bool {
    if !filter.search_term.is_empty() && !record.pincode.contains(&filter.search_term) {
        return false;
    }
    if let Some(min) = filter.min_sales {
        if record.sales < min {
            return false;
        }
    }
    if let Some(max) = filter.max_sales {
        if record.sales > max {
            return false;
        }
    }
    true
}

#[allow(clippy::cast_precision_loss)]
fn compute_stats(display_set: &[ResolvedRecord]) -> SalesStats {
    if display_set.is_empty() {
        return SalesStats::default();
    }
    let total_sales: f64 = display_set.iter().map(|r| r.sales).sum();
    let max_sales = display_set.iter().map(|r| r.sales).fold(0.0_f64, f64::max);
    SalesStats {
        total_sales,
        average_sales: total_sales / display_set.len() as f64,
        max_sales,
    }
}

/// Normalised position of `sales` within `[min, max]`; 0.5 when the span is
/// degenerate so a uniform display set lands in one neutral bucket.
fn sales_ratio(sales: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        0.5
    } else {
        (sales - min) / (max - min)
    }
}

fn heat_buckets(display_set: &[ResolvedRecord]) -> Vec<HeatBucket> {
    if display_set.is_empty() {
        return Vec::new();
    }

    let min = display_set
        .iter()
        .map(|r| r.sales)
        .fold(f64::INFINITY, f64::min);
    let max = display_set
        .iter()
        .map(|r| r.sales)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut low = Vec::new();
    let mut mid = Vec::new();
    let mut high = Vec::new();

    for record in display_set {
        let ratio = sales_ratio(record.sales, min, max);
        let point = HeatPoint {
            lat: record.coordinates.lat,
            lon: record.coordinates.lon,
            intensity: INTENSITY_FLOOR + (1.0 - INTENSITY_FLOOR) * ratio,
        };
        if ratio < BUCKET_LOW_MAX {
            low.push(point);
        } else if ratio < BUCKET_MID_MAX {
            mid.push(point);
        } else {
            high.push(point);
        }
    }

    [
        (BucketId::Low, low),
        (BucketId::Mid, mid),
        (BucketId::High, high),
    ]
    .into_iter()
    .filter(|(_, points)| !points.is_empty())
    .map(|(id, points)| HeatBucket { id, points })
    .collect()
}
