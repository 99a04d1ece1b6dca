//! CSV export of the display set.
//!
//! The emitted table is the format contract for consumers re-importing this
//! pipeline's output: header `pincode,sales,lat,lng`, one comma-separated
//! row per record, newline-delimited.

use crate::types::ResolvedRecord;

pub const EXPORT_HEADER: &str = "pincode,sales,lat,lng";

/// Renders the display set as CSV text, header row included.
#[must_use]
pub fn export_csv(display_set: &[ResolvedRecord]) -> String {
    let mut out = String::with_capacity(EXPORT_HEADER.len() + 1 + display_set.len() * 32);
    out.push_str(EXPORT_HEADER);
    out.push('\n');
    for record in display_set {
        out.push_str(&record.pincode);
        out.push(',');
        out.push_str(&record.sales.to_string());
        out.push(',');
        out.push_str(&record.coordinates.lat.to_string());
        out.push(',');
        out.push_str(&record.coordinates.lon.to_string());
        out.push('\n');
    }
    out
}
