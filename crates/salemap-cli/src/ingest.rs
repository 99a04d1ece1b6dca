//! CSV ingestion for the `resolve` command.
//!
//! The core treats ingestion as an external collaborator, so the tolerant
//! text parsing lives here: malformed rows are logged and skipped, never
//! propagated, and duplicate pincodes are summed before resolution.

use salemap_core::{coalesce_records, Coordinates, SalesRecord};

/// Parses `pincode,sales[,lat,lon]` CSV text into sales records.
///
/// Rows with a missing pincode or a non-numeric/negative sales value are
/// skipped with a warning; a header row falls out naturally as a malformed
/// row. When both optional lat/lon columns parse as finite floats the record
/// carries pre-supplied coordinates and the resolver accepts it without any
/// lookup. Duplicate pincodes are summed, preserving first-seen order.
#[must_use]
pub(crate) fn parse_sales_csv(text: &str) -> Vec<SalesRecord> {
    let mut records = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (Some(&pincode), Some(&sales_raw)) = (fields.first(), fields.get(1)) else {
            tracing::warn!(line = line_no + 1, "skipping row with fewer than 2 fields");
            continue;
        };

        if pincode.is_empty() {
            tracing::warn!(line = line_no + 1, "skipping row with empty pincode");
            continue;
        }

        let Ok(sales) = sales_raw.parse::<f64>() else {
            // The header row lands here on its "sales" column.
            tracing::debug!(line = line_no + 1, value = sales_raw, "skipping non-numeric sales value");
            continue;
        };
        if !sales.is_finite() || sales < 0.0 {
            tracing::warn!(line = line_no + 1, sales, "skipping row with invalid sales amount");
            continue;
        }

        let mut record = SalesRecord::new(pincode, sales);
        if let (Some(lat_raw), Some(lon_raw)) = (fields.get(2), fields.get(3)) {
            if let (Ok(lat), Ok(lon)) = (lat_raw.parse::<f64>(), lon_raw.parse::<f64>()) {
                record.coordinates = Coordinates::new(lat, lon);
            }
        }
        records.push(record);
    }

    coalesce_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_row_is_skipped() {
        let records = parse_sales_csv("pincode,sales\n560001,100\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pincode, "560001");
    }

    #[test]
    fn malformed_rows_are_dropped_without_aborting() {
        let text = "560001,100\n,50\n560002,abc\n560003,-5\n560004,200\n";
        let records = parse_sales_csv(text);
        let pins: Vec<&str> = records.iter().map(|r| r.pincode.as_str()).collect();
        assert_eq!(pins, vec!["560001", "560004"]);
    }

    #[test]
    fn duplicate_pincodes_are_summed() {
        let records = parse_sales_csv("560001,100\n560002,10\n560001,50\n");
        assert_eq!(records.len(), 2);
        assert!((records[0].sales - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn optional_lat_lon_columns_become_pre_supplied_coordinates() {
        let records = parse_sales_csv("560001,100,12.9716,77.5946\n560002,50\n");
        let coords = records[0].coordinates.unwrap();
        assert!((coords.lat - 12.9716).abs() < 1e-9);
        assert!((coords.lon - 77.5946).abs() < 1e-9);
        assert!(records[1].coordinates.is_none());
    }

    #[test]
    fn unparseable_lat_lon_columns_are_ignored_not_fatal() {
        let records = parse_sales_csv("560001,100,north,east\n");
        assert_eq!(records.len(), 1);
        assert!(records[0].coordinates.is_none());
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_sales_csv("").is_empty());
        assert!(parse_sales_csv("pincode,sales\n").is_empty());
    }
}
