//! Static pincode seed table.
//!
//! Read-only reference data for Bengaluru PIN codes, consulted by the
//! resolver between the cache and the external lookup. Hits are written
//! through to the cache by the resolver; the table itself is never written.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use salemap_core::Coordinates;

/// Approximate centroid per PIN code, as `(pincode, lat, lon)`.
const SEED_ENTRIES: &[(&str, f64, f64)] = &[
    ("560001", 12.9716, 77.5946),
    ("560002", 12.9850, 77.5750),
    ("560003", 12.9900, 77.5700),
    ("560004", 12.9620, 77.5670),
    ("560005", 12.9580, 77.5430),
    ("560006", 12.9480, 77.5550),
    ("560007", 12.9580, 77.6200),
    ("560008", 12.9820, 77.6000),
    ("560009", 12.9550, 77.5900),
    ("560010", 12.9350, 77.5650),
    ("560011", 12.9450, 77.5800),
    ("560012", 12.9320, 77.5860),
    ("560013", 12.9200, 77.5580),
    ("560014", 12.9250, 77.6050),
    ("560015", 12.9750, 77.5500),
    ("560016", 12.9700, 77.5350),
    ("560017", 12.9900, 77.6200),
    ("560018", 12.9750, 77.6350),
    ("560019", 12.9550, 77.6450),
    ("560020", 13.0050, 77.5550),
    ("560021", 13.0100, 77.5700),
    ("560022", 13.0200, 77.5400),
    ("560023", 13.0000, 77.5900),
    ("560024", 12.9150, 77.5650),
    ("560025", 12.9500, 77.6100),
    ("560026", 12.9100, 77.5800),
    ("560027", 12.9650, 77.6100),
    ("560028", 12.9350, 77.6300),
    ("560029", 12.9000, 77.5850),
    ("560030", 12.8900, 77.5700),
    ("560031", 12.9450, 77.6500),
    ("560032", 13.0350, 77.5500),
    ("560033", 12.9100, 77.6200),
    ("560034", 12.9200, 77.6400),
    ("560035", 12.9500, 77.5300),
    ("560036", 12.9900, 77.6050),
    ("560037", 12.8900, 77.6250),
    ("560038", 12.9700, 77.6550),
    ("560039", 13.0000, 77.5200),
    ("560040", 13.0150, 77.5900),
    ("560041", 12.9600, 77.6700),
    ("560042", 12.8800, 77.5650),
    ("560043", 13.0400, 77.5350),
    ("560044", 13.0100, 77.5150),
    ("560045", 12.9850, 77.6500),
    ("560046", 13.0000, 77.6300),
    ("560047", 13.0300, 77.5800),
    ("560048", 12.8800, 77.5950),
    ("560049", 12.8950, 77.5400),
    ("560050", 13.0050, 77.6000),
    ("560051", 13.0500, 77.5500),
    ("560052", 13.0600, 77.5300),
    ("560053", 13.0500, 77.5700),
    ("560054", 13.0300, 77.5450),
    ("560055", 13.0300, 77.5150),
    ("560056", 12.9700, 77.5100),
    ("560057", 12.8550, 77.5900),
    ("560058", 12.9050, 77.6550),
    ("560059", 12.9200, 77.5250),
    ("560060", 12.8800, 77.5350),
    ("560061", 12.8800, 77.6450),
    ("560062", 13.0350, 77.5900),
    ("560063", 12.8650, 77.6050),
    ("560064", 13.0600, 77.5600),
    ("560065", 12.8600, 77.5600),
    ("560066", 13.0200, 77.6100),
    ("560067", 12.8550, 77.6400),
    ("560068", 12.9350, 77.6800),
    ("560069", 12.9350, 77.5100),
    ("560070", 12.8500, 77.6200),
    ("560071", 12.9550, 77.6900),
    ("560072", 13.0500, 77.5050),
    ("560073", 12.9700, 77.7100),
    ("560074", 12.8400, 77.5800),
    ("560075", 12.9350, 77.7000),
    ("560076", 12.8650, 77.5400),
    ("560077", 12.8400, 77.6600),
    ("560078", 13.0400, 77.6300),
    ("560079", 13.0200, 77.6400),
    ("560080", 12.8200, 77.5900),
    ("560081", 12.8400, 77.5400),
    ("560082", 12.9150, 77.6750),
    ("560083", 13.0500, 77.6500),
    ("560084", 12.8650, 77.6550),
    ("560085", 13.0700, 77.5100),
    ("560086", 12.9300, 77.4950),
    ("560087", 12.8500, 77.5350),
    ("560088", 12.8700, 77.6850),
    ("560089", 12.8500, 77.7500),
    ("560090", 12.8200, 77.6300),
    ("560091", 13.0800, 77.5200),
    ("560092", 12.8100, 77.6100),
    ("560093", 12.8300, 77.5500),
    ("560094", 13.0700, 77.5650),
    ("560095", 12.8900, 77.5050),
    ("560096", 13.0800, 77.5700),
    ("560097", 12.9100, 77.7300),
    ("560098", 12.9500, 77.7600),
    ("560099", 13.0100, 77.6800),
    ("560100", 13.0400, 77.6700),
    ("560102", 13.0700, 77.5450),
    ("560103", 13.0900, 77.5650),
    ("560104", 13.0700, 77.6500),
    ("560105", 13.0600, 77.5900),
    ("560107", 12.9800, 77.7400),
    ("560108", 13.0950, 77.5200),];

static SEED_TABLE: Lazy<HashMap<&'static str, Coordinates>> = Lazy::new(|| {
    SEED_ENTRIES
        .iter()
        .map(|&(pincode, lat, lon)| (pincode, Coordinates { lat, lon }))
        .collect()
});

/// Looks up a pincode in the seed table.
#[must_use]
pub fn seed_coordinates(pincode: &str) -> Option<Coordinates> {
    SEED_TABLE.get(pincode).copied()
}
