//! Visual encoding of sales values into marker attributes.
//!
//! Pure functions parameterised by the display set's current min/max, so the
//! rendering layer can call them per point at draw time and tests can call
//! them without any map state.

/// An RGB colour held as three 8-bit channels. Conversion to a CSS hex
/// string happens only at the boundary, via [`Rgb::to_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Marker radius when every displayed record shares one sales value.
const DEGENERATE_RADIUS: f64 = 8.0;

/// Sales-to-attribute scale bound to the display set's `(min, max)`.
#[derive(Debug, Clone, Copy)]
pub struct SalesScale {
    min: f64,
    max: f64,
}

impl SalesScale {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_degenerate(self) -> bool {
        (self.max - self.min).abs() < f64::EPSILON
    }

    fn ratio(self, sales: f64) -> f64 {
        (sales - self.min) / (self.max - self.min)
    }

    /// Linear gradient from cool blue (min) to warm magenta (max); the
    /// gradient midpoint serves as the fixed neutral colour for a
    /// degenerate scale.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn color(self, sales: f64) -> Rgb {
        let ratio = if self.is_degenerate() {
            0.5
        } else {
            self.ratio(sales)
        };
        Rgb {
            r: (50.0 + 205.0 * ratio).floor() as u8,
            g: (100.0 * (1.0 - ratio)).floor() as u8,
            b: (200.0 + 55.0 * (1.0 - ratio)).floor() as u8,
        }
    }

    /// Marker radius in `[5, 25]`; exactly 8 for a degenerate scale.
    #[must_use]
    pub fn radius(self, sales: f64) -> f64 {
        if self.is_degenerate() {
            DEGENERATE_RADIUS
        } else {
            5.0 + 20.0 * self.ratio(sales)
        }
    }
}

/// Short human-readable magnitude label, prefixed with the dataset's
/// currency symbol: `₹1.25M`, `₹3.4K`, `₹250`.
#[must_use]
pub fn magnitude_label(sales: f64, currency: &str) -> String {
    if sales >= 1_000_000.0 {
        format!("{currency}{:.2}M", sales / 1_000_000.0)
    } else if sales >= 1_000.0 {
        format!("{currency}{:.1}K", sales / 1_000.0)
    } else {
        format!("{currency}{sales:.0}")
    }
}
