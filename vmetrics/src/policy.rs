//! Strategies for computing corrected metrics.

use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

/// Ascender as a fraction of the em, under [`Policy::Proportional`].
pub const ASCENDER_RATIO: f64 = 0.8;
/// Descender as a fraction of the em, under [`Policy::Proportional`].
pub const DESCENDER_RATIO: f64 = -0.2;

/// How corrected metrics are derived from the original ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Derive ascender and descender from the em size alone, so that every
    /// processed font has a line height of exactly one em.
    #[default]
    Proportional,
    /// Keep the font's own ascender and descender, drop the line gap and
    /// grow the `head` bounding box to contain the line.
    Preserve,
}

impl Policy {
    /// Compute the fixed metrics for a font.
    ///
    /// `units_per_em` is always carried over unchanged.
    pub fn compute(self, original: &Metrics) -> Metrics {
        match self {
            Policy::Proportional => Metrics {
                ascender: scale(original.units_per_em, ASCENDER_RATIO),
                descender: scale(original.units_per_em, DESCENDER_RATIO),
                line_gap: 0,
                units_per_em: original.units_per_em,
            },
            Policy::Preserve => Metrics {
                line_gap: 0,
                ..*original
            },
        }
    }

    /// The new `(y_min, y_max)` of the `head` bounding box.
    pub fn head_bounds(self, fixed: &Metrics, (y_min, y_max): (i32, i32)) -> (i32, i32) {
        match self {
            Policy::Proportional => (fixed.descender, fixed.ascender),
            Policy::Preserve => (y_min.min(fixed.descender), y_max.max(fixed.ascender)),
        }
    }
}

/// Scale by `ratio`, rounding half away from zero.
fn scale(units_per_em: i32, ratio: f64) -> i32 {
    (units_per_em as f64 * ratio).round() as i32
}
