//! Normalize the vertical metrics of OpenType fonts.
//!
//! Browsers and operating systems disagree about which of a font's line
//! metrics to use: the `hhea` ascender and descender, the typographic values
//! in `OS/2`, or the Windows clipping values there. Fonts whose tables
//! disagree end up with different line heights on different platforms.
//!
//! This crate rewrites all of these fields so they agree, using one of two
//! [`Policy`]s, and re-encodes the font. Only `OS/2`, `hhea` and `head` are
//! modified; every other table is copied byte for byte.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use vmetrics::{FixConfig, Policy};
//!
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let config = FixConfig { mode: Policy::Proportional };
//!
//! let report = vmetrics::inspect(&font_bytes, &config).unwrap();
//! println!("ascender {} -> {}", report.original.ascender, report.fixed.ascender);
//!
//! let fixed_font = vmetrics::fix(&font_bytes, &config).unwrap();
//! ```

#![forbid(unsafe_code)]

mod error;
pub mod metrics;
pub mod model;
pub mod policy;
pub mod writer;

use serde::{Deserialize, Serialize};
use write_fonts::read::FontRef;

pub use error::FixError;
pub use metrics::{Metrics, MetricsReport, TableMetrics};
pub use model::FontModel;
pub use policy::Policy;

/// Options for a metrics fix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    /// Which policy computes the new metrics.
    pub mode: Policy,
}

impl FixConfig {
    pub fn new(mode: Policy) -> Self {
        Self { mode }
    }
}

/// Fix the vertical metrics of a binary font, returning the new font.
pub fn fix(font_data: &[u8], config: &FixConfig) -> Result<Vec<u8>, FixError> {
    let font = FontRef::new(font_data).map_err(FixError::Decode)?;
    fix_font(&font, config)
}

/// Fix the vertical metrics of an already parsed font.
pub fn fix_font(font: &FontRef, config: &FixConfig) -> Result<Vec<u8>, FixError> {
    let mut model = FontModel::from_font(font.clone())?;
    let original = Metrics::from_model(&model);
    let fixed = config.mode.compute(&original);
    writer::write_metrics(&mut model, &fixed, config.mode)?;
    model.encode()
}

/// Report the current metrics of a font and the metrics [`fix`] would write.
///
/// The font is not modified, and this succeeds even when a table required
/// by [`fix`] is missing.
pub fn inspect(font_data: &[u8], config: &FixConfig) -> Result<MetricsReport, FixError> {
    let font = FontRef::new(font_data).map_err(FixError::Decode)?;
    inspect_font(&font, config)
}

/// Like [`inspect`], for an already parsed font.
pub fn inspect_font(font: &FontRef, config: &FixConfig) -> Result<MetricsReport, FixError> {
    let model = FontModel::from_font(font.clone())?;
    let original = Metrics::from_model(&model);
    Ok(MetricsReport {
        original,
        fixed: config.mode.compute(&original),
    })
}
