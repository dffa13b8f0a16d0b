//! Reading the current vertical metrics of a font.
//!
//! Extraction never fails: any value sourced from a table the font does not
//! have is reported as zero.

use serde::{Deserialize, Serialize};

use crate::model::{Field, FontModel};

/// Line metrics of a font, in design units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Distance from the baseline to the top of the line.
    pub ascender: i32,
    /// Distance from the baseline to the bottom of the line; usually negative.
    pub descender: i32,
    pub line_gap: i32,
    pub units_per_em: i32,
}

impl Metrics {
    /// The line metrics currently stored in the `hhea` and `head` tables.
    pub fn from_model(model: &FontModel) -> Self {
        let get = |field| model.get(field).unwrap_or_default();
        Metrics {
            ascender: get(Field::HheaAscender),
            descender: get(Field::HheaDescender),
            line_gap: get(Field::HheaLineGap),
            units_per_em: get(Field::HeadUnitsPerEm),
        }
    }

    /// The total line height, `ascender - descender + line_gap`.
    pub fn line_height(&self) -> i32 {
        self.ascender - self.descender + self.line_gap
    }
}

/// The metrics of a font before and after a fix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub original: Metrics,
    pub fixed: Metrics,
}

/// Every metrics field touched by a fix, as stored in the font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetrics {
    pub units_per_em: i32,
    pub os2: Os2Metrics,
    pub hhea: HheaMetrics,
    pub head: HeadBounds,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Os2Metrics {
    pub s_typo_ascender: i32,
    pub s_typo_descender: i32,
    pub s_typo_line_gap: i32,
    pub us_win_ascent: i32,
    pub us_win_descent: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HheaMetrics {
    pub ascender: i32,
    pub descender: i32,
    pub line_gap: i32,
}

/// The vertical extent of the `head` bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadBounds {
    pub y_max: i32,
    pub y_min: i32,
}

impl TableMetrics {
    pub fn from_model(model: &FontModel) -> Self {
        let get = |field| model.get(field).unwrap_or_default();
        TableMetrics {
            units_per_em: get(Field::HeadUnitsPerEm),
            os2: Os2Metrics {
                s_typo_ascender: get(Field::Os2TypoAscender),
                s_typo_descender: get(Field::Os2TypoDescender),
                s_typo_line_gap: get(Field::Os2TypoLineGap),
                us_win_ascent: get(Field::Os2WinAscent),
                us_win_descent: get(Field::Os2WinDescent),
            },
            hhea: HheaMetrics {
                ascender: get(Field::HheaAscender),
                descender: get(Field::HheaDescender),
                line_gap: get(Field::HheaLineGap),
            },
            head: HeadBounds {
                y_max: get(Field::HeadYMax),
                y_min: get(Field::HeadYMin),
            },
        }
    }
}
