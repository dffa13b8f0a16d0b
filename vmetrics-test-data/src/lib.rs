//! test data for the vmetrics crates
//!
//! Fonts are assembled in memory with [`FontBuilder`] so that every test can
//! pick the exact metric values it needs.

pub mod bebuffer;

use std::collections::BTreeMap;

use bebuffer::BeBuffer;
use write_fonts::{
    types::{Fixed, LongDateTime, Tag},
    FontBuilder,
};

pub static HEAD: Tag = Tag::new(b"head");
pub static HHEA: Tag = Tag::new(b"hhea");
pub static OS2: Tag = Tag::new(b"OS/2");
pub static MAXP: Tag = Tag::new(b"maxp");
pub static POST: Tag = Tag::new(b"post");
pub static GLYF: Tag = Tag::new(b"glyf");

/// Opaque contents of the `glyf` table; deliberately not a multiple of four
/// bytes long.
pub static GLYF_DATA: &[u8] = &[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03];

/// A minimal TrueType font with configurable vertical metrics.
///
/// It contains `head`, `hhea`, `OS/2` (version 4), `maxp`, `post` and an
/// opaque `glyf` table.
#[derive(Clone, Debug)]
pub struct TestFont {
    units_per_em: u16,
    hhea: (i16, i16, i16),
    typo: (i16, i16, i16),
    win: (u16, u16),
    bounds: (i16, i16),
    omit: Vec<Tag>,
    raw: BTreeMap<Tag, Vec<u8>>,
}

impl Default for TestFont {
    fn default() -> Self {
        Self {
            units_per_em: 1000,
            hhea: (900, -250, 50),
            typo: (880, -220, 40),
            win: (950, 300),
            bounds: (-300, 950),
            omit: Vec::new(),
            raw: BTreeMap::new(),
        }
    }
}

impl TestFont {
    pub fn units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    /// Set `hhea` ascender, descender and line gap.
    pub fn hhea_metrics(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.hhea = (ascender, descender, line_gap);
        self
    }

    /// Set `OS/2` typographic ascender, descender and line gap.
    pub fn typo_metrics(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.typo = (ascender, descender, line_gap);
        self
    }

    /// Set `OS/2` usWinAscent and usWinDescent.
    pub fn win_metrics(mut self, ascent: u16, descent: u16) -> Self {
        self.win = (ascent, descent);
        self
    }

    /// Set the vertical extent of the `head` bounding box.
    pub fn bounds(mut self, y_min: i16, y_max: i16) -> Self {
        self.bounds = (y_min, y_max);
        self
    }

    /// Leave a table out of the font.
    pub fn without(mut self, tag: Tag) -> Self {
        self.omit.push(tag);
        self
    }

    /// Replace a table with arbitrary bytes.
    pub fn raw_table(mut self, tag: Tag, data: Vec<u8>) -> Self {
        self.raw.insert(tag, data);
        self
    }

    /// <https://learn.microsoft.com/en-us/typography/opentype/spec/head>
    pub fn head(&self) -> BeBuffer {
        let (y_min, y_max) = self.bounds;
        be_buffer! {
            1_u16, 0_u16,               // majorVersion, minorVersion
            Fixed::from_f64(1.5),       // fontRevision
            0_u32,                      // checksumAdjustment
            0x5F0F_3CF5_u32,            // magicNumber
            0b11_u16,                   // flags
            self.units_per_em,          // unitsPerEm
            LongDateTime::new(0),       // created
            LongDateTime::new(0),       // modified
            -50_i16, y_min, 1200_i16, y_max, // xMin, yMin, xMax, yMax
            0_u16,                      // macStyle
            8_u16,                      // lowestRecPPEM
            2_i16,                      // fontDirectionHint
            0_i16,                      // indexToLocFormat
            0_i16                       // glyphDataFormat
        }
    }

    /// <https://learn.microsoft.com/en-us/typography/opentype/spec/hhea>
    pub fn hhea(&self) -> BeBuffer {
        let (ascender, descender, line_gap) = self.hhea;
        be_buffer! {
            1_u16, 0_u16,               // majorVersion, minorVersion
            ascender, descender, line_gap,
            1250_u16,                   // advanceWidthMax
            -50_i16,                    // minLeftSideBearing
            -20_i16,                    // minRightSideBearing
            1200_i16,                   // xMaxExtent
            1_i16, 0_i16, 0_i16,        // caretSlopeRise, caretSlopeRun, caretOffset
            0_i16, 0_i16, 0_i16, 0_i16, // reserved
            0_i16,                      // metricDataFormat
            1_u16                       // numberOfHMetrics
        }
    }

    /// <https://learn.microsoft.com/en-us/typography/opentype/spec/os2>
    pub fn os2(&self) -> BeBuffer {
        let (typo_ascender, typo_descender, typo_line_gap) = self.typo;
        let (win_ascent, win_descent) = self.win;
        be_buffer! {
            4_u16,                      // version
            500_i16,                    // xAvgCharWidth
            400_u16, 5_u16,             // usWeightClass, usWidthClass
            0_u16,                      // fsType
            650_i16, 600_i16, 0_i16, 75_i16,  // ySubscript x/y size, x/y offset
            650_i16, 600_i16, 0_i16, 350_i16, // ySuperscript x/y size, x/y offset
            50_i16, 300_i16,            // yStrikeoutSize, yStrikeoutPosition
            0_i16                       // sFamilyClass
        }
        .extend_bytes(&[2, 11, 5, 3, 3, 4, 3, 2, 2, 4]) // panose
        .extend([1_u32, 0, 0, 0]) // ulUnicodeRange1-4
        .extend_bytes(b"TEST") // achVendID
        .extend([0x40_u16, 0x20, 0x7E]) // fsSelection, usFirstCharIndex, usLastCharIndex
        .extend([typo_ascender, typo_descender, typo_line_gap])
        .extend([win_ascent, win_descent])
        .extend([1_u32, 0]) // ulCodePageRange1-2
        .extend([500_i16, 700]) // sxHeight, sCapHeight
        .extend([0_u16, 0x20, 2]) // usDefaultChar, usBreakChar, usMaxContext
    }

    /// maxp version 0.5
    pub fn maxp(&self) -> BeBuffer {
        be_buffer! { 0x0000_5000_u32, 1_u16 }
    }

    /// post version 3.0
    pub fn post(&self) -> BeBuffer {
        be_buffer! {
            0x0003_0000_u32,            // version
            0_u32,                      // italicAngle
            -75_i16, 50_i16,            // underlinePosition, underlineThickness
            0_u32,                      // isFixedPitch
            0_u32, 0_u32, 0_u32, 0_u32  // min/max mem
        }
    }

    /// The data of every table in the font, by tag.
    pub fn tables(&self) -> BTreeMap<Tag, Vec<u8>> {
        let mut tables: BTreeMap<Tag, Vec<u8>> = [
            (HEAD, self.head().into()),
            (HHEA, self.hhea().into()),
            (OS2, self.os2().into()),
            (MAXP, self.maxp().into()),
            (POST, self.post().into()),
            (GLYF, GLYF_DATA.to_vec()),
        ]
        .into_iter()
        .collect();
        tables.extend(self.raw.clone());
        tables.retain(|tag, _| !self.omit.contains(tag));
        tables
    }

    /// Compile the font.
    pub fn build(&self) -> Vec<u8> {
        let mut builder = FontBuilder::new();
        for (tag, data) in self.tables() {
            builder.add_raw(tag, data);
        }
        builder.build()
    }
}
