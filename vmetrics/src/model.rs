//! A decoded font with mutable copies of its vertical metrics tables.
//!
//! Only the `head`, `hhea` and `OS/2` tables are ever modified. They are
//! held as owned byte buffers and addressed through [`Field`]; every other
//! table is copied verbatim from the source font when the model is encoded.

use std::ops::Range;

use write_fonts::{
    read::{
        tables::{head::Head, hhea::Hhea, os2::Os2},
        FontData, FontRead, FontRef, ReadError, TableProvider,
    },
    types::Tag,
    FontBuilder,
};

use crate::FixError;

/// 'head'
pub const HEAD: Tag = Tag::new(b"head");
/// 'hhea'
pub const HHEA: Tag = Tag::new(b"hhea");
/// 'OS/2'
pub const OS2: Tag = Tag::new(b"OS/2");

/// A numeric field in one of the metrics tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    HeadUnitsPerEm,
    HeadYMin,
    HeadYMax,
    HheaAscender,
    HheaDescender,
    HheaLineGap,
    Os2TypoAscender,
    Os2TypoDescender,
    Os2TypoLineGap,
    Os2WinAscent,
    Os2WinDescent,
}

impl Field {
    /// The tag of the table containing this field.
    pub fn table(self) -> Tag {
        match self {
            Field::HeadUnitsPerEm | Field::HeadYMin | Field::HeadYMax => HEAD,
            Field::HheaAscender | Field::HheaDescender | Field::HheaLineGap => HHEA,
            Field::Os2TypoAscender
            | Field::Os2TypoDescender
            | Field::Os2TypoLineGap
            | Field::Os2WinAscent
            | Field::Os2WinDescent => OS2,
        }
    }

    /// The name of the field as used in the OpenType table definitions.
    pub fn name(self) -> &'static str {
        match self {
            Field::HeadUnitsPerEm => "head.unitsPerEm",
            Field::HeadYMin => "head.yMin",
            Field::HeadYMax => "head.yMax",
            Field::HheaAscender => "hhea.ascender",
            Field::HheaDescender => "hhea.descender",
            Field::HheaLineGap => "hhea.lineGap",
            Field::Os2TypoAscender => "OS/2.sTypoAscender",
            Field::Os2TypoDescender => "OS/2.sTypoDescender",
            Field::Os2TypoLineGap => "OS/2.sTypoLineGap",
            Field::Os2WinAscent => "OS/2.usWinAscent",
            Field::Os2WinDescent => "OS/2.usWinDescent",
        }
    }

    fn is_unsigned(self) -> bool {
        matches!(
            self,
            Field::HeadUnitsPerEm | Field::Os2WinAscent | Field::Os2WinDescent
        )
    }

    /// Read this field from the raw data of its table.
    fn read(self, data: FontData) -> Result<i32, ReadError> {
        Ok(match self {
            Field::HeadUnitsPerEm => Head::read(data)?.units_per_em().into(),
            Field::HeadYMin => Head::read(data)?.y_min().into(),
            Field::HeadYMax => Head::read(data)?.y_max().into(),
            Field::HheaAscender => Hhea::read(data)?.ascender().to_i16().into(),
            Field::HheaDescender => Hhea::read(data)?.descender().to_i16().into(),
            Field::HheaLineGap => Hhea::read(data)?.line_gap().to_i16().into(),
            Field::Os2TypoAscender => Os2::read(data)?.s_typo_ascender().into(),
            Field::Os2TypoDescender => Os2::read(data)?.s_typo_descender().into(),
            Field::Os2TypoLineGap => Os2::read(data)?.s_typo_line_gap().into(),
            Field::Os2WinAscent => Os2::read(data)?.us_win_ascent().into(),
            Field::Os2WinDescent => Os2::read(data)?.us_win_descent().into(),
        })
    }

    /// The position of this field within the raw data of its table.
    fn byte_range(self, data: FontData) -> Result<Range<usize>, ReadError> {
        Ok(match self {
            Field::HeadUnitsPerEm => Head::read(data)?.units_per_em_byte_range(),
            Field::HeadYMin => Head::read(data)?.y_min_byte_range(),
            Field::HeadYMax => Head::read(data)?.y_max_byte_range(),
            Field::HheaAscender => Hhea::read(data)?.ascender_byte_range(),
            Field::HheaDescender => Hhea::read(data)?.descender_byte_range(),
            Field::HheaLineGap => Hhea::read(data)?.line_gap_byte_range(),
            Field::Os2TypoAscender => Os2::read(data)?.s_typo_ascender_byte_range(),
            Field::Os2TypoDescender => Os2::read(data)?.s_typo_descender_byte_range(),
            Field::Os2TypoLineGap => Os2::read(data)?.s_typo_line_gap_byte_range(),
            Field::Os2WinAscent => Os2::read(data)?.us_win_ascent_byte_range(),
            Field::Os2WinDescent => Os2::read(data)?.us_win_descent_byte_range(),
        })
    }

    /// Convert `value` to the big-endian representation of this field.
    pub(crate) fn encode(self, value: i32) -> Result<[u8; 2], FixError> {
        let overflow = || FixError::FieldOverflow {
            field: self.name(),
            value,
        };
        if self.is_unsigned() {
            u16::try_from(value)
                .map(u16::to_be_bytes)
                .map_err(|_| overflow())
        } else {
            i16::try_from(value)
                .map(i16::to_be_bytes)
                .map_err(|_| overflow())
        }
    }
}

/// An owned copy of one metrics table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricsTable {
    tag: Tag,
    data: Vec<u8>,
}

impl MetricsTable {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read a field, or `None` if it belongs to another table.
    pub fn get(&self, field: Field) -> Option<i32> {
        if field.table() != self.tag {
            return None;
        }
        field.read(FontData::new(&self.data)).ok()
    }

    /// Overwrite a field with already encoded bytes.
    pub(crate) fn put(&mut self, field: Field, bytes: [u8; 2]) -> Result<(), FixError> {
        if field.table() != self.tag {
            return Err(FixError::MissingTable(field.table()));
        }
        let range = field
            .byte_range(FontData::new(&self.data))
            .map_err(FixError::Decode)?;
        self.data
            .get_mut(range)
            .ok_or(FixError::Decode(ReadError::OutOfBounds))?
            .copy_from_slice(&bytes);
        Ok(())
    }
}

/// A font decoded for a single metrics fix.
///
/// Each of the three metrics tables is `None` if the source font lacks it.
#[derive(Clone)]
pub struct FontModel<'a> {
    font: FontRef<'a>,
    head: Option<MetricsTable>,
    hhea: Option<MetricsTable>,
    os2: Option<MetricsTable>,
}

impl<'a> FontModel<'a> {
    /// Parse a binary font.
    pub fn decode(data: &'a [u8]) -> Result<Self, FixError> {
        let font = FontRef::new(data).map_err(FixError::Decode)?;
        Self::from_font(font)
    }

    /// Build a model from an already parsed font.
    ///
    /// Every table in the font's directory must lie within the font data,
    /// and metrics tables that are present must parse. Otherwise this
    /// returns a decode error.
    pub fn from_font(font: FontRef<'a>) -> Result<Self, FixError> {
        check_table_directory(&font).map_err(FixError::Decode)?;
        let head = load_table(&font, HEAD, font.head().map(drop))?;
        let hhea = load_table(&font, HHEA, font.hhea().map(drop))?;
        let os2 = load_table(&font, OS2, font.os2().map(drop))?;
        Ok(Self {
            font,
            head,
            hhea,
            os2,
        })
    }

    /// The source font this model was decoded from.
    pub fn font(&self) -> &FontRef<'a> {
        &self.font
    }

    pub fn table(&self, tag: Tag) -> Option<&MetricsTable> {
        match tag {
            HEAD => self.head.as_ref(),
            HHEA => self.hhea.as_ref(),
            OS2 => self.os2.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn table_mut(&mut self, tag: Tag) -> Option<&mut MetricsTable> {
        match tag {
            HEAD => self.head.as_mut(),
            HHEA => self.hhea.as_mut(),
            OS2 => self.os2.as_mut(),
            _ => None,
        }
    }

    /// Read a field, or `None` if its table is absent.
    pub fn get(&self, field: Field) -> Option<i32> {
        self.table(field.table())?.get(field)
    }

    /// Serialize the model back to a binary font.
    ///
    /// Tables other than the metrics tables are copied unchanged.
    /// [`FontBuilder`] recomputes `head.checksumAdjustment`.
    pub fn encode(&self) -> Result<Vec<u8>, FixError> {
        let mut builder = FontBuilder::new();
        for table in [&self.head, &self.hhea, &self.os2].into_iter().flatten() {
            builder.add_raw(table.tag, table.data.clone());
        }
        builder.copy_missing_tables(self.font.clone());
        let bytes = builder.build();
        FontRef::new(&bytes).map_err(FixError::Encode)?;
        Ok(bytes)
    }
}

impl std::fmt::Debug for FontModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontModel")
            .field("head", &self.head)
            .field("hhea", &self.hhea)
            .field("os2", &self.os2)
            .finish_non_exhaustive()
    }
}

/// Ensure every record in the table directory points inside the font.
///
/// `FontRef::new` reads the records lazily, so a truncated file would
/// otherwise look like a font without tables.
fn check_table_directory(font: &FontRef) -> Result<(), ReadError> {
    let directory = font.table_directory();
    let records = directory.table_records();
    if records.len() != directory.num_tables() as usize {
        return Err(ReadError::OutOfBounds);
    }
    for record in records {
        if font.table_data(record.tag()).is_none() {
            return Err(ReadError::OutOfBounds);
        }
    }
    Ok(())
}

fn load_table(
    font: &FontRef,
    tag: Tag,
    parsed: Result<(), ReadError>,
) -> Result<Option<MetricsTable>, FixError> {
    match parsed {
        Ok(()) => (),
        Err(ReadError::TableIsMissing(_)) => return Ok(None),
        Err(e) => return Err(FixError::Decode(e)),
    }
    let data = font
        .data_for_tag(tag)
        .ok_or(FixError::Decode(ReadError::TableIsMissing(tag)))?;
    Ok(Some(MetricsTable {
        tag,
        data: data.as_bytes().to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmetrics_test_data::TestFont;
    use write_fonts::read::tables::compute_checksum;

    #[test]
    fn reads_fields() {
        let data = TestFont::default()
            .units_per_em(2048)
            .hhea_metrics(1900, -500, 67)
            .bounds(-600, 2100)
            .build();
        let model = FontModel::decode(&data).unwrap();
        assert_eq!(model.get(Field::HeadUnitsPerEm), Some(2048));
        assert_eq!(model.get(Field::HheaAscender), Some(1900));
        assert_eq!(model.get(Field::HheaDescender), Some(-500));
        assert_eq!(model.get(Field::HheaLineGap), Some(67));
        assert_eq!(model.get(Field::HeadYMin), Some(-600));
        assert_eq!(model.get(Field::HeadYMax), Some(2100));
    }

    #[test]
    fn missing_table_reads_as_none() {
        let data = TestFont::default().without(OS2).build();
        let model = FontModel::decode(&data).unwrap();
        assert!(model.table(OS2).is_none());
        assert_eq!(model.get(Field::Os2WinAscent), None);
        assert!(model.get(Field::HheaAscender).is_some());
    }

    #[test]
    fn field_from_other_table() {
        let data = TestFont::default().build();
        let model = FontModel::decode(&data).unwrap();
        let hhea = model.table(HHEA).unwrap();
        assert_eq!(hhea.get(Field::HeadYMax), None);
    }

    #[test]
    fn garbage_is_decode_error() {
        let result = FontModel::decode(b"definitely not a font");
        assert!(matches!(result, Err(FixError::Decode(_))));
    }

    #[test]
    fn truncated_metrics_table_is_decode_error() {
        let data = TestFont::default()
            .raw_table(HHEA, vec![0, 1, 0, 0, 3, 0x20])
            .build();
        let result = FontModel::decode(&data);
        assert!(matches!(result, Err(FixError::Decode(_))), "{result:?}");
    }

    #[test]
    fn encode_field_ranges() {
        assert_eq!(Field::HheaDescender.encode(-200).unwrap(), [0xFF, 0x38]);
        assert_eq!(Field::Os2WinAscent.encode(65535).unwrap(), [0xFF, 0xFF]);
        assert!(matches!(
            Field::Os2WinDescent.encode(-1),
            Err(FixError::FieldOverflow {
                field: "OS/2.usWinDescent",
                value: -1
            })
        ));
        assert!(Field::HeadYMax.encode(i16::MAX as i32 + 1).is_err());
    }

    #[test]
    fn put_rejects_foreign_field() {
        let data = TestFont::default().build();
        let mut model = FontModel::decode(&data).unwrap();
        let head = model.table_mut(HEAD).unwrap();
        assert!(head.put(Field::HheaLineGap, [0, 0]).is_err());
    }

    #[test]
    fn round_trip_preserves_tables() {
        let data = TestFont::default().build();
        let model = FontModel::decode(&data).unwrap();
        let encoded = model.encode().unwrap();
        let reloaded = FontModel::decode(&encoded).unwrap();
        assert_eq!(model.table(HHEA), reloaded.table(HHEA));
        assert_eq!(model.table(OS2), reloaded.table(OS2));
        for field in [Field::HeadUnitsPerEm, Field::HeadYMin, Field::HeadYMax] {
            assert_eq!(model.get(field), reloaded.get(field));
        }
        let glyf = Tag::new(b"glyf");
        assert_eq!(
            model.font().data_for_tag(glyf).unwrap().as_bytes(),
            reloaded.font().data_for_tag(glyf).unwrap().as_bytes()
        );
    }

    #[test]
    fn encode_sets_checksum_adjustment() {
        let data = TestFont::default().hhea_metrics(1234, -321, 5).build();
        let mut model = FontModel::decode(&data).unwrap();
        let hhea = model.table_mut(HHEA).unwrap();
        hhea.put(Field::HheaAscender, [0x03, 0x20]).unwrap();
        let encoded = model.encode().unwrap();
        assert_eq!(compute_checksum(&encoded), 0xB1B0_AFBA);

        let adjustment = FontRef::new(&encoded)
            .unwrap()
            .head()
            .unwrap()
            .checksum_adjustment();
        assert_ne!(adjustment, 0);
        let builder_value = FontBuilder::new()
            .add_raw(HEAD, model.table(HEAD).unwrap().as_bytes().to_owned())
            .add_raw(HHEA, model.table(HHEA).unwrap().as_bytes().to_owned())
            .add_raw(OS2, model.table(OS2).unwrap().as_bytes().to_owned())
            .copy_missing_tables(model.font().clone())
            .build();
        assert_eq!(encoded, builder_value);
    }

    #[test]
    fn encode_without_head() {
        let data = TestFont::default().without(HEAD).build();
        let model = FontModel::decode(&data).unwrap();
        let encoded = model.encode().unwrap();
        let reloaded = FontModel::decode(&encoded).unwrap();
        assert!(reloaded.table(HEAD).is_none());
        assert_eq!(reloaded.get(Field::HheaAscender), model.get(Field::HheaAscender));
    }

    #[test]
    fn truncated_font_is_decode_error() {
        let mut data = TestFont::default().build();
        data.truncate(20);
        let result = FontModel::decode(&data);
        assert!(matches!(result, Err(FixError::Decode(_))), "{result:?}");
    }

    #[test]
    fn table_past_end_of_file_is_decode_error() {
        let mut data = TestFont::default().build();
        // drop the tail of the last table in the file
        let len = data.len();
        data.truncate(len - 6);
        let result = FontModel::decode(&data);
        assert!(matches!(result, Err(FixError::Decode(_))), "{result:?}");
    }

    #[test]
    fn put_writes_at_field_position() {
        let data = TestFont::default().build();
        let mut model = FontModel::decode(&data).unwrap();
        let os2 = model.table_mut(OS2).unwrap();
        os2.put(Field::Os2WinDescent, [0x01, 0x02]).unwrap();
        assert_eq!(os2.get(Field::Os2WinDescent), Some(0x0102));
        assert_eq!(&os2.as_bytes()[76..78], &[0x01, 0x02]);
    }
}
