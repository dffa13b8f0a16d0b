//! Writing fixed metrics into the `OS/2`, `hhea` and `head` tables.

use crate::{
    metrics::Metrics,
    model::{Field, FontModel, HEAD, HHEA, OS2},
    policy::Policy,
    FixError,
};

/// Write `fixed` into all three metrics tables of `model`.
///
/// Every value is checked against its table and field before anything is
/// written. On error the model is left unchanged.
pub fn write_metrics(
    model: &mut FontModel,
    fixed: &Metrics,
    policy: Policy,
) -> Result<(), FixError> {
    let edits = plan_edits(model, fixed, policy)?;
    for (field, bytes) in edits {
        model
            .table_mut(field.table())
            .ok_or(FixError::MissingTable(field.table()))?
            .put(field, bytes)?;
    }
    Ok(())
}

/// Compute and encode every field write, failing on the first table that is
/// missing or the first value that does not fit its field.
fn plan_edits(
    model: &FontModel,
    fixed: &Metrics,
    policy: Policy,
) -> Result<Vec<(Field, [u8; 2])>, FixError> {
    for tag in [OS2, HHEA, HEAD] {
        if model.table(tag).is_none() {
            return Err(FixError::MissingTable(tag));
        }
    }

    let current_bounds = (
        model.get(Field::HeadYMin).unwrap_or_default(),
        model.get(Field::HeadYMax).unwrap_or_default(),
    );
    let (y_min, y_max) = policy.head_bounds(fixed, current_bounds);

    [
        (Field::Os2TypoAscender, fixed.ascender),
        (Field::Os2TypoDescender, fixed.descender),
        (Field::Os2TypoLineGap, fixed.line_gap),
        (Field::Os2WinAscent, fixed.ascender.abs()),
        (Field::Os2WinDescent, fixed.descender.abs()),
        (Field::HheaAscender, fixed.ascender),
        (Field::HheaDescender, fixed.descender),
        (Field::HheaLineGap, fixed.line_gap),
        (Field::HeadYMax, y_max),
        (Field::HeadYMin, y_min),
    ]
    .into_iter()
    .map(|(field, value)| field.encode(value).map(|bytes| (field, bytes)))
    .collect()
}
