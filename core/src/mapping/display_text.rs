use super::rounding::round_number;
use crate::types::{DisplayText, DisplaySet, MappedAnnotation, MappingConfig};

/// Builds the labels shown next to a Cobb angle
///
/// Only the first mapped annotation is used: every target of a Cobb angle
/// carries the same angle. No angle means no text.
///
/// - primary: `"<angle> <unit>"`, angle rounded to the configured precision
/// - secondary: `"S: <series>"`, then `" I: <instance>"` if the instance is in
///   the display set with a non-zero instance number, then `" F: <frame>"` if the display set is multi-frame
pub fn format_display_text(
    mapped: Option<&[MappedAnnotation]>,
    display_set: &DisplaySet,
    config: &MappingConfig,
) -> DisplayText {
    let Some(first) = mapped.and_then(|m| m.first()) else {
        return DisplayText::default();
    };
    let Some(angle) = first.angle else {
        return DisplayText::default();
    };

    let instance_number = first
        .sop_instance_uid
        .as_deref()
        .and_then(|sop| display_set.find_instance(sop))
        .and_then(|instance| instance.instance_number)
        .filter(|&n| n != 0);

    let mut secondary = match first.series_number {
        Some(series_number) => format!("S: {}", series_number),
        None => "S: -".to_string(),
    };
    if let Some(instance_number) = instance_number {
        secondary.push_str(&format!(" I: {}", instance_number));
    }
    if display_set.is_multi_frame {
        secondary.push_str(&format!(" F: {}", first.frame_number));
    }

    let primary = format!(
        "{} {}",
        round_number(angle, config.precision),
        config.display_units.display(&first.unit)
    );

    DisplayText {
        primary: vec![primary],
        secondary: vec![secondary],
    }
}
