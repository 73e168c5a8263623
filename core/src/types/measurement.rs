use super::event::{AnnotationMetadata, CachedStats, Point, TextBox};
use super::report::{Report, ReportGenerator};
use super::value_type::ValueType;
use serde::Serialize;
use std::sync::Arc;

/// Unit of every Cobb angle statistic
pub const ANGLE_UNIT: &str = "\u{00B0}";

/// One target of an annotation, normalized against the image catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedAnnotation {
    #[serde(rename = "SeriesInstanceUID")]
    pub series_instance_uid: String,

    #[serde(rename = "SOPInstanceUID")]
    pub sop_instance_uid: Option<String>,

    #[serde(rename = "SeriesNumber")]
    pub series_number: Option<i32>,

    /// 1-based frame number, 1 when the image id carries none
    pub frame_number: u32,

    pub unit: String,

    pub angle: Option<f64>,
}

/// Short labels shown next to the annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayText {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

impl DisplayText {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// Measurement record handed to the measurement service
///
/// Built once per event; nothing mutates it afterwards. The report is not
/// stored: [`Measurement::build_report`] recomputes it on every call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub uid: String,

    #[serde(rename = "SOPInstanceUID")]
    pub sop_instance_uid: Option<String>,

    #[serde(rename = "FrameOfReferenceUID")]
    pub frame_of_reference_uid: Option<String>,

    pub points: Option<Vec<Point>>,

    pub text_box: Option<TextBox>,

    pub is_locked: bool,

    pub is_visible: bool,

    pub metadata: AnnotationMetadata,

    #[serde(rename = "referenceSeriesUID")]
    pub reference_series_uid: String,

    #[serde(rename = "referenceStudyUID")]
    pub reference_study_uid: String,

    pub referenced_image_id: Option<String>,

    pub frame_number: u32,

    pub tool_name: String,

    #[serde(rename = "displaySetInstanceUID")]
    pub display_set_instance_uid: String,

    pub label: Option<String>,

    pub display_text: DisplayText,

    /// Raw cached statistics, as stored by the tool
    pub data: CachedStats,

    #[serde(rename = "type")]
    pub value_type: ValueType,

    #[serde(skip)]
    pub(crate) report: Arc<dyn ReportGenerator>,
}

impl Measurement {
    /// Builds the measurement's report table
    pub fn build_report(&self) -> Report {
        self.report.build_report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_is_empty() {
        assert!(DisplayText::default().is_empty());
        let text = DisplayText {
            primary: vec!["1 °".to_string()],
            secondary: vec![],
        };
        assert!(!text.is_empty());
    }

    #[test]
    fn test_angle_unit_is_degree_sign() {
        assert_eq!(ANGLE_UNIT, "°");
    }
}
