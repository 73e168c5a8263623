use serde::{Deserialize, Serialize};
use std::fmt;

/// Tool names the measurement mappings accept by default
pub const SUPPORTED_TOOLS: [&str; 15] = [
    "Length",
    "EllipticalROI",
    "CircleROI",
    "SplineROI",
    "LivewireContour",
    "Bidirectional",
    "ArrowAnnotate",
    "Angle",
    "CobbAngle",
    "Probe",
    "RectangleROI",
    "PlanarFreehandROI",
    "PlanarFreehandContourSegmentation",
    "UltrasoundDirectionalTool",
    "SegmentBidirectional",
];

/// Measurement value type understood by the measurement service
///
/// Serializes as the service tag returned by [`ValueType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "value_type::unknown")]
    Unknown,
    #[serde(rename = "value_type::polyline")]
    Polyline,
    #[serde(rename = "value_type::point")]
    Point,
    #[serde(rename = "value_type::shortAxisLongAxis")]
    Bidirectional,
    #[serde(rename = "value_type::ellipse")]
    Ellipse,
    #[serde(rename = "value_type::rectangle")]
    Rectangle,
    #[serde(rename = "value_type::multipoint")]
    Multipoint,
    #[serde(rename = "value_type::circle")]
    Circle,
    #[serde(rename = "value_type::roiThreshold")]
    RoiThreshold,
    #[serde(rename = "value_type::roiThresholdManual")]
    RoiThresholdManual,
    #[serde(rename = "value_type::angle")]
    Angle,
}

impl ValueType {
    /// Returns the measurement service's tag for this value type
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Unknown => "value_type::unknown",
            ValueType::Polyline => "value_type::polyline",
            ValueType::Point => "value_type::point",
            ValueType::Bidirectional => "value_type::shortAxisLongAxis",
            ValueType::Ellipse => "value_type::ellipse",
            ValueType::Rectangle => "value_type::rectangle",
            ValueType::Multipoint => "value_type::multipoint",
            ValueType::Circle => "value_type::circle",
            ValueType::RoiThreshold => "value_type::roiThreshold",
            ValueType::RoiThresholdManual => "value_type::roiThresholdManual",
            ValueType::Angle => "value_type::angle",
        }
    }

    /// Returns whether this type is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, ValueType::Unknown)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a tool name to the value type tag of its measurements
pub trait ValueTypeClassifier {
    fn classify(&self, tool_name: &str) -> ValueType;
}

/// Default classifier covering every tool in [`SUPPORTED_TOOLS`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolTypeClassifier;

impl ValueTypeClassifier for ToolTypeClassifier {
    fn classify(&self, tool_name: &str) -> ValueType {
        match tool_name {
            "CobbAngle" | "Angle" => ValueType::Angle,
            "Length"
            | "SplineROI"
            | "LivewireContour"
            | "PlanarFreehandROI"
            | "PlanarFreehandContourSegmentation"
            | "UltrasoundDirectionalTool" => ValueType::Polyline,
            "EllipticalROI" => ValueType::Ellipse,
            "CircleROI" => ValueType::Circle,
            "RectangleROI" => ValueType::Rectangle,
            "Bidirectional" | "SegmentBidirectional" => ValueType::Bidirectional,
            "ArrowAnnotate" | "Probe" => ValueType::Point,
            _ => ValueType::Unknown,
        }
    }
}

impl<F> ValueTypeClassifier for F
where
    F: Fn(&str) -> ValueType,
{
    fn classify(&self, tool_name: &str) -> ValueType {
        self(tool_name)
    }
}
