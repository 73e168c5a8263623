use crate::error::{CobbmapError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-target statistics keyed by target id, in first-seen document order
pub type CachedStats = IndexMap<String, TargetStat>;

/// Annotation event emitted by the measurement tool
///
/// Mirrors the tool's event detail: a single `annotation` object whose
/// `metadata` and `data` blocks are optional at the boundary. Whether both
/// are present is checked by the mapper, not by deserialization.
///
/// # Example
///
/// ```
/// use cobbmap_core::RawAnnotationEvent;
///
/// let event = RawAnnotationEvent::from_json(r#"{
///     "annotation": {
///         "annotationUID": "a-1",
///         "metadata": { "toolName": "CobbAngle", "referencedImageId": "img:1" },
///         "data": { "cachedStats": { "t1": { "angle": 12.5 } }, "handles": {} }
///     }
/// }"#).unwrap();
///
/// assert_eq!(event.annotation.annotation_uid, "a-1");
/// assert_eq!(event.annotation.data.unwrap().cached_stats["t1"].angle, Some(12.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnnotationEvent {
    pub annotation: Annotation,
}

impl RawAnnotationEvent {
    /// Parses an event from its JSON representation
    ///
    /// # Errors
    ///
    /// Returns `InvalidEvent` if the document does not have the event shape
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| CobbmapError::InvalidEvent(e.to_string()))
    }
}

/// The annotation carried by an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "annotationUID")]
    pub annotation_uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnnotationMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnnotationData>,
}

/// Tool metadata attached to an annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationMetadata {
    /// Name of the tool that drew the annotation
    pub tool_name: String,

    /// Image the annotation was drawn on (stack viewports)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_image_id: Option<String>,

    /// Spatial frame of reference of the handle coordinates
    #[serde(
        rename = "FrameOfReferenceUID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub frame_of_reference_uid: Option<String>,

    /// Volume the annotation was drawn on (volume viewports)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_id: Option<String>,
}

/// Measured data attached to an annotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationData {
    #[serde(default)]
    pub cached_stats: CachedStats,

    #[serde(default)]
    pub handles: Handles,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One entry of the cached statistics map
///
/// Only `angle` is interpreted. Any other statistic the tool stored is kept
/// in `extra` so the raw statistics pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetStat {
    /// Angle in degrees, absent if the tool has not computed one
    #[serde(default)]
    pub angle: Option<f64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TargetStat {
    /// Creates a statistic holding only an angle
    pub fn with_angle(angle: Option<f64>) -> Self {
        Self {
            angle,
            extra: serde_json::Map::new(),
        }
    }
}

/// Handle geometry of an annotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_box: Option<TextBox>,
}

/// A handle point in world coordinates (usually 3 components)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(pub Vec<f64>);

impl Point {
    /// Creates a 3D point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(vec![x, y, z])
    }

    /// Returns the coordinate components
    pub fn components(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; 3]> for Point {
    fn from(p: [f64; 3]) -> Self {
        Self(p.to_vec())
    }
}

/// Space-separated components, e.g. `"1 2.5 3"`
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            // -0.0 prints as "-0"
            let c = if *c == 0.0 { 0.0 } else { *c };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Position of the annotation's text box
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    #[serde(default)]
    pub has_moved: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_position: Option<Point>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_EVENT: &str = r#"{
        "annotation": {
            "annotationUID": "cobb-1",
            "metadata": {
                "toolName": "CobbAngle",
                "referencedImageId": "wadors:/studies/1/series/2/instances/3/frames/1",
                "FrameOfReferenceUID": "FOR1"
            },
            "data": {
                "label": "L1-L5",
                "cachedStats": {
                    "zeta": { "angle": 21.5, "arc1Angle": 10.0 },
                    "alpha": { "angle": null }
                },
                "handles": {
                    "points": [[0, 0, 0], [1, 2, 3]],
                    "textBox": { "hasMoved": true, "worldPosition": [4, 5, 6] }
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_full_event() {
        let event = RawAnnotationEvent::from_json(FULL_EVENT).unwrap();
        let annotation = event.annotation;
        assert_eq!(annotation.annotation_uid, "cobb-1");

        let metadata = annotation.metadata.unwrap();
        assert_eq!(metadata.tool_name, "CobbAngle");
        assert_eq!(metadata.frame_of_reference_uid.as_deref(), Some("FOR1"));
        assert!(metadata.volume_id.is_none());

        let data = annotation.data.unwrap();
        assert_eq!(data.label.as_deref(), Some("L1-L5"));
        let points = data.handles.points.unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].components(), &[1.0, 2.0, 3.0]);

        let text_box = data.handles.text_box.unwrap();
        assert!(text_box.has_moved);
        assert_eq!(text_box.world_position, Some(Point::new(4.0, 5.0, 6.0)));
    }

    #[test]
    fn test_cached_stats_keep_document_order() {
        let event = RawAnnotationEvent::from_json(FULL_EVENT).unwrap();
        let data = event.annotation.data.unwrap();
        let keys: Vec<&str> = data.cached_stats.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_target_stat_keeps_extra_fields() {
        let event = RawAnnotationEvent::from_json(FULL_EVENT).unwrap();
        let data = event.annotation.data.unwrap();
        let zeta = &data.cached_stats["zeta"];
        assert_eq!(zeta.angle, Some(21.5));
        assert_eq!(zeta.extra.get("arc1Angle"), Some(&serde_json::json!(10.0)));
        assert_eq!(data.cached_stats["alpha"].angle, None);
    }

    #[test]
    fn test_missing_blocks_are_not_a_parse_error() {
        let event = RawAnnotationEvent::from_json(r#"{"annotation": {"annotationUID": "x"}}"#)
            .unwrap();
        assert!(event.annotation.metadata.is_none());
        assert!(event.annotation.data.is_none());
    }

    #[test]
    fn test_invalid_shape() {
        let err = RawAnnotationEvent::from_json(r#"{"annotation": 3}"#).unwrap_err();
        assert!(matches!(err, CobbmapError::InvalidEvent(_)));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(0.0, 0.0, 0.0).to_string(), "0 0 0");
        assert_eq!(Point(vec![1.5, -2.0]).to_string(), "1.5 -2");
    }

    #[test]
    fn test_point_display_negative_zero() {
        assert_eq!(Point::new(-0.0, 1.0, -0.0).to_string(), "0 1 0");
    }
}
