//! Shared builders for unit tests

use crate::catalog::InMemoryCatalog;
use crate::types::{
    Annotation, AnnotationData, AnnotationMetadata, CachedStats, DisplaySet, Handles,
    InstanceInfo, Point, RawAnnotationEvent, TargetStat,
};

pub const IMAGE_ID: &str = "wadouri:https://pacs/spine.dcm";
pub const MULTI_FRAME_IMAGE_ID: &str = "wadouri:https://pacs/cine.dcm?frame=4";

/// Catalog with a single-frame series (number 3) and a multi-frame series (number 7)
pub fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    catalog.add_display_set(
        DisplaySet::new("ds-spine", "study-1", "series-spine")
            .with_series_number(3)
            .with_instance(
                InstanceInfo::new("sop-spine")
                    .with_instance_number(12)
                    .with_image_id(IMAGE_ID),
            ),
    );
    catalog.add_display_set(
        DisplaySet::new("ds-cine", "study-1", "series-cine")
            .with_series_number(7)
            .multi_frame(true)
            .with_instance(
                InstanceInfo::new("sop-cine")
                    .with_instance_number(1)
                    .with_image_id("wadouri:https://pacs/cine.dcm"),
            ),
    );
    catalog
}

pub fn stats(angles: &[(&str, Option<f64>)]) -> CachedStats {
    angles
        .iter()
        .map(|(target, angle)| (target.to_string(), TargetStat::with_angle(*angle)))
        .collect()
}

pub fn metadata(tool_name: &str, image_id: Option<&str>) -> AnnotationMetadata {
    AnnotationMetadata {
        tool_name: tool_name.to_string(),
        referenced_image_id: image_id.map(String::from),
        frame_of_reference_uid: Some("FOR1".to_string()),
        volume_id: None,
    }
}

pub fn data(angles: &[(&str, Option<f64>)]) -> AnnotationData {
    AnnotationData {
        cached_stats: stats(angles),
        handles: Handles {
            points: Some(vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 2.0, 3.0)]),
            text_box: None,
        },
        label: Some("Thoracic".to_string()),
    }
}

/// Cobb angle event on the single-frame image
pub fn cobb_event(angles: &[(&str, Option<f64>)]) -> RawAnnotationEvent {
    event(metadata("CobbAngle", Some(IMAGE_ID)), data(angles))
}

pub fn event(metadata: AnnotationMetadata, data: AnnotationData) -> RawAnnotationEvent {
    RawAnnotationEvent {
        annotation: Annotation {
            annotation_uid: "cobb-1".to_string(),
            metadata: Some(metadata),
            data: Some(data),
        },
    }
}
