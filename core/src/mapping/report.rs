use crate::types::{MappedAnnotation, Point, Report, ReportGenerator};
use std::sync::Arc;

/// Value of the `AnnotationType` column of every Cobb angle report
pub const ANNOTATION_TYPE: &str = "Cornerstone:CobbAngle";

/// Report generator of a Cobb angle measurement
///
/// Holds the mapped annotations shared with the measurement; the report is
/// rebuilt from them on every call.
#[derive(Debug, Clone, Default)]
pub struct CobbAngleReport {
    annotations: Option<Arc<[MappedAnnotation]>>,
    points: Option<Vec<Point>>,
    frame_of_reference_uid: Option<String>,
}

impl CobbAngleReport {
    pub fn new(
        annotations: Option<Arc<[MappedAnnotation]>>,
        points: Option<Vec<Point>>,
        frame_of_reference_uid: Option<String>,
    ) -> Self {
        Self {
            annotations,
            points,
            frame_of_reference_uid,
        }
    }
}

impl ReportGenerator for CobbAngleReport {
    fn build_report(&self) -> Report {
        build_cobb_angle_report(
            self.annotations.as_deref(),
            self.points.as_deref(),
            self.frame_of_reference_uid.as_deref(),
        )
    }
}

/// Builds the report table of a Cobb angle
///
/// Columns, in order:
/// - `AnnotationType`
/// - one `Angle (<unit>)` per mapped annotation, repeated names kept
/// - `FrameOfReferenceUID` if known
/// - `points` if present, as `"x y z;x y z;..."`
pub fn build_cobb_angle_report(
    annotations: Option<&[MappedAnnotation]>,
    points: Option<&[Point]>,
    frame_of_reference_uid: Option<&str>,
) -> Report {
    let mut report = Report::new();
    report.push("AnnotationType", ANNOTATION_TYPE);

    for annotation in annotations.unwrap_or_default() {
        report.push(format!("Angle ({})", annotation.unit), annotation.angle);
    }

    if let Some(frame_of_reference_uid) = frame_of_reference_uid.filter(|uid| !uid.is_empty()) {
        report.push("FrameOfReferenceUID", frame_of_reference_uid);
    }

    if let Some(points) = points {
        let serialized: Vec<String> = points.iter().map(|p| p.to_string()).collect();
        report.push("points", serialized.join(";"));
    }

    report
}
