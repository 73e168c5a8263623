use crate::catalog::ImageCatalog;
use crate::error::Result;
use crate::mapping::{
    aggregate_stats, format_display_text, resolve_image, validate_event, CobbAngleReport,
};
use crate::state::AnnotationStateTracker;
use crate::types::{
    MappedAnnotation, MappingConfig, Measurement, RawAnnotationEvent, ToolTypeClassifier,
    ValueTypeClassifier,
};
use log::debug;
use std::sync::Arc;

/// Maps Cobb angle annotation events to measurements
///
/// Borrows its collaborators: the image catalog, the lock/visibility tracker
/// and the value type classifier. Holds no state between calls.
///
/// # Example
///
/// ```
/// use cobbmap_core::{
///     AnnotationStateRegistry, CobbAngleMapper, DisplaySet, InMemoryCatalog, InstanceInfo,
///     RawAnnotationEvent, ValueType,
/// };
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.add_display_set(
///     DisplaySet::new("ds-1", "1.2", "1.2.3")
///         .with_series_number(2)
///         .with_instance(
///             InstanceInfo::new("1.2.3.4")
///                 .with_instance_number(8)
///                 .with_image_id("wadouri:spine.dcm"),
///         ),
/// );
/// let state = AnnotationStateRegistry::new();
///
/// let event = RawAnnotationEvent::from_json(r#"{
///     "annotation": {
///         "annotationUID": "cobb-1",
///         "metadata": {
///             "toolName": "CobbAngle",
///             "referencedImageId": "wadouri:spine.dcm",
///             "FrameOfReferenceUID": "FOR1"
///         },
///         "data": {
///             "cachedStats": { "t1": { "angle": 47.336 } },
///             "handles": { "points": [[0, 0, 0], [1, 2, 3]] }
///         }
///     }
/// }"#).unwrap();
///
/// let measurement = CobbAngleMapper::new(&catalog, &state)
///     .to_measurement(&event)
///     .unwrap()
///     .expect("event has metadata and data");
///
/// assert_eq!(measurement.uid, "cobb-1");
/// assert_eq!(measurement.value_type, ValueType::Angle);
/// assert_eq!(measurement.display_text.primary, vec!["47.34 °"]);
/// assert_eq!(measurement.display_text.secondary, vec!["S: 2 I: 8"]);
///
/// let report = measurement.build_report();
/// assert_eq!(report.columns()[1], "Angle (°)");
/// ```
pub struct CobbAngleMapper<'a> {
    catalog: &'a dyn ImageCatalog,
    state: &'a dyn AnnotationStateTracker,
    classifier: &'a dyn ValueTypeClassifier,
    config: MappingConfig,
}

impl<'a> CobbAngleMapper<'a> {
    /// Creates a mapper with the default classifier and configuration
    pub fn new(catalog: &'a dyn ImageCatalog, state: &'a dyn AnnotationStateTracker) -> Self {
        Self {
            catalog,
            state,
            classifier: &ToolTypeClassifier,
            config: MappingConfig::default(),
        }
    }

    /// Builder: use another value type classifier
    pub fn with_classifier(mut self, classifier: &'a dyn ValueTypeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Builder: use another configuration
    pub fn with_config(mut self, config: MappingConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Maps an annotation event to a measurement
    ///
    /// Returns `Ok(None)` if the annotation lacks its metadata or data block;
    /// the caller should skip the event.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tool is not supported (`UnsupportedTool`)
    /// - The referenced image is unknown to the catalog (`UnresolvedImage`)
    /// - No display set owns the referenced image (`DisplaySetNotFound`)
    pub fn to_measurement(&self, event: &RawAnnotationEvent) -> Result<Option<Measurement>> {
        let annotation_uid = &event.annotation.annotation_uid;
        let is_locked = self.state.is_locked(annotation_uid);
        let is_visible = self.state.is_visible(annotation_uid);

        let Some((metadata, data)) = validate_event(event, &self.config)? else {
            return Ok(None);
        };

        let resolved = resolve_image(metadata, self.catalog)?;
        let mapped: Option<Arc<[MappedAnnotation]>> =
            aggregate_stats(metadata, data, self.catalog)?.map(Into::into);

        let display_text = format_display_text(mapped.as_deref(), resolved.display_set, &self.config);
        let frame_number = mapped
            .as_deref()
            .and_then(|m| m.first())
            .map_or(1, |first| first.frame_number);

        debug!(
            "Mapped annotation {} with {} targets",
            annotation_uid,
            mapped.as_deref().map_or(0, |m| m.len())
        );

        let report = CobbAngleReport::new(
            mapped,
            data.handles.points.clone(),
            metadata.frame_of_reference_uid.clone(),
        );

        Ok(Some(Measurement {
            uid: annotation_uid.clone(),
            sop_instance_uid: resolved.identity.sop_instance_uid,
            frame_of_reference_uid: metadata.frame_of_reference_uid.clone(),
            points: data.handles.points.clone(),
            text_box: data.handles.text_box.clone(),
            is_locked,
            is_visible,
            metadata: metadata.clone(),
            reference_series_uid: resolved.identity.series_instance_uid,
            reference_study_uid: resolved.identity.study_instance_uid,
            referenced_image_id: metadata.referenced_image_id.clone(),
            frame_number,
            tool_name: metadata.tool_name.clone(),
            display_set_instance_uid: resolved.display_set.display_set_instance_uid.clone(),
            label: data.label.clone(),
            display_text,
            data: data.cached_stats.clone(),
            value_type: self.classifier.classify(&metadata.tool_name),
            report: Arc::new(report),
        }))
    }
}
