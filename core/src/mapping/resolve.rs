use crate::catalog::ImageCatalog;
use crate::error::{CobbmapError, Result};
use crate::types::{
    AnnotationData, AnnotationMetadata, DisplaySet, ImageIdentity, MappingConfig,
    RawAnnotationEvent,
};
use log::{debug, warn};

/// Identity of the referenced image together with its display set
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage<'c> {
    pub identity: ImageIdentity,
    pub display_set: &'c DisplaySet,
}

/// Checks that an event can be mapped
///
/// Returns the metadata and data blocks of the annotation, or `Ok(None)` with
/// a warning if either block is missing.
///
/// # Errors
///
/// Returns `UnsupportedTool` if the tool name is not in the configured
/// allow-list
pub fn validate_event<'e>(
    event: &'e RawAnnotationEvent,
    config: &MappingConfig,
) -> Result<Option<(&'e AnnotationMetadata, &'e AnnotationData)>> {
    let annotation = &event.annotation;
    let (metadata, data) = match (&annotation.metadata, &annotation.data) {
        (Some(metadata), Some(data)) => (metadata, data),
        _ => {
            warn!(
                "Cobb angle tool: missing metadata or data for annotation {}",
                annotation.annotation_uid
            );
            return Ok(None);
        }
    };

    if !config.is_supported_tool(&metadata.tool_name) {
        return Err(CobbmapError::UnsupportedTool(metadata.tool_name.clone()));
    }

    Ok(Some((metadata, data)))
}

/// Resolves the referenced image and the display set that owns it
///
/// With a SOP instance the display set is looked up by (instance, series).
/// Without one, the first display set of the series is taken in whatever
/// order the catalog returns them.
pub fn resolve_image<'c>(
    metadata: &AnnotationMetadata,
    catalog: &'c dyn ImageCatalog,
) -> Result<ResolvedImage<'c>> {
    let identity = resolve_identity(metadata, catalog)?;

    let display_set = match identity.sop_instance_uid.as_deref() {
        Some(sop_instance_uid) => {
            catalog.find_set_by_instance(sop_instance_uid, &identity.series_instance_uid)
        }
        None => catalog
            .find_sets_by_series(&identity.series_instance_uid)
            .into_iter()
            .next(),
    }
    .ok_or_else(|| CobbmapError::DisplaySetNotFound(identity.series_instance_uid.clone()))?;

    debug!(
        "Annotation image belongs to display set {}",
        display_set.display_set_instance_uid
    );
    Ok(ResolvedImage {
        identity,
        display_set,
    })
}

/// Asks the catalog for the identity of the annotation's image
pub(crate) fn resolve_identity(
    metadata: &AnnotationMetadata,
    catalog: &dyn ImageCatalog,
) -> Result<ImageIdentity> {
    catalog
        .resolve_identity(metadata.referenced_image_id.as_deref(), metadata)
        .ok_or_else(|| {
            let reference = metadata
                .referenced_image_id
                .as_deref()
                .or(metadata.volume_id.as_deref())
                .unwrap_or("<none>");
            CobbmapError::UnresolvedImage(reference.to_string())
        })
}
