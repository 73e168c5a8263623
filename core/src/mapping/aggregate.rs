use super::resolve::resolve_identity;
use crate::catalog::ImageCatalog;
use crate::error::Result;
use crate::types::{AnnotationData, AnnotationMetadata, MappedAnnotation, ANGLE_UNIT};
use log::debug;

/// Expands the cached statistics into one mapped annotation per target
///
/// Targets keep the order of the statistics map. Returns `Ok(None)` if the
/// map is empty.
///
/// # Algorithm
///
/// For every target:
/// 1. Resolve the image identity through the catalog (once per target)
/// 2. Take the series number from the first display set of the series
/// 3. Default an absent or zero frame number to 1
/// 4. Copy the angle through, absent or not
pub fn aggregate_stats(
    metadata: &AnnotationMetadata,
    data: &AnnotationData,
    catalog: &dyn ImageCatalog,
) -> Result<Option<Vec<MappedAnnotation>>> {
    if data.cached_stats.is_empty() {
        return Ok(None);
    }

    data.cached_stats
        .iter()
        .map(|(target_id, stat)| -> Result<MappedAnnotation> {
            let identity = resolve_identity(metadata, catalog)?;
            let series_number = catalog
                .find_sets_by_series(&identity.series_instance_uid)
                .first()
                .and_then(|ds| ds.series_number);

            debug!("Target {}: angle {:?}", target_id, stat.angle);
            Ok(MappedAnnotation {
                series_instance_uid: identity.series_instance_uid,
                sop_instance_uid: identity.sop_instance_uid,
                series_number,
                frame_number: identity.frame_number.filter(|&f| f != 0).unwrap_or(1),
                unit: ANGLE_UNIT.to_string(),
                angle: stat.angle,
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
