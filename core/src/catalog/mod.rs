//! Image catalog collaborator
//!
//! The mapper never owns image metadata. It asks an [`ImageCatalog`] to turn
//! the referenced image into study/series/instance identity and to find the
//! display set that owns it. [`InMemoryCatalog`] is a reference implementation
//! that can be filled from JSON or from DICOM headers.

pub mod dicom;
pub mod image_id;
mod memory;

pub use dicom::{collect_dicom_files, is_dicom_file};
pub use memory::InMemoryCatalog;

use crate::types::{AnnotationMetadata, DisplaySet, ImageIdentity};

/// Resolves image identity and display sets for the mapper
pub trait ImageCatalog {
    /// Resolves the image an annotation refers to
    ///
    /// `image_id` is the annotation's referenced image id, if any. Annotations
    /// drawn on a volume carry no image id; implementations may then use the
    /// metadata (e.g. its volume id) and return an identity without SOP
    /// instance. Returns `None` if nothing matches.
    fn resolve_identity(
        &self,
        image_id: Option<&str>,
        metadata: &AnnotationMetadata,
    ) -> Option<ImageIdentity>;

    /// Finds the display set holding the given instance of the given series
    fn find_set_by_instance(
        &self,
        sop_instance_uid: &str,
        series_instance_uid: &str,
    ) -> Option<&DisplaySet>;

    /// Returns the display sets of a series, in catalog order
    fn find_sets_by_series(&self, series_instance_uid: &str) -> Vec<&DisplaySet>;
}
