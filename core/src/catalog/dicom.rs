//! Filling an [`InMemoryCatalog`] from DICOM headers
//!
//! Instances are grouped by SeriesInstanceUID into one display set per
//! series. The display set takes the series UID as its instance UID.

use super::InMemoryCatalog;
use crate::error::{CobbmapError, Result};
use crate::types::{DisplaySet, InstanceInfo};
use dicom_core::Tag;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

// Study/Series Identification Tags
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);

// Image Tags
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim_end_matches('\0').trim().to_string())
}

/// Helper to get integer value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to i32
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i32>().ok())
}

fn require_string(dcm: &InMemDicomObject, tag: Tag, name: &str) -> Result<String> {
    get_string_value(dcm, tag)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CobbmapError::TagNotFound(name.to_string()))
}

impl InMemoryCatalog {
    /// Adds one DICOM instance under the given image id
    ///
    /// # Errors
    ///
    /// Returns `TagNotFound` if StudyInstanceUID, SeriesInstanceUID or
    /// SOPInstanceUID is missing
    pub fn insert_dicom(&mut self, image_id: impl Into<String>, dcm: &InMemDicomObject) -> Result<()> {
        let study_uid = require_string(dcm, STUDY_INSTANCE_UID, "StudyInstanceUID")?;
        let series_uid = require_string(dcm, SERIES_INSTANCE_UID, "SeriesInstanceUID")?;
        let sop_uid = require_string(dcm, SOP_INSTANCE_UID, "SOPInstanceUID")?;

        let instance = InstanceInfo {
            sop_instance_uid: sop_uid,
            instance_number: get_int_value(dcm, INSTANCE_NUMBER),
            number_of_frames: get_int_value(dcm, NUMBER_OF_FRAMES),
            image_id: Some(image_id.into()),
        };

        let display_sets = self.display_sets_mut();
        let index = match display_sets
            .iter()
            .position(|ds| ds.series_instance_uid == series_uid)
        {
            Some(index) => index,
            None => {
                let mut ds = DisplaySet::new(series_uid.clone(), study_uid, series_uid);
                ds.series_number = get_int_value(dcm, SERIES_NUMBER);
                ds.series_description = get_string_value(dcm, SERIES_DESCRIPTION);
                ds.modality = get_string_value(dcm, MODALITY);
                display_sets.push(ds);
                display_sets.len() - 1
            }
        };

        let ds = &mut display_sets[index];
        ds.is_multi_frame |= instance.is_multi_frame();
        debug!(
            "Added instance {} to display set {}",
            instance.sop_instance_uid, ds.display_set_instance_uid
        );
        ds.instances.push(instance);
        Ok(())
    }

    /// Builds a catalog from every DICOM file in a directory
    ///
    /// Files are read in file name order, headers only. Each file is
    /// registered under the image id `dicomfile:<path>`. Files that cannot be
    /// read or lack identification tags are skipped with a warning.
    pub fn from_directory(directory: &Path) -> Result<Self> {
        let mut files = collect_dicom_files(directory)?;
        files.sort();

        let mut catalog = Self::new();
        for path in files {
            let image_id = format!("dicomfile:{}", path.display());
            let dcm = match OpenFileOptions::new()
                .read_until(PIXEL_DATA)
                .open_file(&path)
            {
                Ok(obj) => obj,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if let Err(e) = catalog.insert_dicom(image_id, &dcm) {
                warn!("Skipping {}: {}", path.display(), e);
            }
        }

        info!(
            "Loaded {} display sets from {}",
            catalog.display_sets().len(),
            directory.display()
        );
        Ok(catalog)
    }
}

/// Lists the DICOM files of a directory (not recursive)
///
/// Accepts `.dcm` and `.dicom` extensions in any case, and extension-less
/// files that carry the DICM magic.
pub fn collect_dicom_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        match path.extension() {
            Some(ext) => {
                if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") {
                    files.push(path);
                }
            }
            None => {
                if is_dicom_file(&path) {
                    debug!("Found headerless DICOM file: {}", path.display());
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}

/// Checks for the 128-byte preamble followed by the `DICM` magic
pub fn is_dicom_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read_exact(&mut buffer) {
        Ok(()) => &buffer[128..132] == b"DICM",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageCatalog;
    use crate::types::AnnotationMetadata;
    use dicom_core::{DataElement, PrimitiveValue, VR};
    use std::io::Write;
    use tempfile::TempDir;

    fn instance(series: &str, sop: &str, instance_number: i32, frames: Option<i32>) -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(STUDY_INSTANCE_UID, VR::UI, PrimitiveValue::from("1.2")));
        dcm.put(DataElement::new(SERIES_INSTANCE_UID, VR::UI, PrimitiveValue::from(series)));
        dcm.put(DataElement::new(SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from(sop)));
        dcm.put(DataElement::new(SERIES_NUMBER, VR::IS, PrimitiveValue::from("5")));
        dcm.put(DataElement::new(
            INSTANCE_NUMBER,
            VR::IS,
            PrimitiveValue::from(instance_number.to_string()),
        ));
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("CR")));
        if let Some(frames) = frames {
            dcm.put(DataElement::new(
                NUMBER_OF_FRAMES,
                VR::IS,
                PrimitiveValue::from(frames.to_string()),
            ));
        }
        dcm
    }

    #[test]
    fn test_insert_groups_by_series() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert_dicom("img:1", &instance("1.2.3", "1.2.3.1", 1, None)).unwrap();
        catalog.insert_dicom("img:2", &instance("1.2.3", "1.2.3.2", 2, None)).unwrap();
        catalog.insert_dicom("img:3", &instance("1.2.4", "1.2.4.1", 1, Some(20))).unwrap();

        assert_eq!(catalog.display_sets().len(), 2);

        let first = &catalog.display_sets()[0];
        assert_eq!(first.display_set_instance_uid, "1.2.3");
        assert_eq!(first.series_number, Some(5));
        assert_eq!(first.modality.as_deref(), Some("CR"));
        assert_eq!(first.instances.len(), 2);
        assert_eq!(first.instances[1].instance_number, Some(2));
        assert!(!first.is_multi_frame);

        assert!(catalog.display_sets()[1].is_multi_frame);
    }

    #[test]
    fn test_inserted_instance_is_resolvable() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert_dicom("img:1", &instance("1.2.3", "1.2.3.1", 1, None)).unwrap();

        let metadata = AnnotationMetadata {
            tool_name: "CobbAngle".to_string(),
            referenced_image_id: Some("img:1".to_string()),
            frame_of_reference_uid: None,
            volume_id: None,
        };
        let identity = catalog.resolve_identity(Some("img:1"), &metadata).unwrap();
        assert_eq!(identity.sop_instance_uid.as_deref(), Some("1.2.3.1"));
        assert_eq!(identity.study_instance_uid, "1.2");
    }

    #[test]
    fn test_insert_missing_uid() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(STUDY_INSTANCE_UID, VR::UI, PrimitiveValue::from("1.2")));

        let mut catalog = InMemoryCatalog::new();
        let err = catalog.insert_dicom("img:1", &dcm).unwrap_err();
        assert!(matches!(err, CobbmapError::TagNotFound(ref tag) if tag == "SeriesInstanceUID"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_is_dicom_file() {
        let temp_dir = TempDir::new().unwrap();

        let valid = temp_dir.path().join("valid");
        let mut file = File::create(&valid).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.write_all(b"DICM").unwrap();
        assert!(is_dicom_file(&valid));

        let small = temp_dir.path().join("small");
        File::create(&small).unwrap().write_all(b"small").unwrap();
        assert!(!is_dicom_file(&small));

        let wrong = temp_dir.path().join("wrong");
        let mut file = File::create(&wrong).unwrap();
        file.write_all(&[0u8; 128]).unwrap();
        file.write_all(b"NOTM").unwrap();
        assert!(!is_dicom_file(&wrong));
    }

    #[test]
    fn test_collect_dicom_files() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("a.dcm")).unwrap();
        File::create(temp_dir.path().join("b.DICOM")).unwrap();
        File::create(temp_dir.path().join("c.txt")).unwrap();
        File::create(temp_dir.path().join("no_ext"))
            .unwrap()
            .write_all(b"not dicom")
            .unwrap();

        let files = collect_dicom_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_from_directory_skips_unreadable_files() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("broken.dcm"))
            .unwrap()
            .write_all(b"garbage")
            .unwrap();

        let catalog = InMemoryCatalog::from_directory(temp_dir.path()).unwrap();
        assert!(catalog.is_empty());
    }
}
