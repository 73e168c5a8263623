use super::image_id::{base_image_id, frame_number, parse_wadors};
use super::ImageCatalog;
use crate::error::Result;
use crate::types::{AnnotationMetadata, DisplaySet, ImageIdentity, InstanceInfo};
use log::debug;
use serde::{Deserialize, Serialize};

/// Image catalog holding display sets in memory
///
/// Display sets keep their insertion order, which is the order
/// [`ImageCatalog::find_sets_by_series`] reports them in.
///
/// # Example
///
/// ```
/// use cobbmap_core::{DisplaySet, ImageCatalog, InMemoryCatalog, InstanceInfo};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.add_display_set(
///     DisplaySet::new("ds-1", "1.2", "1.2.3")
///         .with_series_number(3)
///         .with_instance(InstanceInfo::new("1.2.3.4").with_image_id("wadouri:img.dcm")),
/// );
///
/// assert_eq!(catalog.find_sets_by_series("1.2.3").len(), 1);
/// assert!(catalog.find_set_by_instance("1.2.3.4", "1.2.3").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryCatalog {
    display_sets: Vec<DisplaySet>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON array of display sets
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Appends a display set
    pub fn add_display_set(&mut self, display_set: DisplaySet) {
        self.display_sets.push(display_set);
    }

    /// Returns all display sets in insertion order
    pub fn display_sets(&self) -> &[DisplaySet] {
        &self.display_sets
    }

    pub fn is_empty(&self) -> bool {
        self.display_sets.is_empty()
    }

    pub(crate) fn display_sets_mut(&mut self) -> &mut Vec<DisplaySet> {
        &mut self.display_sets
    }

    /// Finds the display set and instance registered under an image id
    fn find_by_image_id(&self, image_id: &str) -> Option<(&DisplaySet, &InstanceInfo)> {
        let base = base_image_id(image_id);
        self.display_sets.iter().find_map(|ds| {
            ds.instances
                .iter()
                .find(|i| {
                    i.image_id
                        .as_deref()
                        .is_some_and(|id| id == image_id || id == base)
                })
                .map(|i| (ds, i))
        })
    }

    /// Finds an instance by the UIDs embedded in a WADO-RS image id
    fn find_by_wadors(&self, image_id: &str) -> Option<(&DisplaySet, &InstanceInfo)> {
        let uids = parse_wadors(image_id)?;
        self.display_sets
            .iter()
            .filter(|ds| ds.series_instance_uid == uids.series_instance_uid)
            .find_map(|ds| ds.find_instance(&uids.sop_instance_uid).map(|i| (ds, i)))
    }

    /// Resolves a volume id of the form `<loader scheme>:<displaySetInstanceUID>`
    fn find_by_volume_id(&self, volume_id: &str) -> Option<&DisplaySet> {
        let display_set_uid = volume_id
            .split_once(':')
            .map_or(volume_id, |(_, uid)| uid);
        self.display_sets
            .iter()
            .find(|ds| ds.display_set_instance_uid == display_set_uid)
    }
}

impl ImageCatalog for InMemoryCatalog {
    fn resolve_identity(
        &self,
        image_id: Option<&str>,
        metadata: &AnnotationMetadata,
    ) -> Option<ImageIdentity> {
        if let Some(image_id) = image_id {
            let found = self
                .find_by_image_id(image_id)
                .or_else(|| self.find_by_wadors(image_id));
            debug!("Resolved image id {} to {:?}", image_id, found.map(|(_, i)| i));

            return found.map(|(ds, instance)| ImageIdentity {
                sop_instance_uid: Some(instance.sop_instance_uid.clone()),
                series_instance_uid: ds.series_instance_uid.clone(),
                study_instance_uid: ds.study_instance_uid.clone(),
                frame_number: frame_number(image_id),
            });
        }

        let volume_id = metadata.volume_id.as_deref()?;
        let ds = self.find_by_volume_id(volume_id)?;
        debug!(
            "Resolved volume {} to display set {}",
            volume_id, ds.display_set_instance_uid
        );
        Some(ImageIdentity {
            sop_instance_uid: None,
            series_instance_uid: ds.series_instance_uid.clone(),
            study_instance_uid: ds.study_instance_uid.clone(),
            frame_number: None,
        })
    }

    fn find_set_by_instance(
        &self,
        sop_instance_uid: &str,
        series_instance_uid: &str,
    ) -> Option<&DisplaySet> {
        self.display_sets.iter().find(|ds| {
            ds.series_instance_uid == series_instance_uid && ds.contains_instance(sop_instance_uid)
        })
    }

    fn find_sets_by_series(&self, series_instance_uid: &str) -> Vec<&DisplaySet> {
        self.display_sets
            .iter()
            .filter(|ds| ds.series_instance_uid == series_instance_uid)
            .collect()
    }
}
