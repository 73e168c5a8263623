use serde::{Deserialize, Serialize};

/// A group of image instances presented together in a viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySet {
    #[serde(rename = "displaySetInstanceUID")]
    pub display_set_instance_uid: String,

    #[serde(rename = "StudyInstanceUID")]
    pub study_instance_uid: String,

    #[serde(rename = "SeriesInstanceUID")]
    pub series_instance_uid: String,

    #[serde(rename = "SeriesNumber", default)]
    pub series_number: Option<i32>,

    #[serde(rename = "SeriesDescription", default)]
    pub series_description: Option<String>,

    #[serde(rename = "Modality", default)]
    pub modality: Option<String>,

    #[serde(default)]
    pub is_multi_frame: bool,

    #[serde(default)]
    pub instances: Vec<InstanceInfo>,
}

impl DisplaySet {
    /// Creates an empty single-frame display set
    pub fn new(
        display_set_instance_uid: impl Into<String>,
        study_instance_uid: impl Into<String>,
        series_instance_uid: impl Into<String>,
    ) -> Self {
        Self {
            display_set_instance_uid: display_set_instance_uid.into(),
            study_instance_uid: study_instance_uid.into(),
            series_instance_uid: series_instance_uid.into(),
            series_number: None,
            series_description: None,
            modality: None,
            is_multi_frame: false,
            instances: Vec::new(),
        }
    }

    /// Builder: set the series number
    pub fn with_series_number(mut self, series_number: i32) -> Self {
        self.series_number = Some(series_number);
        self
    }

    /// Builder: mark the display set as multi-frame
    pub fn multi_frame(mut self, is_multi_frame: bool) -> Self {
        self.is_multi_frame = is_multi_frame;
        self
    }

    /// Builder: append an instance
    pub fn with_instance(mut self, instance: InstanceInfo) -> Self {
        self.instances.push(instance);
        self
    }

    /// Finds an instance by SOP Instance UID
    pub fn find_instance(&self, sop_instance_uid: &str) -> Option<&InstanceInfo> {
        self.instances
            .iter()
            .find(|i| i.sop_instance_uid == sop_instance_uid)
    }

    /// Checks whether the display set contains the given SOP instance
    pub fn contains_instance(&self, sop_instance_uid: &str) -> bool {
        self.find_instance(sop_instance_uid).is_some()
    }
}

/// One image instance of a display set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    #[serde(rename = "SOPInstanceUID")]
    pub sop_instance_uid: String,

    #[serde(rename = "InstanceNumber", default)]
    pub instance_number: Option<i32>,

    #[serde(rename = "NumberOfFrames", default)]
    pub number_of_frames: Option<i32>,

    /// Image id the viewer loads this instance with (frame suffix stripped)
    #[serde(default)]
    pub image_id: Option<String>,
}

impl InstanceInfo {
    /// Creates an instance with only its SOP Instance UID
    pub fn new(sop_instance_uid: impl Into<String>) -> Self {
        Self {
            sop_instance_uid: sop_instance_uid.into(),
            instance_number: None,
            number_of_frames: None,
            image_id: None,
        }
    }

    /// Builder: set the instance number
    pub fn with_instance_number(mut self, instance_number: i32) -> Self {
        self.instance_number = Some(instance_number);
        self
    }

    /// Builder: set the image id
    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }

    /// Returns whether the instance holds more than one frame
    pub fn is_multi_frame(&self) -> bool {
        self.number_of_frames.is_some_and(|n| n > 1)
    }
}

/// Resolved identity of the image an annotation refers to
///
/// `sop_instance_uid` is absent when the annotation was drawn on a volume
/// rather than on a specific image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageIdentity {
    pub sop_instance_uid: Option<String>,
    pub series_instance_uid: String,
    pub study_instance_uid: String,
    pub frame_number: Option<u32>,
}
