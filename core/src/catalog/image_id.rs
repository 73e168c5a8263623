//! Image id parsing
//!
//! Image ids are URL-like strings such as
//! `wadors:https://host/studies/<study>/series/<series>/instances/<sop>/frames/<n>`
//! or `wadouri:https://host/file.dcm?frame=<n>`. Frame numbers are 1-based.

use regex::Regex;
use std::sync::OnceLock;

fn frames_path_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"/frames/(\d+)$").expect("Failed to compile regex"))
}

fn frame_param_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"([?&])frame=(\d+)").expect("Failed to compile regex"))
}

fn wadors_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"/studies/([^/?]+)/series/([^/?]+)/instances/([^/?]+)")
            .expect("Failed to compile regex")
    })
}

/// UIDs embedded in a WADO-RS image id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadoRsUids {
    pub study_instance_uid: String,
    pub series_instance_uid: String,
    pub sop_instance_uid: String,
}

/// Extracts the frame number from an image id
///
/// Returns `None` if the image id does not address a specific frame.
pub fn frame_number(image_id: &str) -> Option<u32> {
    if let Some(caps) = frames_path_regex().captures(image_id) {
        return caps[1].parse().ok();
    }
    frame_param_regex()
        .captures(image_id)
        .and_then(|caps| caps[2].parse().ok())
}

/// Removes the frame part of an image id
///
/// The result identifies the whole instance, which is how the catalog stores
/// image ids.
pub fn base_image_id(image_id: &str) -> String {
    if frames_path_regex().is_match(image_id) {
        return frames_path_regex().replace(image_id, "").into_owned();
    }

    // Keep the separator if other query parameters follow
    let stripped = frame_param_regex().replace(image_id, "$1");
    stripped
        .replace("?&", "?")
        .replace("&&", "&")
        .trim_end_matches(['?', '&'])
        .to_string()
}

/// Parses the study/series/instance UIDs out of a WADO-RS image id
pub fn parse_wadors(image_id: &str) -> Option<WadoRsUids> {
    wadors_regex().captures(image_id).map(|caps| WadoRsUids {
        study_instance_uid: caps[1].to_string(),
        series_instance_uid: caps[2].to_string(),
        sop_instance_uid: caps[3].to_string(),
    })
}
