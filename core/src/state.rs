//! Lock and visibility state of annotations
//!
//! The mapper copies these flags into the measurement; it never changes them.

use std::collections::HashSet;

/// Reports whether an annotation is locked or visible
pub trait AnnotationStateTracker {
    fn is_locked(&self, annotation_uid: &str) -> bool;
    fn is_visible(&self, annotation_uid: &str) -> bool;
}

/// In-memory tracker: annotations are unlocked and visible unless marked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationStateRegistry {
    locked: HashSet<String>,
    hidden: HashSet<String>,
}

impl AnnotationStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks or unlocks an annotation
    pub fn set_locked(&mut self, annotation_uid: impl Into<String>, locked: bool) {
        let uid = annotation_uid.into();
        if locked {
            self.locked.insert(uid);
        } else {
            self.locked.remove(&uid);
        }
    }

    /// Shows or hides an annotation
    pub fn set_visible(&mut self, annotation_uid: impl Into<String>, visible: bool) {
        let uid = annotation_uid.into();
        if visible {
            self.hidden.remove(&uid);
        } else {
            self.hidden.insert(uid);
        }
    }
}

impl AnnotationStateTracker for AnnotationStateRegistry {
    fn is_locked(&self, annotation_uid: &str) -> bool {
        self.locked.contains(annotation_uid)
    }

    fn is_visible(&self, annotation_uid: &str) -> bool {
        !self.hidden.contains(annotation_uid)
    }
}
