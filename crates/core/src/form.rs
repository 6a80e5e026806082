//! The annotation entry form.
//!
//! The form has two mutually exclusive shapes: a single free-text
//! description, or the structured fields (action type, description,
//! detection lists, spatial info). Which shape is read at submission is
//! decided by the session's mode flag, not stored here.

use serde::Serialize;

use crate::annotation::{
    parse_spatial_info, split_detected_list, ActionType, AnnotationContent, AnnotationRecord,
};
use crate::error::CoreError;

/// Raw text values of every form field, in both shapes.
///
/// Fields hold exactly what the user typed; parsing and validation happen at
/// submission time in [`AnnotationForm::to_record`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnnotationForm {
    pub natural_language_description: String,
    pub action_type: String,
    pub action_description: String,
    pub detected_apparatus: String,
    pub detected_instruments: String,
    pub detected_materials: String,
    pub spatial_information: String,
}

impl AnnotationForm {
    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build an [`AnnotationRecord`] from the currently active shape.
    ///
    /// Returns the user-facing error message if the active shape is not
    /// submittable. The form itself is left untouched either way; the
    /// session resets it only after a successful append.
    pub fn to_record(
        &self,
        natural_language_mode: bool,
        frame: i64,
        time_seconds: f64,
        video_url: &str,
    ) -> Result<AnnotationRecord, String> {
        let content = if natural_language_mode {
            let description = self.natural_language_description.trim();
            if description.is_empty() {
                return Err("Please enter a description".to_string());
            }
            AnnotationContent::NaturalLanguage {
                description: description.to_string(),
            }
        } else {
            if self.action_type.is_empty() {
                return Err("Please select an action type".to_string());
            }
            let action_type = ActionType::from_str(&self.action_type).map_err(|e| match e {
                CoreError::Validation(message) => message,
                other => other.to_string(),
            })?;
            let spatial_info = parse_spatial_info(&self.spatial_information)?;

            AnnotationContent::Structured {
                action_type,
                description: self.action_description.trim().to_string(),
                apparatus: split_detected_list(&self.detected_apparatus),
                instruments: split_detected_list(&self.detected_instruments),
                materials: split_detected_list(&self.detected_materials),
                spatial_info,
            }
        };

        Ok(AnnotationRecord {
            frame,
            time_seconds,
            video_url: video_url.to_string(),
            content,
        })
    }
}
