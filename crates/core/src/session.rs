//! Per-user annotation session state.
//!
//! One [`AnnotationSession`] exists per connected user and is mutated only
//! through the explicit operations defined here, one event at a time. Every
//! validation failure is absorbed into a user-facing error string rather
//! than returned to the caller; the UI renders the string and the user
//! retries.

use serde_json::Value;

use crate::annotation::AnnotationRecord;
use crate::form::AnnotationForm;
use crate::video::{frame_at, parse_fps, validate_video_url};

/// Default frame rate used to derive frame indices.
pub const DEFAULT_FPS: u32 = 60;

/// Live state for one annotation session.
#[derive(Debug, Clone)]
pub struct AnnotationSession {
    video_url: String,
    video_error: String,
    current_time: f64,
    fps: u32,
    is_natural_language_mode: bool,
    form: AnnotationForm,
    form_error: String,
    annotations: Vec<AnnotationRecord>,
    dataset_repo: String,
    dataset_private: bool,
    export_status: String,
    export_error: String,
    export_success: String,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self {
            video_url: String::new(),
            video_error: String::new(),
            current_time: 0.0,
            fps: DEFAULT_FPS,
            is_natural_language_mode: false,
            form: AnnotationForm::default(),
            form_error: String::new(),
            annotations: Vec::new(),
            dataset_repo: String::new(),
            dataset_private: false,
            export_status: String::new(),
            export_error: String::new(),
            export_success: String::new(),
        }
    }
}

impl AnnotationSession {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Video ------------------------------------------------------------

    /// Set the video URL after validation.
    ///
    /// The error field is cleared before validating so a corrected input
    /// never shows a stale error. Rejected input resets the URL to empty.
    pub fn set_video_url(&mut self, url: &str) {
        self.video_error.clear();
        match validate_video_url(url) {
            Ok(()) => self.video_url = url.to_string(),
            Err(message) => {
                self.video_url.clear();
                self.video_error = message;
            }
        }
    }

    /// Update the playback position from a player progress payload.
    ///
    /// The payload is expected to carry a non-negative numeric
    /// `playedSeconds` field. Anything else is absorbed into `video_error`.
    pub fn update_progress(&mut self, progress: &Value) {
        match progress.get("playedSeconds").and_then(Value::as_f64) {
            Some(seconds) if seconds >= 0.0 => self.current_time = seconds,
            Some(_) => {
                self.video_error =
                    "Error updating video progress: 'playedSeconds' must be non-negative"
                        .to_string();
            }
            None => {
                self.video_error =
                    "Error updating video progress: missing or invalid 'playedSeconds' field"
                        .to_string();
            }
        }
    }

    /// Set the frame rate from text input. Invalid input leaves the current
    /// value in place.
    pub fn set_fps(&mut self, value: &str) {
        match parse_fps(value) {
            Ok(fps) => {
                self.fps = fps;
                self.video_error.clear();
            }
            Err(message) => self.video_error = message,
        }
    }

    /// Frame index derived from the current playback position. Recomputed on
    /// every read, never cached.
    pub fn current_frame(&self) -> i64 {
        frame_at(self.current_time, self.fps)
    }

    // -- Form -------------------------------------------------------------

    /// Flip between natural-language and structured entry. Field values in
    /// both shapes are preserved.
    pub fn toggle_form_mode(&mut self) {
        self.is_natural_language_mode = !self.is_natural_language_mode;
    }

    pub fn set_natural_language_description(&mut self, value: String) {
        self.form.natural_language_description = value;
    }

    pub fn set_action_type(&mut self, value: String) {
        self.form.action_type = value;
    }

    pub fn set_action_description(&mut self, value: String) {
        self.form.action_description = value;
    }

    pub fn set_detected_apparatus(&mut self, value: String) {
        self.form.detected_apparatus = value;
    }

    pub fn set_detected_instruments(&mut self, value: String) {
        self.form.detected_instruments = value;
    }

    pub fn set_detected_materials(&mut self, value: String) {
        self.form.detected_materials = value;
    }

    pub fn set_spatial_information(&mut self, value: String) {
        self.form.spatial_information = value;
    }

    /// Append an annotation built from the active form shape, then reset the
    /// form. A form that fails validation reports through `form_error` and
    /// appends nothing.
    pub fn add_annotation(&mut self) {
        self.form_error.clear();
        match self.form.to_record(
            self.is_natural_language_mode,
            self.current_frame(),
            self.current_time,
            &self.video_url,
        ) {
            Ok(record) => {
                self.annotations.push(record);
                self.form.clear();
            }
            Err(message) => self.form_error = message,
        }
    }

    /// Reset all form fields without submitting.
    pub fn clear_form(&mut self) {
        self.form.clear();
        self.form_error.clear();
    }

    /// Drop the most recent annotation. No-op when the list is empty.
    pub fn remove_last_annotation(&mut self) {
        self.annotations.pop();
    }

    // -- Export bookkeeping -------------------------------------------------

    pub fn set_dataset_repo(&mut self, value: String) {
        self.dataset_repo = value;
    }

    pub fn set_dataset_private(&mut self, value: bool) {
        self.dataset_private = value;
    }

    /// Mark an export as in flight, clearing any previous outcome.
    pub fn begin_export(&mut self) {
        self.export_status = format!("Pushing {} annotations...", self.annotations.len());
        self.export_error.clear();
        self.export_success.clear();
    }

    pub fn finish_export(&mut self, message: String) {
        self.export_status.clear();
        self.export_success = message;
    }

    pub fn fail_export(&mut self, message: String) {
        self.export_status.clear();
        self.export_error = message;
    }

    // -- Read accessors ----------------------------------------------------

    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    pub fn video_error(&self) -> &str {
        &self.video_error
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn is_natural_language_mode(&self) -> bool {
        self.is_natural_language_mode
    }

    pub fn form(&self) -> &AnnotationForm {
        &self.form
    }

    pub fn form_error(&self) -> &str {
        &self.form_error
    }

    pub fn annotations(&self) -> &[AnnotationRecord] {
        &self.annotations
    }

    pub fn dataset_repo(&self) -> &str {
        &self.dataset_repo
    }

    pub fn dataset_private(&self) -> bool {
        self.dataset_private
    }

    pub fn export_status(&self) -> &str {
        &self.export_status
    }

    pub fn export_error(&self) -> &str {
        &self.export_error
    }

    pub fn export_success(&self) -> &str {
        &self.export_success
    }
}
