//! Annotation record types and structured-field validation.
//!
//! An [`AnnotationRecord`] is built from whichever form shape is active at
//! submission time (free text or structured fields) together with the
//! playback position it describes.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Action types
// ---------------------------------------------------------------------------

/// Laboratory action types available in structured mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Transfer,
    Mix,
    Heat,
    Cool,
    Centrifuge,
    Incubate,
    Measure,
    Wash,
    Observe,
    Discard,
}

/// All valid action type strings.
const VALID_ACTION_STRINGS: &[&str] = &[
    "transfer",
    "mix",
    "heat",
    "cool",
    "centrifuge",
    "incubate",
    "measure",
    "wash",
    "observe",
    "discard",
];

impl ActionType {
    /// Return the action type as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Mix => "mix",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Centrifuge => "centrifuge",
            Self::Incubate => "incubate",
            Self::Measure => "measure",
            Self::Wash => "wash",
            Self::Observe => "observe",
            Self::Discard => "discard",
        }
    }

    /// Parse an action type from a string slice.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "transfer" => Ok(Self::Transfer),
            "mix" => Ok(Self::Mix),
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            "centrifuge" => Ok(Self::Centrifuge),
            "incubate" => Ok(Self::Incubate),
            "measure" => Ok(Self::Measure),
            "wash" => Ok(Self::Wash),
            "observe" => Ok(Self::Observe),
            "discard" => Ok(Self::Discard),
            _ => Err(CoreError::Validation(format!(
                "Invalid action type '{s}'. Must be one of: {}",
                VALID_ACTION_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single recorded annotation, pinned to the playback position at which it
/// was submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Frame index at submission time.
    pub frame: i64,
    /// Playback position in seconds at submission time.
    pub time_seconds: f64,
    /// The video the annotation refers to.
    pub video_url: String,
    #[serde(flatten)]
    pub content: AnnotationContent,
}

/// The two form shapes an annotation can be captured in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnnotationContent {
    NaturalLanguage {
        description: String,
    },
    Structured {
        action_type: ActionType,
        description: String,
        apparatus: Vec<String>,
        instruments: Vec<String>,
        materials: Vec<String>,
        spatial_info: serde_json::Value,
    },
}

// ---------------------------------------------------------------------------
// Field parsing helpers
// ---------------------------------------------------------------------------

/// Split a comma-separated detection list into trimmed, non-empty entries.
pub fn split_detected_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the spatial-info text field.
///
/// Empty input means "no spatial info" and maps to JSON `null`; anything
/// else must be valid JSON so exported records stay machine-readable.
pub fn parse_spatial_info(input: &str) -> Result<serde_json::Value, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(trimmed).map_err(|_| "Spatial info must be valid JSON".to_string())
}
