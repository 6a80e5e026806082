//! Video URL validation and frame arithmetic.
//!
//! The player only accepts direct links to video files, so a URL must parse
//! with a scheme and host and carry a recognized video file extension. No
//! network accessibility check is performed.

use url::Url;

/// Recognized video file extensions (matched case-insensitively as a suffix
/// of the full URL).
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".ogg", ".mov"];

/// Validate a video URL for playback.
///
/// Returns the user-facing error message on failure:
///
/// - empty input
/// - input that does not parse as `scheme://host/...`
/// - input without one of [`VIDEO_EXTENSIONS`]
pub fn validate_video_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("Please enter a video URL".to_string());
    }

    let parsed = Url::parse(url).map_err(|_| "Invalid URL format".to_string())?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("Invalid URL format".to_string());
    }

    let lower = url.to_ascii_lowercase();
    if !VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err("URL must point to a video file (mp4, webm, ogg, mov)".to_string());
    }

    Ok(())
}

/// Parse an FPS value from free-form text input.
///
/// The input comes straight from a text field, so it is parsed as a signed
/// integer first: `"-3"` must report the range error, not the parse error.
pub fn parse_fps(value: &str) -> Result<u32, String> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| "FPS must be a valid number".to_string())?;

    if parsed <= 0 {
        return Err("FPS must be greater than 0".to_string());
    }

    u32::try_from(parsed).map_err(|_| "FPS must be a valid number".to_string())
}

/// Frame index at a playback position: `floor(time_seconds * fps)`.
pub fn frame_at(time_seconds: f64, fps: u32) -> i64 {
    (time_seconds * f64::from(fps)).floor() as i64
}
