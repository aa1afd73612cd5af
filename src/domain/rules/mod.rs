// Domain rules - Business limits and policies

use std::path::Path;

use crate::domain::errors::*;
use crate::utils::time::format_time_for_filename;

/// Longest chunk that may be committed, in seconds
pub const MAX_CHUNK_SECONDS: f64 = 90.0;

/// Length of each chunk produced by auto-split, in seconds
pub const AUTO_SPLIT_SECONDS: f64 = 60.0;

/// Selection length after a load or reset, capped by the video duration
pub const DEFAULT_SELECTION_SECONDS: f64 = 60.0;

/// Remainders shorter than this are dropped by auto-split
pub const SPLIT_TOLERANCE_SECONDS: f64 = 0.01;

/// Preview stops this close to the end of the previewed range
pub const PREVIEW_END_MARGIN_SECONDS: f64 = 0.05;

/// Business rules for chunk durations
pub struct DurationRule;

impl DurationRule {
    /// A chunk duration is committable when `0 < duration <= 90`
    pub fn is_valid(duration: f64) -> bool {
        duration > 0.0 && duration <= MAX_CHUNK_SECONDS
    }

    /// Same predicate, as a domain error
    pub fn validate(duration: f64) -> Result<(), DomainError> {
        if Self::is_valid(duration) {
            Ok(())
        } else {
            Err(DomainError::InvalidDuration(format!(
                "Selection must be between 1 and {} seconds (got {:.2}s)",
                MAX_CHUNK_SECONDS, duration
            )))
        }
    }
}

/// Business rules for accepted input files
pub struct MediaTypeRule;

impl MediaTypeRule {
    /// Guess a media type from the file extension
    pub fn media_type_for(path: &Path) -> String {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        let media_type = match extension.as_str() {
            "mp4" | "m4v" => "video/mp4",
            "mov" => "video/quicktime",
            "mkv" => "video/x-matroska",
            "webm" => "video/webm",
            "avi" => "video/x-msvideo",
            "wmv" => "video/x-ms-wmv",
            "flv" => "video/x-flv",
            "mpg" | "mpeg" => "video/mpeg",
            "ts" | "mts" | "m2ts" => "video/mp2t",
            "3gp" => "video/3gpp",
            "ogv" => "video/ogg",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "aac" | "m4a" => "audio/aac",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "txt" => "text/plain",
            "json" => "application/json",
            _ => "application/octet-stream",
        };
        media_type.to_string()
    }

    /// Reject anything whose media type is not in the video category
    pub fn validate(media_type: &str) -> Result<(), DomainError> {
        if media_type.starts_with("video/") {
            Ok(())
        } else {
            Err(DomainError::InvalidInput(format!(
                "Please select a valid video file (got {})",
                media_type
            )))
        }
    }
}

/// Naming of exported artifacts
pub struct ExportNaming;

impl ExportNaming {
    /// Extension of the single output container
    pub const EXTENSION: &'static str = "mp4";

    /// `<prefix>_HH-MM-SS.mp4`, derived from the chunk start
    pub fn transcoded_file_name(prefix: &str, chunk_start: f64) -> String {
        format!(
            "{}_{}.{}",
            prefix,
            format_time_for_filename(chunk_start),
            Self::EXTENSION
        )
    }
}
