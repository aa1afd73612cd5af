//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` program as the transcoding engine. Every cut gets its own
//! scratch directory holding the encoded output, plus a staged copy of the
//! input when it arrives as bytes. Files on disk are read in place. The
//! directory is removed when the call returns, whether it succeeded or not.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::ports::*;

/// Encoder settings for the fixed MP4 output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    /// Program to run; looked up on `PATH` when not absolute
    pub ffmpeg_path: PathBuf,
    /// x264 preset (ultrafast ... veryslow)
    pub preset: String,
    /// Constant rate factor, 0-51 (lower is higher quality)
    pub crf: u8,
    /// AAC bitrate, e.g. `128k`
    pub audio_bitrate: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            preset: "veryfast".to_string(),
            crf: 23,
            audio_bitrate: "128k".to_string(),
        }
    }
}

/// FFmpeg-based transcoding adapter
pub struct FFmpegAdapter {
    settings: EncoderSettings,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(settings: EncoderSettings) -> Self {
        Self { settings }
    }

    /// Command line for one cut: seek, trim, H.264 + AAC
    pub fn build_args(&self, input: &Path, output: &Path, start: f64, duration: f64) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-y".to_string(),
            "-ss".to_string(),
            format!("{:.3}", start),
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
            "-t".to_string(),
            format!("{:.3}", duration),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            self.settings.preset.clone(),
            "-crf".to_string(),
            self.settings.crf.to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            self.settings.audio_bitrate.clone(),
            output.to_string_lossy().into_owned(),
        ]
    }

    /// Path ffmpeg reads from, staging in-memory input into `scratch`
    async fn stage_input(
        scratch: &Path,
        input_name: &str,
        input: &TranscodeInput,
    ) -> Result<PathBuf, DomainError> {
        match input {
            TranscodeInput::File(path) => Ok(path.clone()),
            TranscodeInput::Bytes(bytes) => {
                let staged = scratch.join(format!("input.{}", Self::input_extension(input_name)));
                tokio::fs::write(&staged, bytes).await.map_err(|e| {
                    DomainError::TranscodeFailed(format!("Failed to stage input: {}", e))
                })?;
                Ok(staged)
            }
        }
    }

    /// Extension of the input copy, taken from the original name
    fn input_extension(input_name: &str) -> String {
        Path::new(input_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or("input")
            .to_string()
    }

    /// Last lines of stderr, enough to explain a failure
    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let tail_start = lines.len().saturating_sub(5);
        lines[tail_start..].join("; ")
    }
}

#[async_trait]
impl TranscodePort for FFmpegAdapter {
    async fn initialize(&self) -> Result<(), DomainError> {
        info!("Locating ffmpeg at {}", self.settings.ffmpeg_path.display());

        let output = Command::new(&self.settings.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::ServiceUnavailable(format!(
                    "Failed to run {}: {}",
                    self.settings.ffmpeg_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::ServiceUnavailable(format!(
                "{} -version exited with {}",
                self.settings.ffmpeg_path.display(),
                output.status
            )));
        }

        let banner = String::from_utf8_lossy(&output.stdout);
        if let Some(first_line) = banner.lines().next() {
            info!("ffmpeg ready: {}", first_line);
        }
        Ok(())
    }

    async fn transcode(&self, request: TranscodeRequest) -> Result<Vec<u8>, DomainError> {
        let scratch = tempfile::Builder::new()
            .prefix("clipchunk-")
            .tempdir()
            .map_err(|e| {
                DomainError::TranscodeFailed(format!("Failed to create scratch directory: {}", e))
            })?;

        let input_path =
            Self::stage_input(scratch.path(), &request.input_name, &request.input).await?;
        let output_path = scratch.path().join(format!(
            "chunk_{}.{}",
            chrono::Utc::now().timestamp_millis(),
            request.format.extension()
        ));

        let args = self.build_args(&input_path, &output_path, request.start, request.duration);
        debug!("Running {} {}", self.settings.ffmpeg_path.display(), args.join(" "));

        let output = Command::new(&self.settings.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DomainError::TranscodeFailed(format!("Failed to spawn ffmpeg: {}", e)))?;

        if !output.status.success() {
            let reason = Self::stderr_tail(&output.stderr);
            warn!("ffmpeg exited with {}: {}", output.status, reason);
            return Err(DomainError::TranscodeFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status, reason
            )));
        }

        let encoded = tokio::fs::read(&output_path)
            .await
            .map_err(|e| DomainError::TranscodeFailed(format!("Failed to read output: {}", e)))?;

        if encoded.is_empty() {
            return Err(DomainError::TranscodeFailed(
                "ffmpeg produced an empty file".to_string(),
            ));
        }

        debug!(
            "Encoded {:.2}s from {:.2}s into {} bytes",
            request.duration,
            request.start,
            encoded.len()
        );
        Ok(encoded)
    }
}
