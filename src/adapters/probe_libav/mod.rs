// Probe LibAV adapter - Media file analysis using libav

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::MediaTypeRule;
use crate::ports::*;

/// LibAV-based media probing adapter
pub struct ProbeLibavAdapter;

impl ProbeLibavAdapter {
    /// Create new LibAV probing adapter
    pub fn new() -> Result<Self, DomainError> {
        ffmpeg_next::init().map_err(|e| DomainError::ProbeFailed(e.to_string()))?;
        Ok(Self)
    }

    /// Open the container and read what the editor needs
    fn probe_blocking(path: PathBuf) -> Result<VideoSource, DomainError> {
        let size_bytes = std::fs::metadata(&path)
            .map_err(|e| DomainError::NotFound(format!("{}: {}", path.display(), e)))?
            .len();

        let input_ctx = ffmpeg_next::format::input(&path).map_err(|e| {
            DomainError::ProbeFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let duration = if input_ctx.duration() > 0 {
            input_ctx.duration() as f64 / ffmpeg_next::ffi::AV_TIME_BASE as f64
        } else {
            0.0
        };

        let resolution = input_ctx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .and_then(|stream| {
                ffmpeg_next::codec::context::Context::from_parameters(stream.parameters()).ok()
            })
            .and_then(|context| context.decoder().video().ok())
            .map(|decoder| (decoder.width(), decoder.height()));

        let media_type = MediaTypeRule::media_type_for(&path);
        let mut source = VideoSource::new(path, media_type, size_bytes, duration)?;
        if let Some((width, height)) = resolution {
            source = source.with_resolution(width, height);
        }

        debug!("Probed {:?}", source);
        Ok(source)
    }
}

#[async_trait]
impl ProbePort for ProbeLibavAdapter {
    async fn probe_video(&self, path: &Path) -> Result<VideoSource, DomainError> {
        info!("Probing {}", path.display());
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::probe_blocking(path))
            .await
            .map_err(|e| DomainError::ProbeFailed(format!("Probe task failed: {}", e)))?
    }
}
