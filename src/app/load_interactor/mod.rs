// Load interactor - Opens a video file for editing

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::MediaTypeRule;
use crate::ports::*;

/// Interactor for turning a path into a probed video source
pub struct LoadInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl LoadInteractor {
    /// Create new load interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Check the file category, then read its metadata
    ///
    /// The category check comes first so a wrong file is rejected without
    /// touching the media library.
    pub async fn load(&self, path: &Path) -> Result<VideoSource, DomainError> {
        let media_type = MediaTypeRule::media_type_for(path);
        MediaTypeRule::validate(&media_type)?;

        let source = self.probe_port.probe_video(path).await?;
        info!(
            "Probed {}: {:.2}s, {} bytes",
            source.file_name, source.duration, source.size_bytes
        );
        Ok(source)
    }
}
