use std::sync::Arc;

use crate::adapters::{AppConfig, FFmpegAdapter, FsArtifactSink, ProbeLibavAdapter, TracingNotifier};
use crate::app::{export_interactor::ExportInteractor, load_interactor::LoadInteractor};
use crate::domain::errors::DomainError;
use crate::ports::{ArtifactSink, NotifyPort, ProbePort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn load_interactor(&self) -> Arc<LoadInteractor>;
    fn export_interactor(&self) -> Arc<ExportInteractor>;
    fn notifier(&self) -> Arc<dyn NotifyPort>;
}

/// Wires the production adapters according to the configuration
pub struct DefaultAppContainer {
    load_interactor: Arc<LoadInteractor>,
    export_interactor: Arc<ExportInteractor>,
    notifier: Arc<dyn NotifyPort>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let probe_port = Arc::new(ProbeLibavAdapter::new()?);
        let transcode_port = Arc::new(FFmpegAdapter::new(config.encoder.clone()));
        let sink = Arc::new(FsArtifactSink::new(config.output_dir.clone()));
        let notifier = Arc::new(TracingNotifier::new());

        Ok(Self::with_ports(
            probe_port,
            transcode_port,
            sink,
            notifier,
            &config.chunk_prefix,
        ))
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        transcode_port: Arc<dyn TranscodePort>,
        sink: Arc<dyn ArtifactSink>,
        notifier: Arc<dyn NotifyPort>,
        chunk_prefix: &str,
    ) -> Self {
        let load_interactor = Arc::new(LoadInteractor::new(probe_port));
        let export_interactor = Arc::new(ExportInteractor::new(
            transcode_port,
            sink,
            Arc::clone(&notifier),
            chunk_prefix,
        ));

        Self {
            load_interactor,
            export_interactor,
            notifier,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn load_interactor(&self) -> Arc<LoadInteractor> {
        Arc::clone(&self.load_interactor)
    }

    fn export_interactor(&self) -> Arc<ExportInteractor> {
        Arc::clone(&self.export_interactor)
    }

    fn notifier(&self) -> Arc<dyn NotifyPort> {
        Arc::clone(&self.notifier)
    }
}
