// Export interactor - Turns committed chunks into downloadable files

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::ExportNaming;
use crate::ports::*;
use crate::utils::time::format_time;

type EngineInit = Shared<BoxFuture<'static, Result<(), DomainError>>>;

/// How an export was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMethod {
    /// Cut and re-encoded by the transcoding engine
    Transcoded,
    /// The untouched original file, because transcoding was not possible
    OriginalFallback,
}

/// Result of exporting one chunk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    pub chunk_id: ChunkId,
    pub file_name: String,
    pub location: PathBuf,
    pub method: ExportMethod,
}

/// Lifecycle of the transcoding engine as seen by exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Loading,
    Ready,
}

enum EngineState {
    Idle,
    Loading { generation: u64, pending: EngineInit },
    Ready,
}

struct EngineSlot {
    state: EngineState,
    generation: u64,
}

/// Interactor for exporting chunks
///
/// Engine initialization is single-flight: the first export to need the
/// engine starts it, and every export arriving while it is in flight awaits
/// the same shared future. A failed initialization is reported to all of its
/// waiters and forgotten, so a later export tries again.
pub struct ExportInteractor {
    transcoder: Arc<dyn TranscodePort>,
    sink: Arc<dyn ArtifactSink>,
    notifier: Arc<dyn NotifyPort>,
    chunk_prefix: String,
    engine: Mutex<EngineSlot>,
}

impl ExportInteractor {
    /// Create new export interactor with injected ports
    pub fn new(
        transcoder: Arc<dyn TranscodePort>,
        sink: Arc<dyn ArtifactSink>,
        notifier: Arc<dyn NotifyPort>,
        chunk_prefix: impl Into<String>,
    ) -> Self {
        Self {
            transcoder,
            sink,
            notifier,
            chunk_prefix: chunk_prefix.into(),
            engine: Mutex::new(EngineSlot {
                state: EngineState::Idle,
                generation: 0,
            }),
        }
    }

    fn lock_engine(&self) -> MutexGuard<'_, EngineSlot> {
        self.engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn engine_status(&self) -> EngineStatus {
        match self.lock_engine().state {
            EngineState::Idle => EngineStatus::Idle,
            EngineState::Loading { .. } => EngineStatus::Loading,
            EngineState::Ready => EngineStatus::Ready,
        }
    }

    /// Make sure the engine is initialized, joining an in-flight attempt if any
    pub async fn ensure_engine(&self) -> Result<(), DomainError> {
        let (generation, pending) = {
            let mut slot = self.lock_engine();
            match &slot.state {
                EngineState::Ready => return Ok(()),
                EngineState::Loading { generation, pending } => (*generation, pending.clone()),
                EngineState::Idle => {
                    slot.generation += 1;
                    let generation = slot.generation;
                    let pending = self.start_engine();
                    slot.state = EngineState::Loading {
                        generation,
                        pending: pending.clone(),
                    };
                    (generation, pending)
                }
            }
        };

        let outcome = pending.await;

        let mut slot = self.lock_engine();
        let still_current = matches!(
            &slot.state,
            EngineState::Loading { generation: current, .. } if *current == generation
        );
        if still_current {
            slot.state = if outcome.is_ok() {
                EngineState::Ready
            } else {
                EngineState::Idle
            };
        }
        outcome
    }

    fn start_engine(&self) -> EngineInit {
        let transcoder = Arc::clone(&self.transcoder);
        let notifier = Arc::clone(&self.notifier);

        async move {
            notifier.notify(&Notification::info(
                "Loading ffmpeg (for MP4 conversion), this may take a few seconds...",
            ));
            match transcoder.initialize().await {
                Ok(()) => {
                    info!("Transcoding engine initialized");
                    notifier.notify(&Notification::success("ffmpeg loaded"));
                    Ok(())
                }
                Err(e) => {
                    warn!("Transcoding engine failed to initialize: {}", e);
                    notifier.notify(&Notification::warning(
                        "Failed to initialize ffmpeg, MP4 conversion will not be available",
                    ));
                    Err(e)
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Export one chunk, falling back to the original file when transcoding fails
    pub async fn export_chunk(
        &self,
        video: &VideoSource,
        chunk: &Chunk,
    ) -> Result<ExportReport, DomainError> {
        let start = chunk.start().max(0.0);
        let end = chunk.end().min(video.duration);
        let duration = end - start;
        if duration <= 0.0 {
            self.notifier
                .notify(&Notification::warning("Invalid chunk duration"));
            return Err(DomainError::InvalidDuration(format!(
                "Chunk {} has no length inside the video ({:.2}s - {:.2}s)",
                chunk.id(),
                start,
                end
            )));
        }

        let engine_ready = match self.ensure_engine().await {
            Ok(()) => true,
            Err(e) => {
                warn!("ffmpeg not available, falling back to original file download: {}", e);
                false
            }
        };

        if engine_ready {
            self.notifier.notify(&Notification::info(
                "Creating MP4 chunk, this may take a while",
            ));
            match self.transcode_chunk(video, chunk, start, duration).await {
                Ok(report) => {
                    self.notifier.notify(&Notification::success(format!(
                        "Downloaded MP4 chunk: {} - {}",
                        format_time(chunk.start()),
                        format_time(chunk.end())
                    )));
                    return Ok(report);
                }
                Err(e) => {
                    error!("Slicing chunk {} failed: {}", chunk.id(), e);
                    self.notifier.notify(&Notification::error(format!(
                        "MP4 conversion failed: {}",
                        e
                    )));
                }
            }
        }

        self.deliver_original(video, chunk).await
    }

    async fn transcode_chunk(
        &self,
        video: &VideoSource,
        chunk: &Chunk,
        start: f64,
        duration: f64,
    ) -> Result<ExportReport, DomainError> {
        let encoded = self
            .transcoder
            .transcode(TranscodeRequest {
                input_name: video.file_name.clone(),
                input: TranscodeInput::File(video.path.clone()),
                start,
                duration,
                format: OutputFormat::Mp4,
            })
            .await?;

        let file_name = ExportNaming::transcoded_file_name(&self.chunk_prefix, chunk.start());
        let location = self
            .sink
            .deliver(Artifact {
                file_name,
                payload: ArtifactPayload::Bytes(encoded),
            })
            .await?;

        Ok(Self::report(chunk, location, ExportMethod::Transcoded))
    }

    async fn deliver_original(
        &self,
        video: &VideoSource,
        chunk: &Chunk,
    ) -> Result<ExportReport, DomainError> {
        let delivered = self
            .sink
            .deliver(Artifact {
                file_name: video.file_name.clone(),
                payload: ArtifactPayload::Original(video.path.clone()),
            })
            .await;

        match delivered {
            Ok(location) => {
                self.notifier.notify(&Notification::info(
                    "FFmpeg unavailable, downloaded original file",
                ));
                Ok(Self::report(chunk, location, ExportMethod::OriginalFallback))
            }
            Err(e) => {
                error!("Fallback download failed: {}", e);
                self.notifier
                    .notify(&Notification::error("Unable to download file"));
                Err(e)
            }
        }
    }

    fn report(chunk: &Chunk, location: PathBuf, method: ExportMethod) -> ExportReport {
        let file_name = location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        ExportReport {
            chunk_id: chunk.id(),
            file_name,
            location,
            method,
        }
    }

    /// Export several chunks, at most `jobs` at a time, results in input order
    pub async fn export_all(
        &self,
        video: &VideoSource,
        chunks: &[Chunk],
        jobs: usize,
    ) -> Vec<Result<ExportReport, DomainError>> {
        stream::iter(chunks.iter().map(|chunk| self.export_chunk(video, chunk)))
            .buffered(jobs.max(1))
            .collect()
            .await
    }
}
