// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_download;
pub mod probe_libav;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::{EncoderSettings, FFmpegAdapter};
pub use fs_download::FsArtifactSink;
pub use probe_libav::ProbeLibavAdapter;
pub use toml_config::AppConfig;
pub use tracing_log::TracingNotifier;
