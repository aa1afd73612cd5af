//! File-system artifact sink
//!
//! Plays the part of a browser download: each artifact lands in the output
//! directory, and a name that is already taken gets a ` (n)` suffix instead
//! of overwriting the earlier file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::errors::*;
use crate::ports::*;

/// Writes artifacts into a directory
pub struct FsArtifactSink {
    output_dir: PathBuf,
}

impl FsArtifactSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Create the first free file for `file_name`: `name.ext`, `name (1).ext`, ...
    ///
    /// The file is created with `create_new`, so concurrent deliveries of the
    /// same name each get their own file.
    async fn create_unique(&self, file_name: &str) -> Result<(PathBuf, File), DomainError> {
        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let extension = name
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut counter = 0u32;
        loop {
            let candidate = if counter == 0 {
                self.output_dir.join(file_name)
            } else {
                self.output_dir
                    .join(format!("{} ({}){}", stem, counter, extension))
            };

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => counter += 1,
                Err(e) => {
                    return Err(DomainError::DeliveryFailed(format!(
                        "Failed to create {}: {}",
                        candidate.display(),
                        e
                    )))
                }
            }
        }
    }
}

#[async_trait]
impl ArtifactSink for FsArtifactSink {
    async fn deliver(&self, artifact: Artifact) -> Result<PathBuf, DomainError> {
        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            DomainError::DeliveryFailed(format!(
                "Failed to create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let (target, mut file) = self.create_unique(&artifact.file_name).await?;

        let written = match artifact.payload {
            ArtifactPayload::Bytes(bytes) => file.write_all(&bytes).await,
            ArtifactPayload::Original(source) => match File::open(&source).await {
                Ok(mut original) => tokio::io::copy(&mut original, &mut file).await.map(|_| ()),
                Err(e) => Err(e),
            },
        };
        let written = match written {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            drop(file);
            let _ = tokio::fs::remove_file(&target).await;
            return Err(DomainError::DeliveryFailed(format!(
                "Failed to write {}: {}",
                target.display(),
                e
            )));
        }

        info!("Saved {}", target.display());
        Ok(target)
    }
}
