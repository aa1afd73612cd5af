//! Chunk registry: the ordered list of committed selections

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{Chunk, ChunkId, Selection};
use crate::domain::rules::{DurationRule, AUTO_SPLIT_SECONDS, SPLIT_TOLERANCE_SECONDS};

/// Owns every chunk and the "selected chunk" pointer
///
/// The pointer is a weak reference by id: it never keeps a chunk alive and is
/// cleared when the chunk it names is deleted.
#[derive(Debug, Clone, Default)]
pub struct ChunkRegistry {
    chunks: Vec<Chunk>,
    selected: Option<ChunkId>,
    next_id: u64,
}

impl ChunkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id(&mut self) -> ChunkId {
        self.next_id += 1;
        ChunkId(self.next_id)
    }

    /// Commit a selection as a new chunk and select it
    pub fn add_chunk(&mut self, selection: Selection) -> Result<&Chunk, DomainError> {
        DurationRule::validate(selection.duration())?;

        let id = self.mint_id();
        self.chunks.push(Chunk::new(id, selection.start, selection.end));
        self.selected = Some(id);
        debug!("Added chunk {} ({})", id, selection);

        Ok(&self.chunks[self.chunks.len() - 1])
    }

    /// Remove a chunk; returns `false` when the id is unknown
    pub fn delete_chunk(&mut self, id: ChunkId) -> bool {
        let before = self.chunks.len();
        self.chunks.retain(|chunk| chunk.id() != id);
        let removed = self.chunks.len() != before;

        if self.selected == Some(id) {
            self.selected = None;
        }
        if removed {
            debug!("Deleted chunk {}", id);
        }
        removed
    }

    /// Replace all chunks with consecutive 60 second pieces covering `[0, duration)`
    ///
    /// The last piece is truncated to what remains; a remainder under the
    /// split tolerance is not created. Clears the selected pointer.
    pub fn auto_split(&mut self, video_duration: f64) -> &[Chunk] {
        self.chunks.clear();
        self.selected = None;

        let mut current_start = 0.0;
        while current_start < video_duration - SPLIT_TOLERANCE_SECONDS {
            let chunk_end = (current_start + AUTO_SPLIT_SECONDS).min(video_duration);
            let id = self.mint_id();
            self.chunks.push(Chunk::new(id, current_start, chunk_end));
            current_start = chunk_end;
        }

        debug!("Auto-split {:.2}s into {} chunks", video_duration, self.chunks.len());
        &self.chunks
    }

    /// Point the selection at `id`; unknown ids leave the pointer unchanged
    pub fn select(&mut self, id: ChunkId) -> Result<&Chunk, DomainError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DomainError::NotFound(format!("Chunk {} does not exist", id)))?;
        self.selected = Some(id);
        Ok(&self.chunks[index])
    }

    /// Drop the selected pointer without touching the chunks
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<ChunkId> {
        self.selected
    }

    /// The chunk the pointer names, if it still exists
    pub fn selected_chunk(&self) -> Option<&Chunk> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.iter().find(|chunk| chunk.id() == id)
    }

    fn index_of(&self, id: ChunkId) -> Option<usize> {
        self.chunks.iter().position(|chunk| chunk.id() == id)
    }

    /// 1-based position, as shown in "Chunk N" labels
    pub fn position(&self, id: ChunkId) -> Option<usize> {
        self.index_of(id).map(|index| index + 1)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Forget every chunk, e.g. when another video is loaded
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.selected = None;
    }
}
