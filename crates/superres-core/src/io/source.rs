use std::path::{Path, PathBuf};

use tracing::info;

use super::image_io::{is_image_path, load_image};
use crate::error::{Result, SuperResError};
use crate::frame::Frame;

/// Produces frames one at a time.
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Rewind to the first frame.
    fn reset(&mut self) -> Result<()>;
}

/// Frames read from the image files of a directory, in file-name order.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    cursor: usize,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::result::Result<_, _>>()?;
        paths.retain(|p| p.is_file() && is_image_path(p));
        paths.sort();

        if paths.is_empty() {
            return Err(SuperResError::EmptySequence);
        }
        info!(dir = %dir.display(), frames = paths.len(), "Opened image sequence");
        Ok(Self { paths, cursor: 0 })
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(None);
        };
        let frame = load_image(path)?.with_index(self.cursor);
        self.cursor += 1;
        Ok(Some(frame))
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }
}

/// Frames served from memory, mostly for synthetic runs and tests.
pub struct MemorySource {
    frames: Vec<Frame>,
    cursor: usize,
}

impl MemorySource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let frame = self
            .frames
            .get(self.cursor)
            .cloned()
            .map(|f| f.with_index(self.cursor));
        if frame.is_some() {
            self.cursor += 1;
        }
        Ok(frame)
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }
}
