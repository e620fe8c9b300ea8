//! Image sequence backend: one image file per frame in a directory.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;

use crate::error::{VideoError, VideoResult};
use crate::video::io::{FrameSink, FrameSource, OpenSink, OpenSource};

const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

fn is_frame_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// A directory of frame images, read in file name order.
#[derive(Debug, Clone)]
pub struct FramesDirInput {
    dir: PathBuf,
    fps: f64,
    declared_size: Option<(u32, u32)>,
}

impl FramesDirInput {
    pub fn new(dir: impl Into<PathBuf>, fps: f64) -> Self {
        Self {
            dir: dir.into(),
            fps,
            declared_size: None,
        }
    }

    /// Override the declared size, which otherwise is the first image's size.
    pub fn with_declared_size(mut self, width: u32, height: u32) -> Self {
        self.declared_size = Some((width, height));
        self
    }
}

impl OpenSource for FramesDirInput {
    type Source = FramesDirSource;

    fn open(&self) -> VideoResult<FramesDirSource> {
        if !self.dir.is_dir() {
            return Err(VideoError::FileNotFound(self.dir.clone()));
        }
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_frame_file(p))
            .collect();
        files.sort();

        let declared_size = match (self.declared_size, files.first()) {
            (Some(size), _) => size,
            (None, Some(first)) => image::image_dimensions(first)?,
            (None, None) => (0, 0),
        };
        debug!(dir = %self.dir.display(), frames = files.len(), "opened frame directory");

        Ok(FramesDirSource {
            files,
            next: 0,
            fps: self.fps,
            declared_size,
            closed: false,
        })
    }
}

#[derive(Debug)]
pub struct FramesDirSource {
    files: Vec<PathBuf>,
    next: usize,
    fps: f64,
    declared_size: (u32, u32),
    closed: bool,
}

impl FrameSource for FramesDirSource {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn declared_size(&self) -> (u32, u32) {
        self.declared_size
    }

    fn frame_count_hint(&self) -> Option<u64> {
        Some(self.files.len() as u64)
    }

    fn read(&mut self) -> VideoResult<Option<RgbImage>> {
        if self.closed {
            return Err(VideoError::Closed);
        }
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };
        let frame = image::open(path)?.to_rgb8();
        self.next += 1;
        Ok(Some(frame))
    }

    fn rewind(&mut self) -> VideoResult<()> {
        if self.closed {
            return Err(VideoError::Closed);
        }
        self.next = 0;
        Ok(())
    }

    fn close(&mut self) -> VideoResult<()> {
        self.closed = true;
        Ok(())
    }
}

/// Output directory receiving `frame_000000.png`, `frame_000001.png`, ...
#[derive(Debug, Clone)]
pub struct FramesDirOutput {
    dir: PathBuf,
}

impl FramesDirOutput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OpenSink for FramesDirOutput {
    type Sink = FramesDirSink;

    fn open(&self, _fps: f64, width: u32, height: u32) -> VideoResult<FramesDirSink> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(FramesDirSink {
            dir: self.dir.clone(),
            size: (width, height),
            written: 0,
            closed: false,
        })
    }
}

#[derive(Debug)]
pub struct FramesDirSink {
    dir: PathBuf,
    size: (u32, u32),
    written: usize,
    closed: bool,
}

impl FramesDirSink {
    pub fn frames_written(&self) -> usize {
        self.written
    }
}

impl FrameSink for FramesDirSink {
    fn write(&mut self, frame: &RgbImage) -> VideoResult<()> {
        if self.closed {
            return Err(VideoError::Closed);
        }
        if frame.dimensions() != self.size {
            return Err(VideoError::FrameSizeMismatch {
                expected: self.size,
                got: frame.dimensions(),
            });
        }
        let path = self.dir.join(format!("frame_{:06}.png", self.written));
        frame.save(&path)?;
        self.written += 1;
        Ok(())
    }

    fn close(&mut self) -> VideoResult<()> {
        self.closed = true;
        Ok(())
    }
}
