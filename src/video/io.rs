//! Frame source and sink abstractions.
//!
//! Decoding and encoding live behind these traits so the tracking loop can
//! run against FFmpeg, image sequences, or in-memory frames in tests.

use image::RgbImage;

use crate::error::VideoResult;

/// An opened stream of decoded RGB frames.
pub trait FrameSource {
    /// Declared frame rate of the stream.
    fn fps(&self) -> f64;

    /// Width and height as declared by the container.
    ///
    /// This may disagree with the size of the decoded frames, e.g. for
    /// phone recordings carrying rotation metadata.
    fn declared_size(&self) -> (u32, u32);

    /// Advisory total frame count. Only used for progress reporting.
    fn frame_count_hint(&self) -> Option<u64> {
        None
    }

    /// Decode the next frame, `Ok(None)` at end of stream.
    fn read(&mut self) -> VideoResult<Option<RgbImage>>;

    /// Restart decoding from the first frame.
    fn rewind(&mut self) -> VideoResult<()>;

    /// Release the underlying decoder. Calling it twice is a no-op.
    fn close(&mut self) -> VideoResult<()>;
}

/// An opened encoder accepting RGB frames.
pub trait FrameSink {
    fn write(&mut self, frame: &RgbImage) -> VideoResult<()>;

    /// Flush and finalize the output. Calling it twice is a no-op.
    fn close(&mut self) -> VideoResult<()>;
}

/// Something a [`FrameSource`] can be opened from.
pub trait OpenSource {
    type Source: FrameSource;

    fn open(&self) -> VideoResult<Self::Source>;
}

/// Something a [`FrameSink`] can be opened on, once the output size is known.
pub trait OpenSink {
    type Sink: FrameSink;

    fn open(&self, fps: f64, width: u32, height: u32) -> VideoResult<Self::Sink>;
}
