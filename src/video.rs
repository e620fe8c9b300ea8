//! Frame I/O and orientation handling.

mod ffmpeg;
mod frames_dir;
mod io;
mod orientation;

pub use ffmpeg::{FfmpegInput, FfmpegOutput, FfmpegSink, FfmpegSource, StreamInfo, probe};
pub use frames_dir::{FramesDirInput, FramesDirOutput, FramesDirSink, FramesDirSource};
pub use io::{FrameSink, FrameSource, OpenSink, OpenSource};
pub use orientation::Orientation;
