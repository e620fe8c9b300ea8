//! FFmpeg CLI backed frame source and sink.
//!
//! Frames travel as packed RGB24 over the child process pipes: `ffmpeg`
//! decodes to stdout for the source and encodes from stdin for the sink.
//! Stream properties come from `ffprobe` JSON output.

use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

use image::RgbImage;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{VideoError, VideoResult};
use crate::video::io::{FrameSink, FrameSource, OpenSink, OpenSource};

/// Video stream properties reported by `ffprobe`.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    /// Coded width in pixels
    pub width: u32,
    /// Coded height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
    /// Frame count from the container, if known
    pub frame_count: Option<u64>,
    /// Display rotation in degrees from stream metadata
    pub rotation: i32,
}

impl StreamInfo {
    /// Size of the frames `ffmpeg` emits, which applies display rotation.
    pub fn display_size(&self) -> (u32, u32) {
        if self.rotation.rem_euclid(180) == 90 {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    nb_frames: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
    #[serde(default)]
    side_data_list: Vec<FfprobeSideData>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    rotate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeSideData {
    rotation: Option<f64>,
}

/// Parse a frame rate string like "30000/1001" or "30".
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            (den != 0.0).then(|| num / den)
        }
        None => rate.trim().parse().ok(),
    }
}

fn parse_probe(json: &[u8]) -> VideoResult<StreamInfo> {
    let probe: FfprobeOutput = serde_json::from_slice(json)?;
    let stream = probe
        .streams
        .into_iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| VideoError::InvalidVideo("No video stream found".to_string()))?;

    let (width, height) = match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(VideoError::InvalidVideo(
                "Video stream has no dimensions".to_string(),
            ));
        }
    };

    let fps = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .filter(|fps| *fps > 0.0)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .unwrap_or(0.0);

    let rotation = stream
        .side_data_list
        .iter()
        .find_map(|d| d.rotation)
        .map(|r| r.round() as i32)
        .or_else(|| stream.tags.rotate.as_deref().and_then(|r| r.parse().ok()))
        .unwrap_or(0);

    Ok(StreamInfo {
        width,
        height,
        fps,
        frame_count: stream.nb_frames.as_deref().and_then(|n| n.parse().ok()),
        rotation,
    })
}

/// Probe a video file for its stream properties with the `ffprobe` on `PATH`.
pub fn probe(path: impl AsRef<Path>) -> VideoResult<StreamInfo> {
    let ffprobe = locate(None, "ffprobe").ok_or(VideoError::FfprobeNotFound)?;
    probe_with(&ffprobe, path)
}

/// Probe a video file with a specific `ffprobe` executable.
pub fn probe_with(ffprobe: &Path, path: impl AsRef<Path>) -> VideoResult<StreamInfo> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(VideoError::FileNotFound(path.to_path_buf()));
    }

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    if !output.status.success() {
        return Err(VideoError::FfprobeFailed {
            message: format!("ffprobe exited with {}", output.status),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }
    parse_probe(&output.stdout)
}

fn locate(explicit: Option<&Path>, name: &str) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| which::which(name).ok())
}

/// Read until `buf` is full or the reader is exhausted.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn reap(child: &mut Child) -> VideoResult<()> {
    match child.kill() {
        Ok(()) => {}
        // Already exited.
        Err(e) if e.kind() == ErrorKind::InvalidInput => {}
        Err(e) => return Err(e.into()),
    }
    child.wait()?;
    Ok(())
}

/// Map a finished child's exit status to a result, quoting the last line it
/// wrote to stderr.
fn check_exit(role: &str, status: ExitStatus, stderr: &str) -> VideoResult<()> {
    if status.success() {
        return Ok(());
    }
    let mut message = format!("{role} exited with {status}");
    if let Some(line) = stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        message.push_str(": ");
        message.push_str(line.trim());
    }
    Err(VideoError::FfmpegFailed {
        message,
        exit_code: status.code(),
    })
}

/// Drains a child's stderr on a background thread so a chatty process never
/// blocks on a full pipe.
#[derive(Debug)]
struct StderrTail(JoinHandle<String>);

impl StderrTail {
    fn capture(child: &mut Child) -> Option<Self> {
        let mut stderr = child.stderr.take()?;
        Some(Self(std::thread::spawn(move || {
            let mut bytes = Vec::new();
            if let Err(e) = stderr.read_to_end(&mut bytes) {
                debug!(error = %e, "stderr read interrupted");
            }
            String::from_utf8_lossy(&bytes).into_owned()
        })))
    }

    /// Text written so far; blocks until the child closes stderr.
    fn collect(self) -> String {
        self.0.join().unwrap_or_default()
    }
}

/// A video file to decode with `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegInput {
    path: PathBuf,
    ffmpeg: Option<PathBuf>,
    ffprobe: Option<PathBuf>,
}

impl FfmpegInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ffmpeg: None,
            ffprobe: None,
        }
    }

    /// Use this `ffmpeg` executable instead of the one on `PATH`.
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg = Some(ffmpeg.into());
        self
    }

    /// Use this `ffprobe` executable instead of the one on `PATH`.
    pub fn with_ffprobe(mut self, ffprobe: impl Into<PathBuf>) -> Self {
        self.ffprobe = Some(ffprobe.into());
        self
    }
}

impl OpenSource for FfmpegInput {
    type Source = FfmpegSource;

    fn open(&self) -> VideoResult<FfmpegSource> {
        let ffmpeg =
            locate(self.ffmpeg.as_deref(), "ffmpeg").ok_or(VideoError::FfmpegNotFound)?;
        let ffprobe =
            locate(self.ffprobe.as_deref(), "ffprobe").ok_or(VideoError::FfprobeNotFound)?;
        let info = probe_with(&ffprobe, &self.path)?;
        debug!(path = %self.path.display(), ?info, "probed input");

        let mut source = FfmpegSource {
            ffmpeg,
            path: self.path.clone(),
            info,
            child: None,
            stdout: None,
            stderr: None,
        };
        source.spawn()?;
        Ok(source)
    }
}

/// Frames decoded by a running `ffmpeg` process.
///
/// End of output is only a clean end of stream when the decoder also exits
/// successfully; otherwise `read` returns [`VideoError::FfmpegFailed`].
#[derive(Debug)]
pub struct FfmpegSource {
    ffmpeg: PathBuf,
    path: PathBuf,
    info: StreamInfo,
    child: Option<Child>,
    stdout: Option<ChildStdout>,
    stderr: Option<StderrTail>,
}

impl FfmpegSource {
    pub fn info(&self) -> &StreamInfo {
        &self.info
    }

    fn spawn(&mut self) -> VideoResult<()> {
        let mut child = Command::new(&self.ffmpeg)
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(&self.path)
            .args(["-map", "0:v:0", "-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        self.stdout = child.stdout.take();
        self.stderr = StderrTail::capture(&mut child);
        self.child = Some(child);
        Ok(())
    }

    /// Wait for a decoder whose output is exhausted and check how it exited.
    fn finish(&mut self) -> VideoResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait()?;
        let stderr = self.stderr.take().map(StderrTail::collect).unwrap_or_default();
        debug!(%status, "decoder finished");
        check_exit("decoder", status, &stderr)
    }
}

impl FrameSource for FfmpegSource {
    fn fps(&self) -> f64 {
        self.info.fps
    }

    /// `ffmpeg` applies rotation metadata while decoding, so the declared
    /// size is the display size.
    fn declared_size(&self) -> (u32, u32) {
        self.info.display_size()
    }

    fn frame_count_hint(&self) -> Option<u64> {
        self.info.frame_count
    }

    fn read(&mut self) -> VideoResult<Option<RgbImage>> {
        let stdout = self.stdout.as_mut().ok_or(VideoError::Closed)?;
        let (width, height) = self.info.display_size();
        let expected = width as usize * height as usize * 3;

        let mut buf = vec![0u8; expected];
        let got = read_full(stdout, &mut buf)?;
        if got == 0 {
            self.finish()?;
            return Ok(None);
        }
        if got < expected {
            return Err(VideoError::TruncatedFrame { expected, got });
        }
        RgbImage::from_raw(width, height, buf)
            .map(Some)
            .ok_or(VideoError::TruncatedFrame { expected, got })
    }

    fn rewind(&mut self) -> VideoResult<()> {
        self.close()?;
        self.spawn()
    }

    fn close(&mut self) -> VideoResult<()> {
        self.stdout = None;
        self.stderr = None;
        match self.child.take() {
            Some(mut child) => reap(&mut child),
            None => Ok(()),
        }
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to stop ffmpeg decoder");
        }
    }
}

/// An output video file to encode with `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegOutput {
    path: PathBuf,
    codec: String,
    ffmpeg: Option<PathBuf>,
}

impl FfmpegOutput {
    /// Encode to `path` with the MPEG-4 Part 2 encoder.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: "mpeg4".to_string(),
            ffmpeg: None,
        }
    }

    /// Use another `ffmpeg` video encoder, e.g. `libx264`.
    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    /// Use this `ffmpeg` executable instead of the one on `PATH`.
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg = Some(ffmpeg.into());
        self
    }
}

impl OpenSink for FfmpegOutput {
    type Sink = FfmpegSink;

    fn open(&self, fps: f64, width: u32, height: u32) -> VideoResult<FfmpegSink> {
        let ffmpeg =
            locate(self.ffmpeg.as_deref(), "ffmpeg").ok_or(VideoError::FfmpegNotFound)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let rate = if fps > 0.0 { fps } else { 30.0 };
        let mut child = Command::new(ffmpeg)
            .args(["-y", "-v", "error", "-f", "rawvideo", "-pix_fmt", "rgb24"])
            .args(["-s", &format!("{width}x{height}")])
            .args(["-r", &rate.to_string()])
            .args(["-i", "-", "-an", "-c:v", &self.codec])
            .args(["-q:v", "2", "-pix_fmt", "yuv420p"])
            .arg(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take();
        let stderr = StderrTail::capture(&mut child);
        debug!(path = %self.path.display(), width, height, fps = rate, "spawned encoder");
        Ok(FfmpegSink {
            child: Some(child),
            stdin,
            stderr,
            size: (width, height),
        })
    }
}

/// Frames piped into a running `ffmpeg` encoder.
#[derive(Debug)]
pub struct FfmpegSink {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr: Option<StderrTail>,
    size: (u32, u32),
}

impl FrameSink for FfmpegSink {
    fn write(&mut self, frame: &RgbImage) -> VideoResult<()> {
        if frame.dimensions() != self.size {
            return Err(VideoError::FrameSizeMismatch {
                expected: self.size,
                got: frame.dimensions(),
            });
        }
        let stdin = self.stdin.as_mut().ok_or(VideoError::Closed)?;
        stdin.write_all(frame.as_raw())?;
        Ok(())
    }

    fn close(&mut self) -> VideoResult<()> {
        // Closing stdin signals end of input so the encoder can finalize.
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait()?;
        let stderr = self.stderr.take().map(StderrTail::collect).unwrap_or_default();
        check_exit("encoder", status, &stderr)
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to finalize ffmpeg encoder");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("30/1"), Some(30.0));
        assert_eq!(parse_frame_rate("25"), Some(25.0));
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("abc"), None);
    }

    #[test]
    fn test_parse_probe_with_rotation() {
        let json = br#"{
            "streams": [
                {"codec_type": "audio"},
                {
                    "codec_type": "video",
                    "width": 1920,
                    "height": 1080,
                    "avg_frame_rate": "30/1",
                    "r_frame_rate": "30/1",
                    "nb_frames": "300",
                    "side_data_list": [{"rotation": -90}]
                }
            ]
        }"#;
        let info = parse_probe(json).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.fps, 30.0);
        assert_eq!(info.frame_count, Some(300));
        assert_eq!(info.rotation, -90);
        assert_eq!(info.display_size(), (1080, 1920));
    }

    #[test]
    fn test_parse_probe_legacy_rotate_tag() {
        let json = br#"{"streams": [{
            "codec_type": "video", "width": 640, "height": 480,
            "avg_frame_rate": "0/0", "r_frame_rate": "24/1",
            "tags": {"rotate": "180"}
        }]}"#;
        let info = parse_probe(json).unwrap();
        assert_eq!(info.fps, 24.0);
        assert_eq!(info.frame_count, None);
        assert_eq!(info.display_size(), (640, 480));
    }

    #[test]
    fn test_parse_probe_without_video() {
        let json = br#"{"streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            parse_probe(json),
            Err(VideoError::InvalidVideo(_))
        ));
    }

    #[test]
    fn test_read_full_short_reader() {
        let mut reader: &[u8] = &[1, 2, 3];
        let mut buf = [0u8; 5];
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn test_probe_missing_file() {
        assert!(matches!(
            probe_with(Path::new("ffprobe"), "/definitely/not/here.mp4"),
            Err(VideoError::FileNotFound(_))
        ));
    }

    /// Decoder and encoder behavior against stand-in executables.
    #[cfg(unix)]
    mod process {
        use super::*;

        #[test]
        fn test_check_exit_quotes_last_stderr_line() {
            use std::os::unix::process::ExitStatusExt;

            assert!(check_exit("decoder", ExitStatus::from_raw(0), "noise").is_ok());

            // Wait status 256 is exit code 1.
            let err = check_exit(
                "decoder",
                ExitStatus::from_raw(256),
                "first\nclip.mp4: Invalid data found when processing input\n\n",
            )
            .unwrap_err();
            match err {
                VideoError::FfmpegFailed { message, exit_code } => {
                    assert_eq!(exit_code, Some(1));
                    assert!(message.starts_with("decoder exited with"));
                    assert!(message.ends_with("Invalid data found when processing input"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        /// Stand-in `ffprobe`/`ffmpeg` executables for a 4x2 stream.
        struct FakeTools {
            dir: tempfile::TempDir,
            clip: PathBuf,
        }

        const FRAME_BYTES: usize = 4 * 2 * 3;

        impl FakeTools {
            fn new() -> Self {
                let dir = tempfile::tempdir().unwrap();
                let clip = dir.path().join("clip.mp4");
                std::fs::write(&clip, b"").unwrap();
                let tools = Self { dir, clip };
                tools.script(
                    "ffprobe",
                    concat!(
                        r#"echo '{"streams": [{"codec_type": "video", "width": 4, "height": 2, "#,
                        r#""avg_frame_rate": "10/1", "r_frame_rate": "10/1", "nb_frames": "5"}]}'"#,
                    ),
                );
                tools
            }

            fn script(&self, name: &str, body: &str) -> PathBuf {
                use std::os::unix::fs::PermissionsExt;

                let path = self.dir.path().join(name);
                std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
                std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
                path
            }

            /// A decoder that emits `bytes` zero bytes, prints `stderr` and exits.
            fn decoder(&self, bytes: usize, stderr: &str, code: i32) -> FfmpegInput {
                let ffmpeg = self.script(
                    "ffmpeg",
                    &format!("head -c {bytes} /dev/zero\necho '{stderr}' >&2\nexit {code}"),
                );
                FfmpegInput::new(&self.clip)
                    .with_ffmpeg(ffmpeg)
                    .with_ffprobe(self.dir.path().join("ffprobe"))
            }
        }

        #[test]
        fn test_source_reports_probed_stream() {
            let tools = FakeTools::new();
            let source = tools.decoder(0, "", 0).open().unwrap();
            assert_eq!(source.declared_size(), (4, 2));
            assert_eq!(source.fps(), 10.0);
            assert_eq!(source.frame_count_hint(), Some(5));
        }

        #[test]
        fn test_clean_end_of_stream() {
            let tools = FakeTools::new();
            let mut source = tools.decoder(2 * FRAME_BYTES, "", 0).open().unwrap();

            assert_eq!(source.read().unwrap().unwrap().dimensions(), (4, 2));
            assert!(source.read().unwrap().is_some());
            assert!(source.read().unwrap().is_none());
            assert!(source.read().unwrap().is_none());
        }

        #[test]
        fn test_decoder_failure_is_not_end_of_stream() {
            let tools = FakeTools::new();
            let mut source = tools
                .decoder(2 * FRAME_BYTES, "moov atom not found", 1)
                .open()
                .unwrap();

            assert!(source.read().unwrap().is_some());
            assert!(source.read().unwrap().is_some());
            match source.read() {
                Err(VideoError::FfmpegFailed { message, exit_code }) => {
                    assert_eq!(exit_code, Some(1));
                    assert!(message.contains("moov atom not found"), "{message}");
                }
                other => panic!("expected decoder failure, got {other:?}"),
            }
        }

        #[test]
        fn test_short_frame() {
            let tools = FakeTools::new();
            let mut source = tools.decoder(FRAME_BYTES + 6, "", 0).open().unwrap();

            assert!(source.read().unwrap().is_some());
            assert!(matches!(
                source.read(),
                Err(VideoError::TruncatedFrame {
                    expected: FRAME_BYTES,
                    got: 6
                })
            ));
        }

        #[test]
        fn test_rewind_respawns_decoder() {
            let tools = FakeTools::new();
            let mut source = tools.decoder(FRAME_BYTES, "", 0).open().unwrap();

            assert!(source.read().unwrap().is_some());
            assert!(source.read().unwrap().is_none());
            source.rewind().unwrap();
            assert!(source.read().unwrap().is_some());

            source.close().unwrap();
            source.close().unwrap();
            assert!(matches!(source.read(), Err(VideoError::Closed)));
        }

        #[test]
        fn test_missing_decoder_binary() {
            let tools = FakeTools::new();
            let input = FfmpegInput::new(&tools.clip)
                .with_ffmpeg(tools.dir.path().join("no-such-ffmpeg"))
                .with_ffprobe(tools.dir.path().join("ffprobe"));
            assert!(matches!(input.open(), Err(VideoError::Io(_))));
        }

        #[test]
        fn test_sink_writes_frames_and_creates_parent_dirs() {
            let tools = FakeTools::new();
            // Copies stdin to the last argument, the output path.
            let ffmpeg = tools.script("ffmpeg", r#"for out; do :; done; cat > "$out""#);
            let target = tools.dir.path().join("nested/out/lift.mp4");

            let mut sink = FfmpegOutput::new(&target)
                .with_ffmpeg(ffmpeg)
                .open(10.0, 4, 2)
                .unwrap();
            let frame = RgbImage::new(4, 2);
            sink.write(&frame).unwrap();
            sink.write(&frame).unwrap();
            assert!(matches!(
                sink.write(&RgbImage::new(2, 4)),
                Err(VideoError::FrameSizeMismatch { .. })
            ));
            sink.close().unwrap();

            assert_eq!(std::fs::metadata(&target).unwrap().len(), 2 * FRAME_BYTES as u64);
            assert!(matches!(sink.write(&frame), Err(VideoError::Closed)));
        }

        #[test]
        fn test_sink_close_reports_encoder_failure() {
            let tools = FakeTools::new();
            let ffmpeg = tools.script(
                "ffmpeg",
                "cat > /dev/null\necho 'Unknown encoder' >&2\nexit 3",
            );

            let mut sink = FfmpegOutput::new(tools.dir.path().join("out.mp4"))
                .with_codec("nope")
                .with_ffmpeg(ffmpeg)
                .open(10.0, 4, 2)
                .unwrap();
            sink.write(&RgbImage::new(4, 2)).unwrap();

            match sink.close() {
                Err(VideoError::FfmpegFailed { message, exit_code }) => {
                    assert_eq!(exit_code, Some(3));
                    assert!(message.contains("Unknown encoder"), "{message}");
                }
                other => panic!("expected encoder failure, got {other:?}"),
            }
        }
    }
}
