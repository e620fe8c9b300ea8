use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use barpath::{
    FfmpegInput, FfmpegOutput, FramesDirInput, FramesDirOutput, OpenSink, OpenSource,
    PathRenderer, RenderStyle, ReplayDetector, RunReport, TrackerConfig, TrackerPipeline,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Draw a tracked object's path onto a video.
#[derive(Parser, Debug)]
#[command(name = "barpath", version, about)]
struct Args {
    /// Input video file, or a directory of frame images
    input: PathBuf,

    /// Output video file, or a directory for frame images when the input is one
    output: PathBuf,

    /// JSON file with per-frame detections: [[{"bbox": [x1, y1, x2, y2], "confidence": c}, ..], ..]
    #[arg(long, value_name = "PATH")]
    detections: PathBuf,

    /// Fail when the video has more frames than recorded detections
    #[arg(long)]
    strict_detections: bool,

    /// Tracker configuration JSON; command line flags take precedence
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Minimum detection confidence, exclusive
    #[arg(long)]
    threshold: Option<f32>,

    /// Maximum number of path points kept
    #[arg(long)]
    max_path_length: Option<usize>,

    /// Points averaged when smoothing the path
    #[arg(long)]
    smoothing_window: Option<usize>,

    /// Draw the detection box and label
    #[arg(long)]
    draw_box: bool,

    /// Draw the raw path without smoothing
    #[arg(long)]
    no_smooth: bool,

    /// Font used for the label and point counter [default: bundled DejaVu Sans]
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Hide the point counter
    #[arg(long)]
    no_point_count: bool,

    /// Frame rate of a frame-image directory input
    #[arg(long, default_value_t = 30.0)]
    frames_fps: f64,

    /// FFmpeg video encoder for file outputs
    #[arg(long, default_value = "mpeg4")]
    codec: String,

    /// ffmpeg executable, instead of the one on PATH
    #[arg(long, value_name = "PATH")]
    ffmpeg: Option<PathBuf>,

    /// ffprobe executable, instead of the one on PATH
    #[arg(long, value_name = "PATH")]
    ffprobe: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn tracker_config(&self) -> Result<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => TrackerConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.confidence_threshold = threshold;
        }
        if let Some(max_path_length) = self.max_path_length {
            config.max_path_length = max_path_length;
        }
        if let Some(window) = self.smoothing_window {
            config.smoothing_window = window;
        }
        config.draw_box |= self.draw_box;
        config.smooth_path &= !self.no_smooth;
        Ok(config)
    }

    fn render_style(&self) -> RenderStyle {
        RenderStyle {
            font_path: self.font.clone(),
            show_point_count: !self.no_point_count,
            ..RenderStyle::default()
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_with<I: OpenSource, O: OpenSink>(
    pipeline: &mut TrackerPipeline<ReplayDetector>,
    input: &I,
    output: &O,
) -> Result<RunReport> {
    pipeline.run(input, output).context("detector failed")
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let detector = ReplayDetector::from_file(&args.detections)
        .with_context(|| format!("loading detections from {}", args.detections.display()))?
        .strict(args.strict_detections);
    let renderer = PathRenderer::from_style(args.render_style()).context("loading font")?;
    let mut pipeline = TrackerPipeline::new(detector, args.tracker_config()?)
        .context("invalid tracker configuration")?
        .with_renderer(renderer);

    let report = if args.input.is_dir() {
        let input = FramesDirInput::new(&args.input, args.frames_fps);
        run_with(&mut pipeline, &input, &FramesDirOutput::new(&args.output))?
    } else {
        let mut input = FfmpegInput::new(&args.input);
        let mut output = FfmpegOutput::new(&args.output).with_codec(&args.codec);
        if let Some(ffmpeg) = &args.ffmpeg {
            input = input.with_ffmpeg(ffmpeg);
            output = output.with_ffmpeg(ffmpeg);
        }
        if let Some(ffprobe) = &args.ffprobe {
            input = input.with_ffprobe(ffprobe);
        }
        run_with(&mut pipeline, &input, &output)?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
