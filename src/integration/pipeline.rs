//! TrackerPipeline for driving detection, tracking and rendering over a video.

use std::ops::{Deref, DerefMut};

use tracing::{debug, info, warn};

use super::DetectionSource;
use super::report::{RunReport, TrackingStats, VideoStats};
use crate::error::{ConfigError, SessionError};
use crate::render::PathRenderer;
use crate::tracker::{SessionState, TrackerConfig, TrackerSession};
use crate::video::{FrameSink, FrameSource, OpenSink, OpenSource, Orientation};

/// Frames between progress log lines.
const PROGRESS_INTERVAL: u64 = 100;

/// Bundles a detector with the trajectory tracker and overlay renderer.
///
/// Each call to [`TrackerPipeline::run`] is an independent session: the
/// position history starts empty and is discarded when the call returns.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    config: TrackerConfig,
    renderer: PathRenderer,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            detector,
            config,
            renderer: PathRenderer::default(),
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            config: TrackerConfig::default(),
            renderer: PathRenderer::default(),
        }
    }

    /// Replace the overlay renderer.
    pub fn with_renderer(mut self, renderer: PathRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn renderer(&self) -> &PathRenderer {
        &self.renderer
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Track the object through every frame of `input` and write the
    /// annotated frames to `output`.
    ///
    /// Source and sink problems end the session and come back as a report
    /// with `success == false`; output written before a mid-stream fault is
    /// finalized and kept. A detector error also ends the session, after
    /// both handles are closed, but is returned as `Err`.
    pub fn run<I, O>(&mut self, input: &I, output: &O) -> Result<RunReport, D::Error>
    where
        I: OpenSource,
        O: OpenSink,
    {
        let mut session = TrackerSession::new(self.config.clone());
        info!(
            threshold = self.config.confidence_threshold,
            max_path_length = self.config.max_path_length,
            smoothing_window = self.config.smoothing_window,
            "starting tracking session"
        );

        let mut source = match input.open() {
            Ok(source) => SourceGuard(source),
            Err(e) => return Ok(fail(&mut session, SessionError::SourceUnopenable(e))),
        };

        session.transition(SessionState::Probing);
        let orientation = match probe_orientation(&mut *source) {
            Ok(orientation) => session.fix_orientation(orientation),
            Err(e) => return Ok(fail(&mut session, e)),
        };
        let fps = source.fps();
        let (width, height) = orientation.output_size(source.declared_size());
        let mut sink = match output.open(fps, width, height) {
            Ok(sink) => SinkGuard(sink),
            Err(e) => return Ok(fail(&mut session, SessionError::SinkUnopenable(e))),
        };
        info!(
            fps,
            width,
            height,
            rotated = orientation.is_rotated(),
            "output opened"
        );

        session.transition(SessionState::Streaming);
        let outcome = self.stream(&mut session, &mut *source, &mut *sink);

        session.transition(SessionState::Draining);
        if let Err(e) = source.close() {
            warn!(error = %e, "failed to close source");
        }
        let closed = sink.close();

        let fault = match outcome {
            Ok(fault) => fault,
            Err(detector_error) => {
                if let Err(e) = closed {
                    warn!(error = %e, "failed to finalize output");
                }
                session.transition(SessionState::Failed);
                warn!(
                    frames = session.frames_written(),
                    "detector failed, aborting session"
                );
                return Err(detector_error);
            }
        };
        let fault = match (fault, closed) {
            (Some(fault), Err(e)) => {
                warn!(error = %e, "failed to finalize output");
                Some(fault)
            }
            (Some(fault), Ok(())) => Some(fault),
            (None, Err(e)) => Some(SessionError::SinkWriteFault(e)),
            (None, Ok(())) => None,
        };

        let video = VideoStats::new(session.frames_written(), fps, (width, height));
        let tracking = TrackingStats {
            total_points: session.total_points(),
            threshold: self.config.confidence_threshold,
        };

        match fault {
            None => {
                session.transition(SessionState::Done);
                info!(
                    frames = video.frame_count,
                    points = tracking.total_points,
                    duration = video.duration_seconds,
                    "tracking session complete"
                );
                Ok(RunReport::completed(video, tracking))
            }
            Some(error) => {
                session.transition(SessionState::Failed);
                warn!(
                    error = %error,
                    frames = video.frame_count,
                    "tracking session failed, keeping partial output"
                );
                Ok(RunReport::failed_with_stats(&error, video, tracking))
            }
        }
    }

    /// Process frames until end of stream or a source/sink fault.
    ///
    /// Returns the fault, if any; detector errors short-circuit as `Err`.
    fn stream<S, K>(
        &mut self,
        session: &mut TrackerSession,
        source: &mut S,
        sink: &mut K,
    ) -> Result<Option<SessionError>, D::Error>
    where
        S: FrameSource,
        K: FrameSink,
    {
        let total = source.frame_count_hint().filter(|n| *n > 0);
        let orientation = session.orientation();

        loop {
            let frame = match source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => return Ok(None),
                Err(e) => return Ok(Some(SessionError::SourceReadFault(e))),
            };
            let mut frame = orientation.apply(frame);
            let (width, height) = frame.dimensions();

            let detections = self.detector.detect(frame.as_raw(), width, height)?;
            let selected = session.update(&detections);
            let path = session.display_path();
            let boxed = selected.as_ref().filter(|_| session.config().draw_box);
            self.renderer
                .render(&mut frame, &path, boxed, session.total_points());

            if let Err(e) = sink.write(&frame) {
                return Ok(Some(SessionError::SinkWriteFault(e)));
            }
            session.record_written();

            let written = session.frames_written();
            if written % PROGRESS_INTERVAL == 0 {
                match total {
                    Some(total) => info!(
                        "Processing: {:.1}% complete",
                        written as f64 / total as f64 * 100.0
                    ),
                    None => info!(frames = written, "Processing"),
                }
            }
        }
    }
}

/// Read the first frame, decide the orientation and rewind the source.
fn probe_orientation<S: FrameSource>(source: &mut S) -> Result<Orientation, SessionError> {
    let first = match source.read() {
        Ok(Some(frame)) => frame,
        Ok(None) => return Err(SessionError::SourceUnreadable),
        Err(e) => {
            warn!(error = %e, "failed to read first frame");
            return Err(SessionError::SourceUnreadable);
        }
    };

    let declared = source.declared_size();
    let orientation = Orientation::detect(declared, first.dimensions());
    debug!(
        ?declared,
        actual = ?first.dimensions(),
        ?orientation,
        "orientation fixed"
    );

    if let Err(e) = source.rewind() {
        warn!(error = %e, "failed to rewind source");
        return Err(SessionError::SourceUnreadable);
    }
    Ok(orientation)
}

fn fail(session: &mut TrackerSession, error: SessionError) -> RunReport {
    session.transition(SessionState::Failed);
    warn!(error = %error, state = ?session.state(), "tracking session failed");
    RunReport::failed(&error)
}

/// Closes the source when dropped, whichever way the run exits.
struct SourceGuard<S: FrameSource>(S);

impl<S: FrameSource> Deref for SourceGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S: FrameSource> DerefMut for SourceGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.0
    }
}

impl<S: FrameSource> Drop for SourceGuard<S> {
    fn drop(&mut self) {
        if let Err(e) = self.0.close() {
            warn!(error = %e, "failed to close source");
        }
    }
}

/// Closes the sink when dropped, whichever way the run exits.
struct SinkGuard<K: FrameSink>(K);

impl<K: FrameSink> Deref for SinkGuard<K> {
    type Target = K;

    fn deref(&self) -> &K {
        &self.0
    }
}

impl<K: FrameSink> DerefMut for SinkGuard<K> {
    fn deref_mut(&mut self) -> &mut K {
        &mut self.0
    }
}

impl<K: FrameSink> Drop for SinkGuard<K> {
    fn drop(&mut self) {
        if let Err(e) = self.0.close() {
            warn!(error = %e, "failed to close sink");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use image::RgbImage;

    use super::*;
    use crate::error::{VideoError, VideoResult};
    use crate::tracker::Detection;

    struct MockDetector {
        detections: Vec<Detection>,
    }

    impl DetectionSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            Ok(self.detections.clone())
        }
    }

    #[derive(Default)]
    struct Log {
        source_closed: bool,
        sink_closed: bool,
        written: usize,
    }

    struct MemInput {
        frames: usize,
        size: (u32, u32),
        log: Rc<RefCell<Log>>,
    }

    struct MemSource {
        frames: usize,
        next: usize,
        size: (u32, u32),
        log: Rc<RefCell<Log>>,
    }

    impl OpenSource for MemInput {
        type Source = MemSource;

        fn open(&self) -> VideoResult<MemSource> {
            Ok(MemSource {
                frames: self.frames,
                next: 0,
                size: self.size,
                log: self.log.clone(),
            })
        }
    }

    impl FrameSource for MemSource {
        fn fps(&self) -> f64 {
            10.0
        }

        fn declared_size(&self) -> (u32, u32) {
            self.size
        }

        fn read(&mut self) -> VideoResult<Option<RgbImage>> {
            if self.next == self.frames {
                return Ok(None);
            }
            self.next += 1;
            Ok(Some(RgbImage::new(self.size.0, self.size.1)))
        }

        fn rewind(&mut self) -> VideoResult<()> {
            self.next = 0;
            Ok(())
        }

        fn close(&mut self) -> VideoResult<()> {
            self.log.borrow_mut().source_closed = true;
            Ok(())
        }
    }

    struct MemOutput {
        fail_after: Option<usize>,
        log: Rc<RefCell<Log>>,
    }

    struct MemSink {
        fail_after: Option<usize>,
        log: Rc<RefCell<Log>>,
    }

    impl OpenSink for MemOutput {
        type Sink = MemSink;

        fn open(&self, _fps: f64, _width: u32, _height: u32) -> VideoResult<MemSink> {
            Ok(MemSink {
                fail_after: self.fail_after,
                log: self.log.clone(),
            })
        }
    }

    impl FrameSink for MemSink {
        fn write(&mut self, _frame: &RgbImage) -> VideoResult<()> {
            let mut log = self.log.borrow_mut();
            if self.fail_after.is_some_and(|n| log.written >= n) {
                return Err(VideoError::Closed);
            }
            log.written += 1;
            Ok(())
        }

        fn close(&mut self) -> VideoResult<()> {
            self.log.borrow_mut().sink_closed = true;
            Ok(())
        }
    }

    fn io(frames: usize, fail_after: Option<usize>) -> (MemInput, MemOutput, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let input = MemInput {
            frames,
            size: (32, 24),
            log: log.clone(),
        };
        let output = MemOutput {
            fail_after,
            log: log.clone(),
        };
        (input, output, log)
    }

    #[test]
    fn test_tracker_pipeline() {
        let detector = MockDetector {
            detections: vec![Detection::new(10.0, 5.0, 20.0, 15.0, 0.9)],
        };
        let mut pipeline = TrackerPipeline::with_default_config(detector);
        let (input, output, log) = io(5, None);

        let report = pipeline.run(&input, &output).unwrap();

        assert!(report.success);
        assert_eq!(report.state, SessionState::Done);
        assert_eq!(report.video.unwrap().frame_count, 5);
        assert_eq!(report.tracking.unwrap().total_points, 5);
        assert_eq!(log.borrow().written, 5);
        assert!(log.borrow().source_closed);
        assert!(log.borrow().sink_closed);
    }

    #[test]
    fn test_write_fault_keeps_partial_output() {
        let detector = MockDetector {
            detections: vec![Detection::new(10.0, 5.0, 20.0, 15.0, 0.9)],
        };
        let mut pipeline = TrackerPipeline::with_default_config(detector);
        let (input, output, log) = io(8, Some(3));

        let report = pipeline.run(&input, &output).unwrap();

        assert!(!report.success);
        assert_eq!(report.state, SessionState::Failed);
        assert!(report.message.starts_with("frame write failed"));
        assert_eq!(report.video.unwrap().frame_count, 3);
        assert!(log.borrow().source_closed);
        assert!(log.borrow().sink_closed);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let detector = MockDetector { detections: vec![] };
        let config = TrackerConfig {
            confidence_threshold: 1.5,
            ..TrackerConfig::default()
        };
        assert!(TrackerPipeline::new(detector, config).is_err());
    }
}
