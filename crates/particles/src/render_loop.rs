//! Trail-fading render loop with an explicit stop handle.
//!
//! The loop does not schedule itself. A host calls [`RenderLoop::tick`] once
//! per display refresh and requests the next refresh only while the tick
//! returns [`Tick::Continue`]. Headless hosts and tests single-step with
//! [`RenderLoop::run`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use flow_field_core::{Animation, FlowError, Frame, Rgba, Surface};

use crate::params::FADE_ALPHA;

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frame was rendered; schedule the next one.
    Continue,
    /// The loop is stopped; nothing was painted and nothing more should be scheduled.
    Halted,
}

/// Cloneable handle that stops a [`RenderLoop`] from anywhere, including a
/// page teardown path on another thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.stopped.store(false, Ordering::Release);
    }
}

/// Drives an [`Animation`] once per tick over a slowly fading surface.
///
/// Each running tick paints a black rectangle at [`FADE_ALPHA`] over the
/// whole frame before stepping the animation, so older paint decays
/// geometrically toward black and moving dots leave trails.
pub struct RenderLoop<A> {
    animation: A,
    stop: StopHandle,
    frames: u64,
    // Last state this loop observed; a handle may stop it behind our back.
    observed: LoopState,
}

impl<A: Animation> RenderLoop<A> {
    /// Creates a stopped loop around `animation`.
    pub fn new(animation: A) -> Self {
        let stop = StopHandle::default();
        stop.stop();
        Self {
            animation,
            stop,
            frames: 0,
            observed: LoopState::Stopped,
        }
    }

    /// Enters `Running`. Starting a running loop is a no-op.
    pub fn start(&mut self) {
        if self.state() == LoopState::Running {
            return;
        }
        self.observe_stop();
        self.stop.reset();
        self.observed = LoopState::Running;
        log::info!("render loop started with {} particles", self.animation.len());
    }

    /// Enters `Stopped`. Equivalent to calling `stop` on any handle.
    pub fn stop(&mut self) {
        self.stop.stop();
        self.observe_stop();
    }

    /// Logs the transition to `Stopped` once, whichever side set the flag.
    fn observe_stop(&mut self) {
        if self.observed == LoopState::Running {
            self.observed = LoopState::Stopped;
            log::info!("render loop stopped after {} frames", self.frames);
        }
    }

    /// Current state, as set by this loop or any of its handles.
    pub fn state(&self) -> LoopState {
        if self.stop.is_stopped() {
            LoopState::Stopped
        } else {
            LoopState::Running
        }
    }

    /// Handle sharing this loop's stop flag.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The animation this loop drives.
    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Renders one frame if running: fade, then step the animation.
    pub fn tick(&mut self, frame: &Frame, surface: &mut dyn Surface) -> Result<Tick, FlowError> {
        if self.stop.is_stopped() {
            self.observe_stop();
            return Ok(Tick::Halted);
        }
        fade(frame, surface);
        self.animation.step(frame, surface)?;
        self.frames += 1;
        Ok(Tick::Continue)
    }

    /// Ticks up to `frames` times against a fixed frame, stopping early if
    /// the loop halts. Returns the number of frames rendered.
    pub fn run(
        &mut self,
        frames: usize,
        frame: &Frame,
        surface: &mut dyn Surface,
    ) -> Result<usize, FlowError> {
        for rendered in 0..frames {
            if self.tick(frame, surface)? == Tick::Halted {
                return Ok(rendered);
            }
        }
        Ok(frames)
    }
}

/// Paints the translucent black trail-fade rectangle over the frame bounds.
fn fade(frame: &Frame, surface: &mut dyn Surface) {
    surface.fill_rect(
        0.0,
        0.0,
        frame.bounds.width(),
        frame.bounds.height(),
        Rgba::new(0, 0, 0, FADE_ALPHA).into(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParticleField;
    use flow_field_core::{
        Bounds, Color, DrawCommand, RasterSurface, RecordingSurface, Srgb, Xorshift64,
    };
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Records every log message so tests can check lifecycle reporting.
    struct Capture(Mutex<Vec<String>>);

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    /// Animation with no particles.
    struct Empty;

    impl Animation for Empty {
        fn step(&mut self, _: &Frame, _: &mut dyn Surface) -> Result<(), FlowError> {
            Ok(())
        }

        fn len(&self) -> usize {
            0
        }

        fn params(&self) -> Value {
            json!({})
        }
    }

    /// Animation whose step always fails.
    struct Failing;

    impl Animation for Failing {
        fn step(&mut self, _: &Frame, _: &mut dyn Surface) -> Result<(), FlowError> {
            Err(FlowError::MissingHostCapability("test".into()))
        }

        fn len(&self) -> usize {
            0
        }

        fn params(&self) -> Value {
            json!({})
        }
    }

    fn frame(w: f64, h: f64) -> Frame {
        Frame::new(Bounds::new(w, h).unwrap())
    }

    fn running<A: Animation>(animation: A) -> RenderLoop<A> {
        let mut l = RenderLoop::new(animation);
        l.start();
        l
    }

    // ---- State machine ----

    #[test]
    fn new_loop_is_stopped_and_paints_nothing() {
        let mut l = RenderLoop::new(Empty);
        assert_eq!(l.state(), LoopState::Stopped);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        assert_eq!(l.tick(&frame(10.0, 10.0), &mut surface).unwrap(), Tick::Halted);
        assert!(surface.commands().is_empty());
        assert_eq!(l.frames(), 0);
    }

    #[test]
    fn start_then_stop_transitions() {
        let mut l = RenderLoop::new(Empty);
        l.start();
        assert_eq!(l.state(), LoopState::Running);
        l.start();
        assert_eq!(l.state(), LoopState::Running);
        l.stop();
        assert_eq!(l.state(), LoopState::Stopped);
    }

    #[test]
    fn stop_handle_halts_a_running_loop() {
        let mut l = running(Empty);
        let handle = l.stop_handle();
        let mut surface = RecordingSurface::new(10.0, 10.0);
        assert_eq!(l.tick(&frame(10.0, 10.0), &mut surface).unwrap(), Tick::Continue);

        handle.stop();
        assert_eq!(l.state(), LoopState::Stopped);
        surface.clear();
        assert_eq!(l.tick(&frame(10.0, 10.0), &mut surface).unwrap(), Tick::Halted);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn stop_through_handle_is_logged_on_the_next_tick() {
        static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Info);

        let mut l = running(Empty);
        let f = frame(10.0, 10.0);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        l.run(13, &f, &mut surface).unwrap();
        l.stop_handle().stop();
        assert_eq!(l.tick(&f, &mut surface).unwrap(), Tick::Halted);
        // A later explicit stop must not report the transition twice.
        l.stop();

        let lines = CAPTURE.0.lock().unwrap();
        let reported = lines
            .iter()
            .filter(|m| m.as_str() == "render loop stopped after 13 frames")
            .count();
        assert_eq!(reported, 1, "captured: {lines:?}");
    }

    #[test]
    fn animation_is_reachable_after_ticks() {
        let b = Bounds::new(40.0, 40.0).unwrap();
        let mut l = running(ParticleField::initialize(6, &b, &mut Xorshift64::new(2)));
        l.run(3, &Frame::new(b), &mut RecordingSurface::new(40.0, 40.0))
            .unwrap();
        assert_eq!(l.animation().particles().len(), 6);
        assert!(l
            .animation()
            .particles()
            .iter()
            .all(|p| p.history().len() == 3));
    }

    #[test]
    fn stop_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StopHandle>();
    }

    #[test]
    fn stop_handle_works_from_another_thread() {
        let l = running(Empty);
        let handle = l.stop_handle();
        std::thread::spawn(move || handle.stop()).join().unwrap();
        assert_eq!(l.state(), LoopState::Stopped);
    }

    // ---- Tick ----

    #[test]
    fn tick_fades_whole_frame_before_particles() {
        let b = Bounds::new(80.0, 60.0).unwrap();
        let field = ParticleField::initialize(3, &b, &mut Xorshift64::new(5));
        let mut l = running(field);
        let mut surface = RecordingSurface::new(80.0, 60.0);
        l.tick(&frame(80.0, 60.0), &mut surface).unwrap();

        let cmds = surface.commands();
        assert_eq!(cmds.len(), 4);
        assert_eq!(
            cmds[0],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: 80.0,
                h: 60.0,
                color: Color::Rgba(Rgba::new(0, 0, 0, 0.05)),
            }
        );
        assert!(cmds[1..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { .. })));
        assert_eq!(l.frames(), 1);
    }

    #[test]
    fn tick_propagates_animation_errors() {
        let mut l = running(Failing);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        assert!(l.tick(&frame(10.0, 10.0), &mut surface).is_err());
        assert_eq!(l.frames(), 0);
    }

    #[test]
    fn run_counts_frames() {
        let mut l = running(Empty);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        assert_eq!(l.run(7, &frame(10.0, 10.0), &mut surface).unwrap(), 7);
        assert_eq!(l.frames(), 7);
        assert_eq!(surface.rects().count(), 7);
    }

    #[test]
    fn run_on_stopped_loop_renders_nothing() {
        let mut l = RenderLoop::new(Empty);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        assert_eq!(l.run(5, &frame(10.0, 10.0), &mut surface).unwrap(), 0);
    }

    // ---- Trail fade ----

    #[test]
    fn empty_loop_fades_surface_toward_black() {
        let mut l = running(Empty);
        let mut surface = RasterSurface::new(16, 16, Srgb::WHITE).unwrap();
        let f = frame(16.0, 16.0);

        let mut previous = surface.mean_brightness();
        for _ in 0..200 {
            l.tick(&f, &mut surface).unwrap();
            let now = surface.mean_brightness();
            assert!(now < previous, "brightness must strictly decrease");
            previous = now;
        }
        assert!(previous < 1e-3, "after 200 frames brightness is {previous}");
    }

    #[test]
    fn fade_is_geometric() {
        let mut l = running(Empty);
        let mut surface = RasterSurface::new(4, 4, Srgb::WHITE).unwrap();
        l.run(10, &frame(4.0, 4.0), &mut surface).unwrap();
        let expected = 0.95_f64.powi(10);
        let p = surface.pixel(0, 0).unwrap();
        assert!((p.r - expected).abs() < 1e-12, "expected {expected}, got {}", p.r);
    }

    #[test]
    fn particles_leave_lit_pixels_on_a_black_surface() {
        let b = Bounds::new(64.0, 64.0).unwrap();
        let mut l = running(ParticleField::initialize(50, &b, &mut Xorshift64::new(11)));
        let mut surface = RasterSurface::new(64, 64, Srgb::BLACK).unwrap();
        l.run(30, &Frame::new(b), &mut surface).unwrap();
        assert!(surface.mean_brightness() > 0.0);
    }
}
