//! Frame driver
//!
//! Runs one engine tick per frame and renders the result. The host decides
//! when frames happen through a `FrameScheduler`; the driver only ever holds
//! one pending frame, so there is never more than one tick chain.

use std::fmt::Debug;

use super::engine::Engine;
use super::publish::StatePublisher;
use super::state::GamePhase;
use super::tick::TickReport;
use crate::render::Renderer;

/// Host frame source (requestAnimationFrame, a timer, or a test loop)
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + Debug;

    /// Ask for one frame callback. `None` means the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancel a frame requested earlier
    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct Driver<S: FrameScheduler, R: Renderer> {
    engine: Engine,
    scheduler: S,
    renderer: R,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler, R: Renderer> Driver<S, R> {
    pub fn new(engine: Engine, scheduler: S, renderer: R) -> Self {
        Self {
            engine,
            scheduler,
            renderer,
            pending: None,
        }
    }

    /// Draw the initial frame and start ticking
    pub fn init(&mut self) {
        self.renderer.render(self.engine.world());
        self.arm();
    }

    /// Frame callback entry point. Runs a tick, renders it and re-arms while
    /// the engine keeps running.
    pub fn on_frame(&mut self) -> Option<TickReport> {
        // A callback with nothing pending belongs to a cancelled chain
        if self.pending.take().is_none() {
            log::trace!("Stale frame ignored");
            return None;
        }

        let report = self.engine.tick();
        if report.is_some() {
            self.renderer.render(self.engine.world());
        }

        if self.engine.phase() == GamePhase::Running {
            self.arm();
        }
        report
    }

    /// Recreate the population and resume ticking from any state
    pub fn restart(&mut self) {
        self.disarm();
        self.engine.restart();
        self.renderer.render(self.engine.world());
        self.arm();
    }

    /// Pause or resume. Ignored after a win.
    pub fn toggle_pause(&mut self) {
        if !self.engine.toggle_pause() {
            return;
        }
        match self.engine.phase() {
            GamePhase::Paused => self.disarm(),
            GamePhase::Running => self.arm(),
            GamePhase::Won => {}
        }
    }

    /// True while a frame callback is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    fn arm(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Host refused to schedule a frame");
        }
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Subscriptions only; restart and pause go through the driver so the
    /// frame chain stays in step with the phase
    pub fn publisher_mut(&mut self) -> &mut StatePublisher {
        self.engine.publisher_mut()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Scheduler for headless hosts: frames are fired by calling
/// `Driver::on_frame` in a loop while `Driver::is_scheduled` holds.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pub requested: u64,
    pub cancelled: Vec<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next_handle += 1;
        self.requested += 1;
        Some(self.next_handle)
    }

    fn cancel_frame(&mut self, handle: u64) {
        self.cancelled.push(handle);
    }
}

/// Run frames until the engine stops scheduling or `max_frames` is hit.
/// Returns the number of frames run.
pub fn run_headless<S: FrameScheduler, R: Renderer>(
    driver: &mut Driver<S, R>,
    max_frames: u64,
) -> u64 {
    let mut frames = 0;
    while driver.is_scheduled() && frames < max_frames {
        driver.on_frame();
        frames += 1;
    }
    frames
}
