use crate::backend::{FrameScheduler, Rasterizer};
use crate::config::FieldConfig;
use crate::controller::ParticleScene;
use crate::error::FieldError;
use crate::pointer::PointerOffset;
use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag, checked at the top of every frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

/// Per-frame increments. Fixed-step: frame rate sets the animation speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub rotation_step: f64,
    pub parallax_gain: f32,
    pub easing: f32,
}

impl From<&FieldConfig> for FrameParams {
    fn from(c: &FieldConfig) -> Self {
        Self {
            rotation_step: c.rotation_step,
            parallax_gain: c.parallax_gain,
            easing: c.easing,
        }
    }
}

#[derive(Debug)]
pub enum FrameOutcome {
    /// Cancelled or never started; no further frame was requested.
    Stopped,
    /// Next frame requested, but there was no scene to draw.
    Skipped,
    Drawn,
    /// Next frame requested; this frame's submission failed.
    Failed(FieldError),
}

/// Self-rescheduling frame loop state machine: Idle -> Running -> Stopped.
#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
    params: FrameParams,
    cancel: CancelToken,
    frames: u64,
}

impl AnimationDriver {
    pub fn new(params: FrameParams) -> Self {
        Self {
            state: DriverState::Idle,
            params,
            cancel: CancelToken::new(),
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    pub fn params(&self) -> FrameParams {
        self.params
    }

    /// Frames that advanced the scene (skipped frames are not counted).
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Idle -> Running, requesting the first frame. Returns false if the
    /// driver was already started or has been stopped.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if self.state != DriverState::Idle || self.cancel.is_cancelled() {
            return false;
        }
        self.state = DriverState::Running;
        log::debug!("[driver] running");
        scheduler.request_frame();
        true
    }

    pub fn stop(&mut self) {
        self.cancel.cancel();
        if self.state != DriverState::Stopped {
            log::debug!("[driver] stopped after {} frames", self.frames);
        }
        self.state = DriverState::Stopped;
    }

    /// One frame: reschedule first, then advance and draw if a scene exists.
    pub fn tick<R, S>(
        &mut self,
        scheduler: &mut S,
        scene: Option<&mut ParticleScene<R>>,
        pointer: PointerOffset,
    ) -> FrameOutcome
    where
        R: Rasterizer,
        S: FrameScheduler + ?Sized,
    {
        if self.cancel.is_cancelled() {
            self.state = DriverState::Stopped;
            return FrameOutcome::Stopped;
        }
        if self.state != DriverState::Running {
            return FrameOutcome::Stopped;
        }
        scheduler.request_frame();

        let Some(scene) = scene else {
            return FrameOutcome::Skipped;
        };
        self.frames += 1;
        match scene.advance_frame(pointer, &self.params) {
            Ok(()) => FrameOutcome::Drawn,
            Err(e) => FrameOutcome::Failed(e),
        }
    }
}
