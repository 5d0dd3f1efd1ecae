//! Per-frame control flow between input, projector and renderer.
//!
//! The outer loop owns a [`FrameDriver`], feeds it input events, and calls
//! [`FrameDriver::step`] once per frame. The returned [`FrameOutput`] is
//! everything the rendering side needs; nothing is shared behind its back.

use std::time::Duration;

use glam::Mat4;
use instant::Instant;

use crate::camera::{ClipRange, ProjectorConfig, Viewport};
use crate::error::ProjectorError;
use crate::input::PickInput;
use crate::points::{ScreenPoint, WorldPoint};
use crate::projector::ScreenToWorldProjector;

// Weight of the newest sample in the smoothed frame time
const FRAME_TIME_SMOOTHING: f32 = 0.1;

/// Smoothed frame timing for the framerate readout.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    avg_dt_sec: Option<f32>,
    frames: u64,
    last: Option<Instant>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure the time since the previous call. The first call returns zero.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = self.last.map(|prev| now - prev).unwrap_or_default();
        self.last = Some(now);
        dt
    }

    pub fn record(&mut self, dt: Duration) {
        self.frames += 1;
        let sample = dt.as_secs_f32();
        if sample <= 0.0 {
            return;
        }
        self.avg_dt_sec = Some(match self.avg_dt_sec {
            Some(avg) => avg + (sample - avg) * FRAME_TIME_SMOOTHING,
            None => sample,
        });
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f32 {
        self.avg_dt_sec.map(|dt| 1.0 / dt).unwrap_or(0.0)
    }

    pub fn frame_time_ms(&self) -> f32 {
        self.avg_dt_sec.map(|dt| dt * 1000.0).unwrap_or(0.0)
    }
}

/// What one frame hands to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutput {
    pub screen: ScreenPoint,
    pub world: WorldPoint,
    /// `None` when `world` is not finite; the quad is not drawn that frame.
    pub model: Option<Mat4>,
}

pub struct FrameDriver {
    projector: ScreenToWorldProjector,
    input: PickInput,
    stats: FrameStats,
    clip: ClipRange,
}

impl FrameDriver {
    pub fn new(config: ProjectorConfig) -> Result<Self, ProjectorError> {
        let projector = ScreenToWorldProjector::new(config)?;
        let clip = config.projection.clip;
        Ok(Self {
            projector,
            input: PickInput::new(config.viewport, clip),
            stats: FrameStats::new(),
            clip,
        })
    }

    pub fn projector(&self) -> &ScreenToWorldProjector {
        &self.projector
    }

    pub fn input(&self) -> &PickInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut PickInput {
        &mut self.input
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Update the viewport of the projector and the input bounds together.
    /// On error neither is changed.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ProjectorError> {
        let viewport = Viewport::new(width, height);
        self.projector.set_viewport(viewport)?;
        self.input.set_bounds(viewport, self.clip);
        log::info!("[frame] viewport resized to {width}x{height}");
        Ok(())
    }

    /// Measure the frame time with the wall clock and run one step.
    pub fn tick(&mut self) -> FrameOutput {
        let dt = self.stats.tick();
        self.step(dt)
    }

    pub fn step(&mut self, dt: Duration) -> FrameOutput {
        self.stats.record(dt);
        let screen = self.input.point();
        let world = self.projector.unproject(screen);
        let model = ScreenToWorldProjector::model_matrix(world);
        if model.is_none() {
            log::debug!("[frame] non-finite world point for {screen:?}; skipping draw");
        }
        FrameOutput {
            screen,
            world,
            model,
        }
    }
}
