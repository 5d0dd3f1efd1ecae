use crate::camera::{ClipRange, Viewport};
use crate::points::ScreenPoint;

/// Current pick position plus the bounds it is held within.
///
/// Window coordinates have their origin at the top-left; screen points have
/// theirs at the bottom-left, so the cursor's y is flipped on the way in.
#[derive(Clone, Copy, Debug)]
pub struct PickInput {
    point: ScreenPoint,
    viewport: Viewport,
    clip: ClipRange,
}

impl PickInput {
    pub fn new(viewport: Viewport, clip: ClipRange) -> Self {
        Self {
            point: ScreenPoint::center(&viewport),
            viewport,
            clip,
        }
    }

    #[inline]
    pub fn point(&self) -> ScreenPoint {
        self.point
    }

    pub fn set_cursor(&mut self, window_x: f32, window_y: f32) {
        let p = ScreenPoint::new(window_x, self.viewport.height - window_y, self.point.z);
        self.point = p.clamped(&self.viewport, &self.clip);
    }

    pub fn nudge(&mut self, dx: f32, dy: f32) {
        let p = ScreenPoint::new(self.point.x + dx, self.point.y + dy, self.point.z);
        self.point = p.clamped(&self.viewport, &self.clip);
    }

    pub fn adjust_depth(&mut self, delta: f32) {
        let p = ScreenPoint::new(self.point.x, self.point.y, self.point.z + delta);
        self.point = p.clamped(&self.viewport, &self.clip);
    }

    pub fn set_depth(&mut self, z: f32) {
        let p = ScreenPoint::new(self.point.x, self.point.y, z);
        self.point = p.clamped(&self.viewport, &self.clip);
    }

    pub fn set_bounds(&mut self, viewport: Viewport, clip: ClipRange) {
        self.viewport = viewport;
        self.clip = clip;
        self.point = self.point.clamped(&self.viewport, &self.clip);
    }
}
