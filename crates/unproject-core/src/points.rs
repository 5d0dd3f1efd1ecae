use glam::Vec3;

use crate::camera::{ClipRange, Viewport};

/// Pick position in screen space.
///
/// `x` and `y` are pixels with the origin at the bottom-left of the viewport.
/// `z` is a depth control value that is fed to the inverse transform as-is,
/// so it is expressed in normalized device depth rather than world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Centre of the viewport at depth 0.
    pub fn center(viewport: &Viewport) -> Self {
        Self::new(viewport.width / 2.0, viewport.height / 2.0, 0.0)
    }

    /// Clamp to the slider ranges `[0, w] x [0, h] x [0, far]`.
    pub fn clamped(self, viewport: &Viewport, clip: &ClipRange) -> Self {
        Self {
            x: self.x.clamp(0.0, viewport.width),
            y: self.y.clamp(0.0, viewport.height),
            z: self.z.clamp(0.0, clip.far),
        }
    }
}

/// Result of an unprojection. Coordinates are non-finite when the query hit
/// the point at infinity; consumers must check [`WorldPoint::is_finite`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for WorldPoint {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<WorldPoint> for Vec3 {
    fn from(p: WorldPoint) -> Self {
        p.to_vec3()
    }
}
