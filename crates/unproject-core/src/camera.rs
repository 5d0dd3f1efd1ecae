//! Camera, projection and viewport descriptions.
//!
//! These types are plain configuration values with no platform-specific
//! dependencies. The projector combines them into view and projection
//! matrices; each type validates itself so a bad configuration is rejected
//! before any matrix is built.

use glam::{Mat4, Vec3};

use crate::constants::{
    default_eye, default_target, default_up, CAMERA_EPSILON, DEFAULT_FOVY_DEGREES,
    DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_Z_FAR, DEFAULT_Z_NEAR,
};
use crate::error::ProjectorError;

/// Pixel extents of the render target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn validate(&self) -> Result<(), ProjectorError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ProjectorError::NonPositiveViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Near and far clip plane distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRange {
    pub near: f32,
    pub far: f32,
}

impl ClipRange {
    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    pub fn validate(&self) -> Result<(), ProjectorError> {
        let finite = self.near.is_finite() && self.far.is_finite();
        if finite && self.near > 0.0 && self.near < self.far {
            Ok(())
        } else {
            Err(ProjectorError::InvalidClipRange {
                near: self.near,
                far: self.far,
            })
        }
    }
}

impl Default for ClipRange {
    fn default() -> Self {
        Self::new(DEFAULT_Z_NEAR, DEFAULT_Z_FAR)
    }
}

/// Right-handed look-at camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn validate(&self) -> Result<(), ProjectorError> {
        if !(self.eye.is_finite() && self.target.is_finite() && self.up.is_finite()) {
            return Err(ProjectorError::DegenerateCamera {
                reason: "non-finite camera vector",
            });
        }
        let dir = self.target - self.eye;
        if dir.length() <= CAMERA_EPSILON {
            return Err(ProjectorError::DegenerateCamera {
                reason: "eye and target coincide",
            });
        }
        if dir.normalize().cross(self.up).length() <= CAMERA_EPSILON {
            return Err(ProjectorError::DegenerateCamera {
                reason: "up vector is parallel to the view direction",
            });
        }
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(default_eye(), default_target(), default_up())
    }
}

/// Clip-space depth convention of the projection matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepthRange {
    /// OpenGL: visible depth maps to [-1, 1].
    #[default]
    NegativeOneToOne,
    /// wgpu / Vulkan / D3D: visible depth maps to [0, 1].
    ZeroToOne,
}

/// Perspective projection parameters. The aspect ratio is not stored; it is
/// always taken from the current [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fovy_radians: f32,
    pub clip: ClipRange,
    pub depth: DepthRange,
}

impl Projection {
    pub fn new(fovy_radians: f32, clip: ClipRange) -> Self {
        Self {
            fovy_radians,
            clip,
            depth: DepthRange::default(),
        }
    }

    pub fn with_depth(mut self, depth: DepthRange) -> Self {
        self.depth = depth;
        self
    }

    /// Compute the clip-space projection matrix.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match self.depth {
            DepthRange::NegativeOneToOne => {
                Mat4::perspective_rh_gl(self.fovy_radians, aspect, self.clip.near, self.clip.far)
            }
            DepthRange::ZeroToOne => {
                Mat4::perspective_rh(self.fovy_radians, aspect, self.clip.near, self.clip.far)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ProjectorError> {
        self.clip.validate()?;
        let fovy = self.fovy_radians;
        if fovy.is_finite() && fovy > 0.0 && fovy < std::f32::consts::PI {
            Ok(())
        } else {
            Err(ProjectorError::InvalidFieldOfView { fovy_radians: fovy })
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DEFAULT_FOVY_DEGREES.to_radians(), ClipRange::default())
    }
}

/// Everything needed to build a projector, normally set once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjectorConfig {
    pub viewport: Viewport,
    pub camera: Camera,
    pub projection: Projection,
}
