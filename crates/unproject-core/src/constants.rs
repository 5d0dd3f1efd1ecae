use glam::Vec3;

// Startup configuration shared by the projector and the native frontend.

// Viewport (pixels)
pub const DEFAULT_WIDTH: f32 = 512.0;
pub const DEFAULT_HEIGHT: f32 = 512.0;

// Perspective projection
pub const DEFAULT_FOVY_DEGREES: f32 = 90.0;
pub const DEFAULT_Z_NEAR: f32 = 0.1;
pub const DEFAULT_Z_FAR: f32 = 100.0;

// Camera: eye at the origin looking down -Z with +Y up
pub const DEFAULT_EYE: [f32; 3] = [0.0, 0.0, 0.0];
pub const DEFAULT_TARGET: [f32; 3] = [0.0, 0.0, -1.0];
pub const DEFAULT_UP: [f32; 3] = [0.0, 1.0, 0.0];

// Composite transforms with |det| at or below this are rejected as singular
pub const SINGULAR_EPSILON: f32 = 1e-12;

// Camera vectors shorter than this (or eye/target closer than this) are degenerate
pub const CAMERA_EPSILON: f32 = 1e-6;

// Interaction
pub const NUDGE_STEP_PX: f32 = 4.0; // arrow key step in screen pixels
pub const DEPTH_STEP: f32 = 0.01; // depth change per wheel line / page key

// Quad colour (RGBA)
pub const QUAD_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

#[inline]
pub fn default_eye() -> Vec3 {
    Vec3::from(DEFAULT_EYE)
}

#[inline]
pub fn default_target() -> Vec3 {
    Vec3::from(DEFAULT_TARGET)
}

#[inline]
pub fn default_up() -> Vec3 {
    Vec3::from(DEFAULT_UP)
}
