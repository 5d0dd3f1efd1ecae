use thiserror::Error;

/// Configuration errors raised when building or mutating a
/// [`ScreenToWorldProjector`](crate::ScreenToWorldProjector).
///
/// Query-time degeneracy is never reported here; `unproject` propagates
/// non-finite coordinates instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectorError {
    #[error("viewport must have positive finite extents, got {width}x{height}")]
    NonPositiveViewport { width: f32, height: f32 },

    #[error("clip range requires 0 < near < far, got near={near} far={far}")]
    InvalidClipRange { near: f32, far: f32 },

    #[error("vertical field of view must lie in (0, pi) radians, got {fovy_radians}")]
    InvalidFieldOfView { fovy_radians: f32 },

    #[error("degenerate camera: {reason}")]
    DegenerateCamera { reason: &'static str },

    #[error("composite transform is singular (determinant {determinant})")]
    SingularTransform { determinant: f32 },
}
