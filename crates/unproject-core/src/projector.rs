//! Screen-space to world-space unprojection.
//!
//! [`ScreenToWorldProjector`] owns a view matrix, a projection matrix, their
//! composite (world to clip) and the inverse of that composite (clip to
//! world). All four are rebuilt together whenever the camera, projection or
//! viewport changes, so a query never observes a stale inverse.

use glam::{Mat4, Vec3, Vec4};

use crate::camera::{Camera, Projection, ProjectorConfig, Viewport};
use crate::constants::SINGULAR_EPSILON;
use crate::error::ProjectorError;
use crate::points::{ScreenPoint, WorldPoint};

/// Where the view matrix comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewSource {
    Camera(Camera),
    /// Externally built world-to-view matrix, used as given.
    Matrix(Mat4),
}

impl ViewSource {
    fn build(&self) -> Result<Mat4, ProjectorError> {
        match self {
            ViewSource::Camera(camera) => {
                camera.validate()?;
                Ok(camera.view_matrix())
            }
            ViewSource::Matrix(m) => Ok(*m),
        }
    }
}

/// Where the projection matrix comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectionSource {
    /// Perspective parameters; the aspect ratio follows the viewport.
    Perspective(Projection),
    /// Externally built view-to-clip matrix, used as given.
    Matrix(Mat4),
}

impl ProjectionSource {
    fn build(&self, viewport: &Viewport) -> Result<Mat4, ProjectorError> {
        match self {
            ProjectionSource::Perspective(projection) => {
                projection.validate()?;
                Ok(projection.matrix(viewport.aspect()))
            }
            ProjectionSource::Matrix(m) => Ok(*m),
        }
    }
}

/// The derived matrix set. Built as a whole and swapped in as a whole.
#[derive(Clone, Copy, Debug)]
struct Transforms {
    view: Mat4,
    projection: Mat4,
    composite: Mat4,
    inverse: Mat4,
}

impl Transforms {
    fn build(
        viewport: &Viewport,
        view: &ViewSource,
        projection: &ProjectionSource,
    ) -> Result<Self, ProjectorError> {
        viewport.validate()?;
        let view = view.build()?;
        let projection = projection.build(viewport)?;
        let composite = projection * view;
        let determinant = composite.determinant();
        // Negated comparison so a NaN determinant is rejected too.
        if !(determinant.abs() > SINGULAR_EPSILON) {
            return Err(ProjectorError::SingularTransform { determinant });
        }
        let inverse = composite.inverse();
        if !inverse.is_finite() {
            return Err(ProjectorError::SingularTransform { determinant });
        }
        log::debug!("[projector] rebuilt transforms det={determinant:.6}");
        Ok(Self {
            view,
            projection,
            composite,
            inverse,
        })
    }
}

/// Reverse the perspective division of a homogeneous point.
///
/// `w == 0` yields infinite or NaN components. The value is returned as-is so
/// that callers can tell a point at infinity apart from real geometry.
#[inline]
pub fn perspective_divide(h: Vec4) -> Vec3 {
    let inv_w = 1.0 / h.w;
    h.truncate() * inv_w
}

#[derive(Clone, Debug)]
pub struct ScreenToWorldProjector {
    viewport: Viewport,
    view_source: ViewSource,
    projection_source: ProjectionSource,
    transforms: Transforms,
}

impl ScreenToWorldProjector {
    pub fn new(config: ProjectorConfig) -> Result<Self, ProjectorError> {
        Self::from_parts(config.viewport, config.camera, config.projection)
    }

    pub fn from_parts(
        viewport: Viewport,
        camera: Camera,
        projection: Projection,
    ) -> Result<Self, ProjectorError> {
        Self::build(
            viewport,
            ViewSource::Camera(camera),
            ProjectionSource::Perspective(projection),
        )
    }

    /// Build from matrices produced by an external camera rig.
    pub fn from_matrices(
        viewport: Viewport,
        view: Mat4,
        projection: Mat4,
    ) -> Result<Self, ProjectorError> {
        Self::build(
            viewport,
            ViewSource::Matrix(view),
            ProjectionSource::Matrix(projection),
        )
    }

    fn build(
        viewport: Viewport,
        view_source: ViewSource,
        projection_source: ProjectionSource,
    ) -> Result<Self, ProjectorError> {
        let transforms = Transforms::build(&viewport, &view_source, &projection_source)?;
        Ok(Self {
            viewport,
            view_source,
            projection_source,
            transforms,
        })
    }

    /// Convert a screen-space pick position into world space.
    ///
    /// `x` and `y` are normalized to [-1, 1]; `z` is passed through unscaled
    /// as the clip-space depth. The homogeneous result of the inverse
    /// composite is then divided by its `w` to undo the perspective division.
    pub fn unproject(&self, screen: ScreenPoint) -> WorldPoint {
        let nx = screen.x / self.viewport.width * 2.0 - 1.0;
        let ny = screen.y / self.viewport.height * 2.0 - 1.0;
        let nz = screen.z;
        let h = self.transforms.inverse * Vec4::new(nx, ny, nz, 1.0);
        WorldPoint::from(perspective_divide(h))
    }

    /// Forward pipeline under the same convention as [`Self::unproject`]:
    /// the returned `z` is the normalized device depth.
    pub fn project(&self, world: WorldPoint) -> ScreenPoint {
        let clip = self.transforms.composite * world.to_vec3().extend(1.0);
        let ndc = perspective_divide(clip);
        ScreenPoint::new(
            (ndc.x + 1.0) / 2.0 * self.viewport.width,
            (ndc.y + 1.0) / 2.0 * self.viewport.height,
            ndc.z,
        )
    }

    /// Translation placing a primitive at `world`, or `None` when the point
    /// is not finite and must not be drawn.
    pub fn model_matrix(world: WorldPoint) -> Option<Mat4> {
        world
            .is_finite()
            .then(|| Mat4::from_translation(world.to_vec3()))
    }

    pub fn set_camera(&mut self, camera: Camera) -> Result<(), ProjectorError> {
        self.commit(
            self.viewport,
            ViewSource::Camera(camera),
            self.projection_source,
        )
    }

    pub fn set_projection(&mut self, projection: Projection) -> Result<(), ProjectorError> {
        self.commit(
            self.viewport,
            self.view_source,
            ProjectionSource::Perspective(projection),
        )
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), ProjectorError> {
        self.commit(viewport, self.view_source, self.projection_source)
    }

    // Derive everything first; only a fully valid set replaces the current state.
    fn commit(
        &mut self,
        viewport: Viewport,
        view_source: ViewSource,
        projection_source: ProjectionSource,
    ) -> Result<(), ProjectorError> {
        match Transforms::build(&viewport, &view_source, &projection_source) {
            Ok(transforms) => {
                *self = Self {
                    viewport,
                    view_source,
                    projection_source,
                    transforms,
                };
                Ok(())
            }
            Err(err) => {
                log::warn!("[projector] rejected update: {err}");
                Err(err)
            }
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Camera parameters, if the view was built from a [`Camera`].
    pub fn camera(&self) -> Option<&Camera> {
        match &self.view_source {
            ViewSource::Camera(camera) => Some(camera),
            ViewSource::Matrix(_) => None,
        }
    }

    /// Projection parameters, if the projection was built from a [`Projection`].
    pub fn projection(&self) -> Option<&Projection> {
        match &self.projection_source {
            ProjectionSource::Perspective(projection) => Some(projection),
            ProjectionSource::Matrix(_) => None,
        }
    }

    pub fn view(&self) -> Mat4 {
        self.transforms.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.transforms.projection
    }

    pub fn composite(&self) -> Mat4 {
        self.transforms.composite
    }

    pub fn inverse_composite(&self) -> Mat4 {
        self.transforms.inverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_divide_scales_by_reciprocal_w() {
        let p = perspective_divide(Vec4::new(2.0, -4.0, 8.0, 2.0));
        assert_eq!(p, Vec3::new(1.0, -2.0, 4.0));
    }

    #[test]
    fn perspective_divide_by_zero_is_not_finite() {
        let p = perspective_divide(Vec4::new(1.0, 0.0, -1.0, 0.0));
        assert!(!p.is_finite());
        assert!(p.x.is_infinite() && p.z.is_infinite());
        assert!(p.y.is_nan());
    }

    #[test]
    fn model_matrix_skips_non_finite_points() {
        assert!(ScreenToWorldProjector::model_matrix(WorldPoint::new(f32::NAN, 0.0, 0.0)).is_none());
        let m = ScreenToWorldProjector::model_matrix(WorldPoint::new(1.0, 2.0, -3.0))
            .expect("finite point");
        assert_eq!(m.w_axis, Vec4::new(1.0, 2.0, -3.0, 1.0));
    }

    #[test]
    fn inverse_matches_composite_after_construction() {
        let p = ScreenToWorldProjector::new(ProjectorConfig::default()).expect("default config");
        let product = p.composite() * p.inverse_composite();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5), "{product:?}");
    }
}
