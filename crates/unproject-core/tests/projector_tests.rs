// Host-side tests for the screen-to-world projector.

use glam::{Mat4, Vec3, Vec4};
use rand::prelude::*;
use unproject_core::*;

fn default_projector() -> ScreenToWorldProjector {
    ScreenToWorldProjector::new(ProjectorConfig::default()).expect("default config is valid")
}

fn offset_camera_projector() -> ScreenToWorldProjector {
    let camera = Camera::new(Vec3::new(1.0, 2.0, 6.0), Vec3::new(0.0, 0.0, -2.0), Vec3::Y);
    let projection = Projection::new(60f32.to_radians(), ClipRange::new(0.5, 50.0));
    ScreenToWorldProjector::from_parts(Viewport::new(800.0, 600.0), camera, projection)
        .expect("offset camera is valid")
}

fn assert_close(a: WorldPoint, b: WorldPoint, tol: f32) {
    let d = a.to_vec3().distance(b.to_vec3());
    assert!(d <= tol, "expected {b:?}, got {a:?} (distance {d})");
}

#[test]
fn screen_center_unprojects_onto_forward_axis() {
    let p = default_projector();
    let world = p.unproject(ScreenPoint::new(256.0, 256.0, 0.0));
    assert!(world.is_finite());
    assert!(world.x.abs() < 1e-6, "x = {}", world.x);
    assert!(world.y.abs() < 1e-6, "y = {}", world.y);
    // In front of a camera looking down -Z
    assert!(world.z < 0.0, "z = {}", world.z);
}

#[test]
fn center_depth_moves_along_forward_axis() {
    let p = default_projector();
    let near = p.unproject(ScreenPoint::new(256.0, 256.0, 0.0));
    let far = p.unproject(ScreenPoint::new(256.0, 256.0, 0.9));
    assert!(far.z < near.z, "near={near:?} far={far:?}");
    assert!(far.x.abs() < 1e-5 && far.y.abs() < 1e-5);
}

#[test]
fn round_trip_recovers_world_points_default_camera() {
    let p = default_projector();
    let points = [
        WorldPoint::new(0.0, 0.0, -1.0),
        WorldPoint::new(0.5, -0.25, -2.0),
        WorldPoint::new(-1.0, 1.0, -3.0),
        WorldPoint::new(0.2, 0.3, -0.5),
    ];
    for world in points {
        let screen = p.project(world);
        let back = p.unproject(screen);
        assert_close(back, world, 1e-4);
    }
}

#[test]
fn round_trip_recovers_random_points_in_frustum() {
    let p = offset_camera_projector();
    let camera = *p.camera().expect("parametric camera");
    let forward = (camera.target - camera.eye).normalize();
    let right = forward.cross(camera.up).normalize();
    let up = right.cross(forward);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let depth: f32 = rng.gen_range(1.0..8.0);
        let half = depth * 0.4;
        let world = camera.eye
            + forward * depth
            + right * rng.gen_range(-half..half)
            + up * rng.gen_range(-half..half);
        let world = WorldPoint::from(world);
        let screen = p.project(world);
        let back = p.unproject(screen);
        assert_close(back, world, 1e-3);
    }
}

#[test]
fn project_maps_into_viewport_for_visible_points() {
    let p = offset_camera_projector();
    let screen = p.project(WorldPoint::new(0.0, 0.0, -2.0));
    assert!((0.0..=800.0).contains(&screen.x), "{screen:?}");
    assert!((0.0..=600.0).contains(&screen.y), "{screen:?}");
    assert!((-1.0..=1.0).contains(&screen.z), "{screen:?}");
}

#[test]
fn world_x_increases_with_screen_x() {
    let p = default_projector();
    for z in [0.0, 0.5, 0.95] {
        let mut prev = f32::NEG_INFINITY;
        for i in 0..=64 {
            let x = i as f32 * 8.0;
            let world = p.unproject(ScreenPoint::new(x, 256.0, z));
            assert!(
                world.x > prev,
                "world x not increasing at screen x {x} (z {z}): {} <= {prev}",
                world.x
            );
            prev = world.x;
        }
    }
}

#[test]
fn world_y_follows_screen_y_without_flip() {
    let p = default_projector();
    let low = p.unproject(ScreenPoint::new(256.0, 64.0, 0.0));
    let high = p.unproject(ScreenPoint::new(256.0, 448.0, 0.0));
    assert!(low.y < 0.0 && high.y > 0.0, "low={low:?} high={high:?}");
}

#[test]
fn equal_clip_planes_are_rejected() {
    let projection = Projection::new(90f32.to_radians(), ClipRange::new(1.0, 1.0));
    let result =
        ScreenToWorldProjector::from_parts(Viewport::default(), Camera::default(), projection);
    assert!(
        matches!(result, Err(ProjectorError::InvalidClipRange { .. })),
        "{result:?}"
    );
}

#[test]
fn non_positive_viewport_is_rejected() {
    for (w, h) in [(0.0, 512.0), (512.0, 0.0), (-10.0, 512.0)] {
        let config = ProjectorConfig {
            viewport: Viewport::new(w, h),
            ..ProjectorConfig::default()
        };
        let result = ScreenToWorldProjector::new(config);
        assert!(
            matches!(result, Err(ProjectorError::NonPositiveViewport { .. })),
            "{w}x{h}: {result:?}"
        );
    }
}

#[test]
fn singular_matrices_are_rejected() {
    let result =
        ScreenToWorldProjector::from_matrices(Viewport::default(), Mat4::IDENTITY, Mat4::ZERO);
    assert!(
        matches!(result, Err(ProjectorError::SingularTransform { .. })),
        "{result:?}"
    );
}

#[test]
fn degenerate_camera_is_rejected() {
    let camera = Camera::new(Vec3::ZERO, Vec3::ZERO, Vec3::Y);
    let result =
        ScreenToWorldProjector::from_parts(Viewport::default(), camera, Projection::default());
    assert!(matches!(
        result,
        Err(ProjectorError::DegenerateCamera { .. })
    ));
}

#[test]
fn zero_w_query_yields_non_finite_point() {
    // Swaps z and w, so clip (0, 0, 0, 1) maps to homogeneous (0, 0, 1, 0).
    let swap_zw = Mat4::from_cols(Vec4::X, Vec4::Y, Vec4::W, Vec4::Z);
    let p = ScreenToWorldProjector::from_matrices(Viewport::default(), Mat4::IDENTITY, swap_zw)
        .expect("permutation is invertible");
    let world = p.unproject(ScreenPoint::new(256.0, 256.0, 0.0));
    assert!(!world.is_finite(), "{world:?}");
    assert!(world.z.is_infinite(), "{world:?}");
    assert!(ScreenToWorldProjector::model_matrix(world).is_none());
}

#[test]
fn unproject_is_deterministic() {
    let p = offset_camera_projector();
    let screen = ScreenPoint::new(123.5, 456.25, 0.3);
    let a = p.unproject(screen);
    let b = p.unproject(screen);
    assert_eq!(a.x.to_bits(), b.x.to_bits());
    assert_eq!(a.y.to_bits(), b.y.to_bits());
    assert_eq!(a.z.to_bits(), b.z.to_bits());

    let q = offset_camera_projector();
    assert_eq!(q.unproject(screen), a);
}

#[test]
fn set_camera_rebuilds_composite_and_inverse_together() {
    let mut p = default_projector();
    let before = p.unproject(ScreenPoint::new(256.0, 256.0, 0.5));
    p.set_camera(Camera::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(3.0, 0.0, -1.0), Vec3::Y))
        .expect("translated camera is valid");
    let after = p.unproject(ScreenPoint::new(256.0, 256.0, 0.5));
    assert!((after.x - before.x - 3.0).abs() < 1e-4, "{before:?} -> {after:?}");
    let product = p.composite() * p.inverse_composite();
    assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    assert_eq!(p.composite(), p.projection_matrix() * p.view());
}

#[test]
fn failed_update_keeps_previous_state() {
    let mut p = default_projector();
    let composite = p.composite();
    let inverse = p.inverse_composite();

    let bad = Projection::new(90f32.to_radians(), ClipRange::new(5.0, 1.0));
    assert!(p.set_projection(bad).is_err());
    assert!(p.set_viewport(Viewport::new(0.0, 100.0)).is_err());
    assert!(p
        .set_camera(Camera::new(Vec3::ZERO, Vec3::Y, Vec3::Y))
        .is_err());

    assert_eq!(p.composite(), composite);
    assert_eq!(p.inverse_composite(), inverse);
    assert_eq!(*p.viewport(), Viewport::default());
    assert_eq!(p.projection(), Some(&Projection::default()));
}

#[test]
fn viewport_change_updates_aspect() {
    let mut p = default_projector();
    p.set_viewport(Viewport::new(1024.0, 512.0))
        .expect("wide viewport is valid");
    // Right edge of a 2:1 viewport at 90 degrees fov spans twice the height.
    let right = p.unproject(ScreenPoint::new(1024.0, 256.0, 0.0));
    let top = p.unproject(ScreenPoint::new(512.0, 512.0, 0.0));
    assert!((right.x / top.y - 2.0).abs() < 1e-3, "right={right:?} top={top:?}");
}

#[test]
fn zero_to_one_depth_round_trips() {
    let projection = Projection::default().with_depth(DepthRange::ZeroToOne);
    let p = ScreenToWorldProjector::from_parts(Viewport::default(), Camera::default(), projection)
        .expect("valid config");
    let world = WorldPoint::new(0.4, -0.3, -2.5);
    let screen = p.project(world);
    assert!((0.0..=1.0).contains(&screen.z), "{screen:?}");
    assert_close(p.unproject(screen), world, 1e-4);
}
