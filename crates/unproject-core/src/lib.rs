pub mod camera;
pub mod constants;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod points;
pub mod projector;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use input::*;
pub use points::*;
pub use projector::*;
