//! Linear-algebra and geometric primitives: vectors/points/colors, rays,
//! closed intervals, 4×4 affine matrices, and orthonormal bases. Everything
//! above the math layer (hittables, materials, the camera) is built on top
//! of these types.

mod matrix;
mod onb;
mod range;
mod ray;
mod vec3;

pub use matrix::Matrix4;
pub use onb::OrthonormalBase;
pub use range::Range;
pub use ray::Ray;
pub use vec3::{Color, Point3, Vec3};
