use super::Texture;
use crate::math::{Color, Point3};

/// A texture that returns the same color everywhere.
pub struct SolidTexture {
    color: Color,
}

impl SolidTexture {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidTexture {
    fn value(&self, _u: f64, _v: f64, _point: Point3) -> Color {
        self.color
    }
}
