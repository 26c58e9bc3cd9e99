use super::Texture;
use crate::math::{Color, Point3};
use std::sync::Arc;

/// A 3D checkerboard: alternates between two sub-textures based on the
/// parity of `⌊x/scale⌋ + ⌊y/scale⌋ + ⌊z/scale⌋` in world space, so the
/// pattern stays aligned to the surface regardless of parameterization.
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { inv_scale: 1.0 / scale, even, odd }
    }

    pub fn solid(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(super::SolidTexture::new(even)),
            Arc::new(super::SolidTexture::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, point: Point3) -> Color {
        let sum = (self.inv_scale * point.x).floor() as i64
            + (self.inv_scale * point.y).floor() as i64
            + (self.inv_scale * point.z).floor() as i64;
        if sum % 2 == 0 {
            self.even.value(u, v, point)
        } else {
            self.odd.value(u, v, point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_across_a_cell_boundary() {
        let checker = CheckerTexture::solid(1.0, Color::ones(), Color::zero());
        let a = checker.value(0.0, 0.0, Point3::new(0.5, 0.5, 0.5));
        let b = checker.value(0.0, 0.0, Point3::new(1.5, 0.5, 0.5));
        assert_ne!(a, b);
    }
}
