use super::Texture;
use crate::math::{Color, Point3};
use std::sync::Arc;

/// External collaborator: decodes an image file into `(R, G, B)` pixel
/// lookups by integer coordinate. Image-texture *decoding* is explicitly out
/// of scope for this crate — callers provide their own `ImageSource`
/// (wrapping whatever decoder they like) and hand it to `ImageTexture`.
pub trait ImageSource: Send + Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8);
}

/// Nearest-pixel (no bilinear filtering) lookup into an `ImageSource`. `u` is
/// clamped to `[0,1]`; `v` is flipped (`v' = 1 - v`) since image row 0 is
/// conventionally the top of the image while texture `v=0` is the bottom.
pub struct ImageTexture {
    source: Arc<dyn ImageSource>,
}

impl ImageTexture {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self { source }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _point: Point3) -> Color {
        if self.source.height() == 0 || self.source.width() == 0 {
            // A magenta sentinel makes a missing/empty image source obvious
            // in a render rather than silently returning black.
            return Color::new(1.0, 0.0, 1.0);
        }

        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let x = ((u * self.source.width() as f64) as u32).min(self.source.width() - 1);
        let y = ((v * self.source.height() as f64) as u32).min(self.source.height() - 1);

        let (r, g, b) = self.source.get_pixel(x, y);
        Color::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Checkerboard2x2;
    impl ImageSource for Checkerboard2x2 {
        fn width(&self) -> u32 {
            2
        }
        fn height(&self) -> u32 {
            2
        }
        fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
            if (x + y) % 2 == 0 {
                (255, 255, 255)
            } else {
                (0, 0, 0)
            }
        }
    }

    #[test]
    fn clamps_and_flips_v() {
        let tex = ImageTexture::new(Arc::new(Checkerboard2x2));
        let top_left = tex.value(0.0, 1.0, Point3::zero());
        assert_eq!(top_left, Color::new(1.0, 1.0, 1.0));
    }
}
