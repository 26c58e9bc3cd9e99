//! Thin-lens camera ray generation: basis construction, per-sample subpixel
//! jitter (the stratification loop itself lives in `render::render_scene`),
//! and defocus-disk + shutter-time sampling.

use crate::math::*;

/// Configuration for the camera: FOV/window geometry, defocus, shutter, and
/// per-pixel sampling/recursion budgets. `Camera::new` derives the basis and
/// viewport vectors from these.
pub struct CameraConfig {
    pub look_from: Point3,
    pub look_at: Point3,
    /// Horizontal field of view, in degrees.
    pub fov_degrees: f64,
    pub image_width: usize,
    pub image_height: usize,
    pub background: Color,
    pub defocus_disk_radius: f64,
    pub shutter_open: f64,
    pub shutter_close: f64,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: Point3::new(0.0, 1.0, 3.0),
            look_at: Point3::zero(),
            fov_degrees: 40.0,
            image_width: 400,
            image_height: 225,
            background: Color::new(0.5, 0.7, 1.0),
            defocus_disk_radius: 0.0,
            shutter_open: 0.0,
            shutter_close: 0.0,
            samples_per_pixel: 100,
            max_depth: 50,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::RendererError;
        if self.fov_degrees <= 0.0 {
            return Err(RendererError::InvalidArgument("fov_degrees must be positive".into()));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RendererError::InvalidArgument("image dimensions must be nonzero".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(RendererError::InvalidArgument("samples_per_pixel must be nonzero".into()));
        }
        if self.max_depth == 0 {
            return Err(RendererError::InvalidArgument("max_depth must be nonzero".into()));
        }
        Ok(())
    }
}

/// A thin-lens camera: orthonormal basis `(u_axis, v_axis, w_axis)` built
/// from `look_from`/`look_at`, a per-pixel delta vector pair, and optional
/// defocus-disk and shutter-interval sampling for depth of field and motion
/// blur respectively.
pub struct Camera {
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
    defocus_disk_radius: f64,
    shutter_open: f64,
    shutter_close: f64,
    pub background: Color,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let theta = config.fov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let focus_dist = (config.look_at - config.look_from).length();
        let viewport_width = 2.0 * h * focus_dist;
        let viewport_height = viewport_width * (config.image_height as f64 / config.image_width as f64);

        let w_axis = (config.look_at - config.look_from).normalized();
        let u_axis = w_axis.cross(Vec3::unit_y()).normalized();
        let v_axis = u_axis.cross(w_axis);

        let viewport_u = u_axis * viewport_width;
        let viewport_v = -v_axis * viewport_height;

        let pixel_delta_u = viewport_u / config.image_width as f64;
        let pixel_delta_v = viewport_v / config.image_height as f64;

        let viewport_upper_left =
            config.look_from + w_axis * focus_dist - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + (pixel_delta_u + pixel_delta_v) * 0.5;

        Self {
            center: config.look_from,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u_axis,
            v_axis,
            defocus_disk_radius: config.defocus_disk_radius,
            shutter_open: config.shutter_open,
            shutter_close: config.shutter_close,
            background: config.background,
            samples_per_pixel: config.samples_per_pixel,
            max_depth: config.max_depth,
        }
    }

    /// Builds the primary ray for pixel `(col, row)`, jittered within the
    /// pixel by `(offset_u, offset_v) ∈ [-0.5, 0.5]²` — the caller supplies
    /// the stratified offset for the current sample.
    pub fn get_ray(&self, col: usize, row: usize, offset_u: f64, offset_v: f64, rng: &mut dyn rand::RngCore) -> Ray {
        let sample = self.pixel00_loc
            + self.pixel_delta_u * (col as f64 + offset_u)
            + self.pixel_delta_v * (row as f64 + offset_v);

        let origin = if self.defocus_disk_radius > 0.0 {
            let disk = Vec3::random_in_unit_disk(rng) * self.defocus_disk_radius;
            self.center + self.u_axis * disk.x + self.v_axis * disk.y
        } else {
            self.center
        };

        use rand::Rng;
        let time = if self.shutter_close > self.shutter_open {
            rng.gen_range(self.shutter_open..self.shutter_close)
        } else {
            self.shutter_open
        };

        Ray::with_time(origin, (sample - origin).normalized(), time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn centered_pixel_ray_points_toward_look_at() {
        let config = CameraConfig {
            look_from: Point3::new(0.0, 0.0, 5.0),
            look_at: Point3::zero(),
            image_width: 101,
            image_height: 101,
            ..CameraConfig::default()
        };
        let camera = Camera::new(&config);
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        let ray = camera.get_ray(50, 50, 0.0, 0.0, &mut rng);
        assert!(ray.direction.z < -0.9);
    }

    #[test]
    fn defocus_disk_perturbs_the_origin() {
        let config = CameraConfig { defocus_disk_radius: 1.0, ..CameraConfig::default() };
        let camera = Camera::new(&config);
        let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
        let ray = camera.get_ray(200, 112, 0.0, 0.0, &mut rng);
        assert_ne!(ray.origin, camera.center);
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let config = CameraConfig { image_width: 0, ..CameraConfig::default() };
        assert!(config.validate().is_err());
    }
}
