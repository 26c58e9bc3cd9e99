//! The render loop: stratified per-pixel sampling, the recursive MIS
//! path-tracing integrator, and the external-facing sinks (pixel writer,
//! image source is in `texture::image`, denoiser aux buffers, progress).

use crate::camera::Camera;
use crate::error::{RendererError, Result};
use crate::hittable::Hittable;
use crate::material::ScatterRecord;
use crate::math::{Color, Range, Ray, Vec3};
use crate::pdf::{HittablePdf, MixturePdf, Pdf};
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;

/// Render-loop configuration distinct from the camera: image dimensions are
/// owned by `CameraConfig` (they drive the viewport derivation), but whether
/// to collect denoiser aux buffers and how samples are seeded lives here.
pub struct RenderConfig {
    pub image_width: usize,
    pub image_height: usize,
    pub collect_aux_buffers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { image_width: 400, image_height: 225, collect_aux_buffers: false }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RendererError::InvalidArgument("image dimensions must be nonzero".into()));
        }
        Ok(())
    }
}

/// An external pixel sink. The render loop writes unclamped linear HDR
/// values; gamma correction and quantization are the writer's responsibility.
pub trait PixelWriter: Send + Sync {
    fn write_pixel(&mut self, x: usize, y: usize, linear_rgb: Color);
}

/// The crate's own minimal `PixelWriter`: a flat row-major buffer of linear
/// colors, with a gamma-corrected, 8-bit-quantized export helper for callers
/// (and tests) that want something directly displayable.
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![Color::zero(); width * height] }
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    /// Applies the recommended γ=2.0 curve and saturates each pixel to
    /// 8-bit-per-channel RGB, for display or export.
    pub fn to_rgb8_image(&self) -> Vec<(u8, u8, u8)> {
        self.pixels.iter().map(|c| c.gamma_correct().to_rgb8()).collect()
    }
}

impl PixelWriter for Framebuffer {
    fn write_pixel(&mut self, x: usize, y: usize, linear_rgb: Color) {
        self.pixels[y * self.width + x] = linear_rgb;
    }
}

/// Parallel denoiser inputs: linear color, albedo, and view-space normal,
/// one `Vec<Color>` each of length `width * height`. Populated only when
/// `RenderConfig::collect_aux_buffers` is set.
pub struct DenoiseBuffers {
    pub color: Vec<Color>,
    pub albedo: Vec<Color>,
    pub normal: Vec<Color>,
}

impl DenoiseBuffers {
    fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self { color: vec![Color::zero(); len], albedo: vec![Color::zero(); len], normal: vec![Color::zero(); len] }
    }
}

/// Purely advisory render progress, invoked between scan lines.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, percent: f64);
}

/// Default progress reporter: logs at `debug` level. Callers who want a
/// terminal progress bar or a GUI update provide their own implementation.
pub struct LoggingProgress;

impl ProgressCallback for LoggingProgress {
    fn on_progress(&self, percent: f64) {
        debug!("render progress: {percent:.1}%");
    }
}

const SHADOW_EPSILON: f64 = 0.001;

/// The primary-hit surface data a denoiser wants alongside the noisy color:
/// the first-bounce attenuation (its "albedo") and shading normal. A ray
/// that misses everything reports the background as its albedo and a zero
/// normal, matching what a denoiser would treat as "sky".
#[derive(Clone, Copy)]
struct AuxSample {
    albedo: Color,
    normal: Vec3,
}

/// Recursively estimates radiance along `ray`, implementing the mixture-PDF
/// multiple importance sampling scheme: one `HittablePdf` per importance
/// target plus the hit material's own PDF, drawn from uniformly and
/// reweighted by the material's `scatter_pdf` against the mixture density.
///
/// `aux`, when present, is filled in with this call's primary-hit surface
/// data; recursive bounces are called with `aux: None` since only the
/// camera ray's first hit feeds the denoiser buffers.
#[allow(clippy::too_many_arguments)]
fn radiance(
    ray: &Ray,
    depth: u32,
    scene: &dyn Hittable,
    lights: Option<&Arc<dyn Hittable>>,
    background: Color,
    max_depth: u32,
    rng: &mut SmallRng,
    mut aux: Option<&mut AuxSample>,
) -> Color {
    if depth >= max_depth {
        return Color::zero();
    }

    let hit = match scene.hit(ray, Range::new(SHADOW_EPSILON, f64::INFINITY)) {
        Some(hit) => hit,
        None => {
            if let Some(aux) = aux.as_deref_mut() {
                *aux = AuxSample { albedo: background, normal: Vec3::zero() };
            }
            return background;
        }
    };

    let emitted = hit.material.emitted(ray, &hit);

    let scatter = match hit.material.scatter(ray, &hit, rng) {
        Some(s) => s,
        None => {
            if let Some(aux) = aux.as_deref_mut() {
                *aux = AuxSample { albedo: emitted, normal: hit.normal };
            }
            return emitted;
        }
    };

    if let Some(aux) = aux.as_deref_mut() {
        let albedo = match &scatter {
            ScatterRecord::Specular { attenuation, .. } => *attenuation,
            ScatterRecord::Scatter { attenuation, .. } => *attenuation,
        };
        *aux = AuxSample { albedo, normal: hit.normal };
    }

    match scatter {
        ScatterRecord::Specular { attenuation, ray: out_ray } => {
            emitted
                + attenuation.hadamard(radiance(
                    &out_ray, depth + 1, scene, lights, background, max_depth, rng, None,
                ))
        }
        ScatterRecord::Scatter { attenuation, pdf: material_pdf } => {
            let mixture: Box<dyn Pdf> = match lights {
                Some(target) => Box::new(MixturePdf::new(vec![
                    Box::new(HittablePdf::new(target.clone(), hit.point, ray.time)),
                    material_pdf,
                ])),
                None => material_pdf,
            };

            let out_direction = mixture.generate(rng);
            let out_ray = Ray::with_time(hit.point, out_direction, ray.time);
            let mixture_density = mixture.value(out_direction);

            if !mixture_density.is_finite() || mixture_density < 1e-8 {
                trace!("degenerate mixture density {mixture_density}, returning black");
                return emitted;
            }

            let scatter_pdf = hit.material.scatter_pdf(ray, &hit, &out_ray);
            let incoming =
                radiance(&out_ray, depth + 1, scene, lights, background, max_depth, rng, None);

            emitted + attenuation.hadamard(incoming) * (scatter_pdf / mixture_density)
        }
    }
}

/// Renders the full image, row-parallel via `rayon`, one `SmallRng` seeded
/// per row. Each pixel is sampled over `s × s` stratified sub-pixel cells
/// where `s = floor(sqrt(samples_per_pixel))`, and the accumulated color is
/// divided by the number of samples actually taken (`s*s`), not the
/// configured `samples_per_pixel` — see the stratified-sampling divisor
/// note in the design notes.
pub fn render_scene(
    scene: &(dyn Hittable),
    lights: Option<&Arc<dyn Hittable>>,
    camera: &Camera,
    config: &RenderConfig,
    writer: &mut dyn PixelWriter,
    progress: Option<&dyn ProgressCallback>,
) -> Option<DenoiseBuffers> {
    let strata = (camera.samples_per_pixel as f64).sqrt().floor().max(1.0) as usize;
    let samples_taken = (strata * strata) as f64;

    let mut aux = config.collect_aux_buffers.then(|| DenoiseBuffers::new(config.image_width, config.image_height));
    let collect_aux = config.collect_aux_buffers;

    type RowResult = (usize, Vec<Color>, Option<Vec<(Color, Vec3)>>);
    let rows: Vec<RowResult> = (0..config.image_height)
        .into_par_iter()
        .map(|row| {
            let mut rng = SmallRng::seed_from_u64(row as u64 ^ 0x9E3779B97F4A7C15);
            let mut colors = Vec::with_capacity(config.image_width);
            let mut aux_samples = collect_aux.then(|| Vec::with_capacity(config.image_width));
            for col in 0..config.image_width {
                let mut accum = Color::zero();
                let mut albedo_accum = Color::zero();
                let mut normal_accum = Vec3::zero();
                for i in 0..strata {
                    for j in 0..strata {
                        let offset_u = (j as f64 + rng.gen::<f64>()) / strata as f64 - 0.5;
                        let offset_v = (i as f64 + rng.gen::<f64>()) / strata as f64 - 0.5;
                        let ray = camera.get_ray(col, row, offset_u, offset_v, &mut rng);
                        let mut sample_aux = AuxSample { albedo: Color::zero(), normal: Vec3::zero() };
                        accum += radiance(
                            &ray,
                            0,
                            scene,
                            lights,
                            camera.background,
                            camera.max_depth,
                            &mut rng,
                            collect_aux.then_some(&mut sample_aux),
                        );
                        if collect_aux {
                            albedo_accum += sample_aux.albedo;
                            normal_accum += sample_aux.normal;
                        }
                    }
                }
                colors.push(accum / samples_taken);
                if let Some(samples) = aux_samples.as_mut() {
                    samples.push((albedo_accum / samples_taken, normal_accum / samples_taken));
                }
            }
            if let Some(cb) = progress {
                cb.on_progress(100.0 * (row + 1) as f64 / config.image_height as f64);
            }
            (row, colors, aux_samples)
        })
        .collect();

    for (row, colors, aux_samples) in rows {
        for (col, color) in colors.into_iter().enumerate() {
            writer.write_pixel(col, row, color);
            if let Some(buffers) = aux.as_mut() {
                let idx = row * config.image_width + col;
                buffers.color[idx] = color;
                if let Some((albedo, normal)) = aux_samples.as_ref().map(|s| s[col]) {
                    buffers.albedo[idx] = albedo;
                    buffers.normal[idx] = normal;
                }
            }
        }
    }

    aux
}
