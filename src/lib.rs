//! # photon-trace
//!
//! A physically-based Monte Carlo path tracer, built as a library rather than
//! a terminal application: given a scene graph of hittables bound to
//! materials and textures, a camera, and a pixel sink, it solves the
//! rendering equation via recursive importance sampling.
//!
//! ## Architecture
//!
//! - **Math** (`math`): vectors, rays, ranges, AABBs live under `aabb`, 4×4
//!   affine transforms, orthonormal bases.
//! - **Geometry** (`hittable`): spheres, triangles, meshes, parallelograms,
//!   constant-density media, affine transforms, and flat collections, all
//!   behind one small `Hittable` trait; `bvh` builds an acceleration
//!   structure over any list of them.
//! - **Shading** (`material`, `texture`, `pdf`): materials decide how light
//!   scatters or emits; textures decide surface color; PDFs drive importance
//!   sampling and combine into the mixture the integrator uses for multiple
//!   importance sampling.
//! - **Rendering** (`camera`, `render`): the camera turns pixel coordinates
//!   into primary rays (with stratified AA, defocus, and shutter-time
//!   sampling); `render::render_scene` drives the row-parallel recursive
//!   integrator and hands averaged radiance to an external `PixelWriter`.
//!
//! ## Rendering equation
//!
//! ```text
//!   L_o(p, ω_o) = L_e(p, ω_o) + ∫_Ω f_r(p, ω_i, ω_o) · L_i(p, ω_i) · |cos θ_i| dω_i
//! ```
//!
//! Each material's `scatter` importance-samples its own BRDF lobe; when
//! importance targets (lights) are supplied, the integrator instead draws
//! from a uniform mixture of each target's solid-angle PDF and the
//! material's PDF, reweighting by the ratio of densities.

pub mod aabb;
pub mod bvh;
pub mod camera;
pub mod error;
pub mod hittable;
pub mod material;
pub mod math;
pub mod pdf;
pub mod render;
pub mod texture;

pub use error::{RendererError, Result};
