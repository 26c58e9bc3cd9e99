use super::Texture;
use crate::math::{Color, Point3, Vec3};
use rand::Rng;

const POINT_COUNT: usize = 256;

/// Which of the six Perlin-noise evaluation modes a `PerlinNoise` texture
/// uses. Each wraps the same underlying lattice but combines lattice values
/// differently.
#[derive(Debug, Clone, Copy)]
pub enum PerlinNoiseMode {
    /// Flat per-cell hash, no interpolation at all — blocky but cheap.
    NoSmooth,
    /// Linear blend of the 8 surrounding lattice corners.
    Trilinear,
    /// Trilinear blend with Hermite (`u²(3-2u)`) smoothing of the weights.
    Smoothstep,
    /// Classic gradient noise: corner gradients dotted with the distance to
    /// each corner, Hermite-weighted.
    RandomVector,
    /// 7 octaves of `RandomVector`, doubling frequency and halving
    /// amplitude each octave, summed and taken in absolute value.
    Turbulence,
    /// `0.5(1 + sin(scale·z + 10·turbulence))` — a marbled vein pattern.
    Marble { scale: f64 },
}

/// A 256-entry Perlin noise lattice: per-axis permutation tables plus either
/// scalar hash values (for `NoSmooth`/`Trilinear`/`Smoothstep`) or random
/// unit gradient vectors (for the remaining modes), built once at
/// construction by a Fisher-Yates shuffle.
pub struct PerlinNoise {
    ranfloat: [f64; POINT_COUNT],
    ranvec: [Vec3; POINT_COUNT],
    perm_x: [usize; POINT_COUNT],
    perm_y: [usize; POINT_COUNT],
    perm_z: [usize; POINT_COUNT],
    mode: PerlinNoiseMode,
}

impl PerlinNoise {
    pub fn new(mode: PerlinNoiseMode, rng: &mut dyn rand::RngCore) -> Self {
        let mut ranfloat = [0.0; POINT_COUNT];
        let mut ranvec = [Vec3::zero(); POINT_COUNT];
        for i in 0..POINT_COUNT {
            ranfloat[i] = rng.gen();
            ranvec[i] = Vec3::random_unit_vector(rng);
        }
        Self {
            ranfloat,
            ranvec,
            perm_x: Self::generate_perm(rng),
            perm_y: Self::generate_perm(rng),
            perm_z: Self::generate_perm(rng),
            mode,
        }
    }

    fn generate_perm(rng: &mut dyn rand::RngCore) -> [usize; POINT_COUNT] {
        let mut p: [usize; POINT_COUNT] = [0; POINT_COUNT];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = i;
        }
        // Fisher-Yates shuffle.
        for i in (1..POINT_COUNT).rev() {
            let j = rng.gen_range(0..=i);
            p.swap(i, j);
        }
        p
    }

    fn hash(&self, i: i32, j: i32, k: i32) -> usize {
        self.perm_x[(i & 255) as usize] ^ self.perm_y[(j & 255) as usize] ^ self.perm_z[(k & 255) as usize]
    }

    fn no_smooth(&self, p: Point3) -> f64 {
        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;
        self.ranfloat[self.hash(i, j, k)]
    }

    fn corner_weights(p: Point3, smooth: bool) -> (f64, f64, f64, Point3) {
        let mut u = p.x - p.x.floor();
        let mut v = p.y - p.y.floor();
        let mut w = p.z - p.z.floor();
        if smooth {
            u = u * u * (3.0 - 2.0 * u);
            v = v * v * (3.0 - 2.0 * v);
            w = w * w * (3.0 - 2.0 * w);
        }
        (u, v, w, Point3::new(p.x.floor(), p.y.floor(), p.z.floor()))
    }

    fn trilinear(&self, p: Point3, smooth: bool) -> f64 {
        let (u, v, w, floor) = Self::corner_weights(p, smooth);
        let i = floor.x as i32;
        let j = floor.y as i32;
        let k = floor.z as i32;

        let mut accum = 0.0;
        for di in 0..2i32 {
            for dj in 0..2i32 {
                for dk in 0..2i32 {
                    let weight = (di as f64 * u + (1 - di) as f64 * (1.0 - u))
                        * (dj as f64 * v + (1 - dj) as f64 * (1.0 - v))
                        * (dk as f64 * w + (1 - dk) as f64 * (1.0 - w));
                    accum += weight * self.ranfloat[self.hash(i + di, j + dj, k + dk)];
                }
            }
        }
        accum
    }

    /// Classic Perlin gradient noise: dot each corner's stored gradient with
    /// the vector from the corner to `p`, Hermite-weight, and sum.
    fn gradient_noise(&self, p: Point3) -> f64 {
        let (u, v, w, floor) = Self::corner_weights(p, true);
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);
        let i = floor.x as i32;
        let j = floor.y as i32;
        let k = floor.z as i32;

        let mut accum = 0.0;
        for di in 0..2i32 {
            for dj in 0..2i32 {
                for dk in 0..2i32 {
                    let weight_v = Vec3::new(u - di as f64, v - dj as f64, w - dk as f64);
                    let weight = (di as f64 * uu + (1 - di) as f64 * (1.0 - uu))
                        * (dj as f64 * vv + (1 - dj) as f64 * (1.0 - vv))
                        * (dk as f64 * ww + (1 - dk) as f64 * (1.0 - ww));
                    accum += weight * self.ranvec[self.hash(i + di, j + dj, k + dk)].dot(weight_v);
                }
            }
        }
        accum
    }

    fn turbulence(&self, p: Point3, depth: u32) -> f64 {
        let mut accum = 0.0;
        let mut temp = p;
        let mut weight = 1.0;
        for _ in 0..depth {
            accum += weight * self.gradient_noise(temp);
            weight *= 0.5;
            temp = temp * 2.0;
        }
        accum.abs()
    }

    /// Evaluates the configured mode at `p`.
    pub fn noise(&self, p: Point3) -> f64 {
        match self.mode {
            PerlinNoiseMode::NoSmooth => self.no_smooth(p),
            PerlinNoiseMode::Trilinear => self.trilinear(p, false),
            PerlinNoiseMode::Smoothstep => self.trilinear(p, true),
            PerlinNoiseMode::RandomVector => self.gradient_noise(p),
            PerlinNoiseMode::Turbulence => self.turbulence(p, 7),
            PerlinNoiseMode::Marble { scale } => {
                0.5 * (1.0 + (scale * p.z + 10.0 * self.turbulence(p, 7)).sin())
            }
        }
    }
}

/// A grayscale Perlin-noise texture: `noise(scale·point)` replicated across
/// all three color channels.
pub struct PerlinTexture {
    perlin: PerlinNoise,
    scale: f64,
}

impl PerlinTexture {
    pub fn new(perlin: PerlinNoise, scale: f64) -> Self {
        Self { perlin, scale }
    }
}

impl Texture for PerlinTexture {
    fn value(&self, _u: f64, _v: f64, point: Point3) -> Color {
        let n = self.perlin.noise(point * self.scale);
        Color::new(n, n, n)
    }
}
