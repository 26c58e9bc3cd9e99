use super::vec3::Vec3;

/// A right-handed orthonormal basis built from a single axis vector —
/// used to orient cosine-hemisphere sampling and Perlin gradient lookups
/// around an arbitrary surface normal.
#[derive(Debug, Clone, Copy)]
pub struct OrthonormalBase {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl OrthonormalBase {
    /// Builds a basis with `w` aligned to `normal`. A world axis not nearly
    /// parallel to `normal` (threshold `0.9` on the absolute x component) is
    /// picked as a helper to avoid a degenerate cross product, then two
    /// cross products complete the basis.
    pub fn from_w(normal: Vec3) -> Self {
        let w = normal.normalized();
        let a = if w.x.abs() > 0.9 { Vec3::unit_y() } else { Vec3::unit_x() };
        let v = w.cross(a).normalized();
        let u = w.cross(v);
        Self { u, v, w }
    }

    /// Maps a local-space vector into world space: `x·u + y·v + z·w`.
    #[inline]
    pub fn transform(&self, local: Vec3) -> Vec3 {
        self.u * local.x + self.v * local.y + self.w * local.z
    }

    /// Inverse of `transform`: projects a world-space vector back into this
    /// basis's local coordinates.
    #[inline]
    pub fn transform_to_local(&self, world: Vec3) -> Vec3 {
        Vec3::new(world.dot(self.u), world.dot(self.v), world.dot(self.w))
    }
}
