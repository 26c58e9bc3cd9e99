use super::vec3::{Point3, Vec3};

/// A parametric ray `R(t) = origin + t·direction`, the fundamental query
/// primitive for every intersection test in the renderer. `time` is the
/// point within the camera's shutter interval this ray was cast at, used by
/// moving primitives and constant-density media.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub time: f64,
}

impl Ray {
    #[inline(always)]
    pub const fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction, time: 0.0 }
    }

    #[inline(always)]
    pub const fn with_time(origin: Point3, direction: Vec3, time: f64) -> Self {
        Self { origin, direction, time }
    }

    #[inline(always)]
    pub fn at(self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_evaluates_the_parametric_form() {
        let r = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::unit_x());
        let p = r.at(3.0);
        assert_eq!(p, Point3::new(4.0, 0.0, 0.0));
    }
}
