use std::ops::{Add, Mul, Sub};

/// A 3-component vector in world space.
///
/// Thin newtype over `[f32; 3]` so positions and directions can flow between
/// the simulation and external collaborators as plain arrays.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3(pub [f32; 3]);

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3([x, y, z])
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    pub fn length(&self) -> f32 {
        (self.x().powi(2) + self.y().powi(2) + self.z().powi(2)).sqrt()
    }

    pub fn distance_to(&self, other: &Self) -> f32 {
        (*other - *self).length()
    }

    /// Returns a unit-length copy, or the zero vector if the length is zero.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self([0.0, 0.0, 0.0]);
        }

        Self([self.x() / length, self.y() / length, self.z() / length])
    }

    /// Rotates this vector about the world Y axis by `yaw` radians.
    pub fn rotate_y(&self, yaw: f32) -> Self {
        let (sin, cos) = yaw.sin_cos();
        Self([
            self.x() * cos + self.z() * sin,
            self.y(),
            -self.x() * sin + self.z() * cos,
        ])
    }

    pub fn as_array(&self) -> &[f32; 3] {
        &self.0
    }
    pub fn x(&self) -> f32 {
        self.0[0]
    }
    pub fn y(&self) -> f32 {
        self.0[1]
    }
    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(values: [f32; 3]) -> Self {
        Vec3(values)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vec: Vec3) -> Self {
        vec.0
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self([
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        ])
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self([
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        ])
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self([self.x() * scalar, self.y() * scalar, self.z() * scalar])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_vector_stays_zero() {
        let v = Vec3::new(0.0, 0.0, 0.0);
        assert_eq!(v.normalize(), Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn rotate_y_quarter_turn() {
        let v = Vec3::new(1.0, 0.0, 0.0);
        let r = v.rotate_y(std::f32::consts::FRAC_PI_2);
        assert!(r.x().abs() < 1e-6);
        assert!((r.z() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn dot_of_unit_axes_is_zero() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(x.dot(&z), 0.0);
    }
}
