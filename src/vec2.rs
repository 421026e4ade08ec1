use std::ops::{Add, AddAssign, Mul};

/// 2D vector in surface-pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Unit vector with a uniformly random direction.
    pub fn random_unit() -> Self {
        let angle = fastrand::f32() * std::f32::consts::TAU;
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self::Output {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::Vec2;

    #[test]
    fn add_assign_accumulates_components() {
        let mut v = Vec2::new(1.0, -2.0);
        v += Vec2::new(0.5, 0.25);

        assert!((v.x - 1.5).abs() < 1e-6);
        assert!((v.y + 1.75).abs() < 1e-6);
    }

    #[test]
    fn scalar_multiply_scales_both_components() {
        let v = Vec2::new(3.0, -4.0) * 0.5;

        assert!((v.x - 1.5).abs() < 1e-6);
        assert!((v.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn random_unit_has_unit_length() {
        fastrand::seed(7);
        for _ in 0..32 {
            let v = Vec2::random_unit();
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }
}
