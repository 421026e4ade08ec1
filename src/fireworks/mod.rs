//! Firework simulation: the stage geometry, individual fireworks, and the
//! field of currently active ones.

mod firework;
mod particle;

pub use firework::Firework;
pub use particle::Particle;

use crate::canvas::Canvas;
use crate::vec2::Vec2;

/// The physics constants are tuned for a 600 pixel tall surface; the stage
/// scales them to whatever the terminal actually provides.
pub const REFERENCE_HEIGHT: f32 = 600.0;
const GRAVITY_PER_TICK: f32 = 0.25;

/// Surface dimensions plus the derived physics scale and gravity.
pub struct Stage {
    pub width: f32,
    pub height: f32,
    pub unit: f32,
    pub gravity: Vec2,
}

impl Stage {
    pub fn new(width: usize, height: usize) -> Self {
        let unit = height as f32 / REFERENCE_HEIGHT;
        Self {
            width: width as f32,
            height: height as f32,
            unit,
            gravity: Vec2::new(0.0, GRAVITY_PER_TICK * unit),
        }
    }
}

/// All currently active fireworks. Spent ones are dropped at the end of the
/// tick that finished them.
pub struct FireworkField {
    stage: Stage,
    fireworks: Vec<Firework>,
}

impl FireworkField {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            stage: Stage::new(width, height),
            fireworks: Vec::new(),
        }
    }

    pub fn spawn(&mut self, count: usize) {
        for _ in 0..count {
            self.fireworks.push(Firework::new(&self.stage));
        }
    }

    /// Advance and draw every firework, then drop the spent ones.
    pub fn tick(&mut self, canvas: &mut Canvas) {
        let stage = &self.stage;
        self.fireworks.retain_mut(|fw| {
            fw.update(stage);
            fw.render(canvas);
            !fw.done()
        });
    }

    /// Rebuild the stage for new surface dimensions. In-flight fireworks
    /// keep their state; anything off the new surface is simply clipped.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.stage = Stage::new(width, height);
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_scales_gravity_with_height() {
        let stage = Stage::new(80, 48);
        assert!((stage.unit - 0.08).abs() < 1e-6);
        assert!((stage.gravity.y - 0.02).abs() < 1e-6);
        assert_eq!(stage.gravity.x, 0.0);

        let reference = Stage::new(800, 600);
        assert!((reference.unit - 1.0).abs() < 1e-6);
        assert!((reference.gravity.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn spawn_grows_the_field_by_exactly_count() {
        fastrand::seed(1);
        let mut field = FireworkField::new(80, 48);
        field.spawn(6);
        assert_eq!(field.len(), 6);
        field.spawn(2);
        assert_eq!(field.len(), 8);
    }

    #[test]
    fn field_drains_to_empty() {
        fastrand::seed(2);
        let mut field = FireworkField::new(80, 48);
        let mut canvas = Canvas::new(80, 48);
        field.spawn(3);

        let mut prev = field.len();
        for _ in 0..200 {
            field.tick(&mut canvas);
            assert!(field.len() <= prev);
            prev = field.len();
            if field.is_empty() {
                break;
            }
        }
        assert!(field.is_empty());
    }

    #[test]
    fn resize_keeps_in_flight_fireworks() {
        fastrand::seed(4);
        let mut field = FireworkField::new(80, 48);
        field.spawn(2);
        field.resize(120, 90);
        assert_eq!(field.len(), 2);
        assert!((field.stage().height - 90.0).abs() < 1e-6);
    }
}
