use crate::canvas::Canvas;
use crate::vec2::Vec2;

pub const INITIAL_LIFESPAN: i32 = 255;
pub const LIFESPAN_DECAY: i32 = 4;
const VELOCITY_DAMPING: f32 = 0.98;

/// One point of light: either the rising rocket of an unexploded firework
/// or a piece of fading debris.
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
    pub hue: f32,
    pub lifespan: i32,
    pub is_launch: bool,
}

impl Particle {
    pub fn launch(position: Vec2, velocity: Vec2, hue: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::zero(),
            hue,
            lifespan: INITIAL_LIFESPAN,
            is_launch: true,
        }
    }

    pub fn debris(position: Vec2, velocity: Vec2, hue: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::zero(),
            hue,
            lifespan: INITIAL_LIFESPAN,
            is_launch: false,
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// One forward Euler step. Order is fixed: damp, integrate velocity,
    /// integrate position, clear the force accumulator. Launch particles
    /// neither drag nor decay.
    pub fn update(&mut self) {
        if !self.is_launch {
            self.velocity = self.velocity * VELOCITY_DAMPING;
            self.lifespan -= LIFESPAN_DECAY;
        }
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = Vec2::zero();
    }

    pub fn done(&self) -> bool {
        self.lifespan <= 0
    }

    pub fn render(&self, canvas: &mut Canvas) {
        let x = self.position.x.round() as i32;
        let y = self.position.y.round() as i32;
        let color = hue_to_rgb(self.hue);
        if self.is_launch {
            canvas.plot(x, y, color, 1.0);
            for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                canvas.plot(x + dx, y + dy, color, 0.3);
            }
        } else {
            canvas.plot(x, y, color, self.lifespan.max(0) as f32 / 255.0);
        }
    }
}

/// Fully saturated hue (degrees) to RGB.
pub fn hue_to_rgb(hue: f32) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();

    let (r, g, b) = if h < 1.0 {
        (1.0, x, 0.0)
    } else if h < 2.0 {
        (x, 1.0, 0.0)
    } else if h < 3.0 {
        (0.0, 1.0, x)
    } else if h < 4.0 {
        (0.0, x, 1.0)
    } else if h < 5.0 {
        (x, 0.0, 1.0)
    } else {
        (1.0, 0.0, x)
    };

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
