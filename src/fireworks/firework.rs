use super::particle::Particle;
use super::Stage;
use crate::canvas::Canvas;
use crate::vec2::Vec2;

/// Per-tick chance of bursting before the apex, for timing variance.
const EARLY_BURST_CHANCE: f32 = 0.01;
/// Debris count range at explosion.
const DEBRIS_MIN: usize = 60;
const DEBRIS_MAX: usize = 120;
/// Debris speed range and launch velocity ranges, in reference pixels per
/// tick before stage scaling.
const DEBRIS_SPEED_MIN: f32 = 2.0;
const DEBRIS_SPEED_MAX: f32 = 8.0;
const LAUNCH_VX_SPREAD: f32 = 1.0;
const LAUNCH_VY_MIN: f32 = -12.0;
const LAUNCH_VY_MAX: f32 = -8.0;

/// One rocket and, after it bursts, its debris cloud. Rising until the
/// launch particle reaches its apex (or the early trigger fires), then
/// expanding until the last debris particle fades.
pub struct Firework {
    hue: f32,
    launch: Particle,
    exploded: bool,
    particles: Vec<Particle>,
}

impl Firework {
    pub fn new(stage: &Stage) -> Self {
        let hue = fastrand::f32() * 360.0;
        let position = Vec2::new(fastrand::f32() * stage.width, stage.height);
        let velocity = Vec2::new(
            (fastrand::f32() * 2.0 - 1.0) * LAUNCH_VX_SPREAD * stage.unit,
            (LAUNCH_VY_MIN + fastrand::f32() * (LAUNCH_VY_MAX - LAUNCH_VY_MIN)) * stage.unit,
        );
        Self {
            hue,
            launch: Particle::launch(position, velocity, hue),
            exploded: false,
            particles: Vec::new(),
        }
    }

    pub fn update(&mut self, stage: &Stage) {
        if !self.exploded {
            self.launch.apply_force(stage.gravity);
            self.launch.update();
            if self.launch.velocity.y >= 0.0 || fastrand::f32() < EARLY_BURST_CHANCE {
                self.explode(stage);
            }
        }

        let drag_gravity = stage.gravity * 0.2;
        self.particles.retain_mut(|p| {
            p.apply_force(drag_gravity);
            p.update();
            !p.done()
        });
    }

    fn explode(&mut self, stage: &Stage) {
        self.exploded = true;
        let count = fastrand::usize(DEBRIS_MIN..DEBRIS_MAX);
        for _ in 0..count {
            let speed =
                (DEBRIS_SPEED_MIN + fastrand::f32() * (DEBRIS_SPEED_MAX - DEBRIS_SPEED_MIN))
                    * stage.unit;
            self.particles.push(Particle::debris(
                self.launch.position,
                Vec2::random_unit() * speed,
                self.hue,
            ));
        }
    }

    pub fn done(&self) -> bool {
        self.exploded && self.particles.is_empty()
    }

    pub fn render(&self, canvas: &mut Canvas) {
        if !self.exploded {
            self.launch.render(canvas);
        }
        for p in &self.particles {
            p.render(canvas);
        }
    }

    pub fn exploded(&self) -> bool {
        self.exploded
    }

    pub fn debris(&self) -> &[Particle] {
        &self.particles
    }

    pub fn launch_particle(&self) -> &Particle {
        &self.launch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> Stage {
        Stage::new(80, 48)
    }

    #[test]
    fn no_debris_before_explosion() {
        fastrand::seed(11);
        let stage = stage();
        let mut fw = Firework::new(&stage);
        for _ in 0..200 {
            if fw.exploded() {
                break;
            }
            assert!(fw.debris().is_empty());
            fw.update(&stage);
        }
        assert!(fw.exploded());
    }

    #[test]
    fn explosion_happens_within_the_apex_bound() {
        // Worst case launch speed is 12 units against gravity 0.25 units per
        // tick, so the apex arrives no later than tick 48 even if the early
        // trigger never fires.
        for seed in 0..20 {
            fastrand::seed(seed);
            let stage = stage();
            let mut fw = Firework::new(&stage);
            for _ in 0..48 {
                fw.update(&stage);
            }
            assert!(fw.exploded(), "seed {seed} still rising after 48 ticks");
        }
    }

    #[test]
    fn debris_count_is_in_range() {
        fastrand::seed(3);
        let stage = stage();
        let mut fw = Firework::new(&stage);
        while !fw.exploded() {
            fw.update(&stage);
        }
        assert!((60..120).contains(&fw.debris().len()));
    }

    #[test]
    fn firework_is_spent_within_a_bounded_tick_count() {
        // 48 rising ticks plus 64 decay ticks per debris particle.
        for seed in 0..10 {
            fastrand::seed(100 + seed);
            let stage = stage();
            let mut fw = Firework::new(&stage);
            let mut ticks = 0;
            while !fw.done() {
                fw.update(&stage);
                ticks += 1;
                assert!(ticks <= 113, "seed {seed} not spent after {ticks} ticks");
            }
        }
    }

    #[test]
    fn exploded_is_monotonic() {
        fastrand::seed(5);
        let stage = stage();
        let mut fw = Firework::new(&stage);
        let mut seen = false;
        for _ in 0..200 {
            fw.update(&stage);
            if seen {
                assert!(fw.exploded());
            }
            seen = seen || fw.exploded();
        }
        assert!(seen);
    }
}
