//! Score state and the pure mapping from a score pair to display cues.

use crate::message::ScoreMessage;

/// Process-lifetime score state. Written only by the message handler; the
/// frame path reads it.
#[derive(Clone, Debug, Default)]
pub struct ScoreState {
    pub final_score: u32,
    pub max_score: u32,
    /// Last formatted score line, kept so the pending display can still show
    /// something once a message has arrived.
    pub score_text: Option<String>,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, msg: ScoreMessage) {
        self.final_score = msg.score;
        self.max_score = msg.max_score;
        self.score_text = Some(format!("Final score: {}/{}", msg.score, msg.max_score));
    }

    /// Percentage of max, 0 when no max is known yet. Multiply before
    /// dividing so integer pairs on tier boundaries come out exact.
    pub fn percentage(&self) -> f32 {
        if self.max_score == 0 {
            0.0
        } else {
            (self.final_score as f64 * 100.0 / self.max_score as f64) as f32
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.max_score > 0 && self.percentage() >= 100.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Perfect,
    Excellent,
    Good,
    NeedsWork,
    Pending,
}

pub fn tier(percentage: f32, max_score: u32) -> Tier {
    if max_score > 0 && percentage >= 100.0 {
        Tier::Perfect
    } else if percentage >= 90.0 {
        Tier::Excellent
    } else if percentage >= 60.0 {
        Tier::Good
    } else if percentage > 0.0 {
        Tier::NeedsWork
    } else {
        Tier::Pending
    }
}

impl Tier {
    pub fn message(self) -> &'static str {
        match self {
            Tier::Perfect => "Perfect score! Congratulations!",
            Tier::Excellent => "Excellent work!",
            Tier::Good => "Good job, keep improving!",
            Tier::NeedsWork => "Needs more effort, try again!",
            Tier::Pending => "No score received yet",
        }
    }

    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Tier::Perfect => (255, 215, 0),
            Tier::Excellent => (0, 200, 50),
            Tier::Good => (255, 181, 35),
            Tier::NeedsWork => (200, 0, 0),
            Tier::Pending => (150, 150, 150),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
}

/// Geometric cue drawn behind the text for the upper tiers.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Diameter for circles, side length for squares, in surface pixels.
    pub size: f32,
    pub color: (u8, u8, u8),
    pub alpha: f32,
}

pub fn shape_cue(tier: Tier, surface_width: f32) -> Option<Shape> {
    match tier {
        Tier::Perfect => Some(Shape {
            kind: ShapeKind::Circle,
            size: (surface_width * 0.30).min(140.0),
            color: (255, 215, 0),
            alpha: 180.0 / 255.0,
        }),
        Tier::Excellent => Some(Shape {
            kind: ShapeKind::Circle,
            size: (surface_width * 0.26).min(120.0),
            color: (0, 200, 50),
            alpha: 150.0 / 255.0,
        }),
        Tier::Good => Some(Shape {
            kind: ShapeKind::Square,
            size: (surface_width * 0.26).min(120.0),
            color: (255, 181, 35),
            alpha: 150.0 / 255.0,
        }),
        Tier::NeedsWork | Tier::Pending => None,
    }
}

/// Everything the frame driver needs to draw the score display.
#[derive(Clone, Debug)]
pub struct Readout {
    pub tier: Tier,
    pub percentage: f32,
    pub message: String,
    pub color: (u8, u8, u8),
    pub score_line: String,
    pub shape: Option<Shape>,
}

pub fn readout(state: &ScoreState, surface_width: f32) -> Readout {
    let percentage = state.percentage();
    let tier = tier(percentage, state.max_score);
    let message = match tier {
        Tier::Pending => state
            .score_text
            .clone()
            .unwrap_or_else(|| Tier::Pending.message().to_string()),
        other => other.message().to_string(),
    };
    Readout {
        tier,
        percentage,
        message,
        color: tier.color(),
        score_line: format!("Score: {}/{}", state.final_score, state.max_score),
        shape: shape_cue(tier, surface_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ScoreMessage;

    fn state(score: u32, max: u32) -> ScoreState {
        let mut s = ScoreState::new();
        s.record(ScoreMessage {
            score,
            max_score: max,
        });
        s
    }

    #[test]
    fn percentage_is_exact_on_integer_boundaries() {
        assert_eq!(state(3, 5).percentage(), 60.0);
        assert_eq!(state(9, 10).percentage(), 90.0);
        assert_eq!(state(10, 10).percentage(), 100.0);
        assert_eq!(state(7, 10).percentage(), 70.0);
    }

    #[test]
    fn zero_max_short_circuits_percentage() {
        assert_eq!(state(0, 0).percentage(), 0.0);
        assert_eq!(state(42, 0).percentage(), 0.0);
        assert!(!state(42, 0).is_perfect());
    }

    #[test]
    fn tier_boundaries_match_the_table() {
        assert_eq!(tier(59.999, 100), Tier::NeedsWork);
        assert_eq!(tier(60.0, 100), Tier::Good);
        assert_eq!(tier(89.999, 100), Tier::Good);
        assert_eq!(tier(90.0, 100), Tier::Excellent);
        assert_eq!(tier(99.999, 100), Tier::Excellent);
        assert_eq!(tier(100.0, 100), Tier::Perfect);
        assert_eq!(tier(0.5, 100), Tier::NeedsWork);
        assert_eq!(tier(0.0, 100), Tier::Pending);
        assert_eq!(tier(0.0, 0), Tier::Pending);
    }

    #[test]
    fn integer_pairs_land_on_their_tier() {
        assert_eq!(tier(state(3, 5).percentage(), 5), Tier::Good);
        assert_eq!(tier(state(9, 10).percentage(), 10), Tier::Excellent);
        assert_eq!(tier(state(10, 10).percentage(), 10), Tier::Perfect);
    }

    #[test]
    fn overshoot_still_counts_as_perfect() {
        let s = state(12, 10);
        assert!(s.is_perfect());
        assert_eq!(tier(s.percentage(), s.max_score), Tier::Perfect);
    }

    #[test]
    fn shape_cues_follow_the_tier() {
        let circle = shape_cue(Tier::Perfect, 400.0).unwrap();
        assert_eq!(circle.kind, ShapeKind::Circle);
        assert!((circle.size - 120.0).abs() < 1e-3);

        let square = shape_cue(Tier::Good, 400.0).unwrap();
        assert_eq!(square.kind, ShapeKind::Square);
        assert!((square.size - 104.0).abs() < 1e-3);

        assert!(shape_cue(Tier::NeedsWork, 400.0).is_none());
        assert!(shape_cue(Tier::Pending, 400.0).is_none());
    }

    #[test]
    fn shape_size_caps_on_wide_surfaces() {
        assert_eq!(shape_cue(Tier::Perfect, 900.0).unwrap().size, 140.0);
        assert_eq!(shape_cue(Tier::Excellent, 900.0).unwrap().size, 120.0);
    }

    #[test]
    fn pending_readout_falls_back_then_remembers() {
        let fresh = ScoreState::new();
        let r = readout(&fresh, 400.0);
        assert_eq!(r.tier, Tier::Pending);
        assert_eq!(r.message, "No score received yet");
        assert_eq!(r.score_line, "Score: 0/0");

        let r = readout(&state(0, 0), 400.0);
        assert_eq!(r.tier, Tier::Pending);
        assert_eq!(r.message, "Final score: 0/0");
    }

    #[test]
    fn score_line_is_always_present() {
        let r = readout(&state(7, 10), 400.0);
        assert_eq!(r.tier, Tier::Good);
        assert_eq!(r.score_line, "Score: 7/10");
    }
}
