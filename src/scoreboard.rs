//! Application state and the per-frame driver: one struct owning the score,
//! the firework field, and the render mode, with the message handler as the
//! single writer of score state.

use crate::canvas::Canvas;
use crate::fireworks::FireworkField;
use crate::message::ScoreMessage;
use crate::score::{self, ScoreState, ShapeKind};

/// Fireworks launched for a perfect score or a bare trigger.
pub const DEFAULT_FIREWORK_COUNT: usize = 6;
/// Background when nothing is animating.
pub const IDLE_BACKGROUND: (u8, u8, u8) = (255, 255, 255);
/// Per-frame fade toward black while fireworks fly; leaves motion trails.
const TRAIL_ALPHA: f32 = 60.0 / 255.0;
const SCORE_LINE_COLOR: (u8, u8, u8) = (50, 50, 50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Render only when a redraw was requested.
    Idle,
    /// Render every tick while fireworks are active.
    Continuous,
}

pub struct Scoreboard {
    score: ScoreState,
    field: FireworkField,
    mode: RenderMode,
    background: (u8, u8, u8),
    redraw: bool,
}

impl Scoreboard {
    pub fn new(width: usize, height: usize, background: (u8, u8, u8)) -> Self {
        Self {
            score: ScoreState::new(),
            field: FireworkField::new(width, height),
            mode: RenderMode::Idle,
            background,
            // Paint the pending display on the first loop iteration.
            redraw: true,
        }
    }

    /// Apply one inbound score message. A perfect score starts the show;
    /// anything else just refreshes the static display.
    pub fn handle_message(&mut self, msg: ScoreMessage) {
        self.score.record(msg);
        if self.score.is_perfect() {
            self.trigger_fireworks(DEFAULT_FIREWORK_COUNT);
        } else {
            self.redraw = true;
        }
    }

    /// Start (or add to) the celebration, independent of the score channel.
    pub fn trigger_fireworks(&mut self, count: usize) {
        self.field.spawn(count);
        self.mode = RenderMode::Continuous;
    }

    /// One frame: backdrop, score display, firework field. Flips back to
    /// Idle when the field drains and requests a final static redraw.
    pub fn frame(&mut self, canvas: &mut Canvas) {
        if self.mode == RenderMode::Continuous && !self.field.is_empty() {
            canvas.fade((0, 0, 0), TRAIL_ALPHA);
        } else {
            canvas.clear(self.background);
        }

        self.draw_readout(canvas);
        self.field.tick(canvas);

        if self.mode == RenderMode::Continuous && self.field.is_empty() {
            self.mode = RenderMode::Idle;
            self.redraw = true;
        }
    }

    fn draw_readout(&self, canvas: &mut Canvas) {
        let readout = score::readout(&self.score, canvas.width() as f32);

        if let Some(shape) = readout.shape {
            let cx = canvas.width() as f32 / 2.0;
            let cy = canvas.height() as f32 * 0.65;
            match shape.kind {
                ShapeKind::Circle => {
                    canvas.fill_circle(cx, cy, shape.size / 2.0, shape.color, shape.alpha);
                }
                ShapeKind::Square => {
                    let half = shape.size / 2.0;
                    canvas.fill_rect(
                        cx - half,
                        cy - half,
                        shape.size,
                        shape.size,
                        shape.color,
                        shape.alpha,
                    );
                }
            }
        }

        let row = (canvas.cell_rows() / 2).saturating_sub(1);
        canvas.text_centered(row, &readout.message, readout.color);
        canvas.text_centered(row + 1, &readout.score_line, SCORE_LINE_COLOR);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.field.resize(width, height);
        self.redraw = true;
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Consume a pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn field(&self) -> &FireworkField {
        &self.field
    }
}
