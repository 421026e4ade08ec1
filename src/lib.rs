//! Score readout with a celebratory fireworks animation for the terminal.
//!
//! An embedding host pipes JSON score messages to the binary's stdin; a
//! perfect score launches a firework display rendered as 24-bit half-block
//! cells. The library holds everything testable: the message parser, the
//! score-to-display mapping, the particle simulation, and the frame driver.

pub mod canvas;
pub mod fireworks;
pub mod message;
pub mod score;
pub mod scoreboard;
pub mod vec2;
