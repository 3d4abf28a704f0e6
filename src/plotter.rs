//! # Pen and Position State
//!
//! The plotter tracks where the pen is and whether it is touching the
//! surface. It is mutated only by [`crate::dispatch`].

use std::fmt;

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Horizontal coordinate
    pub x: i64,
    /// Vertical coordinate
    pub y: i64,
}

impl Position {
    /// Creates a position.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The origin, where every session starts.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Pen state for one playback session.
///
/// # Examples
///
/// ```
/// use sketchplot::{Plotter, Position};
///
/// let plotter = Plotter::new();
/// assert_eq!(plotter.current(), Position::ORIGIN);
/// assert_eq!(plotter.previous(), Position::ORIGIN);
/// assert!(!plotter.pen_down());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plotter {
    /// Start point of the next line
    pub(crate) previous: Position,

    /// Pen location after the last move
    pub(crate) current: Position,

    /// Whether moves draw
    pub(crate) pen_down: bool,
}

impl Plotter {
    /// Creates a plotter at the origin with the pen up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current pen position.
    pub fn current(&self) -> Position {
        self.current
    }

    /// Returns the start point of the next line.
    pub fn previous(&self) -> Position {
        self.previous
    }

    /// Returns true if the pen is down.
    pub fn pen_down(&self) -> bool {
        self.pen_down
    }
}
