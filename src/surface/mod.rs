//! Drawing surface support for the sketch player.
//!
//! The player never touches pixels. Everything visible happens through the
//! [`Surface`] trait, so a window, a canvas in the browser, or a recorder in a
//! test can sit behind the same decoder.
//!
//! # Architecture
//!
//! - **Surface trait**: the capability set a session draws through
//! - **Opener**: a caller-supplied `FnOnce(name, width, height)` that creates the surface
//! - **Implementations**: `RecordingSurface` (keeps a call log), `NullSurface` (discards)
//!
//! # Example
//!
//! ```rust
//! use sketchplot::{Position, RecordingSurface, Surface, SurfaceCall};
//!
//! let mut surface = RecordingSurface::open("demo", 200, 200).unwrap();
//! surface.line(Position::new(0, 0), Position::new(5, 3));
//! surface.close().unwrap();
//!
//! assert_eq!(surface.lines(), vec![(Position::new(0, 0), Position::new(5, 3))]);
//! assert_eq!(surface.calls().last(), Some(&SurfaceCall::Close));
//! ```

use crate::Position;

pub mod null;
pub mod recording;

pub use null::NullSurface;
pub use recording::{RecordingSurface, SurfaceCall};

/// Capability set the player draws through.
///
/// # Design
///
/// - **Infallible drawing**: once open, drawing calls cannot fail
/// - **Blocking is allowed**: `pause` and `wait_for_key` may block the caller
/// - **Fallible close**: flushing or tearing down the surface may fail
///
/// # Examples
///
/// ```rust
/// use sketchplot::{Position, Surface};
///
/// struct LineCounter {
///     lines: usize,
/// }
///
/// impl Surface for LineCounter {
///     fn line(&mut self, _from: Position, _to: Position) {
///         self.lines += 1;
///     }
///
///     fn pause(&mut self, _millis: u64) {}
///     fn clear(&mut self) {}
///     fn wait_for_key(&mut self) {}
///     fn set_color(&mut self, _color: i64) {}
/// }
/// ```
pub trait Surface {
    /// Draws a straight line between two points.
    fn line(&mut self, from: Position, to: Position);

    /// Pauses for the given number of milliseconds.
    fn pause(&mut self, millis: u64);

    /// Clears the surface.
    fn clear(&mut self);

    /// Blocks until a key is pressed.
    fn wait_for_key(&mut self);

    /// Selects the colour used by later lines.
    fn set_color(&mut self, color: i64);

    /// Finishes the session.
    ///
    /// Called exactly once by the player, after the last byte.
    fn close(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Error returned when a surface cannot be opened or closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface could not be created.
    OpenFailed {
        /// Session name passed to the opener
        name: String,
        /// Reason reported by the surface
        reason: String,
    },
    /// The surface failed while shutting down.
    CloseFailed(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SurfaceError::OpenFailed { name, reason } => {
                write!(f, "Cannot open surface '{}': {}", name, reason)
            }
            SurfaceError::CloseFailed(reason) => write!(f, "Cannot close surface: {}", reason),
        }
    }
}

impl std::error::Error for SurfaceError {}
