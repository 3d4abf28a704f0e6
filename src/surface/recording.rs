//! Recording surface implementation.
//!
//! Keeps an ordered log of every call made against it instead of rendering.

use super::{Surface, SurfaceError};
use crate::Position;

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// The surface was opened with this name and size.
    Open {
        /// Session name
        name: String,
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// A line segment was drawn.
    Line {
        /// Start point
        from: Position,
        /// End point
        to: Position,
    },
    /// Playback paused.
    Pause {
        /// Pause length in milliseconds
        millis: u64,
    },
    /// The surface was cleared.
    Clear,
    /// Playback waited for a key.
    WaitForKey,
    /// The drawing colour changed.
    SetColor {
        /// Colour operand as decoded
        color: i64,
    },
    /// The surface was closed.
    Close,
}

/// Headless surface that records calls.
///
/// The recorder can also be told to fail on open or close so the player's
/// error paths can be driven without a real window.
///
/// # Examples
///
/// ```rust
/// use sketchplot::{PlaybackOptions, Player, Position, RecordingSurface};
///
/// // Pen down, move right 5, move down 3
/// let mut player =
///     Player::open("line", PlaybackOptions::default(), RecordingSurface::open).unwrap();
/// player.play(&[0xC3, 0x05, 0x43]).unwrap();
/// let (surface, _report) = player.finish().unwrap();
///
/// assert_eq!(surface.lines(), vec![(Position::new(0, 0), Position::new(5, 3))]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    fail_on_close: Option<String>,
}

impl RecordingSurface {
    /// Creates a recorder whose log starts with an `Open` entry.
    ///
    /// Has the opener signature expected by [`crate::Player::open`].
    pub fn open(name: &str, width: u32, height: u32) -> Result<Self, SurfaceError> {
        Ok(Self {
            calls: vec![SurfaceCall::Open {
                name: name.to_string(),
                width,
                height,
            }],
            fail_on_close: None,
        })
    }

    /// Opener that always fails with `reason`.
    pub fn failing_open(
        reason: &str,
    ) -> impl FnOnce(&str, u32, u32) -> Result<RecordingSurface, SurfaceError> + '_ {
        move |name: &str, _width: u32, _height: u32| {
            Err(SurfaceError::OpenFailed {
                name: name.to_string(),
                reason: reason.to_string(),
            })
        }
    }

    /// Makes the next `close` fail with `reason` (the call is still logged).
    pub fn fail_on_close(&mut self, reason: &str) {
        self.fail_on_close = Some(reason.to_string());
    }

    /// Returns every recorded call in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Returns the endpoints of every line drawn, in order.
    pub fn lines(&self) -> Vec<(Position, Position)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.calls.iter().any(|call| *call == SurfaceCall::Close)
    }
}

impl Surface for RecordingSurface {
    fn line(&mut self, from: Position, to: Position) {
        self.calls.push(SurfaceCall::Line { from, to });
    }

    fn pause(&mut self, millis: u64) {
        self.calls.push(SurfaceCall::Pause { millis });
    }

    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
    }

    fn wait_for_key(&mut self) {
        self.calls.push(SurfaceCall::WaitForKey);
    }

    fn set_color(&mut self, color: i64) {
        self.calls.push(SurfaceCall::SetColor { color });
    }

    fn close(&mut self) -> Result<(), SurfaceError> {
        self.calls.push(SurfaceCall::Close);
        match self.fail_on_close.take() {
            Some(reason) => Err(SurfaceError::CloseFailed(reason)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_logged() {
        let surface = RecordingSurface::open("box", 320, 240).unwrap();
        assert_eq!(
            surface.calls(),
            &[SurfaceCall::Open {
                name: "box".to_string(),
                width: 320,
                height: 240,
            }]
        );
        assert!(!surface.is_closed());
    }

    #[test]
    fn test_failing_open() {
        let open = RecordingSurface::failing_open("no display");
        let err = open("box", 200, 200).unwrap_err();
        assert_eq!(
            err,
            SurfaceError::OpenFailed {
                name: "box".to_string(),
                reason: "no display".to_string(),
            }
        );
    }

    #[test]
    fn test_fail_on_close_still_logs() {
        let mut surface = RecordingSurface::open("box", 200, 200).unwrap();
        surface.fail_on_close("flush failed");

        assert!(surface.close().is_err());
        assert!(surface.is_closed());
    }
}
