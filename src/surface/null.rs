//! Surface that discards everything.

use super::{Surface, SurfaceError};
use crate::Position;

/// A surface with no output.
///
/// Useful for validating a sketch file without drawing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl NullSurface {
    /// Opener with the signature expected by [`crate::Player::open`].
    pub fn open(_name: &str, _width: u32, _height: u32) -> Result<Self, SurfaceError> {
        Ok(NullSurface)
    }
}

impl Surface for NullSurface {
    fn line(&mut self, _from: Position, _to: Position) {}

    fn pause(&mut self, _millis: u64) {}

    fn clear(&mut self) {}

    fn wait_for_key(&mut self) {}

    fn set_color(&mut self, _color: i64) {}
}
