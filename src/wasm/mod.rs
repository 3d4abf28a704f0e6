//! WebAssembly bindings for the sketch player.
//!
//! This module provides JavaScript-callable interfaces so sketch files can be
//! replayed onto a browser canvas.

pub mod api;

pub use api::SketchPlayer;
