//! WASM API for the sketch player.
//!
//! Provides a JavaScript-callable player that forwards every surface call to a
//! callback, so a page can render onto a `<canvas>`.

use crate::{decode, PlaybackOptions, Player, Position, Surface};
use js_sys::Array;
use wasm_bindgen::prelude::*;

/// Surface that forwards calls to a JavaScript function.
///
/// The callback receives `(command, args)` where `command` is one of
/// `"line"`, `"pause"`, `"clear"`, `"key"`, `"color"` or `"close"` and `args`
/// is an array of numbers.
struct JsSurface {
    on_command: js_sys::Function,
}

impl JsSurface {
    fn emit(&self, command: &str, args: Array) {
        let _ = self
            .on_command
            .call2(&JsValue::NULL, &JsValue::from_str(command), &args);
    }
}

impl Surface for JsSurface {
    fn line(&mut self, from: Position, to: Position) {
        let args = Array::of4(
            &JsValue::from_f64(from.x as f64),
            &JsValue::from_f64(from.y as f64),
            &JsValue::from_f64(to.x as f64),
            &JsValue::from_f64(to.y as f64),
        );
        self.emit("line", args);
    }

    fn pause(&mut self, millis: u64) {
        // The browser cannot block; the page schedules the delay.
        self.emit("pause", Array::of1(&JsValue::from_f64(millis as f64)));
    }

    fn clear(&mut self) {
        self.emit("clear", Array::new());
    }

    fn wait_for_key(&mut self) {
        self.emit("key", Array::new());
    }

    fn set_color(&mut self, color: i64) {
        self.emit("color", Array::of1(&JsValue::from_f64(color as f64)));
    }

    fn close(&mut self) -> Result<(), crate::SurfaceError> {
        self.emit("close", Array::new());
        Ok(())
    }
}

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Main player interface for JavaScript
#[wasm_bindgen]
pub struct SketchPlayer {
    player: Option<Player<JsSurface>>,
    truncated: bool,
}

#[wasm_bindgen]
impl SketchPlayer {
    /// Create a player that reports drawing commands to `on_command`
    #[wasm_bindgen(constructor)]
    pub fn new(on_command: js_sys::Function, width: u32, height: u32) -> SketchPlayer {
        let options = PlaybackOptions {
            width,
            height,
            ..PlaybackOptions::default()
        };

        SketchPlayer {
            player: Some(Player::with_surface(JsSurface { on_command }, options)),
            truncated: false,
        }
    }

    /// Feed a chunk of sketch bytes and return the number of instructions run
    pub fn feed(&mut self, bytes: &[u8]) -> Result<u32, JsError> {
        let player = self
            .player
            .as_mut()
            .ok_or_else(|| JsError::new("Player already finished"))?;

        let before = player.report().instructions;
        player
            .play(bytes)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok((player.report().instructions - before) as u32)
    }

    /// Close the session
    pub fn finish(&mut self) -> Result<(), JsError> {
        let player = self
            .player
            .take()
            .ok_or_else(|| JsError::new("Player already finished"))?;

        let (_, report) = player
            .finish()
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.truncated = report.truncated;
        Ok(())
    }

    /// Current pen x coordinate
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.player
            .as_ref()
            .map(|p| p.plotter().current().x as f64)
            .unwrap_or(0.0)
    }

    /// Current pen y coordinate
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.player
            .as_ref()
            .map(|p| p.plotter().current().y as f64)
            .unwrap_or(0.0)
    }

    /// Whether the pen is down
    #[wasm_bindgen(getter)]
    pub fn pen_down(&self) -> bool {
        self.player
            .as_ref()
            .map(|p| p.plotter().pen_down())
            .unwrap_or(false)
    }

    /// Whether the finished stream ended mid-instruction
    #[wasm_bindgen(getter)]
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Decode sketch bytes into listing lines without drawing anything
#[wasm_bindgen]
pub fn listing(bytes: &[u8]) -> Vec<JsValue> {
    decode(bytes)
        .instructions
        .iter()
        .map(|instr| JsValue::from_str(&instr.to_string()))
        .collect()
}
