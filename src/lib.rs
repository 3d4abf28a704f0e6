//! # Sketch Bytecode Player
//!
//! Decodes the compact "sketch" instruction stream used by pen-plotter drawings
//! and replays it against a drawing surface.
//!
//! ## Quick Start
//!
//! ```rust
//! use sketchplot::{play, PlaybackOptions, Position, RecordingSurface};
//!
//! let bytes = [
//!     0xC3, // pen down
//!     0x05, // move x +5
//!     0x43, // move y +3 (draws)
//! ];
//!
//! let (surface, report) =
//!     play("line", &bytes, PlaybackOptions::default(), RecordingSurface::open).unwrap();
//!
//! assert_eq!(report.instructions, 3);
//! assert_eq!(surface.lines(), vec![(Position::new(0, 0), Position::new(5, 3))]);
//! ```
//!
//! ## Wire Format
//!
//! - **Base byte**: bits 7-6 opcode (0 move-x, 1 move-y, 2 pause), bits 5-0
//!   signed 6-bit operand
//! - **Extended prefix**: bits 7-6 = 3, bits 5-4 length code (0, 1, 2 or 4
//!   operand bytes), bits 3-0 extended opcode (3 pen, 4 clear, 5 key, 6 colour)
//! - **Extended tail**: the big-endian operand bytes, then one trailer byte
//!   whose low nibble re-supplies the opcode
//!
//! ## Modules
//!
//! - `bitfield` - Opcode/operand extraction and sign extension
//! - `opcodes` - Opcode table and format revision
//! - `decoder` - Byte-at-a-time decoder state machine
//! - `plotter` - Pen and position state
//! - `dispatch` - Executes instructions against a surface
//! - `surface` - Surface trait and headless implementations
//! - `session` - Stream driver tying a byte source to a surface

pub mod bitfield;
pub mod decoder;
pub mod dispatch;
pub mod opcodes;
pub mod plotter;
pub mod session;
pub mod surface;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use decoder::{decode, DecodedStream, Decoder, DecoderState, Fault, Instruction};
pub use dispatch::dispatch;
pub use opcodes::{
    Form, Format, FormatError, OpcodeMetadata, Operation, OPCODE_TABLE, SKETCH_FORMAT,
};
pub use plotter::{Plotter, Position};
pub use session::{play, play_reader, PlaybackError, PlaybackOptions, PlaybackReport, Player};
pub use surface::{NullSurface, RecordingSurface, Surface, SurfaceCall, SurfaceError};

/// Errors that can occur while decoding a sketch stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The resolved opcode has no operation in the form it arrived in.
    ///
    /// For the extended form this covers 0-2 (base-only) and 7-15.
    ReservedOpcode {
        /// Opcode value that was resolved
        opcode: u8,
        /// Form the instruction arrived in
        form: Form,
        /// Byte that completed the instruction
        byte: u8,
    },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DecodeError::ReservedOpcode { opcode, form, byte } => {
                let form = match form {
                    Form::Base => "Base",
                    Form::Extended => "Extended",
                };
                write!(
                    f,
                    "{} opcode {} is reserved (byte 0x{:02X})",
                    form, opcode, byte
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}
