//! # Decoder State Machine
//!
//! This module turns a sketch byte stream into resolved instructions, one byte
//! at a time. It owns protocol state only (pending opcode, outstanding operand
//! bytes, accumulator); pen and position state live in [`crate::Plotter`].
//!
//! ## States
//!
//! ```text
//!            base byte (op 0-2) -> emit
//!          +-------+
//!          v       |
//!        Idle -----+
//!          |  \
//!          |   escape, len 0 -> emit
//!          |
//!          | escape, len L > 0
//!          v
//!  AwaitingOperandBytes(L) --byte--> ... --byte--> AwaitingResolution
//!                                                        |
//!                                     trailer byte -> emit, back to Idle
//! ```
//!
//! A stream that ends anywhere other than `Idle` is truncated and the pending
//! instruction is dropped.

use std::fmt;

use crate::bitfield;
use crate::opcodes::{Form, Format, FormatError, Operation, OPCODE_TABLE, SKETCH_FORMAT};
use crate::DecodeError;

/// A fully resolved instruction, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Operation to perform
    pub operation: Operation,

    /// Signed operand (0 for operations without one)
    pub operand: i64,

    /// Encoding the instruction arrived in
    pub form: Form,
}

impl Instruction {
    /// Creates an instruction from its parts.
    pub fn new(operation: Operation, operand: i64, form: Form) -> Self {
        Self {
            operation,
            operand,
            form,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.operation {
            Operation::MoveX | Operation::MoveY => {
                write!(f, "{} {:+}", self.operation, self.operand)
            }
            Operation::Pause | Operation::SetColor => {
                write!(f, "{} {}", self.operation, self.operand)
            }
            Operation::TogglePen | Operation::Clear | Operation::WaitKey => {
                write!(f, "{}", self.operation)
            }
        }
    }
}

/// Observable state of a [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Between instructions.
    Idle,
    /// Collecting extended operand bytes; holds the count still needed.
    AwaitingOperandBytes(u8),
    /// Operand complete; the next byte resolves the instruction.
    AwaitingResolution,
}

/// Byte-at-a-time sketch decoder.
///
/// # Examples
///
/// ```
/// use sketchplot::{Decoder, DecoderState, Operation};
///
/// let mut decoder = Decoder::new();
///
/// // Base form: move-x by +5
/// let instr = decoder.decode_byte(0x05).unwrap().unwrap();
/// assert_eq!(instr.operation, Operation::MoveX);
/// assert_eq!(instr.operand, 5);
///
/// // Extended set-colour with one operand byte, then the trailer byte
/// assert_eq!(decoder.decode_byte(0xD6).unwrap(), None);
/// assert_eq!(decoder.decode_byte(0x02).unwrap(), None);
/// assert_eq!(decoder.state(), DecoderState::AwaitingResolution);
///
/// let instr = decoder.decode_byte(0x06).unwrap().unwrap();
/// assert_eq!(instr.operation, Operation::SetColor);
/// assert_eq!(instr.operand, 2);
/// assert!(decoder.is_idle());
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    /// Wire format revision in use
    format: Format,

    /// True while an extended instruction is in flight
    extended: bool,

    /// Opcode selected by the extended prefix
    pending_opcode: u8,

    /// Operand bytes still to accumulate
    remaining: u8,

    /// Operand length of the instruction in flight, in bytes
    operand_len: u8,

    /// Big-endian operand accumulator
    accumulated: u32,
}

impl Decoder {
    /// Creates a decoder for the current sketch format.
    pub fn new() -> Self {
        Self::from_valid_format(SKETCH_FORMAT)
    }

    /// Creates a decoder for a specific format revision.
    ///
    /// Fails if `format` maps a length code to more than
    /// [`Format::MAX_OPERAND_LEN`] bytes or escapes through a value that is not
    /// a base opcode.
    pub fn with_format(format: Format) -> Result<Self, FormatError> {
        format.validate()?;
        Ok(Self::from_valid_format(format))
    }

    fn from_valid_format(format: Format) -> Self {
        Self {
            format,
            extended: false,
            pending_opcode: 0,
            remaining: 0,
            operand_len: 0,
            accumulated: 0,
        }
    }

    /// Consumes one byte.
    ///
    /// Returns `Ok(Some(_))` when the byte completes an instruction and
    /// `Ok(None)` when more bytes are needed. A resolved opcode that has no
    /// operation for its form yields [`DecodeError::ReservedOpcode`]; the
    /// decoder is back in `Idle` afterwards either way.
    pub fn decode_byte(&mut self, byte: u8) -> Result<Option<Instruction>, DecodeError> {
        if !self.extended {
            return self.decode_idle(byte);
        }

        if self.remaining > 0 {
            self.accumulated = (self.accumulated << 8) | byte as u32;
            self.remaining -= 1;
            return Ok(None);
        }

        // Trailer byte
        if self.format.trailer_sets_opcode {
            self.pending_opcode = bitfield::opcode(byte, true);
        }
        let bit_width = self.operand_len as u32 * 8;
        let operand = bitfield::sign_extend(self.accumulated, bit_width);
        let opcode = self.pending_opcode;
        self.reset();

        resolve_extended(opcode, operand, byte).map(Some)
    }

    fn decode_idle(&mut self, byte: u8) -> Result<Option<Instruction>, DecodeError> {
        let opcode = bitfield::opcode(byte, false);

        if opcode != self.format.escape_opcode {
            let metadata = &OPCODE_TABLE[opcode as usize];
            return match metadata.operation {
                Some(operation) if metadata.base => Ok(Some(Instruction::new(
                    operation,
                    bitfield::base_operand(byte),
                    Form::Base,
                ))),
                _ => Err(DecodeError::ReservedOpcode {
                    opcode,
                    form: Form::Base,
                    byte,
                }),
            };
        }

        let pending = bitfield::opcode(byte, true);
        let len = self.format.operand_len(bitfield::length_code(byte));
        if len == 0 {
            return resolve_extended(pending, 0, byte).map(Some);
        }

        self.extended = true;
        self.pending_opcode = pending;
        self.remaining = len;
        self.operand_len = len;
        self.accumulated = 0;
        Ok(None)
    }

    /// Returns the current state.
    pub fn state(&self) -> DecoderState {
        match (self.extended, self.remaining) {
            (false, _) => DecoderState::Idle,
            (true, 0) => DecoderState::AwaitingResolution,
            (true, n) => DecoderState::AwaitingOperandBytes(n),
        }
    }

    /// Returns true if no instruction is in flight.
    pub fn is_idle(&self) -> bool {
        !self.extended
    }

    /// Returns the opcode held for the instruction in flight.
    pub fn pending_opcode(&self) -> Option<u8> {
        if self.extended {
            Some(self.pending_opcode)
        } else {
            None
        }
    }

    /// Returns the operand bytes accumulated so far.
    pub fn accumulated_operand(&self) -> u32 {
        self.accumulated
    }

    /// Returns the format revision in use.
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Drops any instruction in flight.
    pub fn reset(&mut self) {
        self.extended = false;
        self.pending_opcode = 0;
        self.remaining = 0;
        self.operand_len = 0;
        self.accumulated = 0;
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a resolved extended opcode onto its operation.
fn resolve_extended(opcode: u8, operand: i64, byte: u8) -> Result<Instruction, DecodeError> {
    let metadata = &OPCODE_TABLE[(opcode & 0x0F) as usize];
    match metadata.operation {
        Some(operation) if metadata.extended => {
            Ok(Instruction::new(operation, operand, Form::Extended))
        }
        _ => Err(DecodeError::ReservedOpcode {
            opcode,
            form: Form::Extended,
            byte,
        }),
    }
}

/// A decode fault and the stream offset of the byte that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Offset of the offending byte
    pub offset: usize,

    /// What went wrong
    pub error: DecodeError,
}

/// Result of decoding a complete byte slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedStream {
    /// Instructions in stream order
    pub instructions: Vec<Instruction>,

    /// Faults in stream order; decoding continued past each one
    pub faults: Vec<Fault>,

    /// Whether the stream ended with an instruction in flight
    pub truncated: bool,
}

/// Decodes a byte slice without executing anything.
///
/// # Examples
///
/// ```
/// use sketchplot::{decode, Operation};
///
/// let stream = decode(&[0xC3, 0x05, 0x43]);
/// assert_eq!(stream.instructions.len(), 3);
/// assert_eq!(stream.instructions[0].operation, Operation::TogglePen);
/// assert_eq!(stream.instructions[2].to_string(), "MVY +3");
/// assert!(!stream.truncated);
/// ```
pub fn decode(bytes: &[u8]) -> DecodedStream {
    let mut decoder = Decoder::new();
    let mut stream = DecodedStream::default();

    for (offset, &byte) in bytes.iter().enumerate() {
        match decoder.decode_byte(byte) {
            Ok(Some(instr)) => stream.instructions.push(instr),
            Ok(None) => {}
            Err(error) => stream.faults.push(Fault { offset, error }),
        }
    }

    stream.truncated = !decoder.is_idle();
    stream
}
