//! # Instruction Format Table
//!
//! This module holds the single source of truth for the sketch instruction
//! format: which opcode values exist, which encoding form reaches them, and how
//! an extended prefix's length code maps to an operand byte count.
//!
//! The table covers:
//! - **3 base operations** (opcodes 0-2) - one byte, signed 6-bit operand
//! - **4 extended operations** (opcodes 3-6) - escaped via base opcode 3
//! - **9 reserved values** (opcodes 7-15) - marked with "???" mnemonic
//!
//! Protocol revisions are described by a [`Format`] value, so the decoder
//! changes behaviour through data rather than branching.

use std::fmt;

/// A drawing operation carried by a resolved instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Move the pen horizontally by the operand.
    MoveX,
    /// Move the pen vertically by the operand, drawing if the pen is down.
    MoveY,
    /// Pause for the operand in tens of milliseconds.
    Pause,
    /// Flip the pen between up and down.
    TogglePen,
    /// Clear the surface.
    Clear,
    /// Block until a key is pressed.
    WaitKey,
    /// Select the drawing colour.
    SetColor,
}

impl Operation {
    /// Returns the opcode value of this operation.
    pub fn code(self) -> u8 {
        match self {
            Operation::MoveX => 0,
            Operation::MoveY => 1,
            Operation::Pause => 2,
            Operation::TogglePen => 3,
            Operation::Clear => 4,
            Operation::WaitKey => 5,
            Operation::SetColor => 6,
        }
    }

    /// Looks up the operation for an opcode value, if one is assigned.
    pub fn from_code(code: u8) -> Option<Operation> {
        OPCODE_TABLE.get(code as usize).and_then(|m| m.operation)
    }

    /// Returns the listing mnemonic for this operation.
    pub fn mnemonic(self) -> &'static str {
        OPCODE_TABLE[self.code() as usize].mnemonic
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// The encoding an instruction arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// One byte: 2-bit opcode and signed 6-bit operand.
    Base,
    /// Escape prefix, optional big-endian operand bytes, and a trailer byte.
    Extended,
}

/// Metadata for a single sketch opcode value.
///
/// # Examples
///
/// ```
/// use sketchplot::{Operation, OPCODE_TABLE};
///
/// let color = &OPCODE_TABLE[6];
/// assert_eq!(color.mnemonic, "COL");
/// assert_eq!(color.operation, Some(Operation::SetColor));
/// assert!(color.extended);
/// assert!(!color.base);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Listing mnemonic ("???" for reserved values).
    pub mnemonic: &'static str,

    /// Operation performed, `None` for reserved values.
    pub operation: Option<Operation>,

    /// Reachable through the one-byte base form.
    pub base: bool,

    /// Reachable through the extended escape prefix.
    pub extended: bool,
}

const RESERVED: OpcodeMetadata = OpcodeMetadata {
    mnemonic: "???",
    operation: None,
    base: false,
    extended: false,
};

/// 16-entry opcode table indexed by opcode value.
///
/// Base opcodes share the low end of the space with the extended opcodes, but
/// each value is reachable through exactly one form. An extended instruction
/// that resolves to a base-only or reserved value is a decode fault.
pub const OPCODE_TABLE: [OpcodeMetadata; 16] = [
    // 0x0
    OpcodeMetadata {
        mnemonic: "MVX",
        operation: Some(Operation::MoveX),
        base: true,
        extended: false,
    },
    // 0x1
    OpcodeMetadata {
        mnemonic: "MVY",
        operation: Some(Operation::MoveY),
        base: true,
        extended: false,
    },
    // 0x2
    OpcodeMetadata {
        mnemonic: "PAU",
        operation: Some(Operation::Pause),
        base: true,
        extended: false,
    },
    // 0x3
    OpcodeMetadata {
        mnemonic: "PEN",
        operation: Some(Operation::TogglePen),
        base: false,
        extended: true,
    },
    // 0x4
    OpcodeMetadata {
        mnemonic: "CLR",
        operation: Some(Operation::Clear),
        base: false,
        extended: true,
    },
    // 0x5
    OpcodeMetadata {
        mnemonic: "KEY",
        operation: Some(Operation::WaitKey),
        base: false,
        extended: true,
    },
    // 0x6
    OpcodeMetadata {
        mnemonic: "COL",
        operation: Some(Operation::SetColor),
        base: false,
        extended: true,
    },
    // 0x7 - 0xF
    RESERVED, RESERVED, RESERVED, RESERVED, RESERVED, RESERVED, RESERVED, RESERVED, RESERVED,
];

/// Describes one revision of the sketch wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Operand byte count for each 2-bit length code (at most 4).
    pub length_table: [u8; 4],

    /// Base opcode that escapes into the extended form.
    pub escape_opcode: u8,

    /// Whether the trailer byte's low nibble replaces the prefix opcode at
    /// resolution time.
    pub trailer_sets_opcode: bool,
}

impl Format {
    /// Largest operand the decoder's accumulator can hold, in bytes.
    pub const MAX_OPERAND_LEN: u8 = 4;

    /// Checks that the decoder can run this revision.
    ///
    /// Every length entry must fit the 32-bit accumulator and the escape must
    /// be a 2-bit base opcode.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchplot::{Format, FormatError, SKETCH_FORMAT};
    ///
    /// assert_eq!(SKETCH_FORMAT.validate(), Ok(()));
    ///
    /// let wide = Format {
    ///     length_table: [0, 1, 2, 8],
    ///     ..SKETCH_FORMAT
    /// };
    /// assert_eq!(
    ///     wide.validate(),
    ///     Err(FormatError::OperandTooLong { code: 3, len: 8 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.escape_opcode > 3 {
            return Err(FormatError::EscapeOutOfRange(self.escape_opcode));
        }
        for (code, &len) in self.length_table.iter().enumerate() {
            if len > Self::MAX_OPERAND_LEN {
                return Err(FormatError::OperandTooLong {
                    code: code as u8,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Returns the operand byte count for a length code.
    ///
    /// Only the low two bits of `code` are used.
    pub fn operand_len(&self, code: u8) -> u8 {
        self.length_table[(code & 0x03) as usize]
    }
}

/// Reasons a [`Format`] cannot drive a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// A length code maps to more operand bytes than the accumulator holds.
    OperandTooLong {
        /// Length code with the bad entry
        code: u8,
        /// Operand byte count it maps to
        len: u8,
    },

    /// The escape is not a 2-bit base opcode.
    EscapeOutOfRange(u8),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::OperandTooLong { code, len } => write!(
                f,
                "Length code {} maps to {} operand bytes (at most {})",
                code,
                len,
                Format::MAX_OPERAND_LEN
            ),
            FormatError::EscapeOutOfRange(op) => {
                write!(f, "Escape opcode {} is not a base opcode (0-3)", op)
            }
        }
    }
}

impl std::error::Error for FormatError {}

impl Default for Format {
    fn default() -> Self {
        SKETCH_FORMAT
    }
}

/// The current sketch format.
///
/// Length code 3 selects four bytes, not three, so a 2-bit field can reach
/// 32-bit operands.
pub const SKETCH_FORMAT: Format = Format {
    length_table: [0, 1, 2, 4],
    escape_opcode: 3,
    trailer_sets_opcode: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_codes_round_trip() {
        for code in 0..16u8 {
            if let Some(op) = Operation::from_code(code) {
                assert_eq!(op.code(), code);
            }
        }
    }

    #[test]
    fn test_forms_are_disjoint() {
        for metadata in OPCODE_TABLE.iter() {
            assert!(!(metadata.base && metadata.extended));
        }
    }

    #[test]
    fn test_length_table_skips_three() {
        assert_eq!(SKETCH_FORMAT.operand_len(0), 0);
        assert_eq!(SKETCH_FORMAT.operand_len(1), 1);
        assert_eq!(SKETCH_FORMAT.operand_len(2), 2);
        assert_eq!(SKETCH_FORMAT.operand_len(3), 4);
    }

    #[test]
    fn test_escape_must_be_base_opcode() {
        let format = Format {
            escape_opcode: 4,
            ..SKETCH_FORMAT
        };
        assert_eq!(format.validate(), Err(FormatError::EscapeOutOfRange(4)));
    }
}
