//! # Bit-Field Codec
//!
//! Pure helpers that pull opcode and operand fields out of a sketch byte and
//! convert raw operand bits into signed values.
//!
//! ## Byte Layout
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! +-------+-----------------------+
//! |  op   |   operand (signed 6)  |   base form (op 0-2)
//! +-------+-------+---------------+
//! |  1 1  |  len  |  ext opcode   |   extended prefix (op 3)
//! +-------+-------+---------------+
//! ```

/// Mask selecting the base opcode bits (7-6).
pub const BASE_OPCODE_MASK: u8 = 0xC0;

/// Mask selecting the extended opcode bits (3-0).
pub const EXTENDED_OPCODE_MASK: u8 = 0x0F;

/// Mask selecting the raw operand bits (5-0).
pub const OPERAND_MASK: u8 = 0x3F;

/// Mask selecting the length-code bits (5-4) of an extended prefix.
pub const LENGTH_CODE_MASK: u8 = 0x30;

/// Extracts the opcode from a byte.
///
/// Outside extended mode this is the 2-bit base opcode in bits 7-6 (0-3).
/// In extended mode it is the 4-bit extended opcode in bits 3-0 (0-15).
///
/// # Examples
///
/// ```
/// use sketchplot::bitfield::opcode;
///
/// assert_eq!(opcode(0x56, false), 1);
/// assert_eq!(opcode(0xFF, false), 3);
/// assert_eq!(opcode(0xD6, true), 6);
/// ```
pub fn opcode(byte: u8, extended: bool) -> u8 {
    if extended {
        byte & EXTENDED_OPCODE_MASK
    } else {
        (byte & BASE_OPCODE_MASK) >> 6
    }
}

/// Returns bits 5-0 of `byte` as an unsigned value (0-63).
pub fn raw_operand(byte: u8) -> u8 {
    byte & OPERAND_MASK
}

/// Returns the 2-bit length code (bits 5-4) of an extended prefix byte.
pub fn length_code(byte: u8) -> u8 {
    (byte & LENGTH_CODE_MASK) >> 4
}

/// Sign-extends a 6-bit base operand.
///
/// Values above 31 are negative in two's complement, so 32 maps to -32 and
/// 63 maps to -1.
///
/// # Examples
///
/// ```
/// use sketchplot::bitfield::sign_extend_base;
///
/// assert_eq!(sign_extend_base(31), 31);
/// assert_eq!(sign_extend_base(32), -32);
/// assert_eq!(sign_extend_base(63), -1);
/// ```
pub fn sign_extend_base(raw: u8) -> i64 {
    let raw = (raw & OPERAND_MASK) as i64;
    if raw > 31 {
        raw - 64
    } else {
        raw
    }
}

/// Decodes the signed base operand of a one-byte instruction.
pub fn base_operand(byte: u8) -> i64 {
    sign_extend_base(raw_operand(byte))
}

/// Sign-extends an extended operand of `bit_width` bits.
///
/// The sketch format treats any value `>= 2^(bit_width-1) - 1` as negative.
/// Note the threshold: the largest positive value (`max`) is read back as
/// `max - 2^bit_width`, not as itself. Existing sketch files depend on this,
/// so it is kept as-is.
///
/// The result is `i64` because a 32-bit operand of `0x7FFF_FFFF` becomes
/// `-2^31 - 1`, one below `i32::MIN`.
///
/// `bit_width` must be in `1..=32`.
///
/// # Examples
///
/// ```
/// use sketchplot::bitfield::sign_extend;
///
/// assert_eq!(sign_extend(65396, 16), -140);
/// assert_eq!(sign_extend(5, 4), 5);
/// assert_eq!(sign_extend(7, 4), -9); // the boundary quirk
/// ```
pub fn sign_extend(value: u32, bit_width: u32) -> i64 {
    debug_assert!((1..=32).contains(&bit_width));

    let value = value as i64;
    let max = (1i64 << (bit_width - 1)) - 1;
    if value >= max {
        value - (1i64 << bit_width)
    } else {
        value
    }
}
