//! Bit-field codec tests
//!
//! Verifies opcode/operand extraction over every byte value and the two
//! sign-extension rules.

use sketchplot::bitfield::{
    base_operand, length_code, opcode, raw_operand, sign_extend, sign_extend_base,
};
use sketchplot::SKETCH_FORMAT;

// ========== Field Extraction ==========

#[test]
fn test_fields_for_every_byte() {
    for b in 0..=255u8 {
        assert_eq!(opcode(b, false), (b >> 6) & 0x3, "base opcode of 0x{:02X}", b);
        assert_eq!(opcode(b, true), b & 0x0F, "extended opcode of 0x{:02X}", b);
        assert_eq!(raw_operand(b), b & 0x3F, "raw operand of 0x{:02X}", b);
        assert_eq!(length_code(b), (b >> 4) & 0x3, "length code of 0x{:02X}", b);
    }
}

#[test]
fn test_documented_extraction_pairs() {
    let pairs = [(0x00, 0, 0), (0x56, 1, 22), (0x9D, 2, 29), (0xFF, 3, -1)];

    for (byte, op, operand) in pairs {
        assert_eq!(opcode(byte, false), op);
        assert_eq!(base_operand(byte), operand);
    }
}

// ========== Sign Extension ==========

#[test]
fn test_base_sign_extension() {
    assert_eq!(sign_extend_base(0), 0);
    assert_eq!(sign_extend_base(31), 31);
    assert_eq!(sign_extend_base(32), -32);
    assert_eq!(sign_extend_base(63), -1);
}

#[test]
fn test_base_sign_extension_covers_full_range() {
    let values: Vec<i64> = (0..64u8).map(sign_extend_base).collect();
    assert_eq!(*values.iter().min().unwrap(), -32);
    assert_eq!(*values.iter().max().unwrap(), 31);
}

#[test]
fn test_extended_sign_extension() {
    assert_eq!(sign_extend(65396, 16), -140);
    assert_eq!(sign_extend(2398, 12), -1698);
    assert_eq!(sign_extend(14, 4), -2);
    assert_eq!(sign_extend(5, 4), 5);
}

#[test]
fn test_extended_threshold_includes_max() {
    // max = 2^(w-1) - 1 is read back as negative
    assert_eq!(sign_extend(0x7F, 8), 0x7F - 0x100);
    assert_eq!(sign_extend(0x7FFF, 16), 0x7FFF - 0x10000);
    assert_eq!(sign_extend(0x7E, 8), 0x7E);
    assert_eq!(sign_extend(0, 8), 0);
}

// ========== Length Codes ==========

#[test]
fn test_length_code_mapping() {
    let lengths: Vec<u8> = (0..4).map(|code| SKETCH_FORMAT.operand_len(code)).collect();
    assert_eq!(lengths, vec![0, 1, 2, 4]);
    assert!(!lengths.contains(&3));
}
