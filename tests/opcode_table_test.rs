//! Opcode table validation tests
//!
//! Verifies that the opcode table and format revision are consistent.

use sketchplot::{Operation, OPCODE_TABLE, SKETCH_FORMAT};

#[test]
fn test_opcode_table_completeness() {
    assert_eq!(OPCODE_TABLE.len(), 16, "Opcode table must cover a 4-bit opcode");

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        assert!(
            !metadata.mnemonic.is_empty(),
            "Opcode 0x{:X} has empty mnemonic",
            opcode
        );
    }
}

#[test]
fn test_base_opcodes() {
    for opcode in 0..3 {
        let metadata = &OPCODE_TABLE[opcode];
        assert!(metadata.base, "Opcode {} should be base form", opcode);
        assert!(!metadata.extended, "Opcode {} should not be extended", opcode);
    }
}

#[test]
fn test_extended_opcodes() {
    let expected = [
        (3, Operation::TogglePen),
        (4, Operation::Clear),
        (5, Operation::WaitKey),
        (6, Operation::SetColor),
    ];

    for (opcode, operation) in expected {
        let metadata = &OPCODE_TABLE[opcode];
        assert_eq!(metadata.operation, Some(operation));
        assert!(metadata.extended);
        assert!(!metadata.base);
    }
}

#[test]
fn test_reserved_opcodes_marked() {
    let mut reserved_count = 0;

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.mnemonic == "???" {
            assert_eq!(metadata.operation, None, "Opcode {} is reserved", opcode);
            assert!(!metadata.base && !metadata.extended);
            reserved_count += 1;
        }
    }

    assert_eq!(reserved_count, 9);
}

#[test]
fn test_escape_is_not_a_base_operation() {
    let escape = SKETCH_FORMAT.escape_opcode as usize;
    assert!(!OPCODE_TABLE[escape].base);
}

#[test]
fn test_operation_mnemonics_unique() {
    let mut mnemonics: Vec<&str> = OPCODE_TABLE
        .iter()
        .filter_map(|m| m.operation.map(|op| op.mnemonic()))
        .collect();
    mnemonics.sort();
    mnemonics.dedup();
    assert_eq!(mnemonics.len(), 7);
}
