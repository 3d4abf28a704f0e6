//! Fuzz target for the decoder.
//!
//! This target feeds arbitrary byte sequences to the decoder to find edge
//! cases and crashes in extended-operand accumulation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sketchplot::{decode, Decoder, DecoderState};

fuzz_target!(|bytes: Vec<u8>| {
    // Limit input size to prevent OOM
    if bytes.len() > 65536 {
        return;
    }

    let mut decoder = Decoder::new();
    let mut events = 0usize;

    for &b in &bytes {
        match decoder.decode_byte(b) {
            Ok(Some(_)) | Err(_) => {
                events += 1;
                // Every event leaves the decoder idle
                assert!(decoder.is_idle());
            }
            Ok(None) => assert!(!decoder.is_idle()),
        }

        if let DecoderState::AwaitingOperandBytes(n) = decoder.state() {
            assert!((1..=4).contains(&n));
        }
    }

    // The batch decoder agrees with byte-at-a-time decoding
    let stream = decode(&bytes);
    assert_eq!(stream.instructions.len() + stream.faults.len(), events);
    assert_eq!(stream.truncated, !decoder.is_idle());
});
