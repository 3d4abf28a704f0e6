//! Fuzz target for playback.
//!
//! This target plays arbitrary streams with arbitrary options against the
//! recording surface and checks the session contract.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sketchplot::{play, PlaybackOptions, RecordingSurface, SurfaceCall};

/// Playback options for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzOptions {
    width: u32,
    height: u32,
    pause_unit_ms: u64,
    halt_on_fault: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    options: FuzzOptions,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = PlaybackOptions {
        width: input.options.width,
        height: input.options.height,
        pause_unit_ms: input.options.pause_unit_ms,
        halt_on_fault: input.options.halt_on_fault,
    };

    match play("fuzz", &input.bytes, options, RecordingSurface::open) {
        Ok((surface, report)) => {
            let calls = surface.calls();

            // Opened first, closed last, once
            assert!(matches!(calls.first(), Some(SurfaceCall::Open { .. })));
            assert_eq!(calls.last(), Some(&SurfaceCall::Close));
            assert_eq!(calls.iter().filter(|c| **c == SurfaceCall::Close).count(), 1);

            assert_eq!(report.bytes_read, input.bytes.len());
            assert!(report.instructions <= input.bytes.len());
        }
        Err(_) => {
            // Only a decode fault can stop a recording session
            assert!(input.options.halt_on_fault);
        }
    }
});
