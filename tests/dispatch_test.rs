//! Command dispatcher tests
//!
//! Drives the plotter through whole byte streams and checks the calls that
//! reach the surface.

use sketchplot::{
    play, PlaybackOptions, PlaybackReport, Position, RecordingSurface, SurfaceCall,
};

/// Plays bytes with default options and returns the recorder.
fn run(bytes: &[u8]) -> (RecordingSurface, PlaybackReport) {
    play("test", bytes, PlaybackOptions::default(), RecordingSurface::open).unwrap()
}

/// Recorded calls without the Open/Close bookends.
fn body(surface: &RecordingSurface) -> Vec<SurfaceCall> {
    let calls = surface.calls();
    calls[1..calls.len() - 1].to_vec()
}

// ========== Drawing ==========

#[test]
fn test_draw_on_pen_down() {
    // pen down, x +5, y +3, y +2
    let (surface, _) = run(&[0xC3, 0x05, 0x43, 0x42]);

    assert_eq!(
        surface.lines(),
        vec![
            (Position::new(0, 0), Position::new(5, 3)),
            (Position::new(5, 3), Position::new(5, 5)),
        ]
    );
}

#[test]
fn test_no_lines_while_pen_up() {
    let (surface, report) = run(&[0x05, 0x43, 0x42, 0x3B, 0x7F]);

    assert_eq!(report.instructions, 5);
    assert!(surface.lines().is_empty());
}

#[test]
fn test_move_x_alone_never_draws() {
    let (surface, _) = run(&[0xC3, 0x05, 0x05, 0x3F]);
    assert!(surface.lines().is_empty());
}

#[test]
fn test_pen_up_move_sets_line_start() {
    // y +4 with pen up, then pen down, x +2, y +1
    let (surface, _) = run(&[0x44, 0xC3, 0x02, 0x41]);

    assert_eq!(
        surface.lines(),
        vec![(Position::new(0, 4), Position::new(2, 5))]
    );
}

#[test]
fn test_negative_moves() {
    // pen down, x -3, y -32
    let (surface, _) = run(&[0xC3, 0x3D, 0x60]);

    assert_eq!(
        surface.lines(),
        vec![(Position::new(0, 0), Position::new(-3, -32))]
    );
}

#[test]
fn test_toggle_pen_twice_is_idempotent() {
    let (surface, _) = run(&[0xC3, 0xC3, 0x05, 0x43]);

    assert!(surface.lines().is_empty());
    assert!(body(&surface).is_empty());
}

// ========== Timing and Control ==========

#[test]
fn test_pause_scales_by_ten() {
    // pause 29, pause raw 63 (-1 -> 63)
    let (surface, _) = run(&[0x9D, 0xBF]);

    assert_eq!(
        body(&surface),
        vec![
            SurfaceCall::Pause { millis: 290 },
            SurfaceCall::Pause { millis: 630 },
        ]
    );
}

#[test]
fn test_pause_unit_is_configurable() {
    let options = PlaybackOptions {
        pause_unit_ms: 1,
        ..PlaybackOptions::default()
    };
    let (surface, _) = play("t", &[0x85], options, RecordingSurface::open).unwrap();

    assert_eq!(surface.calls()[1], SurfaceCall::Pause { millis: 5 });
}

#[test]
fn test_clear_wait_and_color() {
    // clear, wait key, colour 3 (one byte), colour 0 (no operand)
    let (surface, _) = run(&[0xC4, 0xC5, 0xD6, 0x03, 0x06, 0xC6]);

    assert_eq!(
        body(&surface),
        vec![
            SurfaceCall::Clear,
            SurfaceCall::WaitForKey,
            SurfaceCall::SetColor { color: 3 },
            SurfaceCall::SetColor { color: 0 },
        ]
    );
}

#[test]
fn test_long_extended_operand_ignored_by_pen_toggle() {
    // Toggle-pen carrying a two-byte operand still just toggles
    let (surface, _) = run(&[0xE3, 0x12, 0x34, 0x03, 0x05, 0x41]);

    assert_eq!(
        surface.lines(),
        vec![(Position::new(0, 0), Position::new(5, 1))]
    );
}
