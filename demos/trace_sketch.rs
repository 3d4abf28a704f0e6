//! Sketch tracing example
//!
//! Demonstrates decoding and playing a sketch without a window.
//!
//! This example shows:
//! - Listing a sketch with `decode()`
//! - Implementing the `Surface` trait
//! - Playing a stream through a `Player` and reading the report

use sketchplot::{decode, PlaybackOptions, Player, Position, Surface, SurfaceError};

/// Surface that prints each call instead of drawing.
struct TraceSurface {
    lines: usize,
}

impl Surface for TraceSurface {
    fn line(&mut self, from: Position, to: Position) {
        self.lines += 1;
        println!("  line  {} -> {}", from, to);
    }

    fn pause(&mut self, millis: u64) {
        println!("  pause {} ms", millis);
    }

    fn clear(&mut self) {
        println!("  clear");
    }

    fn wait_for_key(&mut self) {
        println!("  (would wait for a key)");
    }

    fn set_color(&mut self, color: i64) {
        println!("  color {}", color);
    }

    fn close(&mut self) -> Result<(), SurfaceError> {
        println!("  close ({} lines drawn)", self.lines);
        Ok(())
    }
}

fn main() {
    println!("Sketch Player - Trace Example");
    println!("=============================\n");

    // A 20x20 square in colour 0x0300, with a pause before the last side
    let sketch = [
        0xE6, 0x03, 0x00, 0x06, // colour 0x0300 (two operand bytes + trailer)
        0x0A, 0x4A, // move to (10, 10)
        0xC3, // pen down
        0x14, 0x40, // right 20
        0x40 | 0x14, // down 20
        0x2C, 0x40, // left 20 (-20 = 0x2C)
        0x85, // pause 5 ticks
        0x6C, // up 20
        0xC3, // pen up
    ];

    println!("Listing:");
    let stream = decode(&sketch);
    for instr in &stream.instructions {
        println!("  {}", instr);
    }
    println!();

    println!("Playback:");
    let open = |name: &str, width: u32, height: u32| -> Result<TraceSurface, SurfaceError> {
        println!("  open '{}' {}x{}", name, width, height);
        Ok(TraceSurface { lines: 0 })
    };

    let mut player = match Player::open("square", PlaybackOptions::default(), open) {
        Ok(player) => player,
        Err(e) => {
            eprintln!("Cannot open surface: {}", e);
            return;
        }
    };

    if let Err(e) = player.play(&sketch) {
        eprintln!("Playback stopped: {}", e);
    }

    match player.finish() {
        Ok((_, report)) => {
            println!();
            println!("Bytes read:   {}", report.bytes_read);
            println!("Instructions: {}", report.instructions);
            println!("Truncated:    {}", report.truncated);
        }
        Err(e) => eprintln!("Cannot close surface: {}", e),
    }
}
