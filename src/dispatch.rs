//! # Command Dispatcher
//!
//! Executes resolved instructions: updates the [`Plotter`] and calls into the
//! [`Surface`]. Each operation is a standalone function taking the plotter, the
//! operand and the surface.
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | MoveX     | `current.x += operand` |
//! | MoveY     | `current.y += operand`, line from `previous` if pen down, `previous = current` |
//! | Pause     | pause `operand * pause_unit_ms` |
//! | TogglePen | flip the pen |
//! | Clear     | clear the surface |
//! | WaitKey   | block until a key is pressed |
//! | SetColor  | select colour `operand` |

use crate::opcodes::{Form, Operation};
use crate::session::PlaybackOptions;
use crate::{Instruction, Plotter, Surface};

/// Executes one instruction.
///
/// # Examples
///
/// ```
/// use sketchplot::{dispatch, Form, Instruction, Operation, PlaybackOptions, Plotter, Position,
///                  RecordingSurface};
///
/// let mut plotter = Plotter::new();
/// let mut surface = RecordingSurface::open("demo", 200, 200).unwrap();
/// let options = PlaybackOptions::default();
///
/// dispatch(&mut plotter, &Instruction::new(Operation::MoveX, 4, Form::Base), &mut surface, &options);
/// assert_eq!(plotter.current(), Position::new(4, 0));
/// ```
pub fn dispatch<S: Surface + ?Sized>(
    plotter: &mut Plotter,
    instr: &Instruction,
    surface: &mut S,
    options: &PlaybackOptions,
) {
    match instr.operation {
        Operation::MoveX => execute_move_x(plotter, instr.operand),
        Operation::MoveY => execute_move_y(plotter, instr.operand, surface),
        Operation::Pause => execute_pause(instr, surface, options),
        Operation::TogglePen => execute_toggle_pen(plotter),
        Operation::Clear => surface.clear(),
        Operation::WaitKey => surface.wait_for_key(),
        Operation::SetColor => surface.set_color(instr.operand),
    }
}

fn execute_move_x(plotter: &mut Plotter, operand: i64) {
    plotter.current.x = plotter.current.x.wrapping_add(operand);
}

fn execute_move_y<S: Surface + ?Sized>(plotter: &mut Plotter, operand: i64, surface: &mut S) {
    plotter.current.y = plotter.current.y.wrapping_add(operand);
    if plotter.pen_down {
        surface.line(plotter.previous, plotter.current);
    }
    plotter.previous = plotter.current;
}

fn execute_pause<S: Surface + ?Sized>(
    instr: &Instruction,
    surface: &mut S,
    options: &PlaybackOptions,
) {
    // A base-form pause count is unsigned; undo the 6-bit sign extension.
    let mut count = instr.operand;
    if instr.form == Form::Base && count < 0 {
        count += 64;
    }

    let millis = (count.max(0) as u64).saturating_mul(options.pause_unit_ms);
    surface.pause(millis);
}

fn execute_toggle_pen(plotter: &mut Plotter) {
    plotter.pen_down = !plotter.pen_down;
}
