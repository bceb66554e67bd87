use log::trace;

use crate::canvas::Canvas;
use crate::color::{Rgb, fade_step};

/// Fades `surface` from `from` to `to`, one presented frame per step.
///
/// Returns the number of frames presented. A fade between equal colors
/// presents nothing.
pub fn fade<C: Canvas + ?Sized>(
    canvas: &mut C,
    surface: usize,
    from: Rgb,
    to: Rgb,
    step: u8,
) -> usize {
    let mut current = from;
    let mut frames = 0;
    while current != to {
        current = fade_step(current, to, step);
        canvas.present(surface, current);
        frames += 1;
    }
    trace!("surface {surface}: {from} -> {to} in {frames} frames");
    frames
}
