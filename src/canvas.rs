use crate::color::Rgb;

/// A fixed set of display surfaces, each showing one solid color.
pub trait Canvas {
    fn surface_count(&self) -> usize;

    /// Sets `surface` to `color` and presents one frame.
    fn present(&mut self, surface: usize, color: Rgb);

    /// Whether the user asked to quit since the canvas was opened.
    fn quit_requested(&mut self) -> bool;
}
