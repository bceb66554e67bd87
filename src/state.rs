#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LoopState {
    Animating, // Fading surfaces in and out
    Quitting,  // Quit requested, surfaces about to be released
}
