//! Color module
//!
//! HSB color arithmetic, the time-driven palette cascade, and base-color crossfades.

pub mod hsb;
pub mod palette;
pub mod transition;

// Re-export main types
pub use hsb::{normalize_hue, Hsb, Rgb};
pub use palette::ColorPalette;
pub use transition::{ColorTransitionController, TransitionState};
