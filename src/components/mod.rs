//! UI components.

pub mod animated_background;
