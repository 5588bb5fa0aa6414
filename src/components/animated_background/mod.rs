//! Animated bubble background.
//!
//! Paints a full-viewport canvas behind the page with:
//! - A steady stream of bubbles rising from below the fold
//! - Bursts of small bubbles wherever the user clicks
//! - A capacity trim that keeps the ambient stream bounded
//! - Per-bubble completion so every bubble leaves exactly once
//!
//! The engine is independent of the browser: randomness and the viewport are
//! injected, and time is passed in explicitly.
//!
//! # Example
//!
//! ```ignore
//! use bubble_backdrop::{AnimatedBackground, BackgroundConfig};
//!
//! let config = BackgroundConfig { capacity: 60, ..Default::default() };
//! view! { <AnimatedBackground config=config /> }
//! ```

mod active_set;
mod component;
pub mod config;
mod emitter;
pub mod engine;
pub mod motion;
pub mod particles;
pub mod random;
pub mod reaper;
mod render;
pub mod theme;

pub use active_set::ActiveSet;
pub use component::AnimatedBackground;
pub use config::{BackgroundConfig, ConfigError};
pub use engine::BackgroundEngine;
pub use particles::{Particle, ParticleFactory, ParticleId};
pub use random::{RandomSource, Viewport, ViewportQuery};
pub use theme::Theme;
