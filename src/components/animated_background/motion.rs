//! Visual state of a bubble over its lifetime.
//!
//! A bubble rises linearly from its origin to just above the top edge,
//! drifting sideways by its wobble and fading in to its target opacity. Scale
//! pulses through three evenly spaced keyframes.

use super::particles::Particle;

/// Scale shown at the spawn instant, before the pulse begins.
pub const INITIAL_SCALE: f64 = 0.8;

/// Scale keyframes spread evenly over the rise.
pub const SCALE_KEYFRAMES: [f64; 3] = [0.9, 1.05, 0.95];

/// Where and how a bubble is drawn at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
	/// Left edge of the bounding box in pixels.
	pub x: f64,
	/// Top edge of the bounding box in pixels.
	pub y: f64,
	/// Alpha applied to the whole bubble.
	pub opacity: f64,
	/// Scale about the bounding box center.
	pub scale: f64,
}

impl VisualState {
	/// State at the spawn instant.
	pub fn initial(particle: &Particle) -> Self {
		Self {
			x: particle.origin_x,
			y: particle.origin_y,
			opacity: 0.0,
			scale: INITIAL_SCALE,
		}
	}

	/// State at `progress` (clamped to `[0, 1]`).
	pub fn at(particle: &Particle, progress: f64) -> Self {
		let t = progress.clamp(0.0, 1.0);
		if t <= 0.0 {
			return Self::initial(particle);
		}
		Self {
			x: lerp(particle.origin_x, particle.origin_x + particle.wobble, t),
			y: lerp(particle.origin_y, -particle.size, t),
			opacity: lerp(0.0, particle.opacity, t),
			scale: keyframes(&SCALE_KEYFRAMES, t),
		}
	}

	/// Final state, reached when the rise completes.
	pub fn settled(particle: &Particle) -> Self {
		Self::at(particle, 1.0)
	}
}

/// Fraction of the rise completed at `now` for a bubble started at `started_at`.
pub fn progress(particle: &Particle, started_at: f64, now: f64) -> f64 {
	((now - started_at) / particle.duration).clamp(0.0, 1.0)
}

/// A bubble removed before finishing its rise, fading out from where it was.
#[derive(Clone, Debug)]
pub struct ExitFade {
	/// The removed bubble.
	pub particle: Particle,
	/// State captured at the moment of removal.
	pub from: VisualState,
	/// When the fade began, in seconds.
	pub started_at: f64,
	/// Fade length in seconds.
	pub duration: f64,
}

impl ExitFade {
	/// Start fading `particle` out from `from` at `started_at`.
	pub fn new(particle: Particle, from: VisualState, started_at: f64, duration: f64) -> Self {
		Self {
			particle,
			from,
			started_at,
			duration,
		}
	}

	/// Current state; position and scale freeze while opacity drops to zero.
	pub fn state(&self, now: f64) -> VisualState {
		let t = if self.duration <= 0.0 {
			1.0
		} else {
			((now - self.started_at) / self.duration).clamp(0.0, 1.0)
		};
		VisualState {
			opacity: lerp(self.from.opacity, 0.0, t),
			..self.from
		}
	}

	/// Whether the bubble has fully faded.
	pub fn is_finished(&self, now: f64) -> bool {
		now - self.started_at >= self.duration
	}
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Piecewise-linear interpolation through evenly spaced keyframes.
fn keyframes(frames: &[f64], t: f64) -> f64 {
	match frames {
		[] => 1.0,
		[only] => *only,
		_ => {
			let segments = (frames.len() - 1) as f64;
			let position = t.clamp(0.0, 1.0) * segments;
			let index = (position.floor() as usize).min(frames.len() - 2);
			lerp(frames[index], frames[index + 1], position - index as f64)
		}
	}
}
