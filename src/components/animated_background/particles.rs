//! Bubble records and the factory that spawns them.

use std::fmt;

use super::config::BackgroundConfig;
use super::random::{RandomSource, ViewportQuery};

/// Identity of a spawned bubble. Allocated monotonically, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(u64);

impl fmt::Display for ParticleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "bubble#{}", self.0)
	}
}

/// A single rising bubble. Fixed at creation; animation progress is tracked
/// by the reaper, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Unique identity, stable for the bubble's lifetime.
	pub id: ParticleId,
	/// Diameter in pixels.
	pub size: f64,
	/// Left edge at spawn, in pixels.
	pub origin_x: f64,
	/// Top edge at spawn, in pixels.
	pub origin_y: f64,
	/// Lifetime of the rise in seconds.
	pub duration: f64,
	/// Signed horizontal drift reached by the end of the rise.
	pub wobble: f64,
	/// Peak opacity.
	pub opacity: f64,
	/// Spawned by a click burst rather than the ambient timer.
	pub small: bool,
}

/// Builds bubbles from injected randomness and viewport queries.
pub struct ParticleFactory<R, V> {
	rng: R,
	viewport: V,
	config: BackgroundConfig,
	next_id: u64,
}

impl<R: RandomSource, V: ViewportQuery> ParticleFactory<R, V> {
	/// Factory whose ids start at zero.
	pub fn new(rng: R, viewport: V, config: BackgroundConfig) -> Self {
		Self {
			rng,
			viewport,
			config,
			next_id: 0,
		}
	}

	/// Spawn a bubble.
	///
	/// Without an origin the bubble starts at a random x just below the bottom
	/// edge of the viewport; with one it starts exactly there.
	pub fn create(&mut self, origin: Option<(f64, f64)>, small: bool) -> Particle {
		let size_span = self.config.size_span(small);
		let size = self.rng.uniform(size_span.min, size_span.max);

		let (origin_x, origin_y) = origin.unwrap_or_else(|| {
			let viewport = self.viewport.viewport();
			(
				self.rng.uniform(0.0, viewport.width.max(1.0)),
				viewport.height + size,
			)
		});

		let duration = self.rng.uniform(self.config.duration.min, self.config.duration.max);
		let wobble = self.rng.uniform(self.config.wobble.min, self.config.wobble.max);
		let opacity = self.rng.uniform(self.config.opacity.min, self.config.opacity.max);

		let id = ParticleId(self.next_id);
		self.next_id += 1;

		Particle {
			id,
			size,
			origin_x,
			origin_y,
			duration,
			wobble,
			opacity,
			small,
		}
	}

	/// Number of bubbles a single click releases.
	pub fn burst_count(&mut self) -> u32 {
		self.rng.uniform_int(self.config.burst.min, self.config.burst.max)
	}
}
