//! The live bubble collection and its evict-oldest capacity policy.

use std::collections::VecDeque;

use super::particles::{Particle, ParticleId};

/// Most slots reserved up front, whatever the capacity.
const PREALLOCATE_MAX: usize = 256;

/// Insertion-ordered set of bubbles still animating.
///
/// Order only matters for the capacity trim, which evicts from the front.
/// Bursts bypass the trim, so the set can temporarily exceed its capacity
/// after rapid clicking.
#[derive(Debug)]
pub struct ActiveSet {
	particles: VecDeque<Particle>,
	capacity: usize,
}

impl ActiveSet {
	/// Empty set that trims ambient appends down to `capacity`.
	pub fn new(capacity: usize) -> Self {
		Self {
			particles: VecDeque::with_capacity(capacity.saturating_add(1).min(PREALLOCATE_MAX)),
			capacity,
		}
	}

	/// Add one bubble at the back, then evict the oldest members until the
	/// set is back within capacity. Returns the evicted bubbles, oldest first.
	pub fn append(&mut self, particle: Particle) -> Vec<Particle> {
		self.particles.push_back(particle);
		let overflow = self.particles.len().saturating_sub(self.capacity);
		self.particles.drain(..overflow).collect()
	}

	/// Add a batch without trimming.
	pub fn append_many(&mut self, particles: impl IntoIterator<Item = Particle>) {
		self.particles.extend(particles);
	}

	/// Remove the bubble with `id`. Absent ids are ignored.
	pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
		let index = self.particles.iter().position(|p| p.id == id)?;
		self.particles.remove(index)
	}

	/// Whether a bubble with `id` is live.
	pub fn contains(&self, id: ParticleId) -> bool {
		self.particles.iter().any(|p| p.id == id)
	}

	/// Live bubbles, oldest first.
	pub fn iter(&self) -> impl Iterator<Item = &Particle> {
		self.particles.iter()
	}

	/// Number of live bubbles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True when nothing is live.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Drop every member without reporting evictions.
	pub fn clear(&mut self) {
		self.particles.clear();
	}
}
