//! Completion schedule for animating bubbles.
//!
//! Each spawn registers a deadline (`spawned_at + duration`). Once the clock
//! passes it, the bubble's id is handed back exactly once for removal. A
//! bubble that leaves early (capacity eviction) is cancelled; its heap entry
//! stays behind and is skipped when it surfaces.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::particles::{Particle, ParticleId};

/// Pending removal, ordered earliest-deadline-first in the heap.
#[derive(Clone, Copy, Debug)]
struct Deadline {
	at: f64,
	id: ParticleId,
}

impl PartialEq for Deadline {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Deadline {}

impl PartialOrd for Deadline {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Deadline {
	// Reversed so `BinaryHeap` (a max-heap) pops the soonest deadline first.
	fn cmp(&self, other: &Self) -> Ordering {
		other.at.total_cmp(&self.at).then_with(|| other.id.cmp(&self.id))
	}
}

/// Tracks start times and completion deadlines of live bubbles.
#[derive(Debug, Default)]
pub struct Reaper {
	queue: BinaryHeap<Deadline>,
	/// Start time per scheduled bubble. Presence means "not yet reaped".
	started: HashMap<ParticleId, f64>,
}

impl Reaper {
	/// Reaper with nothing scheduled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Begin tracking a bubble spawned at `now` (seconds).
	pub fn schedule(&mut self, particle: &Particle, now: f64) {
		if self.started.contains_key(&particle.id) {
			return;
		}
		self.started.insert(particle.id, now);
		self.queue.push(Deadline {
			at: now + particle.duration,
			id: particle.id,
		});
	}

	/// Stop tracking a bubble that left the set by other means.
	pub fn cancel(&mut self, id: ParticleId) {
		self.started.remove(&id);
	}

	/// When the bubble started animating, if it is still tracked.
	pub fn started_at(&self, id: ParticleId) -> Option<f64> {
		self.started.get(&id).copied()
	}

	/// Pop every bubble whose deadline is at or before `now`.
	///
	/// Each id is returned at most once over the reaper's lifetime.
	pub fn due(&mut self, now: f64) -> Vec<ParticleId> {
		let mut due = Vec::new();
		while let Some(next) = self.queue.peek() {
			if next.at > now {
				break;
			}
			let Some(deadline) = self.queue.pop() else {
				break;
			};
			if self.started.remove(&deadline.id).is_some() {
				due.push(deadline.id);
			}
		}
		due
	}

	/// Number of bubbles still awaiting completion.
	pub fn pending(&self) -> usize {
		self.started.len()
	}

	/// Forget every pending deadline.
	pub fn clear(&mut self) {
		self.queue.clear();
		self.started.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::animated_background::config::BackgroundConfig;
	use crate::components::animated_background::particles::ParticleFactory;
	use crate::components::animated_background::particles::tests::{SCREEN, Seeded};

	fn particles(n: usize) -> Vec<Particle> {
		let mut factory = ParticleFactory::new(Seeded::new(11), SCREEN, BackgroundConfig::default());
		(0..n).map(|_| factory.create(None, false)).collect()
	}

	#[test]
	fn test_nothing_due_before_duration() {
		let p = particles(1).remove(0);
		let mut reaper = Reaper::new();
		reaper.schedule(&p, 10.0);

		assert!(reaper.due(10.0 + p.duration - 0.001).is_empty());
		assert_eq!(reaper.due(10.0 + p.duration), vec![p.id]);
	}

	#[test]
	fn test_each_id_reaped_exactly_once() {
		let all = particles(20);
		let mut reaper = Reaper::new();
		for p in &all {
			reaper.schedule(p, 0.0);
		}

		let mut reaped = reaper.due(60.0);
		reaped.extend(reaper.due(120.0));
		reaped.sort();
		let mut expected: Vec<_> = all.iter().map(|p| p.id).collect();
		expected.sort();
		assert_eq!(reaped, expected);
		assert_eq!(reaper.pending(), 0);
	}

	#[test]
	fn test_due_in_deadline_order() {
		let all = particles(10);
		let mut reaper = Reaper::new();
		for p in &all {
			reaper.schedule(p, 0.0);
		}
		let reaped = reaper.due(100.0);

		let duration_of = |id: ParticleId| all.iter().find(|p| p.id == id).unwrap().duration;
		for pair in reaped.windows(2) {
			assert!(duration_of(pair[0]) <= duration_of(pair[1]));
		}
	}

	#[test]
	fn test_cancelled_deadline_is_skipped() {
		let all = particles(2);
		let mut reaper = Reaper::new();
		reaper.schedule(&all[0], 0.0);
		reaper.schedule(&all[1], 0.0);
		reaper.cancel(all[0].id);

		assert_eq!(reaper.due(100.0), vec![all[1].id]);
	}

	#[test]
	fn test_double_schedule_is_ignored() {
		let p = particles(1).remove(0);
		let mut reaper = Reaper::new();
		reaper.schedule(&p, 0.0);
		reaper.schedule(&p, 5.0);

		assert_eq!(reaper.started_at(p.id), Some(0.0));
		assert_eq!(reaper.due(100.0), vec![p.id]);
		assert!(reaper.due(200.0).is_empty());
	}

	#[test]
	fn test_clear_drops_everything() {
		let all = particles(5);
		let mut reaper = Reaper::new();
		for p in &all {
			reaper.schedule(p, 0.0);
		}
		reaper.clear();
		assert_eq!(reaper.pending(), 0);
		assert!(reaper.due(1000.0).is_empty());
	}
}
