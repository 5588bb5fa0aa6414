//! Bubble engine: spawning, capacity trimming, completion and teardown.
//!
//! The engine owns every piece of mutable state behind the background. It is
//! clock-agnostic: callers pass `now` in seconds, which keeps the ambient
//! timer, the click handler and the frame loop independent of each other and
//! lets tests drive time by hand.

use log::{debug, trace};

use super::active_set::ActiveSet;
use super::config::BackgroundConfig;
use super::motion::{self, ExitFade, VisualState};
use super::particles::{Particle, ParticleFactory, ParticleId};
use super::random::{RandomSource, ViewportQuery};
use super::reaper::Reaper;

/// Owns the active set and everything that mutates it.
pub struct BackgroundEngine<R, V> {
	factory: ParticleFactory<R, V>,
	active: ActiveSet,
	reaper: Reaper,
	exits: Vec<ExitFade>,
	exit_fade_secs: f64,
	torn_down: bool,
}

impl<R: RandomSource, V: ViewportQuery> BackgroundEngine<R, V> {
	/// Engine with an empty set, sized by `config.capacity`.
	pub fn new(rng: R, viewport: V, config: BackgroundConfig) -> Self {
		let active = ActiveSet::new(config.capacity);
		let exit_fade_secs = config.exit_fade_secs;
		Self {
			factory: ParticleFactory::new(rng, viewport, config),
			active,
			reaper: Reaper::new(),
			exits: Vec::new(),
			exit_fade_secs,
			torn_down: false,
		}
	}

	/// One ambient timer tick: spawn a bubble below the viewport and trim.
	pub fn spawn_ambient(&mut self, now: f64) -> Option<ParticleId> {
		if self.torn_down {
			return None;
		}
		let particle = self.factory.create(None, false);
		let id = particle.id;
		self.reaper.schedule(&particle, now);

		let evicted = self.active.append(particle);
		if !evicted.is_empty() {
			debug!("bubbles: trimmed {} oldest over capacity", evicted.len());
		}
		for particle in evicted {
			self.begin_exit(particle, now);
		}
		Some(id)
	}

	/// Release a click burst at viewport coordinates `(x, y)`.
	///
	/// Returns how many bubbles were added. Bursts are never trimmed.
	pub fn burst(&mut self, x: f64, y: f64, now: f64) -> usize {
		if self.torn_down {
			return 0;
		}
		let count = self.factory.burst_count() as usize;
		let batch: Vec<Particle> = (0..count)
			.map(|_| self.factory.create(Some((x, y)), true))
			.collect();
		for particle in &batch {
			self.reaper.schedule(particle, now);
		}
		self.active.append_many(batch);
		debug!("bubbles: burst of {count} at ({x:.0}, {y:.0})");
		count
	}

	/// Remove `id` from the active set. Absent ids and calls after teardown
	/// are no-ops.
	pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
		self.reaper.cancel(id);
		self.active.remove(id)
	}

	/// Reap every bubble whose rise has completed and drop finished exit
	/// fades. Returns the ids removed by completion.
	pub fn advance(&mut self, now: f64) -> Vec<ParticleId> {
		if self.torn_down {
			return Vec::new();
		}
		let due = self.reaper.due(now);
		for &id in &due {
			if self.active.remove(id).is_some() {
				trace!("bubbles: {id} completed");
			}
		}
		self.exits.retain(|fade| !fade.is_finished(now));
		due
	}

	/// Visual state of every live and exiting bubble at `now`.
	pub fn frame(&self, now: f64) -> Vec<(&Particle, VisualState)> {
		let live = self.active.iter().map(|p| {
			let state = match self.reaper.started_at(p.id) {
				Some(started_at) => VisualState::at(p, motion::progress(p, started_at, now)),
				None => VisualState::settled(p),
			};
			(p, state)
		});
		let exiting = self.exits.iter().map(|fade| (&fade.particle, fade.state(now)));
		live.chain(exiting).collect()
	}

	/// Stop everything. The set, schedule and fades are cleared and every
	/// later call becomes a no-op.
	pub fn teardown(&mut self) {
		if self.torn_down {
			return;
		}
		debug!("bubbles: teardown with {} live", self.active.len());
		self.torn_down = true;
		self.active.clear();
		self.reaper.clear();
		self.exits.clear();
	}

	/// Whether `teardown` has run.
	pub fn is_torn_down(&self) -> bool {
		self.torn_down
	}

	/// Bubbles still rising.
	pub fn active(&self) -> &ActiveSet {
		&self.active
	}

	/// Number of evicted bubbles still fading out.
	pub fn exiting(&self) -> usize {
		self.exits.len()
	}

	fn begin_exit(&mut self, particle: Particle, now: f64) {
		let from = match self.reaper.started_at(particle.id) {
			Some(started_at) => {
				VisualState::at(&particle, motion::progress(&particle, started_at, now))
			}
			None => VisualState::initial(&particle),
		};
		self.reaper.cancel(particle.id);
		self.exits.push(ExitFade::new(particle, from, now, self.exit_fade_secs));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::animated_background::particles::tests::{SCREEN, Seeded};
	use crate::components::animated_background::random::FixedViewport;

	const INTERVAL: f64 = 0.7;

	fn engine(seed: u64) -> BackgroundEngine<Seeded, FixedViewport> {
		BackgroundEngine::new(Seeded::new(seed), SCREEN, BackgroundConfig::default())
	}

	#[test]
	fn test_ten_intervals_without_clicks() {
		let mut engine = engine(1);
		for tick in 1..=10 {
			let now = tick as f64 * INTERVAL;
			engine.advance(now);
			engine.spawn_ambient(now);
		}
		assert_eq!(engine.active().len(), 10);
		assert!(engine.active().iter().all(|p| !p.small));
	}

	#[test]
	fn test_single_click_burst() {
		let mut engine = engine(2);
		let added = engine.burst(100.0, 200.0, 0.0);

		assert!((6..=12).contains(&added));
		assert_eq!(engine.active().len(), added);
		for p in engine.active().iter() {
			assert_eq!((p.origin_x, p.origin_y), (100.0, 200.0));
			assert!(p.small);
			assert!((10.0..25.0).contains(&p.size));
		}
	}

	#[test]
	fn test_burst_sizes_stay_in_range() {
		let mut engine = engine(3);
		for i in 0..200 {
			let before = engine.active().len();
			let added = engine.burst(10.0, 10.0, i as f64 * 0.01);
			assert!((6..=12).contains(&added));
			assert_eq!(engine.active().len(), before + added);
		}
	}

	#[test]
	fn test_ambient_never_exceeds_capacity() {
		// Durations are at least 25s, so nothing completes in this window.
		let mut engine = engine(4);
		for tick in 0..30 {
			engine.spawn_ambient(tick as f64 * 0.01);
		}
		for tick in 30..400 {
			let now = tick as f64 * 0.01;
			engine.advance(now);
			engine.spawn_ambient(now);
			assert!(engine.active().len() <= 80);
		}
		assert_eq!(engine.active().len(), 80);
	}

	#[test]
	fn test_trim_at_capacity_evicts_oldest_and_fades_it() {
		let mut engine = engine(5);
		let mut ids = Vec::new();
		for tick in 0..80 {
			ids.extend(engine.spawn_ambient(tick as f64 * 0.01));
		}
		assert_eq!(engine.active().len(), 80);

		let newest = engine.spawn_ambient(0.8).unwrap();
		assert_eq!(engine.active().len(), 80);
		assert!(engine.active().contains(newest));
		assert!(!engine.active().contains(ids[0]));
		assert!(engine.active().contains(ids[1]));
		assert_eq!(engine.exiting(), 1);

		// The evicted bubble never comes back through the reaper
		assert!(!engine.advance(1000.0).contains(&ids[0]));
		assert_eq!(engine.exiting(), 0);
	}

	#[test]
	fn test_every_bubble_is_reaped_exactly_once() {
		let mut engine = engine(6);
		let mut spawned = Vec::new();
		for tick in 0..20 {
			spawned.extend(engine.spawn_ambient(tick as f64 * INTERVAL));
		}
		engine.burst(50.0, 60.0, 3.0);
		spawned.extend(engine.active().iter().filter(|p| p.small).map(|p| p.id));

		let mut reaped = Vec::new();
		let mut now = 0.0;
		while now < 120.0 {
			reaped.extend(engine.advance(now));
			now += 1.0 / 60.0;
		}

		assert!(engine.active().is_empty());
		reaped.sort();
		spawned.sort();
		assert_eq!(reaped, spawned);
	}

	#[test]
	fn test_nothing_completes_before_its_duration() {
		let mut engine = engine(7);
		engine.spawn_ambient(0.0);
		let duration = engine.active().iter().next().unwrap().duration;

		assert!(engine.advance(duration - 0.01).is_empty());
		assert_eq!(engine.active().len(), 1);
		assert_eq!(engine.advance(duration).len(), 1);
		assert!(engine.active().is_empty());
	}

	#[test]
	fn test_remove_is_idempotent_and_targeted() {
		let mut engine = engine(8);
		let a = engine.spawn_ambient(0.0).unwrap();
		let b = engine.spawn_ambient(0.7).unwrap();

		assert!(engine.remove(a).is_some());
		assert!(engine.remove(a).is_none());
		assert_eq!(engine.active().len(), 1);
		assert!(engine.active().contains(b));

		// A removed bubble's deadline is a no-op
		assert_eq!(engine.advance(1000.0), vec![b]);
	}

	#[test]
	fn test_teardown_stops_everything() {
		let mut engine = engine(9);
		for tick in 0..5 {
			engine.spawn_ambient(tick as f64 * INTERVAL);
		}
		engine.burst(1.0, 2.0, 4.0);

		engine.teardown();
		assert!(engine.is_torn_down());
		assert!(engine.active().is_empty());

		assert_eq!(engine.spawn_ambient(5.0), None);
		assert_eq!(engine.burst(1.0, 2.0, 5.0), 0);
		assert!(engine.advance(1000.0).is_empty());
		assert!(engine.active().is_empty());
		engine.teardown();
	}

	#[test]
	fn test_frame_reports_live_and_exiting() {
		let config = BackgroundConfig {
			capacity: 2,
			..BackgroundConfig::default()
		};
		let mut engine = BackgroundEngine::new(Seeded::new(10), SCREEN, config);
		engine.spawn_ambient(0.0);
		engine.spawn_ambient(1.0);
		engine.spawn_ambient(2.0);

		let frame = engine.frame(2.1);
		assert_eq!(frame.len(), 3);
		assert!(frame.iter().all(|(_, state)| state.opacity >= 0.0));

		engine.advance(2.5);
		assert_eq!(engine.frame(2.5).len(), 2);
	}

	#[test]
	fn test_fresh_spawn_is_drawn_at_origin() {
		let mut engine = engine(11);
		engine.burst(400.0, 300.0, 10.0);
		for (_, state) in engine.frame(10.0) {
			assert_eq!((state.x, state.y), (400.0, 300.0));
			assert_eq!(state.opacity, 0.0);
		}
	}
}
