//! The recurring browser timer behind the ambient bubbles.

use std::time::Duration;

use leptos::prelude::{IntervalHandle, set_interval_with_handle};
use log::{debug, error};

/// A running `setInterval` that fires the ambient spawn.
///
/// The handle is `Copy` and holds no closures, so it can be moved into
/// Leptos cleanup hooks.
#[derive(Clone, Copy, Debug)]
pub struct AmbientEmitter {
	handle: IntervalHandle,
}

impl AmbientEmitter {
	/// Start calling `on_tick` every `interval_ms` milliseconds.
	pub fn start(interval_ms: u32, on_tick: impl Fn() + 'static) -> Option<Self> {
		match set_interval_with_handle(on_tick, Duration::from_millis(interval_ms.into())) {
			Ok(handle) => {
				debug!("bubbles: ambient emitter started ({interval_ms}ms)");
				Some(Self { handle })
			}
			Err(e) => {
				error!("bubbles: failed to start ambient emitter: {e:?}");
				None
			}
		}
	}

	/// Cancel the interval. No tick fires afterwards.
	pub fn stop(self) {
		self.handle.clear();
		debug!("bubbles: ambient emitter stopped");
	}
}
