//! Randomness and viewport capabilities injected into the particle factory.
//!
//! The factory never reaches for `Math.random` or the window directly; the
//! browser implementations live here so tests can substitute seeded sources
//! and fixed viewports.

/// Viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Viewport {
	/// Fallback used when the window cannot be queried.
	pub const FALLBACK: Viewport = Viewport {
		width: 1280.0,
		height: 800.0,
	};
}

/// Source of uniformly distributed random numbers.
pub trait RandomSource {
	/// Uniform real in `[min, max)`.
	fn uniform(&mut self, min: f64, max: f64) -> f64;

	/// Uniform integer in `[min, max]` (both ends inclusive).
	fn uniform_int(&mut self, min: u32, max: u32) -> u32;
}

/// Reports the current viewport size.
pub trait ViewportQuery {
	/// Size of the viewport right now.
	fn viewport(&self) -> Viewport;
}

impl<V: ViewportQuery + ?Sized> ViewportQuery for Box<V> {
	fn viewport(&self) -> Viewport {
		(**self).viewport()
	}
}

/// `RandomSource` backed by the browser's `Math.random()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
	fn uniform(&mut self, min: f64, max: f64) -> f64 {
		min + js_sys::Math::random() * (max - min)
	}

	fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
		if max <= min {
			return min;
		}
		let span = (max - min + 1) as f64;
		// Math.random() < 1.0, but guard the float rounding at the top end anyway
		let offset = ((js_sys::Math::random() * span).floor() as u32).min(max - min);
		min + offset
	}
}

/// `ViewportQuery` reading `window.innerWidth` / `window.innerHeight` live,
/// so spawns follow window resizes without extra bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowViewport;

impl ViewportQuery for WindowViewport {
	fn viewport(&self) -> Viewport {
		let Some(window) = web_sys::window() else {
			return Viewport::FALLBACK;
		};
		let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
			v.ok().and_then(|v| v.as_f64())
		};
		match (dimension(window.inner_width()), dimension(window.inner_height())) {
			(Some(width), Some(height)) => Viewport { width, height },
			_ => Viewport::FALLBACK,
		}
	}
}

/// A viewport that never changes. Useful for off-screen canvases.
#[derive(Clone, Copy, Debug)]
pub struct FixedViewport(pub Viewport);

impl ViewportQuery for FixedViewport {
	fn viewport(&self) -> Viewport {
		self.0
	}
}
