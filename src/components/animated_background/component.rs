//! Leptos component wrapping the bubble background canvas.
//!
//! The component creates a canvas pinned behind the page and wires three
//! independent callbacks to one engine: the ambient interval, the click
//! handler and a `requestAnimationFrame` loop that reaps completed bubbles and
//! repaints. Unmounting stops the interval immediately; the frame loop notices
//! on its next tick, tears the engine down and detaches the resize listener.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::BackgroundConfig;
use super::emitter::AmbientEmitter;
use super::engine::BackgroundEngine;
use super::random::{FixedViewport, MathRandom, Viewport, ViewportQuery, WindowViewport};
use super::render;
use super::theme::Theme;

type Engine = BackgroundEngine<MathRandom, Box<dyn ViewportQuery>>;
type SharedContext = Rc<RefCell<Option<BackgroundContext>>>;

/// Bundles the engine with the canvas it paints.
struct BackgroundContext {
	engine: Engine,
	theme: Theme,
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

/// Renders the animated bubble background.
///
/// By default the canvas is fixed to the viewport behind all page content
/// and follows window resizes. Set `fullscreen = false` with explicit
/// `width`/`height` to embed it as a regular block instead.
#[component]
pub fn AnimatedBackground(
	/// Emission parameters; defaults when absent.
	#[prop(optional)]
	config: Option<BackgroundConfig>,
	/// Pin the canvas behind the page and track the window size.
	#[prop(default = true)]
	fullscreen: bool,
	/// Canvas width when not fullscreen.
	#[prop(default = None)]
	width: Option<f64>,
	/// Canvas height when not fullscreen.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	let context_tick = context.clone();
	let emitter = AmbientEmitter::start(config.interval_ms, move || {
		if let Some(ref mut c) = *context_tick.borrow_mut() {
			c.engine.spawn_ambient(now_secs());
		}
	});

	let alive_cleanup = alive.clone();
	on_cleanup(move || {
		alive_cleanup.store(false, Ordering::Relaxed);
		if let Some(emitter) = emitter {
			emitter.stop();
		}
	});

	let (context_init, alive_init) = (context.clone(), alive.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if context_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			error!("bubbles: no window, background disabled");
			return;
		};

		let viewport: Box<dyn ViewportQuery> = if fullscreen {
			Box::new(WindowViewport)
		} else {
			let parent = canvas.parent_element();
			Box::new(FixedViewport(Viewport {
				width: width.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
				}),
				height: height.unwrap_or_else(|| {
					parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
				}),
			}))
		};
		let Viewport { width: w, height: h } = viewport.viewport();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("bubbles: 2d canvas context unavailable");
			return;
		};

		let theme = Theme::by_name(&config.theme).unwrap_or_else(|| {
			warn!("bubbles: unknown theme {:?}, using default", config.theme);
			Theme::default()
		});

		*context_init.borrow_mut() = Some(BackgroundContext {
			engine: BackgroundEngine::new(MathRandom, viewport, config.clone()),
			theme,
			ctx,
			width: w,
			height: h,
			resize_cb: None,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
				let Viewport { width: nw, height: nh } = WindowViewport.viewport();
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.width = nw;
					c.height = nh;
				}
			});
			let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
			if let Some(ref mut c) = *context_init.borrow_mut() {
				c.resize_cb = Some(resize_cb);
			}
		}

		info!("bubbles: background mounted at {w}x{h}");
		schedule_frame(context_init.clone(), alive_init.clone());
	});

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_click.borrow_mut() {
			c.engine.burst(x, y, now_secs());
		}
	};

	let style = if fullscreen {
		"position: fixed; inset: 0; z-index: -10; display: block;"
	} else {
		"display: block;"
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="animated-background"
			on:click=on_click
			style=style
		/>
	}
}

/// Queue the next frame: reap, repaint, repeat until the component is gone.
fn schedule_frame(context: SharedContext, alive: Arc<AtomicBool>) {
	request_animation_frame(move || {
		if !alive.load(Ordering::Relaxed) {
			release(&context);
			return;
		}
		let now = now_secs();
		if let Some(ref mut c) = *context.borrow_mut() {
			c.engine.advance(now);
			let frame = c.engine.frame(now);
			render::render(&c.ctx, c.width, c.height, &c.theme, &frame);
		}
		schedule_frame(context, alive);
	});
}

/// Tear down the engine and detach window listeners.
fn release(context: &SharedContext) {
	let Some(mut c) = context.borrow_mut().take() else {
		return;
	};
	c.engine.teardown();
	if let (Some(window), Some(cb)) = (web_sys::window(), c.resize_cb.take()) {
		let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	info!("bubbles: background released");
}

/// Monotonic clock in seconds.
fn now_secs() -> f64 {
	let window: Option<Window> = web_sys::window();
	let millis = window
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now);
	millis / 1000.0
}
