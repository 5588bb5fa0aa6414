//! Canvas rendering for the bubble background.
//!
//! Each frame repaints the backdrop gradient, then every bubble in the order
//! the engine reports them (live first, exiting last).

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::motion::VisualState;
use super::particles::Particle;
use super::theme::{BubbleStyle, Theme};

/// Rim stroke width in pixels.
const RIM_WIDTH: f64 = 1.5;

/// Renders one complete frame to the canvas.
pub fn render(
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	theme: &Theme,
	bubbles: &[(&Particle, VisualState)],
) {
	draw_backdrop(ctx, width, height, theme);

	for (particle, state) in bubbles {
		if state.opacity <= 0.001 {
			continue;
		}
		draw_bubble(ctx, &theme.bubble, particle, state);
	}
}

fn draw_backdrop(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &Theme) {
	let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
	let stops = [
		(0.0, theme.backdrop.top.to_css()),
		(1.0, theme.backdrop.bottom.to_css()),
	];
	for (offset, color) in &stops {
		let _ = gradient.add_color_stop(*offset, color);
	}

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

/// Draws a bubble whose bounding box starts at the state's `(x, y)`,
/// scaled about its center.
fn draw_bubble(
	ctx: &CanvasRenderingContext2d,
	style: &BubbleStyle,
	particle: &Particle,
	state: &VisualState,
) {
	let half = particle.size / 2.0;
	let (cx, cy) = (state.x + half, state.y + half);
	let radius = half * state.scale;
	if radius <= 0.0 {
		return;
	}

	// Highlight sits toward the top-left of the bounding box
	let (hx, hy) = (
		cx - radius + 2.0 * radius * style.highlight_offset,
		cy - radius + 2.0 * radius * style.highlight_offset,
	);
	let Ok(gradient) = ctx.create_radial_gradient(hx, hy, 0.0, cx, cy, radius * 1.4) else {
		return;
	};
	let stops = [
		(0.0, style.highlight.to_css()),
		(0.5, style.body.to_css()),
		(1.0, style.edge.to_css()),
	];
	for (offset, color) in &stops {
		let _ = gradient.add_color_stop(*offset, color);
	}

	ctx.save();
	ctx.set_global_alpha(state.opacity);
	if style.blur > 0.0 {
		ctx.set_filter(&format!("blur({}px)", style.blur));
	}

	// Body with outer glow
	ctx.set_shadow_color(&style.glow.to_css());
	ctx.set_shadow_blur(style.glow_blur);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, radius, 0.0, PI * 2.0);
	ctx.fill();

	// Inner rim, without glow
	ctx.set_shadow_blur(0.0);
	ctx.set_stroke_style_str(&style.rim.to_css());
	ctx.set_line_width(RIM_WIDTH);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, (radius - RIM_WIDTH).max(0.5), 0.0, PI * 2.0);
	ctx.stroke();

	ctx.restore();
}
