//! Visual theming for the bubble background.
//!
//! Provides the backdrop gradient and bubble shading presets.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Hex when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Full-bleed vertical gradient behind everything.
#[derive(Clone, Debug)]
pub struct BackdropStyle {
	/// Color at the top edge
	pub top: Color,
	/// Color at the bottom edge
	pub bottom: Color,
}

/// Bubble shading.
#[derive(Clone, Debug)]
pub struct BubbleStyle {
	/// Specular highlight at the inner stop of the radial gradient
	pub highlight: Color,
	/// Body tint at the middle stop
	pub body: Color,
	/// Nearly transparent outer edge
	pub edge: Color,
	/// Where the highlight sits, as a fraction of the diameter from top-left
	pub highlight_offset: f64,
	/// Inner rim stroke
	pub rim: Color,
	/// Outer glow color
	pub glow: Color,
	/// Outer glow blur radius in pixels
	pub glow_blur: f64,
	/// Softening blur applied to the whole bubble, in pixels (0 = none)
	pub blur: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name used in config.
	pub name: &'static str,
	/// Backdrop gradient.
	pub backdrop: BackdropStyle,
	/// Bubble shading.
	pub bubble: BubbleStyle,
}

impl Theme {
	/// Deep green water with mint bubbles (default)
	pub fn forest() -> Self {
		Self {
			name: "forest",
			backdrop: BackdropStyle {
				top: Color::rgb(15, 61, 42),
				bottom: Color::rgb(0, 31, 20),
			},
			bubble: BubbleStyle {
				highlight: Color::rgba(255, 255, 255, 0.4),
				body: Color::rgba(43, 238, 108, 0.18),
				edge: Color::rgba(15, 61, 42, 0.05),
				highlight_offset: 0.3,
				rim: Color::rgba(255, 255, 255, 0.35),
				glow: Color::rgba(43, 238, 108, 0.25),
				glow_blur: 20.0,
				blur: 1.2,
			},
		}
	}

	/// Midnight blue variant
	pub fn abyss() -> Self {
		Self {
			name: "abyss",
			backdrop: BackdropStyle {
				top: Color::rgb(16, 32, 58),
				bottom: Color::rgb(4, 10, 24),
			},
			bubble: BubbleStyle {
				highlight: Color::rgba(255, 255, 255, 0.4),
				body: Color::rgba(90, 160, 255, 0.18),
				edge: Color::rgba(16, 32, 58, 0.05),
				highlight_offset: 0.3,
				rim: Color::rgba(255, 255, 255, 0.3),
				glow: Color::rgba(90, 160, 255, 0.22),
				glow_blur: 18.0,
				blur: 1.2,
			},
		}
	}

	/// Look up a preset by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"forest" => Some(Self::forest()),
			"abyss" => Some(Self::abyss()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::forest()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_to_css_opaque_is_hex() {
		assert_eq!(Color::rgb(15, 61, 42).to_css(), "#0f3d2a");
		assert_eq!(Color::rgb(0, 31, 20).to_css(), "#001f14");
	}

	#[test]
	fn test_to_css_translucent_is_rgba() {
		assert_eq!(Color::rgba(43, 238, 108, 0.25).to_css(), "rgba(43, 238, 108, 0.25)");
	}

	#[test]
	fn test_by_name() {
		assert_eq!(Theme::by_name("forest").map(|t| t.name), Some("forest"));
		assert_eq!(Theme::by_name("abyss").map(|t| t.name), Some("abyss"));
		assert!(Theme::by_name("neon").is_none());
		assert_eq!(Theme::default().name, "forest");
	}
}
