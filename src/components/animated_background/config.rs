//! Emission and lifetime parameters for the bubble background.
//!
//! Every field has a default matching the stock portfolio look, so a config
//! script only needs to name the values it overrides:
//!
//! ```json
//! { "capacity": 60, "burst": { "min": 4, "max": 8 }, "theme": "abyss" }
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The JSON text could not be deserialized.
	#[error("failed to parse background config: {0}")]
	Parse(#[from] serde_json::Error),
	/// One or more fields hold values the engine cannot honor.
	#[error("invalid background config: {}", .0.join("; "))]
	Validation(Vec<String>),
}

/// Upper bound on `capacity`; beyond this the trim stops bounding anything useful.
pub const MAX_CAPACITY: usize = 10_000;

/// Upper bound on bubbles released by a single click.
pub const MAX_BURST: u32 = 1_000;

/// Half-open real interval `[min, max)` sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span {
	/// Inclusive lower bound.
	pub min: f64,
	/// Exclusive upper bound.
	pub max: f64,
}

impl Span {
	/// Span from `min` up to `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Whether `value` falls inside the span.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value < self.max
	}

	fn is_ordered(&self) -> bool {
		self.min.is_finite() && self.max.is_finite() && self.min < self.max
	}
}

/// Inclusive integer interval `[min, max]` for burst sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct CountRange {
	/// Fewest bubbles per burst.
	pub min: u32,
	/// Most bubbles per burst.
	pub max: u32,
}

impl CountRange {
	/// Whether `value` falls inside the range.
	pub fn contains(&self, value: u32) -> bool {
		(self.min..=self.max).contains(&value)
	}
}

/// Tunable parameters for the particle engine and its emitters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
	/// Milliseconds between ambient spawns.
	pub interval_ms: u32,
	/// Maximum live members kept by the ambient trim.
	pub capacity: usize,
	/// Number of bubbles released per click.
	pub burst: CountRange,
	/// Diameter range for ambient bubbles.
	pub ambient_size: Span,
	/// Diameter range for click-burst bubbles.
	pub burst_size: Span,
	/// Lifetime range in seconds (shared by both sources).
	pub duration: Span,
	/// Horizontal drift range in pixels.
	pub wobble: Span,
	/// Target peak opacity range.
	pub opacity: Span,
	/// Seconds an evicted bubble takes to fade out.
	pub exit_fade_secs: f64,
	/// Theme preset name (see [`Theme::by_name`](super::theme::Theme::by_name)).
	pub theme: String,
}

impl Default for BackgroundConfig {
	fn default() -> Self {
		Self {
			interval_ms: 700,
			capacity: 80,
			burst: CountRange { min: 6, max: 12 },
			ambient_size: Span::new(25.0, 120.0),
			burst_size: Span::new(10.0, 25.0),
			duration: Span::new(25.0, 55.0),
			wobble: Span::new(-80.0, 80.0),
			opacity: Span::new(0.12, 0.28),
			exit_fade_secs: 0.3,
			theme: "forest".to_string(),
		}
	}
}

impl BackgroundConfig {
	/// Parse and validate a JSON document. Missing fields take their defaults.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Check every range the engine samples from.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let mut problems = Vec::new();

		if self.interval_ms == 0 {
			problems.push("interval_ms must be positive".to_string());
		}
		if self.capacity == 0 || self.capacity > MAX_CAPACITY {
			problems.push(format!("capacity {} must lie within 1..={MAX_CAPACITY}", self.capacity));
		}
		if self.burst.min == 0 || self.burst.min > self.burst.max {
			problems.push(format!(
				"burst range {}..={} must be non-empty and start above zero",
				self.burst.min, self.burst.max
			));
		}
		if self.burst.max > MAX_BURST {
			problems.push(format!("burst max {} exceeds {MAX_BURST}", self.burst.max));
		}
		for (name, span) in [
			("ambient_size", &self.ambient_size),
			("burst_size", &self.burst_size),
			("duration", &self.duration),
			("wobble", &self.wobble),
			("opacity", &self.opacity),
		] {
			if !span.is_ordered() {
				problems.push(format!("{name} range [{}, {}) is empty", span.min, span.max));
			}
		}
		for (name, span) in [
			("ambient_size", &self.ambient_size),
			("burst_size", &self.burst_size),
			("duration", &self.duration),
		] {
			if span.min <= 0.0 {
				problems.push(format!("{name} must be strictly positive"));
			}
		}
		if self.opacity.min < 0.0 || self.opacity.max > 1.0 {
			problems.push("opacity must lie within [0, 1]".to_string());
		}
		if self.exit_fade_secs.is_nan() || self.exit_fade_secs < 0.0 {
			problems.push("exit_fade_secs must be non-negative".to_string());
		}

		if problems.is_empty() {
			Ok(())
		} else {
			Err(ConfigError::Validation(problems))
		}
	}

	/// Size range for the given spawn source.
	pub fn size_span(&self, small: bool) -> Span {
		if small { self.burst_size } else { self.ambient_size }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let config = BackgroundConfig::default();
		assert!(config.validate().is_ok());
		assert_eq!(config.interval_ms, 700);
		assert_eq!(config.capacity, 80);
		assert_eq!(config.burst, CountRange { min: 6, max: 12 });
	}

	#[test]
	fn test_partial_json_fills_defaults() {
		let config = BackgroundConfig::from_json(r#"{ "capacity": 40, "theme": "abyss" }"#).unwrap();
		assert_eq!(config.capacity, 40);
		assert_eq!(config.theme, "abyss");
		assert_eq!(config.interval_ms, 700);
		assert_eq!(config.opacity, Span::new(0.12, 0.28));
	}

	#[test]
	fn test_empty_object_is_default() {
		let config = BackgroundConfig::from_json("{}").unwrap();
		assert_eq!(config, BackgroundConfig::default());
	}

	#[test]
	fn test_malformed_json_is_parse_error() {
		let err = BackgroundConfig::from_json("{ capacity: ").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn test_inverted_span_rejected() {
		let err =
			BackgroundConfig::from_json(r#"{ "duration": { "min": 10.0, "max": 5.0 } }"#).unwrap_err();
		match err {
			ConfigError::Validation(problems) => {
				assert_eq!(problems.len(), 1);
				assert!(problems[0].contains("duration"));
			}
			other => panic!("expected validation error, got {other:?}"),
		}
	}

	#[test]
	fn test_zero_values_rejected() {
		let config = BackgroundConfig {
			interval_ms: 0,
			capacity: 0,
			burst: CountRange { min: 0, max: 3 },
			..BackgroundConfig::default()
		};
		let Err(ConfigError::Validation(problems)) = config.validate() else {
			panic!("expected validation failure");
		};
		assert_eq!(problems.len(), 3);
	}

	#[test]
	fn test_excessive_capacity_rejected() {
		let config = BackgroundConfig {
			capacity: usize::MAX,
			..BackgroundConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

		let at_limit = BackgroundConfig {
			capacity: MAX_CAPACITY,
			..BackgroundConfig::default()
		};
		assert!(at_limit.validate().is_ok());
	}

	#[test]
	fn test_excessive_burst_rejected() {
		let err = BackgroundConfig::from_json(r#"{ "burst": { "min": 1, "max": 4294967295 } }"#)
			.unwrap_err();
		match err {
			ConfigError::Validation(problems) => {
				assert_eq!(problems.len(), 1);
				assert!(problems[0].contains("burst max"));
			}
			other => panic!("expected validation error, got {other:?}"),
		}
		assert!(BackgroundConfig::from_json(r#"{ "burst": { "min": 1, "max": 1000 } }"#).is_ok());
	}

	#[test]
	fn test_opacity_outside_unit_interval_rejected() {
		let config = BackgroundConfig {
			opacity: Span::new(0.5, 1.5),
			..BackgroundConfig::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_non_positive_size_rejected() {
		let config = BackgroundConfig {
			burst_size: Span::new(-5.0, 10.0),
			..BackgroundConfig::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_span_is_half_open() {
		let span = Span::new(10.0, 25.0);
		assert!(span.contains(10.0));
		assert!(span.contains(24.999));
		assert!(!span.contains(25.0));
	}
}
