//! Fixed tuning constants for the snow field.
//!
//! All distances are CSS pixels and all times are milliseconds, matching the
//! `DOMHighResTimeStamp` values handed to `requestAnimationFrame` callbacks.

/// Timing and sizing constants for [`FlakeField`](super::FlakeField).
#[derive(Clone, Debug)]
pub struct FieldConfig {
	/// Horizontal pixels of viewport per flake. The field holds
	/// `floor(width / spacing)` flakes.
	pub spacing: f64,
	/// Milliseconds per pixel of descent. Lower is faster.
	pub vertical_speed: f64,
	/// Exclusive upper bound of a single horizontal nudge, so a nudge moves
	/// a flake by `0..nudge_range` whole pixels.
	pub nudge_range: f64,
	/// Nudges only happen on frames whose whole-millisecond timestamp is a
	/// multiple of this value.
	pub nudge_cadence: f64,
	/// Smallest flake edge length.
	pub size_min: u32,
	/// Largest flake edge length (inclusive).
	pub size_max: u32,
	/// Upper bound on the flake count, whatever the viewport width.
	pub max_flakes: usize,
	/// Replacement flakes enter within the top `1 / entry_band` of the viewport.
	pub entry_band: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			spacing: 50.0,
			vertical_speed: 8.0,
			nudge_range: 2.0,
			nudge_cadence: 20.0,
			size_min: 10,
			size_max: 30,
			max_flakes: 2_000,
			entry_band: 6.0,
		}
	}
}
