//! Snow field state and per-frame update.
//!
//! [`FlakeField`] owns every flake on screen. It knows nothing about the DOM:
//! the component drives it with frame timestamps and window events, and the
//! render layer projects its flakes onto elements afterwards.

use super::config::FieldConfig;
use super::particles::{Flake, FlakeId};
use super::random::RandomSource;
use super::types::{Scatter, TickReport, Viewport};

/// Whether a frame stamped `timestamp` falls on the horizontal nudge cadence.
///
/// Only the whole-millisecond part is checked, so at some refresh rates the
/// cadence is hit rarely or not at all.
pub fn on_nudge_cadence(timestamp: f64, cadence: f64) -> bool {
	timestamp.floor() % cadence == 0.0
}

/// The particle field controller.
///
/// Created once when the overlay mounts, then mutated by the animation loop
/// and by focus changes on the window.
pub struct FlakeField<R> {
	flakes: Vec<Flake>,
	viewport: Viewport,
	config: FieldConfig,
	rng: R,
	next_id: u64,
}

impl<R: RandomSource> FlakeField<R> {
	pub fn new(viewport: Viewport, config: FieldConfig, rng: R) -> Self {
		Self {
			flakes: Vec::new(),
			viewport,
			config,
			rng,
			next_id: 0,
		}
	}

	pub fn flakes(&self) -> &[Flake] {
		&self.flakes
	}

	pub fn len(&self) -> usize {
		self.flakes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.flakes.is_empty()
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Number of flakes a full field holds for the current viewport width,
	/// capped at `max_flakes`.
	pub fn target_count(&self) -> usize {
		let count = (self.viewport.width / self.config.spacing).floor();
		if count.is_finite() && count > 0.0 {
			(count as usize).min(self.config.max_flakes)
		} else {
			0
		}
	}

	/// Scatter a full set of flakes over the whole viewport. Returns how many
	/// were created.
	pub fn spawn_all(&mut self) -> usize {
		let count = self.target_count();
		self.flakes.reserve(count);
		for _ in 0..count {
			self.spawn(Scatter::Full);
		}
		count
	}

	/// Remove every flake. Returns how many were removed.
	pub fn teardown_all(&mut self) -> usize {
		let removed = self.flakes.len();
		self.flakes.clear();
		removed
	}

	/// Advance every flake to `timestamp`.
	///
	/// Flakes that drop below the viewport are removed and replaced by new
	/// ones in the entry band. Replacements start falling on the next tick.
	pub fn tick(&mut self, timestamp: f64) -> TickReport {
		let nudged = on_nudge_cadence(timestamp, self.config.nudge_cadence);
		let (height, speed, range) = (
			self.viewport.height,
			self.config.vertical_speed,
			self.config.nudge_range,
		);

		let before = self.flakes.len();
		self.flakes.retain_mut(|flake| {
			if flake.descend(timestamp, speed) > height {
				return false;
			}
			if nudged {
				flake.nudge(range, &mut self.rng);
			}
			true
		});

		let fallen = before - self.flakes.len();
		for _ in 0..fallen {
			self.spawn(Scatter::EntryBand);
		}

		TickReport { fallen, nudged }
	}

	/// Track a new viewport size. Flakes stay where they are; the flake count
	/// follows on the next [`spawn_all`](Self::spawn_all).
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	fn spawn(&mut self, scatter: Scatter) -> FlakeId {
		let id = FlakeId(self.next_id);
		self.next_id += 1;

		let (min, max) = (self.config.size_min, self.config.size_max);
		let height = self.rng.range_inclusive(min, max);
		let width = self.rng.range_inclusive(min, max);
		let top = match scatter {
			Scatter::Full => self.rng.below(self.viewport.height),
			Scatter::EntryBand => self
				.rng
				.below(self.viewport.height / self.config.entry_band),
		};
		let left = self.rng.below(self.viewport.width);

		self.flakes.push(Flake::new(id, width, height, top, left));
		id
	}
}
