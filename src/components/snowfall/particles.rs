//! Individual snowflakes.

use super::random::RandomSource;

/// Slack added before flooring elapsed steps. Fractional frame timestamps
/// make `(start + k * speed) - start` land just under `k * speed`.
const STEP_EPSILON: f64 = 1e-9;

/// Identity of a flake within its field. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlakeId(pub u64);

/// Anchor for time-based descent, captured on a flake's first animated frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Descent {
	/// Frame timestamp (ms) when the flake started falling.
	pub started_at: f64,
	/// `top` at that moment.
	pub baseline: f64,
}

/// A single snowflake.
///
/// Positions are whole pixels held as `f64` so they can be written straight
/// into `top`/`left` style values.
#[derive(Clone, Debug, PartialEq)]
pub struct Flake {
	pub id: FlakeId,
	pub width: u32,
	pub height: u32,
	pub top: f64,
	pub left: f64,
	/// `None` until the first tick after spawn.
	pub descent: Option<Descent>,
}

impl Flake {
	pub fn new(id: FlakeId, width: u32, height: u32, top: f64, left: f64) -> Self {
		Self {
			id,
			width,
			height,
			top,
			left,
			descent: None,
		}
	}

	pub fn is_falling(&self) -> bool {
		self.descent.is_some()
	}

	/// Move the flake to where it should be at `timestamp`.
	///
	/// The first call pins the descent anchor to the current `top`; every
	/// call then places the flake `floor(elapsed / vertical_speed)` pixels
	/// below that anchor, so dropped frames never slow the fall down.
	pub fn descend(&mut self, timestamp: f64, vertical_speed: f64) -> f64 {
		let top = self.top;
		let descent = *self.descent.get_or_insert(Descent {
			started_at: timestamp,
			baseline: top,
		});
		let steps = (timestamp - descent.started_at) / vertical_speed + STEP_EPSILON;
		self.top = descent.baseline + steps.floor();
		self.top
	}

	/// Shift left or right by a whole number of pixels below `range`.
	pub fn nudge(&mut self, range: f64, rng: &mut impl RandomSource) -> f64 {
		let magnitude = rng.below(range);
		let shift = if rng.coin() { magnitude } else { -magnitude };
		self.left += shift;
		shift
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Replays a fixed list of values, then repeats the last one.
	struct Scripted(Vec<f64>);

	impl RandomSource for Scripted {
		fn next_f64(&mut self) -> f64 {
			if self.0.len() > 1 {
				self.0.remove(0)
			} else {
				self.0[0]
			}
		}
	}

	fn flake(top: f64) -> Flake {
		Flake::new(FlakeId(1), 12, 20, top, 100.0)
	}

	#[test]
	fn first_descend_pins_the_anchor() {
		let mut f = flake(40.0);
		assert!(!f.is_falling());

		assert_eq!(f.descend(1_000.0, 8.0), 40.0);
		assert_eq!(
			f.descent,
			Some(Descent {
				started_at: 1_000.0,
				baseline: 40.0
			})
		);
	}

	#[test]
	fn descent_is_derived_from_elapsed_time() {
		let mut f = flake(40.0);
		f.descend(1_000.0, 8.0);

		for k in [1.0, 5.0, 37.0, 250.0] {
			assert_eq!(f.descend(1_000.0 + k * 8.0, 8.0), 40.0 + k);
		}
		// Partial steps floor rather than round.
		assert_eq!(f.descend(1_015.9, 8.0), 41.0);
	}

	#[test]
	fn fractional_start_times_keep_whole_steps() {
		for start in [16.7, 33.4, 1_000.1, 12_345.678] {
			let mut f = flake(40.0);
			f.descend(start, 8.0);
			for k in 0..2_000 {
				let k = f64::from(k);
				assert_eq!(f.descend(start + k * 8.0, 8.0), 40.0 + k, "start {start}, k {k}");
			}
		}
	}

	#[test]
	fn skipped_frames_do_not_slow_the_fall() {
		let mut smooth = flake(0.0);
		let mut choppy = flake(0.0);
		smooth.descend(0.0, 8.0);
		choppy.descend(0.0, 8.0);

		for frame in 1..=60 {
			smooth.descend(frame as f64 * 16.0, 8.0);
		}
		choppy.descend(960.0, 8.0);

		assert_eq!(smooth.top, choppy.top);
		assert_eq!(choppy.top, 120.0);
	}

	#[test]
	fn nudge_direction_follows_the_coin() {
		let mut f = flake(0.0);
		// magnitude floor(0.9 * 2) = 1, coin 0.2 -> right
		assert_eq!(f.nudge(2.0, &mut Scripted(vec![0.9, 0.2])), 1.0);
		assert_eq!(f.left, 101.0);
		// magnitude 1, coin 0.8 -> left
		assert_eq!(f.nudge(2.0, &mut Scripted(vec![0.9, 0.8])), -1.0);
		assert_eq!(f.left, 100.0);
		// magnitude 0 either way
		assert_eq!(f.nudge(2.0, &mut Scripted(vec![0.3, 0.2])), 0.0);
		assert_eq!(f.left, 100.0);
	}
}
