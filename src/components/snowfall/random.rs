//! Random number sources for flake placement and jitter.
//!
//! The field only ever needs uniform floats in `[0, 1)`, so the seam is a
//! single-method trait. In the browser [`MathRandom`] defers to `Math.random()`;
//! [`SeededRandom`] gives a reproducible sequence that also works off-wasm.

/// A source of uniform floats in `[0, 1)`.
pub trait RandomSource {
	/// Next value in `[0, 1)`.
	fn next_f64(&mut self) -> f64;

	/// Whole number in `[0, bound)` (for a positive `bound`).
	fn below(&mut self, bound: f64) -> f64 {
		(self.next_f64() * bound).floor()
	}

	/// Whole number in `[min, max]`.
	fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
		let span = f64::from(max.saturating_sub(min)) + 1.0;
		min + self.below(span) as u32
	}

	/// Fair coin flip.
	fn coin(&mut self) -> bool {
		self.below(2.0) == 0.0
	}
}

/// Browser `Math.random()`. Only usable on `wasm32` targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
	fn next_f64(&mut self) -> f64 {
		js_sys::Math::random()
	}
}

/// Deterministic sine-hash sequence.
#[derive(Clone, Debug)]
pub struct SeededRandom {
	seed: f64,
}

impl SeededRandom {
	pub fn new(seed: u32) -> Self {
		Self {
			seed: f64::from(seed),
		}
	}
}

impl RandomSource for SeededRandom {
	fn next_f64(&mut self) -> f64 {
		self.seed += 1.0;
		let x = (self.seed * 12.9898 + self.seed * 78.233).sin() * 43758.5453;
		// x - floor(x) can round up to exactly 1.0 for x just below an integer
		(x - x.floor()).min(1.0 - f64::EPSILON)
	}
}
