//! Plain data shared by the field, the render layer and the component.

/// Visible area the flakes fall through, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Where a newly spawned flake may appear vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scatter {
	/// Anywhere from the top edge down to the bottom edge.
	Full,
	/// Only in the entry band at the top of the viewport, so the flake looks
	/// like it drifted in from above.
	EntryBand,
}

/// What a single [`tick`](super::FlakeField::tick) did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
	/// Flakes that fell past the bottom and were replaced.
	pub fallen: usize,
	/// Whether this frame landed on the nudge cadence.
	pub nudged: bool,
}
