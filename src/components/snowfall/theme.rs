//! Visual style of the flakes.
//!
//! The glyph itself comes from the page's icon kit; this module only decides
//! which classes to ask for and how to colour and tag the wrapper.

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const WHITE: Self = Self::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	pub fn to_css(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// How each flake element is built.
#[derive(Clone, Debug)]
pub struct FlakeStyle {
	/// Glyph color.
	pub color: Color,
	/// Class on the positioned wrapper element.
	pub wrapper_class: &'static str,
	/// Classes on the inner icon element.
	pub glyph_classes: &'static [&'static str],
	/// Attribute reflecting whether the flake has started falling.
	pub falling_attr: &'static str,
}

impl Default for FlakeStyle {
	fn default() -> Self {
		Self {
			color: Color::WHITE,
			wrapper_class: "snowflake",
			glyph_classes: &["fa-snowflake", "fa-thin", "fa-sharp"],
			falling_attr: "data-falling",
		}
	}
}

impl FlakeStyle {
	pub fn glyph_class_name(&self) -> String {
		self.glyph_classes.join(" ")
	}
}
