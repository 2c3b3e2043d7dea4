//! DOM projection of the snow field.
//!
//! Each flake becomes an absolutely positioned wrapper holding an icon glyph:
//!
//! ```html
//! <span class="snowflake" data-falling="false" style="top: 12px; left: 80px; ...">
//!   <i class="fa-snowflake fa-thin fa-sharp"></i>
//! </span>
//! ```
//!
//! Icon kits may swap the `<i>` for an `<svg>` after insertion, so only the
//! wrapper is ever held on to.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::particles::{Flake, FlakeId};
use super::random::RandomSource;
use super::state::FlakeField;
use super::theme::FlakeStyle;

/// A flake's element plus the values last written to it.
struct Rendered {
	element: HtmlElement,
	top: f64,
	left: f64,
	falling: bool,
}

/// Keeps one element per flake inside a container.
pub struct FlakeLayer {
	document: Document,
	container: HtmlElement,
	style: FlakeStyle,
	elements: HashMap<FlakeId, Rendered>,
}

impl FlakeLayer {
	pub fn new(container: HtmlElement, style: FlakeStyle) -> Result<Self, JsValue> {
		let document = container
			.owner_document()
			.ok_or("Container is not attached to a document")?;
		Ok(Self {
			document,
			container,
			style,
			elements: HashMap::new(),
		})
	}

	/// Number of flake elements currently in the container.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Bring the container in line with `field`: drop elements of flakes
	/// that are gone, create elements for new flakes, and move the rest.
	pub fn sync<R: RandomSource>(&mut self, field: &FlakeField<R>) -> Result<(), JsValue> {
		let live: HashSet<FlakeId> = field.flakes().iter().map(|flake| flake.id).collect();
		self.elements.retain(|id, rendered| {
			let keep = live.contains(id);
			if !keep {
				rendered.element.remove();
			}
			keep
		});

		for flake in field.flakes() {
			match self.elements.entry(flake.id) {
				Entry::Occupied(entry) => update(entry.into_mut(), flake, &self.style)?,
				Entry::Vacant(entry) => {
					let element = create(&self.document, flake, &self.style)?;
					self.container.append_child(&element)?;
					entry.insert(Rendered {
						element,
						top: flake.top,
						left: flake.left,
						falling: flake.is_falling(),
					});
				}
			}
		}
		Ok(())
	}

	/// Remove every flake element.
	pub fn clear(&mut self) {
		for (_, rendered) in self.elements.drain() {
			rendered.element.remove();
		}
	}
}

fn px(value: f64) -> String {
	format!("{value}px")
}

fn falling_value(falling: bool) -> &'static str {
	if falling { "true" } else { "false" }
}

fn create(document: &Document, flake: &Flake, style: &FlakeStyle) -> Result<HtmlElement, JsValue> {
	let wrapper: HtmlElement = document.create_element("span")?.unchecked_into();
	wrapper.set_class_name(style.wrapper_class);
	wrapper.set_attribute(style.falling_attr, falling_value(flake.is_falling()))?;

	let css = wrapper.style();
	css.set_property("position", "absolute")?;
	css.set_property("display", "block")?;
	css.set_property("color", &style.color.to_css())?;
	css.set_property("width", &px(flake.width.into()))?;
	css.set_property("height", &px(flake.height.into()))?;
	css.set_property("top", &px(flake.top))?;
	css.set_property("left", &px(flake.left))?;

	let glyph: HtmlElement = document.create_element("i")?.unchecked_into();
	glyph.set_class_name(&style.glyph_class_name());
	let glyph_css = glyph.style();
	glyph_css.set_property("width", "100%")?;
	glyph_css.set_property("height", "100%")?;
	wrapper.append_child(&glyph)?;

	Ok(wrapper)
}

fn update(rendered: &mut Rendered, flake: &Flake, style: &FlakeStyle) -> Result<(), JsValue> {
	let css = rendered.element.style();
	if rendered.top != flake.top {
		css.set_property("top", &px(flake.top))?;
		rendered.top = flake.top;
	}
	if rendered.left != flake.left {
		css.set_property("left", &px(flake.left))?;
		rendered.left = flake.left;
	}
	if rendered.falling != flake.is_falling() {
		rendered
			.element
			.set_attribute(style.falling_attr, falling_value(flake.is_falling()))?;
		rendered.falling = flake.is_falling();
	}
	Ok(())
}
