//! snowfall: decorative falling-snow overlay for web pages.
//!
//! This crate provides a WASM-based Leptos component that scatters snowflake
//! glyphs over the viewport and animates them falling, with a slight sideways
//! jitter, for as long as the page is open.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::snowfall::{FlakeField, SnowfallOverlay, Viewport};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("snowfall: logging initialized");
}

/// Main application component.
/// Renders the snow overlay on top of the page body.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Snowfall" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<SnowfallOverlay />
	}
}
