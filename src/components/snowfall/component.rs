//! Leptos component hosting the snow overlay.
//!
//! The component renders a fixed, click-through container. Once it is in the
//! DOM the field is spawned, window `blur`/`focus`/`resize` listeners are
//! attached and an animation loop ticks the field and re-syncs the layer each
//! frame. Unmounting cancels the loop, which withdraws the pending frame,
//! detaches the listeners and removes every flake before cleanup returns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use super::config::FieldConfig;
use super::frame_loop::{AnimationLoop, CancelToken};
use super::random::{MathRandom, RandomSource};
use super::render::FlakeLayer;
use super::state::FlakeField;
use super::theme::FlakeStyle;
use super::types::Viewport;

/// Bundles the field with its DOM projection.
struct Scene<R> {
	field: FlakeField<R>,
	layer: FlakeLayer,
}

impl<R: RandomSource> Scene<R> {
	fn frame(&mut self, timestamp: f64) {
		self.field.tick(timestamp);
		self.sync();
	}

	fn blur(&mut self) {
		let removed = self.field.teardown_all();
		debug!("snowfall: window blurred, removed {removed} flakes");
		self.sync();
	}

	fn focus(&mut self) {
		// Focus can arrive without a preceding blur, e.g. right after load.
		if !self.field.is_empty() {
			return;
		}
		let spawned = self.field.spawn_all();
		debug!("snowfall: window focused, spawned {spawned} flakes");
		self.sync();
	}

	fn resize(&mut self, viewport: Viewport) {
		debug!(
			"snowfall: viewport resized to {}x{}",
			viewport.width, viewport.height
		);
		self.field.resize(viewport);
	}

	fn teardown(&mut self) {
		self.field.teardown_all();
		self.layer.clear();
	}

	fn sync(&mut self) {
		if let Err(err) = self.layer.sync(&self.field) {
			warn!("snowfall: failed to update flake elements: {err:?}");
		}
	}
}

/// Window event listeners owned by a mounted overlay.
struct WindowListeners {
	window: Window,
	listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl WindowListeners {
	fn attach<R: RandomSource + 'static>(
		window: &Window,
		scene: &Rc<RefCell<Scene<R>>>,
	) -> Result<Self, JsValue> {
		let (scene_blur, scene_focus, scene_resize) = (scene.clone(), scene.clone(), scene.clone());
		let listeners: Vec<(&'static str, Closure<dyn FnMut()>)> = vec![
			(
				"blur",
				Closure::new(move || scene_blur.borrow_mut().blur()),
			),
			(
				"focus",
				Closure::new(move || scene_focus.borrow_mut().focus()),
			),
			(
				"resize",
				Closure::new(move || {
					let Some(win) = web_sys::window() else {
						return;
					};
					match viewport_of(&win) {
						Ok(viewport) => scene_resize.borrow_mut().resize(viewport),
						Err(err) => warn!("snowfall: failed to read viewport: {err:?}"),
					}
				}),
			),
		];

		for (event, cb) in &listeners {
			window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
		}

		Ok(Self {
			window: window.clone(),
			listeners,
		})
	}

	fn detach(self) {
		for (event, cb) in &self.listeners {
			let _ = self
				.window
				.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
	}
}

fn viewport_of(window: &Window) -> Result<Viewport, JsValue> {
	let width = window
		.inner_width()?
		.as_f64()
		.ok_or("innerWidth is not a number")?;
	let height = window
		.inner_height()?
		.as_f64()
		.ok_or("innerHeight is not a number")?;
	Ok(Viewport::new(width, height))
}

/// Spawns the field into `container` and runs it until `token` is cancelled.
fn mount(container: HtmlElement, token: CancelToken) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or("No window to snow on")?;
	let viewport = viewport_of(&window)?;

	let mut field = FlakeField::new(viewport, FieldConfig::default(), MathRandom);
	let spawned = field.spawn_all();
	let layer = FlakeLayer::new(container, FlakeStyle::default())?;

	let scene = Rc::new(RefCell::new(Scene { field, layer }));
	scene.borrow_mut().sync();
	info!(
		"snowfall: spawned {spawned} flakes over a {}x{} viewport",
		viewport.width, viewport.height
	);

	let listeners = WindowListeners::attach(&window, &scene)?;
	let (scene_frame, scene_stop) = (scene.clone(), scene);
	AnimationLoop::start(
		token,
		move |timestamp| scene_frame.borrow_mut().frame(timestamp),
		move || {
			listeners.detach();
			scene_stop.borrow_mut().teardown();
			debug!("snowfall: animation stopped");
		},
	)
}

/// Full-viewport falling-snow overlay.
///
/// Place it anywhere in the tree; the container is `position: fixed`, sits
/// above the page and ignores pointer events. Flakes are removed while the
/// window is blurred and come back when it regains focus.
#[component]
pub fn SnowfallOverlay() -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let token = CancelToken::new();
	let mounted = Rc::new(Cell::new(false));
	let token_mount = token.clone();

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if mounted.replace(true) {
			return;
		}
		let container: HtmlElement = container.into();
		if let Err(err) = mount(container, token_mount.clone()) {
			warn!("snowfall: failed to start: {err:?}");
		}
	});

	on_cleanup(move || token.cancel());

	view! {
		<div
			node_ref=container_ref
			class="snowfall-overlay"
			aria-hidden="true"
			style="position: fixed; inset: 0; overflow: hidden; pointer-events: none; z-index: 1000;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::*;
	use web_sys::Event;

	use super::*;
	use crate::components::snowfall::random::SeededRandom;

	wasm_bindgen_test_configure!(run_in_browser);

	fn container() -> HtmlElement {
		let document = web_sys::window().unwrap().document().unwrap();
		let div: HtmlElement = document.create_element("div").unwrap().unchecked_into();
		document.body().unwrap().append_child(&div).unwrap();
		div
	}

	fn scene(root: &HtmlElement, width: f64) -> Scene<SeededRandom> {
		let mut field = FlakeField::new(
			Viewport::new(width, 600.0),
			FieldConfig::default(),
			SeededRandom::new(9),
		);
		field.spawn_all();
		let layer = FlakeLayer::new(root.clone(), FlakeStyle::default()).unwrap();
		let mut scene = Scene { field, layer };
		scene.sync();
		scene
	}

	fn dispatch(event: &str) {
		let window = web_sys::window().unwrap();
		window.dispatch_event(&Event::new(event).unwrap()).unwrap();
	}

	fn expected_count(window: &Window) -> u32 {
		let width = window.inner_width().unwrap().as_f64().unwrap();
		((width / 50.0).floor() as u32).min(2_000)
	}

	#[wasm_bindgen_test]
	fn focus_on_a_full_field_keeps_the_count() {
		let root = container();
		let mut scene = scene(&root, 800.0);
		assert_eq!(scene.field.len(), scene.field.target_count());

		scene.focus();
		assert_eq!(scene.field.len(), 16);
		assert_eq!(root.child_element_count(), 16);
	}

	#[wasm_bindgen_test]
	fn blur_then_focus_respawns_a_full_set() {
		let root = container();
		let mut scene = scene(&root, 1_024.0);

		scene.blur();
		assert!(scene.field.is_empty());
		assert_eq!(root.child_element_count(), 0);
		scene.blur();
		assert_eq!(root.child_element_count(), 0);

		scene.focus();
		assert_eq!(scene.field.len(), 20);
		assert_eq!(root.child_element_count(), 20);
	}

	#[wasm_bindgen_test]
	fn teardown_clears_field_and_container() {
		let root = container();
		let mut scene = scene(&root, 500.0);
		scene.frame(1.0);
		scene.teardown();
		assert!(scene.field.is_empty());
		assert_eq!(root.child_element_count(), 0);
	}

	#[wasm_bindgen_test]
	fn window_events_reach_a_mounted_overlay() {
		let window = web_sys::window().unwrap();
		let root = container();
		let token = CancelToken::new();
		mount(root.clone(), token.clone()).unwrap();
		let expected = expected_count(&window);
		assert_eq!(root.child_element_count(), expected);

		dispatch("blur");
		assert_eq!(root.child_element_count(), 0);
		dispatch("focus");
		assert_eq!(root.child_element_count(), expected);

		token.cancel();
	}

	#[wasm_bindgen_test]
	fn cancel_detaches_listeners_and_clears_flakes() {
		let root = container();
		let token = CancelToken::new();
		mount(root.clone(), token.clone()).unwrap();

		token.cancel();
		assert_eq!(root.child_element_count(), 0);

		dispatch("blur");
		dispatch("focus");
		assert_eq!(root.child_element_count(), 0);
	}
}
