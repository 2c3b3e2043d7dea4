//! `requestAnimationFrame` driver with explicit cancellation.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::warn;
use wasm_bindgen::prelude::*;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

thread_local! {
	/// Hooks registered through [`CancelToken::on_cancel`], keyed by token id.
	/// They hold main-thread state, so they live beside it rather than in the
	/// token.
	static CANCEL_HOOKS: RefCell<HashMap<u64, Vec<Box<dyn FnOnce()>>>> =
		RefCell::new(HashMap::new());
}

#[derive(Debug)]
struct TokenState {
	id: u64,
	cancelled: AtomicBool,
}

/// Shared stop flag for an [`AnimationLoop`].
///
/// Cheap to clone and `Send + Sync`, so it can be handed to Leptos cleanup
/// hooks while the loop itself stays on the main thread. Cancelling runs the
/// hooks registered on the calling thread right away.
#[derive(Clone, Debug)]
pub struct CancelToken(Arc<TokenState>);

impl Default for CancelToken {
	fn default() -> Self {
		Self(Arc::new(TokenState {
			id: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
			cancelled: AtomicBool::new(false),
		}))
	}
}

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the flag and run pending hooks. Later calls do nothing.
	pub fn cancel(&self) {
		if self.0.cancelled.swap(true, Ordering::AcqRel) {
			return;
		}
		let hooks = CANCEL_HOOKS
			.try_with(|hooks| hooks.borrow_mut().remove(&self.0.id))
			.ok()
			.flatten()
			.unwrap_or_default();
		for hook in hooks {
			hook();
		}
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.cancelled.load(Ordering::Acquire)
	}

	/// Run `hook` when this token is cancelled, or now if it already is.
	pub fn on_cancel(&self, hook: impl FnOnce() + 'static) {
		if self.is_cancelled() {
			hook();
			return;
		}
		CANCEL_HOOKS.with(|hooks| {
			hooks
				.borrow_mut()
				.entry(self.0.id)
				.or_default()
				.push(Box::new(hook));
		});
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls a closure once per display frame until its token is cancelled.
pub struct AnimationLoop;

impl AnimationLoop {
	/// Start requesting frames.
	///
	/// `on_frame` receives each frame's timestamp in milliseconds. Cancelling
	/// the token withdraws the pending frame request, releases the frame
	/// closure and runs `on_stop` once, synchronously inside
	/// [`CancelToken::cancel`].
	pub fn start(
		token: CancelToken,
		mut on_frame: impl FnMut(f64) + 'static,
		on_stop: impl FnOnce() + 'static,
	) -> Result<(), JsValue> {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let (callback_inner, pending_inner) = (callback.clone(), pending.clone());
		let token_inner = token.clone();

		*callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			pending_inner.set(None);
			if token_inner.is_cancelled() {
				return;
			}

			on_frame(timestamp);

			if token_inner.is_cancelled() {
				return;
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				match request_frame(cb) {
					Ok(id) => pending_inner.set(Some(id)),
					Err(err) => warn!("snowfall: failed to request animation frame: {err:?}"),
				}
			}
		}));

		{
			let first = callback.borrow();
			if let Some(ref cb) = *first {
				pending.set(Some(request_frame(cb)?));
			}
		}

		token.on_cancel(move || {
			if let Some(id) = pending.take() {
				if let Some(window) = web_sys::window() {
					let _ = window.cancel_animation_frame(id);
				}
			}
			// Breaks the Rc cycle so the closure can be freed.
			let _ = callback.borrow_mut().take();
			on_stop();
		});
		Ok(())
	}
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
	web_sys::window()
		.ok_or("No window to animate in")?
		.request_animation_frame(cb.as_ref().unchecked_ref())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
	use wasm_bindgen_futures::JsFuture;
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	async fn next_frame() {
		let promise = js_sys::Promise::new(&mut |resolve, _| {
			let window = web_sys::window().unwrap();
			window.request_animation_frame(&resolve).unwrap();
		});
		JsFuture::from(promise).await.unwrap();
	}

	fn counters() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
		(Rc::new(Cell::new(0)), Rc::new(Cell::new(0)))
	}

	#[wasm_bindgen_test]
	async fn frames_stop_once_cancelled() {
		let (frames, stops) = counters();
		let token = CancelToken::new();
		let (frames_cb, stops_cb) = (frames.clone(), stops.clone());
		AnimationLoop::start(
			token.clone(),
			move |_| frames_cb.set(frames_cb.get() + 1),
			move || stops_cb.set(stops_cb.get() + 1),
		)
		.unwrap();

		for _ in 0..3 {
			next_frame().await;
		}
		assert!(frames.get() > 0);
		assert_eq!(stops.get(), 0);

		token.cancel();
		assert_eq!(stops.get(), 1);
		let seen = frames.get();

		for _ in 0..3 {
			next_frame().await;
		}
		assert_eq!(frames.get(), seen);
		token.cancel();
		assert_eq!(stops.get(), 1);
	}

	#[wasm_bindgen_test]
	async fn cancel_before_first_frame_skips_it() {
		let (frames, stops) = counters();
		let token = CancelToken::new();
		let (frames_cb, stops_cb) = (frames.clone(), stops.clone());
		AnimationLoop::start(
			token.clone(),
			move |_| frames_cb.set(frames_cb.get() + 1),
			move || stops_cb.set(stops_cb.get() + 1),
		)
		.unwrap();

		token.cancel();
		assert_eq!(stops.get(), 1);
		for _ in 0..3 {
			next_frame().await;
		}
		assert_eq!(frames.get(), 0);
	}
}
