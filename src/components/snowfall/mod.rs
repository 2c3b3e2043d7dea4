//! Falling-snow overlay.
//!
//! Keeps a field of snowflakes scattered over the viewport and animates them
//! with `requestAnimationFrame`:
//! - One flake per 50px of viewport width
//! - Descent derived from time since each flake's first frame, not frame deltas
//! - Small random horizontal nudges on a fixed timestamp cadence
//! - Flakes that leave the bottom are replaced near the top
//! - Everything is removed while the window is blurred and respawned on focus
//!
//! # Example
//!
//! ```ignore
//! use snowfall::SnowfallOverlay;
//!
//! view! { <SnowfallOverlay /> }
//! ```

mod component;
pub mod config;
pub mod frame_loop;
mod particles;
pub mod random;
mod render;
mod state;
pub mod theme;
mod types;

pub use component::SnowfallOverlay;
pub use particles::{Descent, Flake, FlakeId};
pub use render::FlakeLayer;
pub use state::{FlakeField, on_nudge_cadence};
pub use types::{Scatter, TickReport, Viewport};
