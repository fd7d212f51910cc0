//! AI Agency: hire specialists, take on work, keep the books above zero.

#[cfg(any(target_arch = "wasm32", test))]
pub mod actions;
#[cfg(any(target_arch = "wasm32", test))]
mod game;
pub mod logic;
pub mod outcome;
#[cfg(any(target_arch = "wasm32", test))]
pub mod render;
pub mod rules;
pub mod state;

#[cfg(any(target_arch = "wasm32", test))]
pub use game::{AgencyGame, Screen};
