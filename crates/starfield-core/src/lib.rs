//! Platform-free starfield engine.
//!
//! The engine draws a twinkling, parallaxing star field with faint
//! constellation links, plus two populations of short-lived sprites
//! (shooting-star streaks and rotating decorative asteroids). Hosts plug in
//! through the traits in [`host`].

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod host;
mod random;
pub mod sprites;
pub mod stars;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use host::*;
pub use sprites::*;
pub use stars::*;
