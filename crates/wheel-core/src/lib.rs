pub mod clock;
pub mod config;
pub mod constants;
pub mod drag;
pub mod easing;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod peg;
pub mod rng;
pub mod selector;
pub mod target;

pub use clock::*;
pub use config::*;
pub use constants::*;
pub use drag::*;
pub use easing::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use peg::*;
pub use rng::*;
pub use selector::*;
pub use target::*;
