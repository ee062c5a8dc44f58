//! Arena-shaped storage (component A) and the parse-event contract (component C's input).

mod arena;
pub mod events;

pub use arena::{Arena, Id};
