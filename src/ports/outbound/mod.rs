//! These traits define what the application needs from the outside world.

pub mod account;
pub mod email;

pub use account::*;
pub use email::*;
