//! Interfaces between the sign-up controller and the outside world.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
