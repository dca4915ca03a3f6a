//! Controllers implementing the inbound ports.

pub mod signup;

pub use signup::SignUpController;
