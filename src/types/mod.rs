//! Core types for Scout.

pub mod message;
pub mod request;

pub use message::*;
pub use request::*;
