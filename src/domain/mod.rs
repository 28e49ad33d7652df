//! Domain entities for the token lifecycle.

pub mod entities;

pub use entities::*;
