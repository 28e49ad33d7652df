//! Entity definitions.

pub mod token;

pub use token::{ClaimSet, Token};
