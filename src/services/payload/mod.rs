//! Claim set construction and validation.

mod factory;

#[cfg(test)]
mod tests;

pub use factory::{PayloadFactory, ValidationMode};
