//! Blacklist: the revocation ledger for issued tokens.

mod service;

#[cfg(test)]
mod tests;

pub use service::{Blacklist, DEFAULT_GRACE_PERIOD_SECS, DEFAULT_KEY_CLAIM};
