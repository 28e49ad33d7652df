//! Manager: orchestrates signer, payload factory and blacklist to implement
//! the token lifecycle (encode, decode, refresh, invalidate).

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::ManagerConfig;
pub use service::Manager;
