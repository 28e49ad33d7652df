//! # Tokengate
//!
//! Lifecycle management for signed, claims-bearing authentication tokens.
//! This crate covers encoding a claim set into a token, decoding and
//! validating a token, refreshing a token while revoking its predecessor,
//! and blacklist-based revocation with grace-period semantics.
//!
//! The cryptographic signer and the persistent key-value store are modelled
//! as capabilities ([`Signer`] and [`Storage`]) so the orchestration logic
//! stays independent of any concrete backend.

pub mod domain;
pub mod errors;
pub mod services;
pub mod storage;

// Re-export commonly used types for convenience
pub use domain::entities::token::{ClaimSet, Token};
pub use errors::{Result, TokenError};
pub use services::blacklist::Blacklist;
pub use services::manager::{Manager, ManagerConfig};
pub use services::payload::{PayloadFactory, ValidationMode};
pub use services::signer::{JwtSigner, JwtSignerConfig, Signer};
pub use storage::{MemoryStorage, Storage};
