//! Services containing the token lifecycle logic.

pub mod blacklist;
pub mod manager;
pub mod payload;
pub mod signer;

// Re-export commonly used types
pub use blacklist::Blacklist;
pub use manager::{Manager, ManagerConfig};
pub use payload::{PayloadFactory, ValidationMode};
pub use signer::{JwtSigner, JwtSignerConfig, Signer};
