//! Configuration for the token lifecycle manager.

/// Configuration for the token lifecycle manager.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Whether decode/refresh/invalidate consult the blacklist.
    ///
    /// When disabled, `invalidate` always fails with
    /// [`crate::TokenError::BlacklistDisabled`].
    pub blacklist_enabled: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            blacklist_enabled: true,
        }
    }
}
