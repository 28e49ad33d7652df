//! Blacklist tests
