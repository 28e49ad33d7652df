//! Payload factory tests
