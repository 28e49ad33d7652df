//! Manager tests
