//! CLI command implementations.

pub(crate) mod cache;
pub(crate) mod fetch;
