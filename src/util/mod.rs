//! Fixtures and helpers shared by the in-crate test modules.

pub(crate) mod time;
