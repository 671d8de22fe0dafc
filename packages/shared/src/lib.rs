//! Shared utilities for Roomcast: clock abstraction and logger setup.

pub mod logger;
pub mod time;
