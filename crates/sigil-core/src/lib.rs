//! Sigil Core
//!
//! Shared utilities for the Sigil text engine: logging bootstrap, math types,
//! fast hash collections and profiling scopes.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
