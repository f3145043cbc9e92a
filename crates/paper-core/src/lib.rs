//! Paper Core
//!
//! Shared utilities for the Paper engine crates: logging bootstrap, profiling
//! scopes, math types and hash collections.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
