//! Defines the data structures and models used throughout the application.
//!
//! This includes the static provider descriptors that seed a lookup and the
//! normalized, provider-agnostic records a lookup produces.

mod lookup;
mod provider;

pub use lookup::*;
pub use provider::*;
