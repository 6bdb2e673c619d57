//! Provides the lookup core: the provider registry, the HTTP backend seam and
//! the concurrent fan-out engine.
//!
//! Includes:
//! - `registry`: the built-in list of public geolocation providers.
//! - `backend`: the `HttpBackend` trait and its `reqwest` implementation.
//! - `extract`: dotted field-path lookups into provider JSON.
//! - `engine`: single-provider queries and the fan-out `LookupEngine`.

mod backend;
mod engine;
mod extract;
mod registry;

pub use backend::ReqwestBackend;
pub use engine::*;
pub use registry::*;
