//! Generation backends
//!
//! Both variants return Gemini's `candidates` schema unchanged.

pub(crate) mod common;
pub mod direct;
pub mod proxied;

pub use direct::DirectBackend;
pub use proxied::ProxiedBackend;
