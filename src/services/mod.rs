//! Built-in caption service implementations.

#[cfg(feature = "http")]
pub mod http;
