//! Search backend implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchBackend`]
//! with the request shape and marker table for one engine's results page.

pub mod bing;
pub mod duckduckgo;

pub use bing::BingBackend;
pub use duckduckgo::DuckDuckGoBackend;
