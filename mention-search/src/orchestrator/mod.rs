//! Acquisition orchestrator: ordered backend fallback and response assembly.
//!
//! Runs the primary backend, then the secondary, then the synthetic
//! generator, stopping at the first stage that produces mentions. Each live
//! stage queries the bare subject and the platform-restricted subject
//! concurrently.

pub mod assemble;
pub mod crawl;
