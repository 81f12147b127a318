//! # mention-scout
//!
//! HTTP service around [`mention_search`]: accepts a subject name, crawls
//! public search engines for mentions of it and returns them with an
//! estimate of the subject's weekly mention volume on a social platform.
//!
//! The crawl itself never fails; the server only adds request validation,
//! configuration and logging.

pub mod config;
pub mod error;
pub mod server;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use server::MentionServer;
