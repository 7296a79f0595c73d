//! Natural-language reports over analysis artifacts.
//!
//! Builds a prompt from a region's artifact and message sample, sends it to an
//! OpenAI-compatible chat-completions endpoint, and keeps the result both as
//! the region's report file and in a TTL file cache.

pub mod cache;
pub mod client;
pub mod error;
pub mod generator;
pub mod prompt;

pub(crate) mod retry;

pub use cache::TtlCache;
pub use client::LlmClient;
pub use error::ReportError;
pub use generator::{ReportGenerator, REPORT_CACHE_KIND};
pub use prompt::build_prompt;
