//! Turn issue references in changelog files into Markdown links.

mod config;
mod linkify;
pub mod logging;
mod rewrite;

pub use config::Config;
pub use linkify::{DEFAULT_ISSUES_URL, Linkifier};
pub use rewrite::{RewriteMode, RewriteOutcome, RunSummary, rewrite_file, rewrite_files};
