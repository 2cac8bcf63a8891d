//! Issue reference linkification.
//!
//! Rewrites references written as ` \#123` into Markdown links pointing at
//! the issue tracker. Pull requests share the `/issues/` path, the host
//! redirects them.

use anyhow::{Result, bail};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Issue tracker URL prefix used when no override is configured.
pub const DEFAULT_ISSUES_URL: &str = "https://github.com/0xPellNetwork/pelldvs/issues/";

/// Pattern for issue references.
/// Matches: one whitespace character, `\#`, then a possibly empty digit run.
static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s)\\#([0-9]*)").expect("reference pattern is valid"));

/// Turns issue references into Markdown links.
///
/// Output never matches the reference pattern again: the whitespace before a
/// linked reference is followed by `[` rather than a backslash. Running the
/// linkifier over its own output is therefore a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linkifier {
    issues_url: String,
}

impl Default for Linkifier {
    fn default() -> Self {
        Self {
            issues_url: DEFAULT_ISSUES_URL.to_string(),
        }
    }
}

impl Linkifier {
    /// Creates linkifier for the given issue tracker URL prefix.
    ///
    /// The issue number is appended verbatim. A path-style prefix missing
    /// its trailing `/` gets one; a prefix with a query (`?id=`) is kept as
    /// is.
    ///
    /// # Arguments
    ///
    /// * `issues_url`: URL prefix the issue number is appended to
    ///
    /// # Errors
    ///
    /// Returns error if the URL is empty, not HTTP(S), or contains
    /// whitespace. Whitespace in the URL would let linkified output match the
    /// reference pattern again.
    pub fn new(issues_url: impl Into<String>) -> Result<Self> {
        let mut issues_url = issues_url.into();
        if issues_url.is_empty() {
            bail!("Issues URL must not be empty");
        }
        if !issues_url.starts_with("http://") && !issues_url.starts_with("https://") {
            bail!("Issues URL must start with http:// or https://: {}", issues_url);
        }
        if issues_url.chars().any(char::is_whitespace) {
            bail!("Issues URL must not contain whitespace: {:?}", issues_url);
        }

        if !issues_url.ends_with('/') && !issues_url.contains('?') {
            issues_url.push('/');
        }
        Ok(Self { issues_url })
    }

    /// Returns the issue tracker URL prefix.
    pub fn issues_url(&self) -> &str {
        &self.issues_url
    }

    /// Linkifies a single line.
    ///
    /// Trailing whitespace, including any line terminator, is stripped
    /// first. Each reference is replaced independently and the whitespace
    /// character in front of it is kept as is.
    ///
    /// # Returns
    ///
    /// Borrowed line when there was nothing to replace, owned otherwise
    pub fn linkify_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        REFERENCE_PATTERN.replace_all(line.trim_end(), |caps: &Captures<'_>| {
            let number = &caps[2];
            format!("{}[\\#{}]({}{})", &caps[1], number, self.issues_url, number)
        })
    }

    /// Counts references the line would have linkified.
    pub fn count_references(&self, line: &str) -> usize {
        REFERENCE_PATTERN.find_iter(line.trim_end()).count()
    }

    /// Linkifies every line of a text.
    ///
    /// Line count and order are preserved. Every output line, including the
    /// last, ends with a single `\n`. Lines break on `\n` and `\r\n` only;
    /// a lone `\r` stays inside its line.
    pub fn linkify_text(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        for line in text.lines() {
            output.push_str(&self.linkify_line(line));
            output.push('\n');
        }
        output
    }
}
