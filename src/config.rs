//! Command line configuration.

use crate::linkify::{DEFAULT_ISSUES_URL, Linkifier};
use crate::rewrite::RewriteMode;
use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command line configuration for linkify-changelog.
#[derive(Debug, Clone, Parser)]
#[command(name = "linkify-changelog", version, about, long_about = None)]
pub struct Config {
    /// Changelog files to rewrite in place
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Report files that need linkifying without rewriting them
    #[arg(long)]
    pub check: bool,

    /// Issue tracker URL the issue number is appended to
    #[arg(long, default_value = DEFAULT_ISSUES_URL)]
    pub issues_url: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the issues URL is rejected by [`Linkifier::new`].
    pub fn validate(&self) -> Result<()> {
        self.linkifier().map(|_| ())
    }

    /// Returns linkifier for the configured issues URL.
    ///
    /// # Errors
    ///
    /// Returns error if the issues URL is empty, not HTTP(S), or contains
    /// whitespace.
    pub fn linkifier(&self) -> Result<Linkifier> {
        Linkifier::new(self.issues_url.as_str())
    }

    /// Returns rewrite mode selected by `--check`.
    pub fn mode(&self) -> RewriteMode {
        if self.check {
            RewriteMode::Check
        } else {
            RewriteMode::Write
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(issues_url: &str) -> Config {
        Config {
            files: vec![PathBuf::from("CHANGELOG.md")],
            check: false,
            issues_url: issues_url.to_string(),
            verbose: 0,
        }
    }

    #[test]
    fn test_parse_defaults() {
        // Arrange & Act
        let config = Config::try_parse_from(["linkify-changelog", "CHANGELOG.md"])
            .expect("Should parse");

        // Assert
        assert_eq!(config.files, vec![PathBuf::from("CHANGELOG.md")]);
        assert!(!config.check);
        assert_eq!(config.issues_url, DEFAULT_ISSUES_URL);
        assert_eq!(config.verbose, 0);
        assert_eq!(config.mode(), RewriteMode::Write);
    }

    #[test]
    fn test_parse_multiple_files_in_order() {
        // Arrange & Act
        let config = Config::try_parse_from(["linkify-changelog", "b.md", "a.md", "c.md"])
            .expect("Should parse");

        // Assert
        assert_eq!(
            config.files,
            vec![
                PathBuf::from("b.md"),
                PathBuf::from("a.md"),
                PathBuf::from("c.md")
            ]
        );
    }

    #[test]
    fn test_parse_requires_file() {
        // Arrange & Act
        let result = Config::try_parse_from(["linkify-changelog"]);

        // Assert
        assert!(result.is_err(), "At least one file should be required");
    }

    #[test]
    fn test_parse_check_and_verbosity() {
        // Arrange & Act
        let config = Config::try_parse_from(["linkify-changelog", "--check", "-vv", "CHANGELOG.md"])
            .expect("Should parse");

        // Assert
        assert_eq!(config.mode(), RewriteMode::Check);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn test_validate_default_url() {
        // Arrange
        let config = config_with_url(DEFAULT_ISSUES_URL);

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_ok(), "Default URL should be valid");
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        for url in ["", "ftp://example.com/issues/", "https://example.com/my issues/"] {
            // Arrange
            let config = config_with_url(url);

            // Act
            let result = config.validate();

            // Assert
            assert!(result.is_err(), "URL should be rejected: {:?}", url);
        }
    }

    #[test]
    fn test_linkifier_uses_configured_url() {
        // Arrange
        let config = config_with_url("https://example.com/issues");

        // Act
        let linkifier = config.linkifier().expect("Should build linkifier");

        // Assert
        assert_eq!(linkifier.issues_url(), "https://example.com/issues/");
    }

    #[test]
    fn test_linkifier_rejects_whitespace_url() {
        // Arrange
        let config = config_with_url("https://example.com/a \\#");

        // Act
        let result = config.linkifier();

        // Assert
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("whitespace"), "Unexpected error: {}", err_msg);
    }
}
