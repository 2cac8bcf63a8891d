//! In-place rewriting of changelog files.

use crate::linkify::Linkifier;
use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What to do with linkified content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteMode {
    /// Overwrite each file with its linkified content.
    #[default]
    Write,
    /// Compare only, never touch the file.
    Check,
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    path: PathBuf,
    lines: usize,
    references: usize,
    changed: bool,
}

impl RewriteOutcome {
    /// Path as given on the command line.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines in the file.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Number of references that were (or would be) linkified.
    pub fn references(&self) -> usize {
        self.references
    }

    /// Whether linkified content differs from the original bytes.
    ///
    /// Trailing whitespace or CRLF normalisation alone counts as a change.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Linkifies a file in place.
///
/// Reads the whole file, linkifies every line and, in [`RewriteMode::Write`],
/// replaces the file with the result. The file is replaced even when nothing
/// changed so an unwritable path always surfaces as an error. On failure the
/// original content is left intact.
///
/// # Arguments
///
/// * `path`: File to rewrite
/// * `linkifier`: Linkifier holding the issue tracker URL
/// * `mode`: Whether to write back or only compare
///
/// # Errors
///
/// Returns error if the file does not exist, is not valid UTF8, is read-only,
/// or cannot be replaced
pub fn rewrite_file(
    path: &Path,
    linkifier: &Linkifier,
    mode: RewriteMode,
) -> Result<RewriteOutcome> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let references = original
        .lines()
        .map(|line| linkifier.count_references(line))
        .sum();
    let rewritten = linkifier.linkify_text(&original);
    let changed = rewritten != original;

    if mode == RewriteMode::Write {
        replace_contents(path, &rewritten)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(RewriteOutcome {
        path: path.to_path_buf(),
        lines: original.lines().count(),
        references,
        changed,
    })
}

/// Replaces file contents through a sibling temporary file.
///
/// The new content is fully written and synced before it is renamed over the
/// target, so a failed write never truncates the original. Symlinks are
/// followed and the target's permissions are carried over.
fn replace_contents(path: &Path, contents: &str) -> Result<()> {
    let target = fs::canonicalize(path).context("Failed to resolve path")?;
    let permissions = fs::metadata(&target)
        .context("Failed to read metadata")?
        .permissions();
    if permissions.readonly() {
        bail!("File is read-only");
    }

    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;
    staged
        .write_all(contents.as_bytes())
        .context("Failed to write temporary file")?;
    staged
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;
    staged
        .as_file()
        .set_permissions(permissions)
        .context("Failed to copy permissions")?;
    staged
        .persist(&target)
        .context("Failed to replace file")?;

    Ok(())
}

/// Outcomes of a whole run, in argument order.
#[derive(Debug, Default)]
pub struct RunSummary {
    outcomes: Vec<RewriteOutcome>,
    failures: Vec<(PathBuf, anyhow::Error)>,
}

impl RunSummary {
    /// Files processed without error.
    pub fn outcomes(&self) -> &[RewriteOutcome] {
        &self.outcomes
    }

    /// Files that failed, with the error that stopped them.
    pub fn failures(&self) -> &[(PathBuf, anyhow::Error)] {
        &self.failures
    }

    /// Files whose content differs from the linkified form.
    pub fn changed(&self) -> impl Iterator<Item = &RewriteOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.changed())
    }

    /// Whether any file failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Rewrites files one at a time in the given order.
///
/// A failing file is logged and recorded; the remaining files are still
/// processed.
pub fn rewrite_files<P: AsRef<Path>>(
    paths: &[P],
    linkifier: &Linkifier,
    mode: RewriteMode,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for path in paths {
        let path = path.as_ref();
        match rewrite_file(path, linkifier, mode) {
            Ok(outcome) => {
                match (mode, outcome.changed()) {
                    (RewriteMode::Check, true) => {
                        tracing::warn!(path = %path.display(), "needs linkify");
                    }
                    (RewriteMode::Write, true) => tracing::info!(
                        path = %path.display(),
                        references = outcome.references(),
                        "rewritten"
                    ),
                    (_, false) => tracing::debug!(path = %path.display(), "already up to date"),
                }
                summary.outcomes.push(outcome);
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                summary.failures.push((path.to_path_buf(), e));
            }
        }
    }

    summary
}
