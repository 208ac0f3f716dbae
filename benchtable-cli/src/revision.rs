//! Revision and Package Resolution
//!
//! Turns the `--rev` list and package source flags into the labels used to
//! locate result files.
//!
//! Special revision tokens:
//! - `dirty` - the working tree, used verbatim
//! - `default` - the repository's default branch, resolved through git

use anyhow::Context;
use std::path::Path;
use std::process::Command;

/// Revision token for the uncommitted working tree
pub const DIRTY: &str = "dirty";

/// Revision token resolved to the default branch
pub const DEFAULT_BRANCH: &str = "default";

/// Split a comma-delimited revision list, dropping blanks
pub fn parse_revisions(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|rev| !rev.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve every token of `revisions`, keeping order
pub fn resolve_revisions(revisions: &[String], repo: Option<&Path>) -> anyhow::Result<Vec<String>> {
    revisions
        .iter()
        .map(|rev| resolve_revision(rev, repo))
        .collect()
}

/// Resolve one revision token. Anything but `default` passes through unchanged.
pub fn resolve_revision(rev: &str, repo: Option<&Path>) -> anyhow::Result<String> {
    if rev != DEFAULT_BRANCH {
        return Ok(rev.to_string());
    }

    let branch = resolve_default_branch(repo)?;
    tracing::debug!(branch = %branch, "resolved default branch");
    Ok(branch)
}

/// Name of the default branch as recorded by `origin/HEAD`
fn resolve_default_branch(repo: Option<&Path>) -> anyhow::Result<String> {
    let mut command = Command::new("git");
    if let Some(repo) = repo {
        command.arg("-C").arg(repo);
    }
    let output = command
        .args(["symbolic-ref", "--short", "refs/remotes/origin/HEAD"])
        .output()
        .context("Failed to run git to resolve the default branch")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow::anyhow!(
            "Could not resolve the default branch: {}",
            stderr.trim()
        ));
    }

    let symbolic = String::from_utf8(output.stdout)?;
    let branch = strip_remote(symbolic.trim());
    if branch.is_empty() {
        return Err(anyhow::anyhow!("Default branch resolved to an empty name"));
    }
    Ok(branch.to_string())
}

fn strip_remote(symbolic: &str) -> &str {
    symbolic.strip_prefix("origin/").unwrap_or(symbolic)
}

/// Package name from an explicit name, a source path, or a repository URL
pub fn package_name(
    name: Option<&str>,
    path: Option<&Path>,
    url: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        return Ok(name.to_string());
    }

    if let Some(path) = path {
        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        return resolved
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow::anyhow!("Cannot derive a package name from path {}", path.display())
            });
    }

    if let Some(url) = url {
        return package_from_url(url)
            .ok_or_else(|| anyhow::anyhow!("Cannot derive a package name from URL {url}"));
    }

    Err(anyhow::anyhow!(
        "A package name, --path, or --url is required"
    ))
}

fn package_from_url(url: &str) -> Option<String> {
    let last = url.trim_end_matches('/').rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then(|| name.to_string())
}
