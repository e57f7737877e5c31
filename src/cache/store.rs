// Cache store for the comment snapshot.
// Reads, merges, and rewrites the per-project JSON array of comments.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::github::Comment;

/// Read a cached comment collection.
///
/// A missing file, unparseable content, and an empty array all mean "no data"
/// and yield `None`. Other I/O failures propagate.
pub fn read_comments(path: &Path) -> Result<Option<Vec<Comment>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let comments: Vec<Comment> = match serde_json::from_str(&contents) {
        Ok(comments) => comments,
        Err(e) => {
            log::warn!("ignoring unreadable cache {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    if comments.is_empty() {
        return Ok(None);
    }
    Ok(Some(comments))
}

/// Concatenate `fresh` before `old` and drop repeated ids, keeping the first.
pub fn merge_comments(fresh: Vec<Comment>, old: Option<Vec<Comment>>) -> Vec<Comment> {
    let mut seen = HashSet::new();
    fresh
        .into_iter()
        .chain(old.into_iter().flatten())
        .filter(|comment| seen.insert(comment.id))
        .collect()
}

/// Overwrite the cache file with `comments`.
pub fn write_comments(path: &Path, comments: &[Comment]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    ensure_dir(parent)?;

    let json = serde_json::to_string_pretty(comments)?;

    // Each writer gets its own temp file; the rename is the only shared step.
    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(json.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Merge fresh comments into the old snapshot and persist the result.
pub fn update_and_save(
    path: &Path,
    fresh: Vec<Comment>,
    old: Option<Vec<Comment>>,
) -> Result<Vec<Comment>> {
    let merged = merge_comments(fresh, old);
    write_comments(path, &merged)?;
    log::debug!("wrote {} comments to {}", merged.len(), path.display());
    Ok(merged)
}

/// Create `dir` and its parents. A concurrent creator winning the race is fine.
fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir_all(dir) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        other => other,
    }
}
