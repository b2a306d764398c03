//! Input file discovery
//!
//! Yields snapshot file paths lazily: either the single named file, or a
//! recursive directory walk filtered to the snapshot extension. Unreadable
//! directory entries are logged and skipped rather than aborting the walk.

use crate::config::TABLE_EXTENSION;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Lazy sequence of snapshot file paths under an input root
pub enum Discovery {
    /// A single explicitly named file, delivered once
    File(Option<PathBuf>),

    /// A recursive directory traversal, filtered to `.csv` files
    Walk(walkdir::IntoIter),
}

impl Discovery {
    /// Create a discovery sequence for the input path
    pub fn new(root: &Path) -> Self {
        if root.is_dir() {
            Discovery::Walk(WalkDir::new(root).into_iter())
        } else {
            Discovery::File(Some(root.to_path_buf()))
        }
    }
}

impl Iterator for Discovery {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        match self {
            Discovery::File(slot) => slot.take(),
            Discovery::Walk(walk) => {
                for entry in walk {
                    let entry = match entry {
                        Ok(entry) => entry,
                        Err(e) => {
                            warn!(error = %e, "skipping unreadable directory entry");
                            continue;
                        }
                    };
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.path();
                    if path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| ext.eq_ignore_ascii_case(TABLE_EXTENSION))
                        .unwrap_or(false)
                    {
                        return Some(path.to_path_buf());
                    }
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;

    #[test]
    fn test_single_file_delivered_once() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("2019-05-02.csv");
        fs::write(&file, "").unwrap();

        let mut discovery = Discovery::new(&file);
        assert_eq!(discovery.next(), Some(file));
        assert_eq!(discovery.next(), None);
    }

    #[test]
    fn test_walk_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("q1")).unwrap();
        fs::write(dir.path().join("a.csv"), "").unwrap();
        fs::write(dir.path().join("q1/b.csv"), "").unwrap();
        fs::write(dir.path().join("q1/c.CSV"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("q1/readme.md"), "").unwrap();

        let found: BTreeSet<PathBuf> = Discovery::new(dir.path()).collect();
        let expected: BTreeSet<PathBuf> = [
            dir.path().join("a.csv"),
            dir.path().join("q1/b.csv"),
            dir.path().join("q1/c.CSV"),
        ]
        .into_iter()
        .collect();

        assert_eq!(found, expected);
    }
}
