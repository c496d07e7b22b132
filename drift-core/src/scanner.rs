//! Work tree lookup for API documents using the `ignore` crate.
//!
//! Traversal respects `.gitignore` and never descends into build output
//! directories, where generated copies of the document usually live.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{DriftError, Result};

/// Directory names that are never searched.
pub const SKIPPED_DIRS: &[&str] = &["target", "build", "node_modules"];

/// Find every file named `file_name` below `root`, sorted by path.
pub fn find_files(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(DriftError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Path does not exist: {}", root.display()),
        )));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            !(is_dir && SKIPPED_DIRS.iter().any(|d| entry.file_name() == *d))
        });

    let mut found: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|entry| entry.file_name() == file_name)
        .map(|entry| entry.into_path())
        .collect();

    found.sort();
    Ok(found)
}

/// First match of [`find_files`], shallowest path first.
pub fn find_file(root: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    let found = find_files(root, file_name)?;
    Ok(found
        .into_iter()
        .min_by(|a, b| {
            a.components()
                .count()
                .cmp(&b.components().count())
                .then_with(|| a.cmp(b))
        }))
}
