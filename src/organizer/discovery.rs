use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// `.` + extension, as the allow-list stores it.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

/// Collects every file under `root` whose extension is in `allowed`.
///
/// Files of a directory are listed before its subdirectories are entered.
/// Unreadable entries are logged and skipped.
pub fn discover(root: &Path, allowed: &HashSet<String>, follow_links: bool) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                let location = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                warn!("Skipping {}: {}", location, err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let allowed = dotted_extension(entry.path())
                .map_or(false, |ext| allowed.contains(&ext));
            if !allowed {
                debug!("Skipping non-matching file: {}", entry.path().display());
            }
            allowed
        })
        .map(DirEntry::into_path)
        .collect()
}
