use crate::error::BatchError;
use crate::hidden::is_hidden;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// OS metadata files that are never renamed.
pub const SENTINEL_NAMES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    "ehthumbs.db",
    "Icon\r",
];

#[derive(Debug, Clone)]
pub struct EntryFilter {
    pub sentinels: Vec<String>,
    pub is_hidden: fn(&Path) -> bool,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            sentinels: SENTINEL_NAMES.iter().map(|s| s.to_string()).collect(),
            is_hidden,
        }
    }
}

impl EntryFilter {
    pub fn with_extra_sentinels(extra: &[String]) -> Self {
        let mut filter = Self::default();
        for name in extra {
            if !name.is_empty() && !filter.sentinels.contains(name) {
                filter.sentinels.push(name.clone());
            }
        }
        filter
    }

    fn is_sentinel(&self, name: &OsStr) -> bool {
        self.sentinels.iter().any(|s| OsStr::new(s) == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListingStats {
    pub scanned_entries: usize,
    pub skipped_dirs: usize,
    pub skipped_sentinel: usize,
    pub skipped_hidden: usize,
    pub eligible: usize,
}

/// Lists the renameable files directly inside `root`, sorted by file name in
/// ordinal order. Symlinks are not followed when deciding what a directory is.
pub fn collect_eligible_files(
    root: &Path,
    filter: &EntryFilter,
    stats: &mut ListingStats,
) -> Result<Vec<PathBuf>, BatchError> {
    let unreadable = |source: io::Error| BatchError::DirectoryUnreadable {
        path: root.to_path_buf(),
        source,
    };

    let mut out = Vec::new();
    for entry in fs::read_dir(root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        stats.scanned_entries += 1;

        if entry.file_type().map_err(unreadable)?.is_dir() {
            stats.skipped_dirs += 1;
            continue;
        }
        if filter.is_sentinel(&entry.file_name()) {
            debug!(path = %path.display(), "skipping sentinel file");
            stats.skipped_sentinel += 1;
            continue;
        }
        if (filter.is_hidden)(&path) {
            debug!(path = %path.display(), "skipping hidden file");
            stats.skipped_hidden += 1;
            continue;
        }
        out.push(path);
    }

    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    stats.eligible = out.len();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[cfg(not(windows))]
    #[test]
    fn skips_directories_sentinels_and_hidden() {
        let temp = tempdir().expect("tempdir");
        for name in ["cat.png", "dog.jpg", ".DS_Store", "Thumbs.db", ".secret"] {
            fs::write(temp.path().join(name), b"x").expect("write");
        }
        fs::create_dir(temp.path().join("nested")).expect("mkdir");

        let mut stats = ListingStats::default();
        let files = collect_eligible_files(temp.path(), &EntryFilter::default(), &mut stats)
            .expect("listing should succeed");

        assert_eq!(names(&files), vec!["cat.png", "dog.jpg"]);
        assert_eq!(
            stats,
            ListingStats {
                scanned_entries: 6,
                skipped_dirs: 1,
                skipped_sentinel: 2,
                skipped_hidden: 1,
                eligible: 2,
            }
        );
    }

    #[test]
    fn sorts_by_ordinal_name() {
        let temp = tempdir().expect("tempdir");
        for name in ["b.txt", "A.txt", "a.png", "B10.txt", "B9.txt"] {
            fs::write(temp.path().join(name), b"x").expect("write");
        }

        let mut stats = ListingStats::default();
        let files = collect_eligible_files(temp.path(), &EntryFilter::default(), &mut stats)
            .expect("listing should succeed");
        assert_eq!(
            names(&files),
            vec!["A.txt", "B10.txt", "B9.txt", "a.png", "b.txt"]
        );
    }

    #[test]
    fn missing_directory_is_unreadable() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("nope");

        let mut stats = ListingStats::default();
        let err = collect_eligible_files(&missing, &EntryFilter::default(), &mut stats)
            .expect_err("missing directory must fail");
        assert!(matches!(err, BatchError::DirectoryUnreadable { ref path, .. } if *path == missing));
    }

    #[test]
    fn extra_sentinels_and_custom_hidden_rule() {
        let temp = tempdir().expect("tempdir");
        for name in ["a.txt", "~lock.txt", "notes.tmp", "b.txt"] {
            fs::write(temp.path().join(name), b"x").expect("write");
        }

        let mut filter = EntryFilter::with_extra_sentinels(&["notes.tmp".to_string()]);
        filter.is_hidden = |p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with('~'))
                .unwrap_or(false)
        };

        let mut stats = ListingStats::default();
        let files =
            collect_eligible_files(temp.path(), &filter, &mut stats).expect("listing");
        assert_eq!(names(&files), vec!["a.txt", "b.txt"]);
        assert_eq!(stats.skipped_sentinel, 1);
        assert_eq!(stats.skipped_hidden, 1);
    }

    #[test]
    fn extra_sentinels_are_not_duplicated() {
        let filter = EntryFilter::with_extra_sentinels(&[
            ".DS_Store".to_string(),
            String::new(),
            "Desktop.lnk".to_string(),
        ]);
        assert_eq!(filter.sentinels.len(), SENTINEL_NAMES.len() + 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_counts_as_file() {
        let temp = tempdir().expect("tempdir");
        let target = temp.path().join("real");
        fs::create_dir(&target).expect("mkdir");
        std::os::unix::fs::symlink(&target, temp.path().join("link")).expect("symlink");

        let mut stats = ListingStats::default();
        let files = collect_eligible_files(temp.path(), &EntryFilter::default(), &mut stats)
            .expect("listing");
        assert_eq!(names(&files), vec!["link"]);
        assert_eq!(stats.skipped_dirs, 1);
    }
}
