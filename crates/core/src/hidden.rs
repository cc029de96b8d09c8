use std::path::Path;

/// Whether the platform treats `path` as hidden.
///
/// Unix-likes use the leading-dot convention. Windows reads the hidden and
/// system attribute bits; an entry whose metadata cannot be read is treated
/// as visible.
pub fn is_hidden(path: &Path) -> bool {
    imp::is_hidden(path)
}

#[cfg(not(windows))]
mod imp {
    use std::path::Path;

    pub fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false)
    }
}

#[cfg(windows)]
mod imp {
    use std::fs;
    use std::os::windows::fs::MetadataExt;
    use std::path::Path;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

    pub fn is_hidden(path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|meta| {
                meta.file_attributes() & (FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM) != 0
            })
            .unwrap_or(false)
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::is_hidden;
    use std::path::Path;

    #[test]
    fn dot_files_are_hidden() {
        assert!(is_hidden(Path::new("/tmp/x/.DS_Store")));
        assert!(is_hidden(Path::new(".env")));
    }

    #[test]
    fn plain_and_inner_dot_names_are_visible() {
        assert!(!is_hidden(Path::new("/tmp/x/cat.png")));
        assert!(!is_hidden(Path::new("archive.tar.gz")));
        assert!(!is_hidden(Path::new("/")));
    }
}
