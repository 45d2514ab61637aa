use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolve the user's home directory from the environment.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Total size of regular files under `path`, computed in parallel.
///
/// Best effort: a missing path or a non-directory yields zero, and any
/// entry that cannot be read or stat'ed contributes zero.
pub fn dir_size(path: &Path) -> u64 {
    if !path.is_dir() {
        return 0;
    }
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .par_bridge()
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Size of a file or directory tree.
pub fn entry_size(path: &Path) -> u64 {
    if path.is_dir() {
        dir_size(path)
    } else {
        path.metadata().map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn dir_size_sums_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bin"), vec![0u8; 100]).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.bin"), vec![0u8; 50]).unwrap();
        assert_eq!(dir_size(dir.path()), 150);
    }

    #[test]
    fn dir_size_of_missing_path_is_zero() {
        assert_eq!(dir_size(Path::new("/no/such/path/anywhere")), 0);
    }

    #[test]
    fn dir_size_of_a_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.bin");
        fs::write(&file, vec![0u8; 10]).unwrap();
        assert_eq!(dir_size(&file), 0);
        assert_eq!(entry_size(&file), 10);
    }
}
