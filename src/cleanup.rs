//! Bulk operations: cleanup by mask, migrate by mask, directory wipe.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::category::{Category, CategorySet};
use crate::engine::Engine;
use crate::store::FileRecord;
use crate::utils;

impl Engine {
    /// Delete the contents of every cleanup category selected in `mask`.
    ///
    /// Cache and trash bits operate on their fixed locations; Packages and
    /// Compressed bits consume the recorded scan results. Returns the bytes
    /// actually freed; per-file failures are logged and skipped.
    pub fn cleanup_by_mask(&self, mask: CategorySet) -> u64 {
        let mut freed = 0u64;

        let both_caches =
            mask.contains(Category::ThumbnailCache) && mask.contains(Category::OtherAppCache);
        if both_caches {
            // One pass over the whole cache root instead of two overlapping ones
            freed += clear_dir_entries(&self.cache_dir(), None);
        } else if mask.contains(Category::ThumbnailCache) {
            freed += remove_tree(&self.thumbnail_cache_dir());
        } else if mask.contains(Category::OtherAppCache) {
            let thumbnails = self.thumbnail_cache_dir();
            freed += clear_dir_entries(&self.cache_dir(), Some(thumbnails.as_path()));
        }

        if mask.contains(Category::Trash) {
            freed += self.empty_trash();
        }

        for category in [Category::Packages, Category::Compressed] {
            if mask.contains(category) {
                freed += delete_records(self.store.take(category));
            }
        }

        freed
    }

    /// Move every recorded file in the selected migration categories into
    /// `destination`, which is created if missing. Files that no longer
    /// exist are skipped; individual rename failures are logged. The
    /// consumed categories are cleared regardless. Returns `false` only
    /// when the destination cannot be created.
    pub fn migrate_by_mask(&self, mask: CategorySet, destination: impl AsRef<Path>) -> bool {
        let destination = destination.as_ref();
        if let Err(err) = fs::create_dir_all(destination) {
            log::warn!(
                "failed to create destination {}: {err}",
                destination.display()
            );
            return false;
        }

        for category in Category::MIGRATION {
            if !mask.contains(category) {
                continue;
            }
            for record in self.store.take(category) {
                if !record.path.exists() {
                    continue;
                }
                let Some(name) = record.path.file_name() else {
                    continue;
                };
                if let Err(err) = fs::rename(&record.path, destination.join(name)) {
                    log::warn!("failed to move {}: {err}", record.path.display());
                }
            }
        }
        true
    }

    /// Delete every regular file under `path`, then prune the
    /// subdirectories that became empty (deepest first, never the root
    /// itself). Independent of any scan.
    ///
    /// The path must be non-empty, exist, be a readable directory and
    /// resolve under the engine's home directory; any validation failure
    /// returns zero with no action taken.
    pub fn wipe_directory(&self, path: impl AsRef<Path>) -> u64 {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            log::warn!("wipe refused: empty path");
            return 0;
        }
        if !path.exists() {
            log::warn!("wipe refused: {} does not exist", path.display());
            return 0;
        }
        if !path.is_dir() {
            log::warn!("wipe refused: {} is not a directory", path.display());
            return 0;
        }
        if fs::read_dir(path).is_err() {
            log::warn!("wipe refused: {} is not readable", path.display());
            return 0;
        }
        let resolved = match fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(err) => {
                log::warn!("wipe refused: cannot resolve {}: {err}", path.display());
                return 0;
            }
        };
        let home = fs::canonicalize(&self.home).unwrap_or_else(|_| self.home.clone());
        if !resolved.starts_with(&home) {
            log::warn!(
                "wipe refused: {} is outside the home directory {}",
                resolved.display(),
                home.display()
            );
            return 0;
        }

        let mut freed = 0u64;
        for entry in WalkDir::new(&resolved)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(err) => {
                    log::warn!("cannot stat {}: {err}", entry.path().display());
                    continue;
                }
            };
            match fs::remove_file(entry.path()) {
                Ok(()) => freed += size,
                Err(err) => log::warn!("failed to delete {}: {err}", entry.path().display()),
            }
        }

        // Second pass: prune emptied subdirectories, deepest first so
        // parents empty out as their children are removed
        let mut subdirs: Vec<PathBuf> = WalkDir::new(&resolved)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.depth() > 0 && e.file_type().is_dir())
            .map(|e| e.into_path())
            .collect();
        subdirs.sort_by_key(|p| std::cmp::Reverse(p.components().count()));
        for dir in subdirs {
            if dir_is_empty(&dir) {
                let _ = fs::remove_dir(&dir);
            }
        }

        freed
    }

    /// Measure, remove and recreate both trash subdirectories. Returns the
    /// bytes that were in the trash, or zero when removal or recreation
    /// fails.
    fn empty_trash(&self) -> u64 {
        let files = self.trash_files_dir();
        let info = self.trash_info_dir();
        let freed = utils::dir_size(&files) + utils::dir_size(&info);

        for dir in [&files, &info] {
            if dir.exists() {
                if let Err(err) = fs::remove_dir_all(dir) {
                    log::warn!("failed to empty trash at {}: {err}", dir.display());
                    return 0;
                }
            }
            if let Err(err) = fs::create_dir_all(dir) {
                log::warn!("failed to recreate {}: {err}", dir.display());
                return 0;
            }
        }
        freed
    }
}

/// Remove every entry directly under `dir`, optionally keeping one subtree.
/// Returns the bytes freed by successful removals.
fn clear_dir_entries(dir: &Path, keep: Option<&Path>) -> u64 {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };
    let mut freed = 0u64;
    for entry in entries.flatten() {
        let path = entry.path();
        if keep.is_some_and(|kept| path == *kept) {
            continue;
        }
        let size = utils::entry_size(&path);
        match remove_any(&path) {
            Ok(()) => freed += size,
            Err(err) => log::warn!("failed to remove {}: {err}", path.display()),
        }
    }
    freed
}

fn remove_any(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Remove a whole subtree, returning its measured size on success.
fn remove_tree(path: &Path) -> u64 {
    if !path.exists() {
        return 0;
    }
    let size = utils::dir_size(path);
    match fs::remove_dir_all(path) {
        Ok(()) => size,
        Err(err) => {
            log::warn!("failed to remove {}: {err}", path.display());
            0
        }
    }
}

/// Delete each recorded file that still exists. Freed bytes count
/// successful removals only.
fn delete_records(records: Vec<FileRecord>) -> u64 {
    let mut freed = 0u64;
    for record in records {
        if !record.path.exists() {
            continue;
        }
        match fs::remove_file(&record.path) {
            Ok(()) => freed += record.size,
            Err(err) => log::warn!("failed to delete {}: {err}", record.path.display()),
        }
    }
    freed
}

fn dir_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
