use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::category::Category;
use crate::rules::CategoryRules;
use crate::scanner::Scanner;
use crate::store::{FileRecord, ResultStore};
use crate::utils;

/// The scan-and-cleanup engine.
///
/// One instance owns the category rules, the result store and the single
/// background scan. The home directory doubles as the default scan root,
/// the location of the special categories (trash, caches) and the safety
/// boundary for [`Engine::wipe_directory`].
pub struct Engine {
    pub(crate) home: PathBuf,
    pub(crate) rules: Mutex<CategoryRules>,
    pub(crate) store: Arc<ResultStore>,
    scanner: Scanner,
}

impl Engine {
    /// Engine rooted at the user's home directory, or `None` when the home
    /// directory cannot be resolved from the environment.
    pub fn new() -> Option<Self> {
        utils::home_dir().map(Self::with_home)
    }

    /// Engine rooted at an explicit directory. Useful for tests and
    /// non-standard setups.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            rules: Mutex::new(CategoryRules::default()),
            store: Arc::new(ResultStore::new()),
            scanner: Scanner::new(),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Start a background scan rooted at `root`. Silently ignored while a
    /// scan is already running. `on_discover` receives
    /// (path, size, running total, category) for every recorded file and
    /// runs on the scan thread; it must not start or stop a scan itself.
    ///
    /// Rule changes made after this call apply to the next scan.
    pub fn start_scan<F>(&self, root: impl Into<PathBuf>, on_discover: F)
    where
        F: Fn(&Path, u64, u64, Category) + Send + 'static,
    {
        let rules = self.rules.lock().unwrap().clone();
        self.scanner.start(
            root.into(),
            rules,
            Arc::clone(&self.store),
            Box::new(on_discover),
        );
    }

    /// Ask a running scan to exit at its next entry check. Asynchronous;
    /// no-op when idle.
    pub fn request_stop(&self) {
        self.scanner.request_stop();
    }

    pub fn is_finished(&self) -> bool {
        self.scanner.is_finished()
    }

    /// Block until any in-flight scan thread has exited. Call before
    /// teardown; also invoked on drop.
    pub fn await_shutdown(&self) {
        self.scanner.join();
    }

    /// Copy of the records for one scanned category, in discovery order.
    /// Empty for special or unknown categories.
    pub fn query(&self, category: Category) -> Vec<FileRecord> {
        if !category.is_scanned() {
            return Vec::new();
        }
        self.store.query(category)
    }

    /// Bytes recorded across all scanned categories since the scan started.
    pub fn total_scanned_bytes(&self) -> u64 {
        self.store.total_bytes()
    }

    /// On-demand size of a special category, computed from its fixed
    /// location under the home directory. Zero for non-special categories.
    pub fn special_size(&self, category: Category) -> u64 {
        match category {
            Category::Trash => {
                utils::dir_size(&self.trash_files_dir()) + utils::dir_size(&self.trash_info_dir())
            }
            Category::ThumbnailCache => utils::dir_size(&self.thumbnail_cache_dir()),
            Category::OtherAppCache => {
                let total = utils::dir_size(&self.cache_dir());
                // subtract thumbnails to avoid double counting
                total.saturating_sub(utils::dir_size(&self.thumbnail_cache_dir()))
            }
            _ => 0,
        }
    }

    /// Replace the match list for one scanned category. Takes effect on the
    /// next scan.
    pub fn set_category_rules(&self, category: Category, items: &[String]) {
        self.rules.lock().unwrap().set(category, items);
    }

    pub(crate) fn cache_dir(&self) -> PathBuf {
        self.home.join(".cache")
    }

    pub(crate) fn thumbnail_cache_dir(&self) -> PathBuf {
        self.cache_dir().join("thumbnails")
    }

    pub(crate) fn trash_files_dir(&self) -> PathBuf {
        self.home.join(".local/share/Trash/files")
    }

    pub(crate) fn trash_info_dir(&self) -> PathBuf {
        self.home.join(".local/share/Trash/info")
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.await_shutdown();
    }
}
