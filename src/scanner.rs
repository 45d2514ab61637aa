use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use walkdir::WalkDir;

use crate::category::Category;
use crate::rules::CategoryRules;
use crate::store::{FileRecord, ResultStore};

/// Progress callback invoked for every recorded file:
/// (path, size, running total, category). Runs on the scan thread; it must
/// not start or stop a scan itself.
pub type DiscoverFn = dyn Fn(&Path, u64, u64, Category) + Send;

/// Owns the single background walk and its lifecycle flags.
pub struct Scanner {
    running: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            stop: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    /// Launch a background walk rooted at `root`. Silently ignored while a
    /// walk is already running. Clears `store` before the walk begins.
    pub fn start(
        &self,
        root: PathBuf,
        rules: CategoryRules,
        store: Arc<ResultStore>,
        on_discover: Box<DiscoverFn>,
    ) {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }
        self.stop.store(false, Ordering::SeqCst);

        // Reap the previous walk's thread before launching the next one
        if let Some(handle) = self.handle.lock().unwrap().take() {
            let _ = handle.join();
        }
        store.clear();

        let running = Arc::clone(&self.running);
        let stop = Arc::clone(&self.stop);
        let handle = std::thread::spawn(move || {
            walk(&root, &rules, &store, &stop, on_discover.as_ref());
            running.store(false, Ordering::SeqCst);
        });
        *self.handle.lock().unwrap() = Some(handle);
    }

    /// Ask a running walk to exit at its next entry check. No-op if idle.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }

    /// Join the background thread if one was ever launched.
    pub fn join(&self) {
        if let Some(handle) = self.handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// True when `path` resolves under the already-organized subdirectory.
fn already_organized(path: &Path, organized: &Path) -> bool {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    resolved.starts_with(organized)
}

fn walk(
    root: &Path,
    rules: &CategoryRules,
    store: &ResultStore,
    stop: &AtomicBool,
    on_discover: &DiscoverFn,
) {
    let resolved_root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let organized = resolved_root.join("MoveFiles");

    // Hidden entries are pruned, which also stops descent into hidden
    // directories. The root itself is exempt.
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        if stop.load(Ordering::Relaxed) {
            log::debug!("scan stopped by request");
            break;
        }
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Unreadable subtree: abandon it and continue with siblings
                log::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let category = rules.classify(entry.path());
        if category == Category::Unknown {
            continue;
        }
        if category.is_migration() && already_organized(entry.path(), &organized) {
            continue;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(_) => continue,
        };
        let path = entry.into_path();
        let total = store.record(FileRecord {
            path: path.clone(),
            size,
            category,
        });
        // Outside the store guard, so the callback can take its time
        on_discover(&path, size, total, category);
    }
}
