use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::category::Category;

/// One file discovered during a scan. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Byte count at discovery time.
    pub size: u64,
    pub category: Category,
}

/// Thread-guarded per-category results of the most recent scan.
///
/// The scan thread is the sole writer; queries and bulk operations read or
/// drain whole categories under the same guard. The running total is kept
/// outside the mutex so progress callbacks never contend with readers.
pub struct ResultStore {
    lists: Mutex<HashMap<Category, Vec<FileRecord>>>,
    total: AtomicU64,
}

impl ResultStore {
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(HashMap::new()),
            total: AtomicU64::new(0),
        }
    }

    /// Drop all records and reset the running total. Called at scan start.
    pub fn clear(&self) {
        self.lists.lock().unwrap().clear();
        self.total.store(0, Ordering::Relaxed);
    }

    /// Append a record and return the updated running total.
    pub fn record(&self, record: FileRecord) -> u64 {
        let size = record.size;
        {
            let mut lists = self.lists.lock().unwrap();
            lists.entry(record.category).or_default().push(record);
        }
        self.total.fetch_add(size, Ordering::Relaxed) + size
    }

    /// Snapshot copy of one category's records, in discovery order.
    pub fn query(&self, category: Category) -> Vec<FileRecord> {
        self.lists
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    /// Remove and return one category's records.
    pub fn take(&self, category: Category) -> Vec<FileRecord> {
        self.lists
            .lock()
            .unwrap()
            .remove(&category)
            .unwrap_or_default()
    }

    /// Bytes recorded since the last clear.
    pub fn total_bytes(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, size: u64, category: Category) -> FileRecord {
        FileRecord {
            path: PathBuf::from(name),
            size,
            category,
        }
    }

    #[test]
    fn record_accumulates_total() {
        let store = ResultStore::new();
        assert_eq!(store.record(record("a.mp4", 10, Category::Video)), 10);
        assert_eq!(store.record(record("b.mp3", 5, Category::Audio)), 15);
        assert_eq!(store.total_bytes(), 15);
    }

    #[test]
    fn query_preserves_discovery_order() {
        let store = ResultStore::new();
        store.record(record("first.mp4", 1, Category::Video));
        store.record(record("second.mp4", 2, Category::Video));
        let videos = store.query(Category::Video);
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].path, PathBuf::from("first.mp4"));
        assert_eq!(videos[1].path, PathBuf::from("second.mp4"));
        // query is a copy, not a drain
        assert_eq!(store.query(Category::Video).len(), 2);
    }

    #[test]
    fn take_drains_one_category() {
        let store = ResultStore::new();
        store.record(record("a.deb", 1, Category::Packages));
        store.record(record("b.zip", 2, Category::Compressed));
        assert_eq!(store.take(Category::Packages).len(), 1);
        assert!(store.query(Category::Packages).is_empty());
        assert_eq!(store.query(Category::Compressed).len(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let store = ResultStore::new();
        store.record(record("a.deb", 7, Category::Packages));
        store.clear();
        assert!(store.query(Category::Packages).is_empty());
        assert_eq!(store.total_bytes(), 0);
    }
}
