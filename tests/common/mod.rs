#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use tidyhome::Engine;

/// Create a file of `len` bytes, creating parent directories as needed.
pub fn write_file(path: &Path, len: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![b'x'; len]).unwrap();
}

/// Poll until the current scan finishes, then join its thread.
pub fn wait_finish(engine: &Engine) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !engine.is_finished() {
        assert!(Instant::now() < deadline, "scan did not finish in time");
        std::thread::sleep(Duration::from_millis(5));
    }
    engine.await_shutdown();
}

/// Run a full scan of `root` and wait for it to complete.
pub fn scan_and_wait(engine: &Engine, root: &Path) {
    engine.start_scan(root, |_, _, _, _| {});
    wait_finish(engine);
}

/// File names of the records in one category, for order-insensitive asserts.
pub fn names(records: &[tidyhome::FileRecord]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .map(|r| r.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
