use std::collections::HashSet;
use std::path::Path;

use crate::category::Category;

/// Per-category match rules: extension sets for most categories, plus an
/// ordered filename-ending list for compressed files so ".tar.gz" wins
/// over ".gz".
///
/// Replacing a category's rules takes effect on the next scan; the scanner
/// snapshots the rules when it starts.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    package_exts: HashSet<String>,
    video_exts: HashSet<String>,
    audio_exts: HashSet<String>,
    image_exts: HashSet<String>,
    document_exts: HashSet<String>,
    compressed_endings: Vec<String>,
}

fn ext_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            package_exts: ext_set(&[".deb", ".rpm", ".pkg", ".appimage"]),
            video_exts: ext_set(&[
                ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".3gp", ".m4v", ".mpg",
                ".rmvb", ".rm", ".vob", ".mpeg",
            ]),
            audio_exts: ext_set(&[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma"]),
            image_exts: ext_set(&[
                ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".svg", ".webp",
            ]),
            document_exts: ext_set(&[".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx"]),
            // Longer, more specific endings first
            compressed_endings: [
                ".tar.gz", ".tar.bz2", ".tar.xz", ".tgz", ".zip", ".rar", ".7z", ".gz", ".bz2",
                ".xz", ".tar",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl CategoryRules {
    /// Replace the match list for one scanned category. Items are
    /// dot-inclusive (".mp3") and matched case-insensitively. Compressed
    /// endings are re-sorted longest first. No-op for special or unknown
    /// categories.
    pub fn set(&mut self, category: Category, items: &[String]) {
        let lowered = || items.iter().map(|s| s.to_lowercase());
        match category {
            Category::Packages => self.package_exts = lowered().collect(),
            Category::Video => self.video_exts = lowered().collect(),
            Category::Audio => self.audio_exts = lowered().collect(),
            Category::Image => self.image_exts = lowered().collect(),
            Category::Document => self.document_exts = lowered().collect(),
            Category::Compressed => {
                self.compressed_endings = lowered().collect();
                self.compressed_endings
                    .sort_by(|a, b| b.len().cmp(&a.len()));
            }
            _ => {}
        }
    }

    /// Classify a path by filename alone. Compressed endings are tried
    /// first in configured order, then the extension tables in fixed
    /// priority. Pure function, no filesystem access.
    pub fn classify(&self, path: &Path) -> Category {
        let Some(name) = path.file_name() else {
            return Category::Unknown;
        };
        let name = name.to_string_lossy().to_lowercase();

        for ending in &self.compressed_endings {
            if !ending.is_empty() && name.ends_with(ending.as_str()) {
                return Category::Compressed;
            }
        }

        let ext = match path.extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
            None => return Category::Unknown,
        };

        if self.package_exts.contains(&ext) {
            return Category::Packages;
        }
        if self.video_exts.contains(&ext) {
            return Category::Video;
        }
        if self.audio_exts.contains(&ext) {
            return Category::Audio;
        }
        if self.image_exts.contains(&ext) {
            return Category::Image;
        }
        if self.document_exts.contains(&ext) {
            return Category::Document;
        }
        Category::Unknown
    }
}
