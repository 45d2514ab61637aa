use std::ops::BitOr;

/// File classification. Classification is always single-valued; use
/// [`CategorySet`] to select several categories for a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Unknown,
    Trash,
    Packages,
    Compressed,
    Video,
    Audio,
    Image,
    Document,
    ThumbnailCache,
    OtherAppCache,
}

impl Category {
    /// Categories populated by the tree walk, in classification order.
    pub const SCANNED: [Category; 6] = [
        Category::Packages,
        Category::Compressed,
        Category::Video,
        Category::Audio,
        Category::Image,
        Category::Document,
    ];

    /// Scanned categories eligible for migration.
    pub const MIGRATION: [Category; 4] = [
        Category::Video,
        Category::Audio,
        Category::Image,
        Category::Document,
    ];

    pub const fn bit(self) -> u32 {
        match self {
            Category::Unknown => 0,
            Category::Trash => 1 << 0,
            Category::Packages => 1 << 1,
            Category::Compressed => 1 << 2,
            Category::Video => 1 << 3,
            Category::Audio => 1 << 4,
            Category::Image => 1 << 5,
            Category::Document => 1 << 6,
            Category::ThumbnailCache => 1 << 7,
            Category::OtherAppCache => 1 << 8,
        }
    }

    /// True for categories populated by the tree walk.
    pub fn is_scanned(self) -> bool {
        Category::SCANNED.contains(&self)
    }

    /// True for categories subject to the MoveFiles exclusion.
    pub fn is_migration(self) -> bool {
        Category::MIGRATION.contains(&self)
    }

    /// True for categories computed on demand from fixed locations.
    pub fn is_special(self) -> bool {
        matches!(
            self,
            Category::Trash | Category::ThumbnailCache | Category::OtherAppCache
        )
    }
}

/// Set of categories for multi-select bulk operations.
///
/// Built with `|`: `Category::Video | Category::Audio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorySet(u32);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    /// Everything the cleanup operation can consume.
    pub const ALL_CLEANUP: CategorySet = CategorySet(
        Category::Trash.bit()
            | Category::Packages.bit()
            | Category::Compressed.bit()
            | Category::ThumbnailCache.bit()
            | Category::OtherAppCache.bit(),
    );

    /// Everything the migrate operation can consume.
    pub const ALL_MIGRATE: CategorySet = CategorySet(
        Category::Video.bit()
            | Category::Audio.bit()
            | Category::Image.bit()
            | Category::Document.bit(),
    );

    pub const fn from_bits(bits: u32) -> CategorySet {
        CategorySet(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, category: Category) -> bool {
        let bit = category.bit();
        bit != 0 && self.0 & bit == bit
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        CategorySet(category.bit())
    }
}

impl BitOr for CategorySet {
    type Output = CategorySet;

    fn bitor(self, rhs: CategorySet) -> CategorySet {
        CategorySet(self.0 | rhs.0)
    }
}

impl BitOr<Category> for CategorySet {
    type Output = CategorySet;

    fn bitor(self, rhs: Category) -> CategorySet {
        CategorySet(self.0 | rhs.bit())
    }
}

impl BitOr for Category {
    type Output = CategorySet;

    fn bitor(self, rhs: Category) -> CategorySet {
        CategorySet(self.bit() | rhs.bit())
    }
}

impl BitOr<CategorySet> for Category {
    type Output = CategorySet;

    fn bitor(self, rhs: CategorySet) -> CategorySet {
        CategorySet(self.bit() | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_membership() {
        let mask = Category::Video | Category::Audio;
        assert!(mask.contains(Category::Video));
        assert!(mask.contains(Category::Audio));
        assert!(!mask.contains(Category::Image));
        assert!(!mask.contains(Category::Unknown));
    }

    #[test]
    fn unknown_never_in_a_set() {
        let mask = CategorySet::from_bits(u32::MAX);
        assert!(!mask.contains(Category::Unknown));
    }

    #[test]
    fn convenience_sets() {
        for category in Category::MIGRATION {
            assert!(CategorySet::ALL_MIGRATE.contains(category));
            assert!(!CategorySet::ALL_CLEANUP.contains(category));
        }
        assert!(CategorySet::ALL_CLEANUP.contains(Category::Trash));
        assert!(CategorySet::ALL_CLEANUP.contains(Category::Packages));
        assert!(CategorySet::ALL_CLEANUP.contains(Category::Compressed));
        assert!(CategorySet::ALL_CLEANUP.contains(Category::ThumbnailCache));
        assert!(CategorySet::ALL_CLEANUP.contains(Category::OtherAppCache));
    }

    #[test]
    fn empty_set() {
        assert!(CategorySet::EMPTY.is_empty());
        assert!(!CategorySet::EMPTY.contains(Category::Trash));
    }
}
