use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Every `.rs` file under `root`, skipping `target/` and hidden directories.
pub fn rust_file_walker(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| name == "target" || name.starts_with('.'))
}

/// Content fingerprints of a tree's Rust sources, keyed by path relative to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    files: BTreeMap<PathBuf, u64>,
}

impl Snapshot {
    pub fn capture(root: &Path) -> Self {
        let mut files = BTreeMap::new();
        for entry in rust_file_walker(root) {
            // Unreadable files are left out; they show up as added/removed at worst.
            let Ok(content) = std::fs::read(entry.path()) else { continue };
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path()).to_path_buf();
            files.insert(rel, fingerprint(&content));
        }
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths that were modified, added or removed between `self` and `after`.
    pub fn changed_files(&self, after: &Self) -> Vec<PathBuf> {
        let paths: BTreeSet<&PathBuf> = self.files.keys().chain(after.files.keys()).collect();
        paths
            .into_iter()
            .filter(|p| self.files.get(*p) != after.files.get(*p))
            .cloned()
            .collect()
    }
}

fn fingerprint(content: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}
