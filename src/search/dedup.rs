//! Per-run record of result identities already produced.

use std::collections::HashSet;

/// Tracks which links have been seen during one search run.
///
/// Identities are BLAKE3 digests of the link text. Nothing is persisted.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<[u8; 32]>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn identity(link: &str) -> [u8; 32] {
        *blake3::hash(link.as_bytes()).as_bytes()
    }

    pub fn seen(&self, link: &str) -> bool {
        self.seen.contains(&Self::identity(link))
    }

    pub fn mark(&mut self, link: &str) {
        self.seen.insert(Self::identity(link));
    }

    /// Mark `link` and report whether it was new.
    pub fn insert(&mut self, link: &str) -> bool {
        self.seen.insert(Self::identity(link))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
