use std::collections::HashSet;

use crate::hash::Hash;

/// Per-call traversal state: the exclusion set, what has been processed, and
/// the emission sequence.
///
/// `ignore` is fixed for the lifetime of the context. `seen` only grows; a hash
/// in it is never processed again, and nothing else is implied about its
/// neighbours.
#[derive(Debug, Default)]
pub struct WalkContext {
    ignore: HashSet<Hash>,
    seen: HashSet<Hash>,
    // Ignored commits whose parents were already pushed; ignored commits are
    // never added to `seen`, so shared ignored history would otherwise be
    // expanded once per path reaching it.
    expanded: HashSet<Hash>,
    emitted: Vec<Hash>,
}

impl WalkContext {
    pub fn new(ignore: HashSet<Hash>) -> Self {
        Self {
            ignore,
            ..Self::default()
        }
    }

    /// Start with hashes already accounted for by the caller
    pub fn with_seen(ignore: HashSet<Hash>, seen: HashSet<Hash>) -> Self {
        Self {
            ignore,
            seen,
            ..Self::default()
        }
    }

    pub fn is_ignored(&self, hash: &Hash) -> bool {
        self.ignore.contains(hash)
    }

    pub fn is_seen(&self, hash: &Hash) -> bool {
        self.seen.contains(hash)
    }

    pub fn ignore_len(&self) -> usize {
        self.ignore.len()
    }

    /// Hashes emitted so far, in emission order
    pub fn emitted(&self) -> &[Hash] {
        &self.emitted
    }

    pub fn into_emitted(self) -> Vec<Hash> {
        self.emitted
    }

    pub fn into_seen(self) -> HashSet<Hash> {
        self.seen
    }

    /// Mark and emit `hash` unless it is ignored or already seen.
    /// Returns whether it was emitted.
    pub(crate) fn admit(&mut self, hash: &Hash) -> bool {
        if self.ignore.contains(hash) || !self.seen.insert(*hash) {
            return false;
        }
        self.emitted.push(*hash);
        true
    }

    pub(crate) fn is_expanded(&self, hash: &Hash) -> bool {
        self.expanded.contains(hash)
    }

    /// Record that an ignored commit's parents are being walked; false if they already were
    pub(crate) fn mark_expanded(&mut self, hash: &Hash) -> bool {
        self.expanded.insert(*hash)
    }
}
