use tracing::trace;

use crate::hash::{short_hash, Hash};
use crate::object::{Tree, TreeEntry};
use crate::revlist::WalkContext;
use crate::storage::ObjectStore;
use crate::Result;

/// Pre-order walk over a tree and its subtrees.
///
/// Uses an explicit stack of entry iterators, so nesting depth is bounded by
/// memory rather than the call stack. A subtree's entries are exhausted before
/// the next sibling entry is looked at.
pub struct TreeWalker<'s, S: ObjectStore + ?Sized> {
    store: &'s S,
    stack: Vec<std::vec::IntoIter<TreeEntry>>,
}

impl<'s, S: ObjectStore + ?Sized> TreeWalker<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            stack: Vec::new(),
        }
    }

    /// Emit `root` and everything below it that is not ignored or already seen.
    ///
    /// An ignored or seen root is skipped without a store lookup.
    pub fn walk(&mut self, root: &Hash, ctx: &mut WalkContext) -> Result<()> {
        if !ctx.admit(root) {
            return Ok(());
        }
        let tree = self.store.resolve_tree(root)?;
        self.walk_entries(tree, ctx)
    }

    /// Walk the entries of an already admitted tree
    pub fn walk_entries(&mut self, tree: Tree, ctx: &mut WalkContext) -> Result<()> {
        self.stack.clear();
        self.stack.push(tree.entries.into_iter());

        while let Some(entries) = self.stack.last_mut() {
            let Some(entry) = entries.next() else {
                self.stack.pop();
                continue;
            };

            // Submodule targets live in another object space
            if entry.mode.is_submodule() {
                trace!(name = %entry.name, oid = %short_hash(&entry.oid), "skipping submodule entry");
                continue;
            }

            if !ctx.admit(&entry.oid) {
                continue;
            }

            if entry.mode.is_tree() {
                let subtree = self.store.resolve_tree(&entry.oid)?;
                self.stack.push(subtree.entries.into_iter());
            }
        }

        Ok(())
    }
}
