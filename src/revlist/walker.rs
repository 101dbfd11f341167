use tracing::trace;

use crate::hash::{short_hash, Hash};
use crate::object::{Commit, Object};
use crate::revlist::{TreeWalker, WalkContext};
use crate::storage::ObjectStore;
use crate::Result;

/// Depth-first pre-order walk over commit ancestry.
///
/// Each commit is emitted, then its tree is walked to completion, then its
/// parents are visited in stored order (first parent first). Pending parent
/// lists live on an explicit stack, so history depth never turns into call
/// depth.
///
/// Ignored commits are not emitted and their trees are not walked, but their
/// parents still are: an ignored hash may have been seeded without its
/// ancestry being accounted for.
pub struct ReachabilityWalker<'s, S: ObjectStore + ?Sized> {
    store: &'s S,
    trees: TreeWalker<'s, S>,
    stack: Vec<std::vec::IntoIter<Hash>>,
}

impl<'s, S: ObjectStore + ?Sized> ReachabilityWalker<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            trees: TreeWalker::new(store),
            stack: Vec::new(),
        }
    }

    /// Walk from a root of any kind.
    ///
    /// Tags are emitted and then dereferenced; commits start a history walk;
    /// trees are walked; blobs are emitted. The root itself must resolve.
    pub fn walk_root(&mut self, hash: &Hash, ctx: &mut WalkContext) -> Result<()> {
        let mut object = self.store.resolve(hash)?;

        loop {
            match object {
                Object::Tag(tag) => {
                    ctx.admit(&tag.hash);
                    let target = self.store.resolve(&tag.target)?;
                    if target.kind() != tag.target_kind {
                        return Err(target.mismatch(tag.target_kind));
                    }
                    object = target;
                }
                Object::Commit(commit) => return self.walk_commit(commit, ctx),
                Object::Tree(tree) => {
                    if ctx.admit(&tree.hash) {
                        self.trees.walk_entries(tree, ctx)?;
                    }
                    return Ok(());
                }
                Object::Blob(blob) => {
                    ctx.admit(&blob.hash);
                    return Ok(());
                }
            }
        }
    }

    /// Walk `commit` and its ancestry
    pub fn walk_commit(&mut self, commit: Commit, ctx: &mut WalkContext) -> Result<()> {
        self.stack.clear();
        self.enter(commit, ctx)?;

        while let Some(parents) = self.stack.last_mut() {
            let Some(parent) = parents.next() else {
                self.stack.pop();
                continue;
            };

            if ctx.is_seen(&parent) || ctx.is_expanded(&parent) {
                continue;
            }

            let commit = self.store.resolve_commit(&parent)?;
            self.enter(commit, ctx)?;
        }

        Ok(())
    }

    fn enter(&mut self, commit: Commit, ctx: &mut WalkContext) -> Result<()> {
        if ctx.is_ignored(&commit.hash) {
            if !ctx.mark_expanded(&commit.hash) {
                return Ok(());
            }
            trace!(commit = %commit.short_hash(), "walking past ignored commit");
        } else {
            if !ctx.admit(&commit.hash) {
                return Ok(());
            }
            self.trees.walk(&commit.tree, ctx)?;
        }

        if !commit.is_initial() {
            trace!(
                commit = %short_hash(&commit.hash),
                merge = commit.is_merge(),
                "queueing parents"
            );
            self.stack.push(commit.parents.into_iter());
        }

        Ok(())
    }
}
