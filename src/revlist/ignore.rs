use std::collections::HashSet;

use tracing::debug;

use crate::hash::Hash;
use crate::revlist::{ReachabilityWalker, WalkContext};
use crate::storage::ObjectStore;
use crate::Result;

/// Every hash reachable from `haves`: commits, trees, blobs and tags.
///
/// Runs the same walk as the want side with nothing ignored. Any missing
/// object fails the whole build; a partial set would make the difference
/// unsound.
pub fn build_ignore_set<S: ObjectStore + ?Sized>(store: &S, haves: &[Hash]) -> Result<HashSet<Hash>> {
    if haves.is_empty() {
        return Ok(HashSet::new());
    }

    let mut ctx = WalkContext::new(HashSet::new());
    let mut walker = ReachabilityWalker::new(store);
    for have in haves {
        walker.walk_root(have, &mut ctx)?;
    }

    let ignore = ctx.into_seen();
    debug!(haves = haves.len(), objects = ignore.len(), "built ignore set");
    Ok(ignore)
}
