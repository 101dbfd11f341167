//! Objects reachable from a set of wants but not from a set of haves.
//!
//! ```text
//! objects(store, wants, haves)
//!   build_ignore_set(store, haves)      -> closure of the haves
//!   ReachabilityWalker over each want    -> emission order
//! ```
//!
//! The returned order is part of the contract: commits depth-first in
//! pre-order, parents in stored order, each commit's tree walked (pre-order)
//! right after the commit and before its parents.

mod context;
mod ignore;
mod tree;
mod walker;

pub use context::WalkContext;
pub use ignore::build_ignore_set;
pub use tree::TreeWalker;
pub use walker::ReachabilityWalker;

use tracing::debug;

use crate::hash::Hash;
use crate::storage::ObjectStore;
use crate::Result;

/// Objects reachable from `wants` minus objects reachable from `haves`, in
/// emission order. Fails without partial output if any object is missing or
/// malformed.
pub fn objects<S: ObjectStore + ?Sized>(store: &S, wants: &[Hash], haves: &[Hash]) -> Result<Vec<Hash>> {
    objects_with_storage_for_ignores(store, store, wants, haves)
}

/// Like [`objects`], but the haves are resolved against `ignore_store`.
pub fn objects_with_storage_for_ignores<S, I>(
    store: &S,
    ignore_store: &I,
    wants: &[Hash],
    haves: &[Hash],
) -> Result<Vec<Hash>>
where
    S: ObjectStore + ?Sized,
    I: ObjectStore + ?Sized,
{
    let ignore = build_ignore_set(ignore_store, haves)?;

    let mut ctx = WalkContext::new(ignore);
    walk_wants(store, wants, &mut ctx)?;

    let ignored = ctx.ignore_len();
    let emitted = ctx.into_emitted();
    debug!(
        wants = wants.len(),
        haves = haves.len(),
        ignored,
        objects = emitted.len(),
        "rev-list done"
    );
    Ok(emitted)
}

/// Walk each want root into `ctx`
pub fn walk_wants<S: ObjectStore + ?Sized>(store: &S, wants: &[Hash], ctx: &mut WalkContext) -> Result<()> {
    let mut walker = ReachabilityWalker::new(store);
    for want in wants {
        walker.walk_root(want, ctx)?;
    }
    Ok(())
}
