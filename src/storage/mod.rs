//! Object stores consumed by the traversal.
//!
//! [`ObjectStore`] is the only capability the walkers need: turn a hash into a
//! decoded [`Object`] or fail with [`RevListError::NotFound`]. Writers are used
//! to build repositories (fixtures, imports) and are never touched by a walk.

pub mod fs;
pub mod memory;
pub mod refs;

pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use refs::FsRefStore;

use crate::error::RevListError;
use crate::hash::Hash;
use crate::object::{Commit, Object, ObjectKind, Tag, Tree};
use crate::Result;

pub trait ObjectStore {
    /// Resolve `hash` to its decoded object
    fn resolve(&self, hash: &Hash) -> Result<Object>;

    fn contains(&self, hash: &Hash) -> bool {
        self.resolve(hash).is_ok()
    }

    fn resolve_commit(&self, hash: &Hash) -> Result<Commit> {
        self.resolve(hash)?.into_commit()
    }

    fn resolve_tree(&self, hash: &Hash) -> Result<Tree> {
        self.resolve(hash)?.into_tree()
    }
}

pub trait ObjectWriter {
    /// Store raw (uncompressed) bytes as `kind`, returning the object hash
    fn write_object(&mut self, kind: ObjectKind, raw: &[u8]) -> Result<Hash>;

    fn write_blob(&mut self, content: &[u8]) -> Result<Hash> {
        self.write_object(ObjectKind::Blob, content)
    }

    fn write_tree(&mut self, tree: &Tree) -> Result<Hash> {
        let hash = self.write_object(ObjectKind::Tree, &tree.encode()?)?;
        debug_assert_eq!(hash, tree.hash);
        Ok(hash)
    }

    fn write_commit(&mut self, commit: &Commit) -> Result<Hash> {
        let hash = self.write_object(ObjectKind::Commit, &commit.encode()?)?;
        debug_assert_eq!(hash, commit.hash);
        Ok(hash)
    }

    fn write_tag(&mut self, tag: &Tag) -> Result<Hash> {
        let hash = self.write_object(ObjectKind::Tag, &tag.encode()?)?;
        debug_assert_eq!(hash, tag.hash);
        Ok(hash)
    }
}

pub(crate) fn not_found(hash: &Hash) -> RevListError {
    RevListError::NotFound(*hash)
}
