use std::collections::HashMap;

use crate::error::RevListError;
use crate::hash::{hash_object, Hash};
use crate::object::{Object, ObjectKind};
use crate::storage::{not_found, ObjectStore, ObjectWriter};

/// In-memory object store holding encoded bytes.
///
/// Objects are decoded on every `resolve`, like a store backed by disk would,
/// so corrupt entries surface as decode errors at lookup time.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: HashMap<Hash, (ObjectKind, Vec<u8>)>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes under an arbitrary hash without checking it
    pub fn insert_raw(&mut self, kind: ObjectKind, hash: Hash, raw: Vec<u8>) {
        self.objects.insert(hash, (kind, raw));
    }

    pub fn remove(&mut self, hash: &Hash) -> bool {
        self.objects.remove(hash).is_some()
    }

    pub fn kind_of(&self, hash: &Hash) -> Option<ObjectKind> {
        self.objects.get(hash).map(|(kind, _)| *kind)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn resolve(&self, hash: &Hash) -> Result<Object, RevListError> {
        let (kind, raw) = self.objects.get(hash).ok_or_else(|| not_found(hash))?;
        Object::decode(*kind, *hash, raw)
    }

    fn contains(&self, hash: &Hash) -> bool {
        self.objects.contains_key(hash)
    }
}

impl ObjectWriter for MemoryObjectStore {
    fn write_object(&mut self, kind: ObjectKind, raw: &[u8]) -> Result<Hash, RevListError> {
        let hash = hash_object(kind, raw);
        self.objects
            .entry(hash)
            .or_insert_with(|| (kind, raw.to_vec()));
        Ok(hash)
    }
}
