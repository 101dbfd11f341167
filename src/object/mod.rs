// Decoded object model
//
// Commit ──tree──▶ Tree ──entries──▶ Tree | Blob | (submodule link, foreign)
//   └──parents──▶ Commit
// Tag ──target──▶ any kind
//
// Every object is addressed by hash_object(kind, encoded bytes). The encoded
// layouts are little-endian and documented on each type.

pub mod commit;
pub mod tag;
pub mod tree;

pub use commit::Commit;
pub use tag::Tag;
pub use tree::{EntryMode, Tree, TreeEntry};

use std::fmt;

use crate::error::{DecodeError, RevListError};
use crate::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [Self::Commit, Self::Tree, Self::Blob, Self::Tag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
        }
    }

    /// Code used where a kind is stored inside another object (tag targets)
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Commit => 1,
            Self::Tree => 2,
            Self::Blob => 3,
            Self::Tag => 4,
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            1 => Ok(Self::Commit),
            2 => Ok(Self::Tree),
            3 => Ok(Self::Blob),
            4 => Ok(Self::Tag),
            b => Err(DecodeError::InvalidKind(b)),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blob - content is never needed for traversal, only identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob {
    pub hash: Hash,
}

/// A decoded object, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Commit(Commit),
    Tree(Tree),
    Blob(Blob),
    Tag(Tag),
}

impl Object {
    /// Decode raw (uncompressed) bytes stored under `hash` as `kind`
    pub fn decode(kind: ObjectKind, hash: Hash, raw: &[u8]) -> Result<Self, RevListError> {
        let decoded = match kind {
            ObjectKind::Commit => Commit::from_bytes(hash, raw).map(Object::Commit),
            ObjectKind::Tree => Tree::from_bytes(hash, raw).map(Object::Tree),
            ObjectKind::Tag => Tag::from_bytes(hash, raw).map(Object::Tag),
            ObjectKind::Blob => Ok(Object::Blob(Blob { hash })),
        };

        decoded.map_err(|source| RevListError::decode(hash, source))
    }

    pub fn hash(&self) -> Hash {
        match self {
            Object::Commit(c) => c.hash,
            Object::Tree(t) => t.hash,
            Object::Blob(b) => b.hash,
            Object::Tag(t) => t.hash,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Commit(_) => ObjectKind::Commit,
            Object::Tree(_) => ObjectKind::Tree,
            Object::Blob(_) => ObjectKind::Blob,
            Object::Tag(_) => ObjectKind::Tag,
        }
    }

    pub fn into_commit(self) -> Result<Commit, RevListError> {
        match self {
            Object::Commit(commit) => Ok(commit),
            other => Err(other.mismatch(ObjectKind::Commit)),
        }
    }

    pub fn into_tree(self) -> Result<Tree, RevListError> {
        match self {
            Object::Tree(tree) => Ok(tree),
            other => Err(other.mismatch(ObjectKind::Tree)),
        }
    }

    pub fn into_tag(self) -> Result<Tag, RevListError> {
        match self {
            Object::Tag(tag) => Ok(tag),
            other => Err(other.mismatch(ObjectKind::Tag)),
        }
    }

    pub(crate) fn mismatch(&self, expected: ObjectKind) -> RevListError {
        RevListError::decode(
            self.hash(),
            DecodeError::KindMismatch {
                expected,
                found: self.kind(),
            },
        )
    }
}

/// Fail unless `len` fits the length prefix `T` of `field`
pub(crate) fn check_len<T>(field: &'static str, len: usize) -> Result<(), RevListError>
where
    T: TryFrom<usize>,
{
    match T::try_from(len) {
        Ok(_) => Ok(()),
        Err(_) => Err(RevListError::FieldTooLong {
            field,
            len,
            max: max_len::<T>(),
        }),
    }
}

fn max_len<T>() -> usize {
    let bits = 8 * std::mem::size_of::<T>() as u32;
    usize::try_from((1u64 << bits) - 1).unwrap_or(usize::MAX)
}

// Oversized fields are rejected by each type's `encode` before anything is
// stored; `to_bytes` saturates so hashing an unchecked value stays total.
pub(crate) fn put_len16(bytes: &mut Vec<u8>, len: usize) {
    bytes.extend_from_slice(&u16::try_from(len).unwrap_or(u16::MAX).to_le_bytes());
}

pub(crate) fn put_len32(bytes: &mut Vec<u8>, len: usize) {
    bytes.extend_from_slice(&u32::try_from(len).unwrap_or(u32::MAX).to_le_bytes());
}

/// Cursor over an encoded object
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub(crate) fn take(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(DecodeError::Truncated {
                what,
                offset: self.offset,
            })?;

        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub(crate) fn u8(&mut self, what: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, what)?[0])
    }

    pub(crate) fn u16(&mut self, what: &'static str) -> Result<u16, DecodeError> {
        let mut buf = [0u8; 2];
        buf.copy_from_slice(self.take(2, what)?);
        Ok(u16::from_le_bytes(buf))
    }

    pub(crate) fn u32(&mut self, what: &'static str) -> Result<u32, DecodeError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, what)?);
        Ok(u32::from_le_bytes(buf))
    }

    pub(crate) fn u64(&mut self, what: &'static str) -> Result<u64, DecodeError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8, what)?);
        Ok(u64::from_le_bytes(buf))
    }

    pub(crate) fn hash(&mut self, what: &'static str) -> Result<Hash, DecodeError> {
        let mut hash = [0u8; 32];
        hash.copy_from_slice(self.take(32, what)?);
        Ok(hash)
    }

    pub(crate) fn string(&mut self, len: usize, what: &'static str) -> Result<String, DecodeError> {
        let bytes = self.take(len, what)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8(what))
    }

    /// Fails if any bytes are left over
    pub(crate) fn finish(self) -> Result<(), DecodeError> {
        match self.bytes.len() - self.offset {
            0 => Ok(()),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_byte_roundtrip() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectKind::from_byte(kind.to_byte()).unwrap(), kind);
        }
        assert!(matches!(
            ObjectKind::from_byte(0),
            Err(DecodeError::InvalidKind(0))
        ));
    }

    #[test]
    fn test_decode_blob_carries_hash_only() {
        let hash = [7u8; 32];
        let object = Object::decode(ObjectKind::Blob, hash, b"anything").unwrap();

        assert_eq!(object, Object::Blob(Blob { hash }));
        assert_eq!(object.kind(), ObjectKind::Blob);
    }

    #[test]
    fn test_into_commit_rejects_other_kinds() {
        let object = Object::Blob(Blob { hash: [1u8; 32] });

        let err = object.into_commit().unwrap_err();
        match err {
            RevListError::Decode {
                hash,
                source: DecodeError::KindMismatch { expected, found },
            } => {
                assert_eq!(hash, [1u8; 32]);
                assert_eq!(expected, ObjectKind::Commit);
                assert_eq!(found, ObjectKind::Blob);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reader_reports_truncation() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        assert_eq!(reader.u16("count").unwrap(), 0x0201);

        let err = reader.u32("length").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                what: "length",
                offset: 2
            }
        ));
    }

    #[test]
    fn test_reader_reports_trailing_bytes() {
        let mut reader = ByteReader::new(&[0, 0, 9]);
        reader.u16("count").unwrap();

        assert!(matches!(reader.finish(), Err(DecodeError::TrailingBytes(1))));
    }
}
