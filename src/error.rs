use crate::hash::{hash_to_hex, Hash};
use crate::object::ObjectKind;

#[derive(Debug, thiserror::Error)]
pub enum RevListError {
    #[error("object not found: {}", hash_to_hex(.0))]
    NotFound(Hash),

    #[error("failed to decode object {}: {source}", hash_to_hex(.hash))]
    Decode {
        hash: Hash,
        #[source]
        source: DecodeError,
    },

    #[error("invalid hash {input:?}: {reason}")]
    InvalidHash { input: String, reason: String },

    #[error("{field} is {len} bytes, the encoding allows at most {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RevListError {
    pub fn decode(hash: Hash, source: DecodeError) -> Self {
        Self::Decode { hash, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Structural problems with an object's encoded bytes.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{what} truncated at offset {offset}")]
    Truncated { what: &'static str, offset: usize },

    #[error("invalid entry type: {0}")]
    InvalidEntryType(u8),

    #[error("invalid object kind: {0}")]
    InvalidKind(u8),

    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    #[error("{0} trailing bytes")]
    TrailingBytes(usize),

    #[error("expected {expected}, found {found}")]
    KindMismatch {
        expected: ObjectKind,
        found: ObjectKind,
    },

    #[error("decompression failed: {0}")]
    Decompress(std::io::Error),
}
