use crate::error::{DecodeError, RevListError};
use crate::hash::{hash_object, Hash};
use crate::object::{check_len, put_len16, put_len32, ByteReader, ObjectKind};

/// Annotated tag - names another object, usually a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub hash: Hash,
    pub target: Hash,
    pub target_kind: ObjectKind,
    pub name: String,
    pub message: String,
}

impl Tag {
    pub fn new(
        target: Hash,
        target_kind: ObjectKind,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut tag = Self {
            hash: [0u8; 32],
            target,
            target_kind,
            name: name.into(),
            message: message.into(),
        };

        tag.hash = hash_object(ObjectKind::Tag, &tag.to_bytes());
        tag
    }

    /// Encoded bytes for storage; fails on a name or message too long for its prefix
    pub fn encode(&self) -> Result<Vec<u8>, RevListError> {
        check_len::<u16>("tag name", self.name.len())?;
        check_len::<u32>("tag message", self.message.len())?;
        Ok(self.to_bytes())
    }

    /// Layout: target(32) + target_kind(1) + name_len(2) + name + message_len(4) + message
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 + 1 + 2 + self.name.len() + 4 + self.message.len());

        bytes.extend_from_slice(&self.target);
        bytes.push(self.target_kind.to_byte());
        put_len16(&mut bytes, self.name.len());
        bytes.extend_from_slice(self.name.as_bytes());
        put_len32(&mut bytes, self.message.len());
        bytes.extend_from_slice(self.message.as_bytes());

        bytes
    }

    pub fn from_bytes(hash: Hash, bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes);

        let target = reader.hash("tag target")?;
        let target_kind = ObjectKind::from_byte(reader.u8("tag target kind")?)?;
        let name_len = reader.u16("tag name length")? as usize;
        let name = reader.string(name_len, "tag name")?;
        let message_len = reader.u32("tag message length")? as usize;
        let message = reader.string(message_len, "tag message")?;

        reader.finish()?;

        Ok(Self {
            hash,
            target,
            target_kind,
            name,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_serialization() {
        let tag = Tag::new([5u8; 32], ObjectKind::Commit, "v1.0.0", "first release\n");

        let parsed = Tag::from_bytes(tag.hash, &tag.to_bytes()).unwrap();
        assert_eq!(parsed, tag);
    }

    #[test]
    fn test_tag_invalid_target_kind() {
        let tag = Tag::new([5u8; 32], ObjectKind::Tree, "t", "");
        let mut bytes = tag.to_bytes();
        bytes[32] = 0;

        let err = Tag::from_bytes(tag.hash, &bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidKind(0)));
    }

    #[test]
    fn test_tag_trailing_bytes() {
        let tag = Tag::new([5u8; 32], ObjectKind::Blob, "t", "m");
        let mut bytes = tag.to_bytes();
        bytes.extend_from_slice(b"xx");

        let err = Tag::from_bytes(tag.hash, &bytes).unwrap_err();
        assert!(matches!(err, DecodeError::TrailingBytes(2)));
    }
}
