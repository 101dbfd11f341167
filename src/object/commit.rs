use crate::error::{DecodeError, RevListError};
use crate::hash::{hash_object, short_hash, Hash};
use crate::object::{check_len, put_len16, put_len32, ByteReader, ObjectKind};

/// Commit - a snapshot in history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: Hash,         // hash of the encoded commit
    pub tree: Hash,         // root tree of the snapshot
    pub parents: Vec<Hash>, // empty for initial commit, 1 for normal, 2+ for merge; first parent first
    pub author: String,     // Author name and email
    pub time: u64,          // Commit timestamp (seconds since Unix epoch)
    pub message: String,
}

impl Commit {
    pub fn new(
        tree: Hash,
        parents: Vec<Hash>,
        author: impl Into<String>,
        time: u64,
        message: impl Into<String>,
    ) -> Self {
        let mut commit = Self {
            hash: [0u8; 32],
            tree,
            parents,
            author: author.into(),
            time,
            message: message.into(),
        };

        commit.hash = hash_object(ObjectKind::Commit, &commit.to_bytes());
        commit
    }

    pub fn is_initial(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn short_hash(&self) -> String {
        short_hash(&self.hash)
    }

    pub fn encode(&self) -> Result<Vec<u8>, RevListError> {
        check_len::<u32>("commit parent count", self.parents.len())?;
        check_len::<u16>("commit author", self.author.len())?;
        check_len::<u32>("commit message", self.message.len())?;
        Ok(self.to_bytes())
    }

    /// Serialize commit to bytes (the hash is derived, not stored)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 + 4 + self.parents.len() * 32 + 64);

        // Tree hash (32 bytes)
        bytes.extend_from_slice(&self.tree);

        // Parent count (4 bytes) + parent hashes (32 bytes each)
        put_len32(&mut bytes, self.parents.len());
        for parent in &self.parents {
            bytes.extend_from_slice(parent);
        }

        // Author length (2 bytes) + author
        put_len16(&mut bytes, self.author.len());
        bytes.extend_from_slice(self.author.as_bytes());

        // Time (8 bytes)
        bytes.extend_from_slice(&self.time.to_le_bytes());

        // Message length (4 bytes) + message
        put_len32(&mut bytes, self.message.len());
        bytes.extend_from_slice(self.message.as_bytes());

        bytes
    }

    /// Deserialize a commit stored under `hash`
    pub fn from_bytes(hash: Hash, bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes);

        let tree = reader.hash("commit tree")?;

        let parent_count = reader.u32("commit parent count")? as usize;
        let mut parents = Vec::with_capacity(parent_count.min(bytes.len() / 32));
        for _ in 0..parent_count {
            parents.push(reader.hash("commit parent")?);
        }

        let author_len = reader.u16("commit author length")? as usize;
        let author = reader.string(author_len, "commit author")?;

        let time = reader.u64("commit time")?;

        let message_len = reader.u32("commit message length")? as usize;
        let message = reader.string(message_len, "commit message")?;

        reader.finish()?;

        Ok(Self {
            hash,
            tree,
            parents,
            author,
            time,
            message,
        })
    }
}
