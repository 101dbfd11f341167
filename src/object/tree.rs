// Tree - a directory snapshot
//
// Root Tree
// ├── file1.txt → File (blob hash)
// ├── vendor/ → Tree (tree hash)
// │   └── foo.go → File (blob hash)
// └── lib → Submodule (commit hash in another repository, never resolved here)
//
// Entries are sorted by name when a tree is built, so the stored order is the
// name order and hashing is deterministic.

use crate::error::{DecodeError, RevListError};
use crate::hash::{hash_object, Hash};
use crate::object::{check_len, put_len16, put_len32, ByteReader, ObjectKind};

/// What a tree entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryMode {
    /// Regular file (blob)
    File = 0,
    /// Executable file (blob with exec bit)
    FileExecutable = 1,
    /// Subdirectory (tree)
    Tree = 2,
    /// Symbolic link (target stored as a blob)
    Symlink = 3,
    /// Commit in a foreign object space
    Submodule = 4,
}

impl EntryMode {
    pub fn from_unix_mode(mode: u32) -> Self {
        match mode & 0o170000 {
            0o160000 => Self::Submodule,
            0o120000 => Self::Symlink,
            0o040000 => Self::Tree,
            _ if mode & 0o111 != 0 => Self::FileExecutable,
            _ => Self::File,
        }
    }

    pub fn to_unix_mode(&self) -> u32 {
        match self {
            Self::File => 0o100644,
            Self::FileExecutable => 0o100755,
            Self::Tree => 0o040000,
            Self::Symlink => 0o120000,
            Self::Submodule => 0o160000,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            0 => Ok(Self::File),
            1 => Ok(Self::FileExecutable),
            2 => Ok(Self::Tree),
            3 => Ok(Self::Symlink),
            4 => Ok(Self::Submodule),
            t => Err(DecodeError::InvalidEntryType(t)),
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    pub fn is_submodule(&self) -> bool {
        matches!(self, Self::Submodule)
    }
}

/// Tree entry - a file, subdirectory, symlink or submodule link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Entry name (just the filename, not full path)
    pub name: String,
    pub mode: EntryMode,
    /// Target object hash
    pub oid: Hash,
}

impl TreeEntry {
    pub fn new(name: impl Into<String>, mode: EntryMode, oid: Hash) -> Self {
        Self {
            name: name.into(),
            mode,
            oid,
        }
    }

    pub fn file(name: impl Into<String>, oid: Hash) -> Self {
        Self::new(name, EntryMode::File, oid)
    }

    pub fn tree(name: impl Into<String>, oid: Hash) -> Self {
        Self::new(name, EntryMode::Tree, oid)
    }

    pub fn submodule(name: impl Into<String>, commit: Hash) -> Self {
        Self::new(name, EntryMode::Submodule, commit)
    }

    /// Layout: type(1) + name_len(2) + name(var) + oid(32)
    fn write_to(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.mode as u8);
        put_len16(bytes, self.name.len());
        bytes.extend_from_slice(self.name.as_bytes());
        bytes.extend_from_slice(&self.oid);
    }

    fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let mode = EntryMode::from_byte(reader.u8("entry type")?)?;
        let name_len = reader.u16("entry name length")? as usize;
        let name = reader.string(name_len, "entry name")?;
        let oid = reader.hash("entry oid")?;

        Ok(Self { name, mode, oid })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub hash: Hash,
    /// Entries in stored order
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries; sorts them by name and computes the hash
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut tree = Self {
            hash: [0u8; 32],
            entries,
        };
        tree.hash = hash_object(ObjectKind::Tree, &tree.to_bytes());
        tree
    }

    /// Encoded bytes for storage; fails if the entry count or a name overflows its prefix
    pub fn encode(&self) -> Result<Vec<u8>, RevListError> {
        check_len::<u32>("tree entry count", self.entries.len())?;
        for entry in &self.entries {
            check_len::<u16>("tree entry name", entry.name.len())?;
        }
        Ok(self.to_bytes())
    }

    /// Serialize tree: entry count (4 bytes) followed by the entries
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        put_len32(&mut bytes, self.entries.len());

        for entry in &self.entries {
            entry.write_to(&mut bytes);
        }

        bytes
    }

    /// Deserialize a tree stored under `hash`, keeping the stored entry order
    pub fn from_bytes(hash: Hash, bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes);
        let entry_count = reader.u32("tree entry count")? as usize;

        // Each entry is at least 35 bytes; don't trust the count for the allocation
        let mut entries = Vec::with_capacity(entry_count.min(bytes.len() / 35));
        for _ in 0..entry_count {
            entries.push(TreeEntry::read_from(&mut reader)?);
        }
        reader.finish()?;

        Ok(Self { hash, entries })
    }
}
