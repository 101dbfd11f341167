use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::RevListError;
use crate::hash::{hash_to_hex, hex_to_hash, Hash};
use crate::Result;

/// Refs under `.helix/refs/`, one hex hash per file; `.helix/HEAD` is either
/// `ref: <name>` or a detached hex hash.
#[derive(Debug, Clone)]
pub struct FsRefStore {
    root: PathBuf,
}

impl FsRefStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn helix_dir(&self) -> PathBuf {
        self.root.join(".helix")
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        let name = name.strip_prefix("refs/").unwrap_or(name);
        self.helix_dir().join("refs").join(name)
    }

    /// Read `refs/<name>`; `name` may include the `refs/` prefix
    pub fn get_ref(&self, name: &str) -> Result<Option<Hash>> {
        let s = match fs::read_to_string(self.ref_path(name)) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        hex_to_hash(s.trim()).map(Some)
    }

    pub fn set_ref(&self, name: &str, new: Hash) -> Result<()> {
        let path = self.ref_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, hash_to_hex(&new) + "\n")?;
        Ok(())
    }

    /// Point HEAD at a ref name (`refs/heads/main`)
    pub fn set_head(&self, ref_name: &str) -> Result<()> {
        fs::create_dir_all(self.helix_dir())?;
        fs::write(self.helix_dir().join("HEAD"), format!("ref: {}\n", ref_name))?;
        Ok(())
    }

    /// Resolve HEAD, following one symbolic ref
    pub fn read_head(&self) -> Result<Option<Hash>> {
        let content = match fs::read_to_string(self.helix_dir().join("HEAD")) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let content = content.trim();

        match content.strip_prefix("ref:") {
            Some(target) => self.get_ref(target.trim()),
            None => hex_to_hash(content).map(Some),
        }
    }

    /// Turn a user-supplied revision into a hash.
    ///
    /// Accepts a full hex hash, `HEAD`, a full ref name, a branch name or a tag name.
    pub fn resolve_revision(&self, rev: &str) -> Result<Hash> {
        if rev.len() == 64 && rev.chars().all(|c| c.is_ascii_hexdigit()) {
            return hex_to_hash(rev);
        }

        let found = if rev == "HEAD" {
            self.read_head()?
        } else if rev.starts_with("refs/") {
            self.get_ref(rev)?
        } else {
            match self.get_ref(&format!("heads/{}", rev))? {
                Some(hash) => Some(hash),
                None => self.get_ref(&format!("tags/{}", rev))?,
            }
        };

        found.ok_or_else(|| RevListError::UnknownRevision(rev.to_string()))
    }
}
