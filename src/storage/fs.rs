//! On-disk object storage in the helix layout.
//! Invariants:
//! - ObjectId/Hash = hash_object(kind, raw bytes)
//! - On-disk representation is zstd-compressed, but the API always reads/writes RAW bytes.
use std::fs;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{DecodeError, RevListError};
use crate::hash::{hash_object, Hash};
use crate::object::{Blob, Object, ObjectKind};
use crate::storage::{not_found, ObjectStore, ObjectWriter};
use crate::Result;

const COMPRESSION_LEVEL: i32 = 3;

/// Kinds `resolve` reads and decodes; blobs are answered from file existence
const DECODED_KINDS: [ObjectKind; 3] = [ObjectKind::Commit, ObjectKind::Tree, ObjectKind::Tag];

#[derive(Debug, Clone)]
pub struct FsObjectStore {
    repo_root: PathBuf, // path to repo root (contains .helix/)
}

impl FsObjectStore {
    pub fn new(repo_root: impl AsRef<Path>) -> Self {
        Self {
            repo_root: repo_root.as_ref().to_path_buf(),
        }
    }

    /// Create the per-kind object directories
    pub fn init(&self) -> Result<()> {
        for kind in ObjectKind::ALL {
            fs::create_dir_all(self.kind_dir(kind))?;
        }
        Ok(())
    }

    fn kind_dir(&self, kind: ObjectKind) -> PathBuf {
        let subdir = match kind {
            ObjectKind::Blob => "blobs",
            ObjectKind::Tree => "trees",
            ObjectKind::Commit => "commits",
            ObjectKind::Tag => "tags",
        };
        self.repo_root.join(".helix").join("objects").join(subdir)
    }

    fn obj_path(&self, kind: ObjectKind, hash: &Hash) -> PathBuf {
        self.kind_dir(kind).join(hex::encode(hash))
    }

    pub fn has_object(&self, kind: ObjectKind, hash: &Hash) -> bool {
        self.obj_path(kind, hash).exists()
    }

    /// Read RAW bytes of `hash` stored as `kind`
    pub fn read_object(&self, kind: ObjectKind, hash: &Hash) -> Result<Vec<u8>> {
        let path = self.obj_path(kind, hash);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found(hash)),
            Err(e) => return Err(e.into()),
        };

        zstd::decode_all(&data[..])
            .map_err(|e| RevListError::decode(*hash, DecodeError::Decompress(e)))
    }

    pub fn list_object_hashes(&self, kind: ObjectKind) -> Result<Vec<Hash>> {
        let dir = self.kind_dir(kind);
        if !dir.exists() {
            return Ok(vec![]);
        }

        let mut out = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let name = match path.file_name().and_then(|s| s.to_str()) {
                Some(s) => s,
                None => continue,
            };

            // skip temp / junk
            if name.starts_with('.') || name.len() != 64 {
                continue;
            }

            let bytes = match hex::decode(name) {
                Ok(b) if b.len() == 32 => b,
                _ => continue,
            };

            let mut h = [0u8; 32];
            h.copy_from_slice(&bytes);
            out.push(h);
        }

        out.sort_unstable();
        Ok(out)
    }
}

impl ObjectStore for FsObjectStore {
    fn resolve(&self, hash: &Hash) -> Result<Object> {
        for kind in DECODED_KINDS {
            match self.read_object(kind, hash) {
                Ok(raw) => return Object::decode(kind, *hash, &raw),
                Err(RevListError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        if self.has_object(ObjectKind::Blob, hash) {
            return Ok(Object::Blob(Blob { hash: *hash }));
        }

        Err(not_found(hash))
    }

    fn contains(&self, hash: &Hash) -> bool {
        ObjectKind::ALL
            .iter()
            .any(|kind| self.has_object(*kind, hash))
    }
}

impl ObjectWriter for FsObjectStore {
    fn write_object(&mut self, kind: ObjectKind, raw: &[u8]) -> Result<Hash> {
        let hash = hash_object(kind, raw);

        let path = self.obj_path(kind, &hash);
        if path.exists() {
            return Ok(hash);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let on_disk = zstd::encode_all(raw, COMPRESSION_LEVEL)?;
        atomic_write(&path, &on_disk)?;

        Ok(hash)
    }
}

fn atomic_write(final_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_path_for(final_path);

    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)?;

    f.write_all(bytes)?;
    f.sync_all()?;
    drop(f);

    fs::rename(&tmp_path, final_path)
}

fn tmp_path_for(final_path: &Path) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let file_name = final_path.file_name().unwrap_or_default().to_string_lossy();
    final_path.with_file_name(format!(".{}.tmp.{}", file_name, nanos))
}
