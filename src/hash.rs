use crate::error::RevListError;
use crate::object::ObjectKind;

/// 32-byte BLAKE3 object id
pub type Hash = [u8; 32];

/// Object id of an encoded object: BLAKE3("{kind} {size}\0{raw}").
///
/// The header keeps commits, trees, blobs and tags in one namespace without
/// cross-kind collisions.
pub fn hash_object(kind: ObjectKind, raw: &[u8]) -> Hash {
    let header = format!("{} {}\0", kind.as_str(), raw.len());

    let mut hasher = blake3::Hasher::new();
    hasher.update(header.as_bytes());
    hasher.update(raw);

    *hasher.finalize().as_bytes()
}

/// Convert hash to hex string for display/storage
#[inline]
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// First 8 hex characters, for log lines and `--short` output
pub fn short_hash(hash: &Hash) -> String {
    let mut hex = hash_to_hex(hash);
    hex.truncate(8);
    hex
}

/// Parse hex string back to hash
pub fn hex_to_hash(hex_str: &str) -> Result<Hash, RevListError> {
    let bytes = hex::decode(hex_str).map_err(|e| RevListError::InvalidHash {
        input: hex_str.to_string(),
        reason: e.to_string(),
    })?;

    if bytes.len() != 32 {
        return Err(RevListError::InvalidHash {
            input: hex_str.to_string(),
            reason: format!("expected 32 bytes, got {}", bytes.len()),
        });
    }

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}
