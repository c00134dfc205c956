//! # BLAKE3 Hashing
//!
//! Every digest in the ledger is a 32-byte BLAKE3 hash: transaction ids,
//! signing messages, inputs commitments, Ed25519 addresses and the ids of
//! chain outputs derived from the output that created them.

/// BLAKE3 hash output (256-bit).
pub type Hash = [u8; 32];

/// Incremental hasher for values assembled from several parts.
#[derive(Clone, Default)]
pub struct Blake3Hasher {
    inner: blake3::Hasher,
}

impl Blake3Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more bytes.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Digest of everything fed so far. The hasher stays usable.
    pub fn finalize(&self) -> Hash {
        *self.inner.finalize().as_bytes()
    }
}

/// One-shot hash.
pub fn blake3_hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Hash of the concatenation of `parts`.
pub fn blake3_hash_many(parts: &[&[u8]]) -> Hash {
    let mut hasher = Blake3Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}
