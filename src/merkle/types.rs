use core::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::HashKind;

/// Digest produced by the tree's hash primitive.
///
/// The width depends on the [`HashKind`] the tree was built with, so the
/// bytes are owned rather than a fixed-size array.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
    bytes: Vec<u8>,
}

impl Digest {
    /// Creates a digest from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the digest and returns the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x")?;
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A tree leaf: the serialized datum, its digest, and the position at which
/// the datum was originally supplied.
///
/// `ordered_id` tracks append order and is independent of the content-sorted
/// storage position. Delete compacts the numbering, so it is a position, not
/// a permanent identity.
#[derive(Clone, Debug)]
pub(crate) struct TreeLeaf {
    pub(crate) digest: Digest,
    pub(crate) datum: Vec<u8>,
    pub(crate) ordered_id: u64,
}

/// Errors emitted by the Merkle layer.
///
/// Both variants are recoverable configuration or lookup outcomes. A leaf
/// that is found but whose path fails verification is reported as
/// `Ok(false)`, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleError {
    /// The requested hash backend is not linked into this build.
    HashUnavailable {
        /// Kind whose backend could not be instantiated.
        kind: HashKind,
    },
    /// No items were supplied, or the requested item is not in the tree.
    NoData,
}

impl fmt::Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::HashUnavailable { kind } => {
                write!(f, "hash algorithm unavailable: {:?}", kind)
            }
            MerkleError::NoData => write!(f, "nonexistent data"),
        }
    }
}

impl std::error::Error for MerkleError {}
