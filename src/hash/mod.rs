//! Pluggable hash primitive for the Merkle layer.
//!
//! The module fixes the contract between the tree and whatever one-way
//! function backs it:
//!
//! * **Streaming interface:** every backend exposes reset-to-empty,
//!   append-bytes, finalize-to-digest and a fixed output size through the
//!   [`TreeHasher`] trait. The tree never assumes a particular digest width.
//! * **Registry:** [`HashKind`] enumerates the backends this build knows
//!   about. BLAKE2s-256 and BLAKE2b-512 are always linked; BLAKE3 is gated
//!   behind the `blake3` cargo feature and reports itself unavailable when
//!   compiled out.
//!
//! Requesting a hasher for an unavailable kind surfaces
//! [`MerkleError::HashUnavailable`]; this is a configuration error of the
//! caller, not a runtime fault.

mod blake2;
#[cfg(feature = "blake3")]
mod blake3;

pub use self::blake2::{Blake2bHasher, Blake2sHasher};
#[cfg(feature = "blake3")]
pub use self::blake3::Blake3Hasher;

use serde::{Deserialize, Serialize};

use crate::merkle::MerkleError;

/// Streaming one-way hash function consumed by the Merkle layer.
///
/// Implementations must be deterministic: identical byte sequences written
/// between two resets must always produce identical digests.
pub trait TreeHasher: Send {
    /// Resets the hasher to its empty state.
    fn reset(&mut self);

    /// Absorbs additional bytes into the hasher state.
    fn update(&mut self, bytes: &[u8]);

    /// Finalizes the accumulated input into a digest and resets the state.
    fn finalize_reset(&mut self) -> Vec<u8>;

    /// Digest width in bytes; constant for a given backend.
    fn output_size(&self) -> usize;
}

/// Hash function selection for a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashKind {
    /// BLAKE2s with a 32-byte digest.
    Blake2s,
    /// BLAKE2b with a 64-byte digest.
    Blake2b,
    /// BLAKE3 with a 32-byte digest; requires the `blake3` feature.
    Blake3,
}

impl HashKind {
    /// Reports whether the backend for this kind is linked into the build.
    pub fn is_available(self) -> bool {
        match self {
            HashKind::Blake2s | HashKind::Blake2b => true,
            HashKind::Blake3 => cfg!(feature = "blake3"),
        }
    }

    /// Digest width in bytes produced by this kind.
    pub fn digest_size(self) -> usize {
        match self {
            HashKind::Blake2s | HashKind::Blake3 => 32,
            HashKind::Blake2b => 64,
        }
    }

    /// Instantiates a fresh hasher for this kind.
    pub fn hasher(self) -> Result<Box<dyn TreeHasher>, MerkleError> {
        match self {
            HashKind::Blake2s => Ok(Box::new(Blake2sHasher::new())),
            HashKind::Blake2b => Ok(Box::new(Blake2bHasher::new())),
            #[cfg(feature = "blake3")]
            HashKind::Blake3 => Ok(Box::new(Blake3Hasher::new())),
            #[cfg(not(feature = "blake3"))]
            HashKind::Blake3 => Err(MerkleError::HashUnavailable { kind: self }),
        }
    }
}
