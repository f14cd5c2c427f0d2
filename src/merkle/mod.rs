//! Merkle tree core: leaves, layered digest rows and membership proofs.
//!
//! The module fixes the following structural choices:
//!
//! * **Leaf order:** leaves are stored sorted by their serialized bytes so
//!   membership lookup by content is a binary search; the original append
//!   position survives in each leaf's ordered id.
//! * **Pairing:** node `j` of a level hashes children `2j` and `2j + 1`.
//!   A lone leftover child on an odd-sized level is hashed alone – it is
//!   never duplicated, which changes the root relative to the common
//!   duplicate-last-leaf convention.
//! * **Reconstruction:** append and delete rebuild every digest row from the
//!   full leaf set. There is no incremental rehash; a snapshot is replaced
//!   wholesale or not at all.
//!
//! The public API re-exports the most relevant types for convenience.

mod proof;
mod traits;
mod tree;
mod types;

pub use traits::Datum;
pub use tree::MerkleTree;
pub use types::{Digest, MerkleError};
