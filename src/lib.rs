//! Immutable, in-memory, hash-function-agnostic Merkle tree.
//!
//! The crate computes a single root digest committing to an ordered
//! collection of opaque data items and answers membership queries with a
//! logarithmic-cost path verification walk. It is split into two layers:
//!
//! * [`hash`] – the pluggable hash primitive: the [`TreeHasher`] streaming
//!   contract plus the [`HashKind`] registry naming the backends linked into
//!   the build.
//! * [`merkle`] – the tree itself: leaf management, layered digest rows,
//!   membership lookup and path verification, and whole-snapshot
//!   reconstruction on append/delete.
//!
//! Anything that can serialize itself to a deterministic byte string can be
//! stored in the tree; see [`Datum`].
//!
//! ```
//! use merkle_commit::{HashKind, MerkleTree};
//!
//! let tree = MerkleTree::build(HashKind::Blake2s, ["alpha", "beta", "gamma"]).unwrap();
//! assert!(tree.verify(&"alpha").unwrap());
//! assert!(tree.verify(&"omega").is_err());
//! ```
//!
//! A tree snapshot is an exclusively-owned value: read-only queries may run
//! concurrently against a fixed snapshot, but a mutation (`append`/`delete`)
//! replaces the snapshot wholesale and must be externally serialized against
//! readers. The crate performs no internal locking.

pub mod hash;
pub mod merkle;

pub use hash::{HashKind, TreeHasher};
pub use merkle::{Datum, Digest, MerkleError, MerkleTree};
