use crate::hash::{HashKind, TreeHasher};

use super::traits::Datum;
use super::types::{Digest, MerkleError, TreeLeaf};

/// Merkle tree over an ordered collection of serializable items.
///
/// A built tree is a consistent snapshot: the content-sorted leaf array plus
/// the digest rows above it, `rows[0]` being the single-digest root row and
/// the last row being leaf-adjacent. [`append`](MerkleTree::append) and
/// [`delete`](MerkleTree::delete) replace the snapshot wholesale by re-running
/// construction over the full leaf set.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    pub(super) hash: HashKind,
    pub(super) rows: Vec<Vec<Digest>>,
    pub(super) leaves: Vec<TreeLeaf>,
}

impl MerkleTree {
    /// Builds a tree from the given items using the requested hash function.
    ///
    /// Items are hashed in the order supplied (each leaf remembers that
    /// position as its ordered id), then sorted by their serialized bytes so
    /// lookups can binary-search. Returns [`MerkleError::HashUnavailable`] if
    /// the backend for `hash` is not linked into this build, and
    /// [`MerkleError::NoData`] if `data` yields no items.
    pub fn build<I, D>(hash: HashKind, data: I) -> Result<Self, MerkleError>
    where
        I: IntoIterator<Item = D>,
        D: Datum,
    {
        let mut hasher = hash.hasher()?;
        let serialized: Vec<Vec<u8>> = data.into_iter().map(|datum| datum.serialize()).collect();
        if serialized.is_empty() {
            return Err(MerkleError::NoData);
        }
        let mut leaves = Vec::with_capacity(serialized.len());
        push_leaves(hash, &mut leaves, serialized)?;
        let rows = construct_rows(hasher.as_mut(), &leaves);
        Ok(Self { hash, rows, leaves })
    }

    /// Appends the given items as new leaves and reconstructs the tree.
    ///
    /// New items receive sequential ordered ids continuing from the current
    /// leaf count. Every digest row is recomputed, so the root changes.
    /// Empty input is a no-op.
    pub fn append<I, D>(&mut self, data: I) -> Result<(), MerkleError>
    where
        I: IntoIterator<Item = D>,
        D: Datum,
    {
        let serialized: Vec<Vec<u8>> = data.into_iter().map(|datum| datum.serialize()).collect();
        if serialized.is_empty() {
            return Ok(());
        }
        let mut hasher = self.hash.hasher()?;
        push_leaves(self.hash, &mut self.leaves, serialized)?;
        self.rows = construct_rows(hasher.as_mut(), &self.leaves);
        Ok(())
    }

    /// Deletes the given items from the leaves and reconstructs the tree.
    ///
    /// Items not present are silently skipped. The remaining leaves are
    /// renumbered so ordered ids stay contiguous from 0 in their previous
    /// insertion order; an ordered id is a compacted position, not a
    /// permanent identity. Empty input is a no-op.
    pub fn delete<I, D>(&mut self, data: I) -> Result<(), MerkleError>
    where
        I: IntoIterator<Item = D>,
        D: Datum,
    {
        let targets: Vec<Vec<u8>> = data.into_iter().map(|datum| datum.serialize()).collect();
        if targets.is_empty() {
            return Ok(());
        }
        let mut hasher = self.hash.hasher()?;
        for target in &targets {
            let index = self.leaves.partition_point(|leaf| leaf.datum < *target);
            if self
                .leaves
                .get(index)
                .is_some_and(|leaf| leaf.datum == *target)
            {
                self.leaves.remove(index);
            }
        }
        self.leaves.sort_unstable_by_key(|leaf| leaf.ordered_id);
        for (index, leaf) in self.leaves.iter_mut().enumerate() {
            leaf.ordered_id = index as u64;
        }
        self.leaves.sort_unstable_by(|a, b| a.datum.cmp(&b.datum));
        self.rows = construct_rows(hasher.as_mut(), &self.leaves);
        Ok(())
    }

    /// Returns the root digest committing to the entire leaf set.
    ///
    /// A single-leaf tree has no digest rows; its root is the leaf digest.
    /// `None` only for a tree whose every leaf has been deleted.
    pub fn root(&self) -> Option<&Digest> {
        match self.rows.first() {
            Some(row) => row.first(),
            None => self.leaves.first().map(|leaf| &leaf.digest),
        }
    }

    /// Height of the tree, counting the leaf row and every digest row.
    pub fn height(&self) -> usize {
        self.rows.len() + 1
    }

    /// Total number of nodes, leaves included.
    pub fn size(&self) -> usize {
        self.merkle_node_count() + self.leaf_count()
    }

    /// Number of internal digest nodes, leaves excluded.
    pub fn merkle_node_count(&self) -> usize {
        plan_rows(self.leaves.len()).node_total
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Hash function this tree was built with.
    pub fn hash_kind(&self) -> HashKind {
        self.hash
    }

    /// Returns every stored datum in original insertion order.
    ///
    /// Undoes the internal content sort by ordering on the leaves' ordered
    /// ids. The result is a copy of the current snapshot, not a live view.
    pub fn leaves(&self) -> Vec<Vec<u8>> {
        let mut ordered: Vec<&TreeLeaf> = self.leaves.iter().collect();
        ordered.sort_unstable_by_key(|leaf| leaf.ordered_id);
        ordered.into_iter().map(|leaf| leaf.datum.clone()).collect()
    }
}

/// Hashes the serialized items, appends them to `leaves` with sequential
/// ordered ids, and restores the content sort.
fn push_leaves(
    hash: HashKind,
    leaves: &mut Vec<TreeLeaf>,
    serialized: Vec<Vec<u8>>,
) -> Result<(), MerkleError> {
    let digests = leaf_digests(hash, &serialized)?;
    let base = leaves.len() as u64;
    for (offset, (datum, digest)) in serialized.into_iter().zip(digests).enumerate() {
        leaves.push(TreeLeaf {
            digest,
            datum,
            ordered_id: base + offset as u64,
        });
    }
    leaves.sort_unstable_by(|a, b| a.datum.cmp(&b.datum));
    Ok(())
}

#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 64;

fn leaf_digests(hash: HashKind, data: &[Vec<u8>]) -> Result<Vec<Digest>, MerkleError> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if data.len() > PARALLEL_CHUNK {
            let blocks: Result<Vec<Vec<Digest>>, MerkleError> = data
                .par_chunks(PARALLEL_CHUNK)
                .map(|block| {
                    let mut hasher = hash.hasher()?;
                    Ok(block
                        .iter()
                        .map(|datum| hash_datum(hasher.as_mut(), datum))
                        .collect())
                })
                .collect();
            return blocks.map(|blocks| blocks.into_iter().flatten().collect());
        }
    }
    let mut hasher = hash.hasher()?;
    Ok(data
        .iter()
        .map(|datum| hash_datum(hasher.as_mut(), datum))
        .collect())
}

/// Per-level node counts for a given leaf count, leaf-adjacent level first,
/// plus the total across all levels.
struct RowPlan {
    sizes: Vec<usize>,
    node_total: usize,
}

/// While more than one node remains, the next level holds half the count,
/// rounding odd counts up: the leftover node is carried upward as a
/// singleton, not duplicated. Zero or one leaf yields zero levels.
fn plan_rows(leaf_count: usize) -> RowPlan {
    let mut sizes = Vec::new();
    let mut node_total = 0;
    let mut count = leaf_count;
    while count > 1 {
        count = count.div_ceil(2);
        sizes.push(count);
        node_total += count;
    }
    RowPlan { sizes, node_total }
}

/// Builds every digest row bottom-up and returns them root-row-first.
///
/// Level node `j` hashes children `2j` and `2j + 1`; a missing right child
/// means the left child is hashed alone.
pub(super) fn construct_rows(hasher: &mut dyn TreeHasher, leaves: &[TreeLeaf]) -> Vec<Vec<Digest>> {
    let plan = plan_rows(leaves.len());
    let mut rows: Vec<Vec<Digest>> = Vec::with_capacity(plan.sizes.len());
    for (level, &size) in plan.sizes.iter().enumerate() {
        let row: Vec<Digest> = if level == 0 {
            (0..size)
                .map(|j| {
                    hash_pair(
                        hasher,
                        &leaves[2 * j].digest,
                        leaves.get(2 * j + 1).map(|leaf| &leaf.digest),
                    )
                })
                .collect()
        } else {
            let below = &rows[level - 1];
            (0..size)
                .map(|j| hash_pair(hasher, &below[2 * j], below.get(2 * j + 1)))
                .collect()
        };
        rows.push(row);
    }
    rows.reverse();
    rows
}

pub(super) fn hash_datum(hasher: &mut dyn TreeHasher, datum: &[u8]) -> Digest {
    hasher.reset();
    hasher.update(datum);
    Digest::new(hasher.finalize_reset())
}

pub(super) fn hash_pair(
    hasher: &mut dyn TreeHasher,
    left: &Digest,
    right: Option<&Digest>,
) -> Digest {
    hasher.reset();
    hasher.update(left.as_bytes());
    if let Some(right) = right {
        hasher.update(right.as_bytes());
    }
    Digest::new(hasher.finalize_reset())
}
