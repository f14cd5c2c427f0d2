use super::traits::Datum;
use super::tree::{hash_datum, hash_pair, MerkleTree};
use super::types::MerkleError;

impl MerkleTree {
    /// Verifies membership of the leaf whose stored bytes match `digest`.
    ///
    /// O(L) scan over the leaves plus O(log L) hash operations. Returns
    /// [`MerkleError::NoData`] when no leaf matches; a matching leaf whose
    /// path does not check out is `Ok(false)`.
    pub fn verify_digest(&self, digest: &[u8]) -> Result<bool, MerkleError> {
        for (index, leaf) in self.leaves.iter().enumerate() {
            if leaf.datum == digest {
                return self.verify_path(index);
            }
        }
        Err(MerkleError::NoData)
    }

    /// Verifies membership of the leaf with the given ordered id, i.e. the
    /// position at which the item was originally supplied.
    ///
    /// O(L) scan over the leaves plus O(log L) hash operations.
    pub fn verify_ordered_id(&self, ordered_id: u64) -> Result<bool, MerkleError> {
        for (index, leaf) in self.leaves.iter().enumerate() {
            if leaf.ordered_id == ordered_id {
                return self.verify_path(index);
            }
        }
        Err(MerkleError::NoData)
    }

    /// Verifies membership of the item with the given serialized bytes.
    ///
    /// O(log L) binary search over the content-sorted leaves plus O(log L)
    /// hash operations; this is the primary lookup path. With duplicate
    /// serialized data the leftmost match is verified.
    pub fn verify_serialized_datum(&self, datum: &[u8]) -> Result<bool, MerkleError> {
        let index = self.leaves.partition_point(|leaf| leaf.datum.as_slice() < datum);
        match self.leaves.get(index) {
            Some(leaf) if leaf.datum == datum => self.verify_path(index),
            _ => Err(MerkleError::NoData),
        }
    }

    /// Verifies membership of the given item.
    ///
    /// Serializes the item and delegates to
    /// [`verify_serialized_datum`](MerkleTree::verify_serialized_datum).
    pub fn verify<D>(&self, datum: &D) -> Result<bool, MerkleError>
    where
        D: Datum + ?Sized,
    {
        self.verify_serialized_datum(&datum.serialize())
    }

    /// Walks from the leaf at `leaf_index` to the root, recomputing each
    /// ancestor and comparing it against the stored digest at that level.
    ///
    /// The leaf digest is always recomputed from the stored datum; the
    /// cached digest of the entry under verification is not trusted. An even
    /// index is the left operand of its pair (hashing alone when no right
    /// sibling exists), an odd index the right operand; concatenation is
    /// always left then right.
    fn verify_path(&self, leaf_index: usize) -> Result<bool, MerkleError> {
        let mut hasher = self.hash.hasher()?;
        let mut digest = hash_datum(hasher.as_mut(), &self.leaves[leaf_index].datum);
        if self.rows.is_empty() {
            // Single leaf: its digest is the root.
            return Ok(digest == self.leaves[leaf_index].digest);
        }

        let mut index = leaf_index;
        let bottom = self.rows.len() - 1;
        for level in (0..self.rows.len()).rev() {
            let parent_index = index / 2;
            let parent = if index % 2 == 0 {
                let sibling = if level == bottom {
                    self.leaves.get(index + 1).map(|leaf| &leaf.digest)
                } else {
                    self.rows[level + 1].get(index + 1)
                };
                hash_pair(hasher.as_mut(), &digest, sibling)
            } else {
                let sibling = if level == bottom {
                    &self.leaves[index - 1].digest
                } else {
                    &self.rows[level + 1][index - 1]
                };
                hash_pair(hasher.as_mut(), sibling, Some(&digest))
            };
            if parent != self.rows[level][parent_index] {
                return Ok(false);
            }
            digest = parent;
            index = parent_index;
        }
        Ok(true)
    }
}
