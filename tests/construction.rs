
use _fixtures::{hex_bytes, WORDS};
use merkle_commit::{HashKind, MerkleError, MerkleTree, TreeHasher};
use proptest::prelude::*;

fn digest_of(kind: HashKind, datum: &[u8]) -> Vec<u8> {
    let mut hasher = kind.hasher().expect("backend available");
    hasher.update(datum);
    hasher.finalize_reset()
}

fn digest_of_pair(kind: HashKind, left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut hasher = kind.hasher().expect("backend available");
    hasher.update(left);
    hasher.update(right);
    hasher.finalize_reset()
}

#[test]
fn counts_for_24_leaves() {
    let tree = MerkleTree::build(HashKind::Blake2s, WORDS).unwrap();
    assert_eq!(tree.leaf_count(), 24);
    // Row sizes 12, 6, 3, 2, 1 plus the leaf row.
    assert_eq!(tree.merkle_node_count(), 24);
    assert_eq!(tree.size(), 48);
    assert_eq!(tree.height(), 6);
    assert_eq!(tree.hash_kind(), HashKind::Blake2s);
    assert!(tree.root().is_some());
}

#[test]
fn counts_for_small_trees() {
    let cases = [
        // (leaves, height, internal nodes)
        (1usize, 1usize, 0usize),
        (2, 2, 1),
        (3, 3, 3),
        (5, 4, 6),
        (7, 4, 7),
    ];
    for (leaves, height, nodes) in cases {
        let tree = MerkleTree::build(HashKind::Blake2s, WORDS.iter().take(leaves)).unwrap();
        assert_eq!(tree.height(), height, "height for {leaves} leaves");
        assert_eq!(tree.merkle_node_count(), nodes, "nodes for {leaves} leaves");
        assert_eq!(tree.size(), nodes + leaves);
    }
}

#[test]
fn empty_input_is_rejected() {
    let err = MerkleTree::build(HashKind::Blake2s, Vec::<&str>::new()).unwrap_err();
    assert_eq!(err, MerkleError::NoData);
}

#[test]
fn root_ignores_input_order() {
    let forward = MerkleTree::build(HashKind::Blake2s, WORDS).unwrap();
    let mut shuffled = WORDS;
    shuffled.reverse();
    let backward = MerkleTree::build(HashKind::Blake2s, shuffled).unwrap();
    assert_eq!(forward.root(), backward.root());
}

#[test]
fn single_leaf_root_is_the_leaf_digest() {
    let tree = MerkleTree::build(HashKind::Blake2s, ["alpha"]).unwrap();
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.merkle_node_count(), 0);
    assert_eq!(tree.size(), 1);
    assert_eq!(
        tree.root().unwrap().as_bytes(),
        digest_of(HashKind::Blake2s, b"alpha").as_slice()
    );
}

#[test]
fn two_leaf_root_hashes_the_sorted_pair() {
    // "beta" supplied first, but "alpha" sorts first.
    let tree = MerkleTree::build(HashKind::Blake2s, ["beta", "alpha"]).unwrap();
    let alpha = digest_of(HashKind::Blake2s, b"alpha");
    let beta = digest_of(HashKind::Blake2s, b"beta");
    let root = digest_of_pair(HashKind::Blake2s, &alpha, &beta);
    assert_eq!(tree.root().unwrap().as_bytes(), root.as_slice());
}

#[test]
fn odd_leaf_count_does_not_duplicate_the_leftover() {
    let tree = MerkleTree::build(HashKind::Blake2s, ["beta", "alpha", "gamma"]).unwrap();
    let alpha = digest_of(HashKind::Blake2s, b"alpha");
    let beta = digest_of(HashKind::Blake2s, b"beta");
    let gamma = digest_of(HashKind::Blake2s, b"gamma");
    let pair = digest_of_pair(HashKind::Blake2s, &alpha, &beta);
    // The lone third leaf is rehashed alone, never paired with itself.
    let lone = digest_of(HashKind::Blake2s, &gamma);
    let root = digest_of_pair(HashKind::Blake2s, &pair, &lone);
    assert_eq!(tree.root().unwrap().as_bytes(), root.as_slice());
}

#[test]
fn hash_kinds_produce_distinct_roots() {
    let blake2s = MerkleTree::build(HashKind::Blake2s, WORDS).unwrap();
    let blake2b = MerkleTree::build(HashKind::Blake2b, WORDS).unwrap();
    assert_eq!(blake2s.root().unwrap().as_bytes().len(), 32);
    assert_eq!(blake2b.root().unwrap().as_bytes().len(), 64);
    assert_ne!(
        hex_bytes(blake2s.root().unwrap().as_bytes()),
        hex_bytes(blake2b.root().unwrap().as_bytes())
    );
}

#[cfg(feature = "blake3")]
#[test]
fn blake3_backend_builds() {
    let tree = MerkleTree::build(HashKind::Blake3, WORDS).unwrap();
    assert_eq!(tree.root().unwrap().as_bytes().len(), HashKind::Blake3.digest_size());
    assert!(tree.verify(&"alpha").unwrap());
}

#[cfg(not(feature = "blake3"))]
#[test]
fn blake3_backend_reports_unavailable() {
    assert!(!HashKind::Blake3.is_available());
    let err = MerkleTree::build(HashKind::Blake3, WORDS).unwrap_err();
    assert_eq!(
        err,
        MerkleError::HashUnavailable {
            kind: HashKind::Blake3
        }
    );
}

#[test]
fn leaves_come_back_in_insertion_order() {
    let tree = MerkleTree::build(HashKind::Blake2s, WORDS).unwrap();
    let listed = tree.leaves();
    assert_eq!(listed.len(), tree.leaf_count());
    for (datum, word) in listed.iter().zip(WORDS) {
        assert_eq!(datum.as_slice(), word.as_bytes());
    }
}

#[test]
fn hash_kind_and_digest_serde_round_trip() {
    let encoded = serde_json::to_string(&HashKind::Blake2b).unwrap();
    let decoded: HashKind = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, HashKind::Blake2b);

    let tree = MerkleTree::build(HashKind::Blake2s, WORDS).unwrap();
    let root = tree.root().unwrap().clone();
    let encoded = serde_json::to_string(&root).unwrap();
    let decoded: merkle_commit::Digest = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, root);
}

proptest! {
    #[test]
    fn root_is_invariant_under_input_permutation(
        items in proptest::collection::btree_set(proptest::collection::vec(any::<u8>(), 1..24), 2..24)
    ) {
        let forward: Vec<Vec<u8>> = items.iter().cloned().collect();
        let mut backward = forward.clone();
        backward.reverse();
        let lhs = MerkleTree::build(HashKind::Blake2s, forward).unwrap();
        let rhs = MerkleTree::build(HashKind::Blake2s, backward).unwrap();
        prop_assert_eq!(lhs.root(), rhs.root());
    }

    #[test]
    fn every_member_verifies(
        items in proptest::collection::btree_set(proptest::collection::vec(any::<u8>(), 1..24), 1..24)
    ) {
        let data: Vec<Vec<u8>> = items.into_iter().collect();
        let tree = MerkleTree::build(HashKind::Blake2s, data.clone()).unwrap();
        for datum in &data {
            prop_assert!(tree.verify(datum).unwrap());
        }
    }
}
