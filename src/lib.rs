//! Compact Merkle inclusion proofs for transactions in a binary hash tree.
//!
//! A [`ProofBuilder`] descends a built [`HashTree`] from its root toward a target leaf and records the sibling on
//! every level. A [`ProofVerifier`] folds that sibling path back up from the leaf and yields the candidate root,
//! which the caller compares against the root it trusts.
//!
//! ```
//! use merkle_proof::{HashAlgorithm, HashTree, MerkleTree, ProofBuilder, ProofVerifier};
//!
//! let tree = MerkleTree::new(&HashAlgorithm::Sha256, ["a", "b", "c", "d"]);
//! let proof = ProofBuilder::new(&tree).build(b"c").unwrap();
//! let root = ProofVerifier::new(HashAlgorithm::Sha256).verify(b"c", &proof).unwrap();
//! assert_eq!(tree.root_hash(), Some(root.as_slice()));
//! ```

pub mod error;
pub mod hash;
pub mod proof;
pub mod tree;

pub use error::{Error, Result};
pub use hash::{HashAlgorithm, HashFunction};
pub use proof::builder::ProofBuilder;
pub use proof::verifier::ProofVerifier;
pub use proof::{Direction, Proof, ProofStep};
pub use tree::{HashTree, MerkleTree, Node, NodeChild};

/// SplitMix64 finalizer, used to derive reproducible transaction payloads.
pub fn splitmix64(x: u64) -> u64 {
  let mut z = x.wrapping_add(0x9e3779b97f4a7c15);
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
  z ^ (z >> 31)
}

/// Generate `n` distinct pseudo-random transaction ids.
pub fn sample_transactions(n: usize) -> Vec<Vec<u8>> {
  (0..n as u64).map(|i| format!("tx-{:016x}", splitmix64(i)).into_bytes()).collect()
}
