use crate::hash::HashFunction;
use crate::proof::{Direction, Proof};
use crate::{Error, Result};

/// Folds a proof from the leaf up to a candidate root.
pub struct ProofVerifier<H: HashFunction> {
  hasher: H,
}

impl<H: HashFunction> ProofVerifier<H> {
  pub fn new(hasher: H) -> Self {
    ProofVerifier { hasher }
  }

  /// Recompute the root implied by `leaf` and `proof`.
  ///
  /// The leaf enters the first fold as raw data, not pre-hashed. An empty proof returns the leaf unchanged.
  /// A typed [`Proof`] cannot carry an invalid direction; see [`Self::verify_encoded`] for transported proofs.
  pub fn verify(&self, leaf: &[u8], proof: &Proof) -> Result<Vec<u8>> {
    let mut working = leaf.to_vec();
    let mut buffer = Vec::new();
    for step in proof.iter().rev() {
      buffer.clear();
      match step.direction {
        Direction::Right => {
          buffer.extend_from_slice(&working);
          buffer.extend_from_slice(&step.value);
        }
        Direction::Left => {
          buffer.extend_from_slice(&step.value);
          buffer.extend_from_slice(&working);
        }
      }
      working = self.hasher.hash(&buffer);
    }
    Ok(working)
  }

  /// Decode a transported proof and recompute its root.
  ///
  /// An unrecognized direction tag aborts with [`Error::InvalidDirection`] before anything is hashed.
  pub fn verify_encoded(&self, leaf: &[u8], encoded: &[u8]) -> Result<Vec<u8>> {
    let proof = Proof::from_bytes(encoded)?;
    self.verify(leaf, &proof)
  }

  /// Recompute the root and compare it with `expected`.
  pub fn check(&self, leaf: &[u8], proof: &Proof, expected: &[u8]) -> Result<()> {
    let computed = self.verify(leaf, proof)?;
    if computed != expected {
      return Err(Error::RootMismatch { computed, expected: expected.to_vec() });
    }
    Ok(())
  }
}
