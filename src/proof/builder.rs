use crate::proof::{Proof, ProofStep};
use crate::tree::{HashTree, Node, NodeChild};
use crate::{Error, Result};

/// Derives sibling paths from a built tree.
///
/// The tree is only read, so builders over the same tree may run on any number of threads at once.
pub struct ProofBuilder<'a, T: HashTree + ?Sized> {
  tree: &'a T,
}

impl<'a, T: HashTree + ?Sized> ProofBuilder<'a, T> {
  pub fn new(tree: &'a T) -> Self {
    ProofBuilder { tree }
  }

  /// Build the proof for `leaf`.
  ///
  /// When the same value occurs more than once among the leaves, the first occurrence is targeted.
  pub fn build(&self, leaf: &[u8]) -> Result<Proof> {
    let tx_id =
      self.tree.leaves().iter().position(|l| l.as_slice() == leaf).ok_or_else(|| Error::NotFound(leaf.to_vec()))?;
    self.descend(tx_id, leaf)
  }

  /// Build the proof for the leaf at `position` in the tree's leaf list.
  pub fn build_at(&self, position: usize) -> Result<Proof> {
    let leaf = self.tree.leaves().get(position).ok_or_else(|| {
      Error::InvalidData(format!("leaf position {position} out of range for {} leaves", self.tree.size()))
    })?;
    self.descend(position, leaf)
  }

  fn descend(&self, tx_id: usize, leaf: &[u8]) -> Result<Proof> {
    if self.tree.height() <= 1 && self.tree.size() <= 1 {
      return Ok(Proof::default());
    }

    let mut current = match self.tree.root() {
      Some(NodeChild::Internal(root)) => root.as_ref(),
      Some(NodeChild::Leaf(_)) | None => {
        return Err(Error::MalformedTree(format!("{} leaves under a root without children", self.tree.size())));
      }
    };

    let mut steps = Vec::with_capacity(self.tree.height() as usize);
    loop {
      match current {
        Node { left: NodeChild::Leaf(l), right: NodeChild::Leaf(r), .. } => {
          let step = if l.as_slice() == leaf {
            ProofStep::right(r.clone())
          } else if r.as_slice() == leaf {
            ProofStep::left(l.clone())
          } else {
            return Err(Error::MalformedTree(format!("leaf #{tx_id} is not under the bottom node reached")));
          };
          steps.push(step);
          break;
        }
        Node { left: NodeChild::Internal(l), right: NodeChild::Internal(r), height, .. } => {
          if move_left(tx_id, *height) {
            steps.push(ProofStep::right(r.data.clone()));
            current = l.as_ref();
          } else {
            steps.push(ProofStep::left(l.data.clone()));
            current = r.as_ref();
          }
        }
        Node { height, .. } => {
          return Err(Error::MalformedTree(format!("node of height {height} mixes leaf and internal children")));
        }
      }
    }
    Ok(Proof::from(steps))
  }
}

/// Whether leaf `tx_id` lies in the left half of a subtree of the given height.
///
/// The subtree's local leaf index is congruent to the global one modulo its width `2^height`.
pub(crate) fn move_left(tx_id: usize, height: u8) -> bool {
  debug_assert!(height > 0);
  let Some(width) = 1u128.checked_shl(u32::from(height)) else {
    return true;
  };
  (tx_id as u128) % width < width / 2
}
