use crate::hash::HashFunction;

/// Read-only view of a built binary hash tree, as needed for proof construction.
pub trait HashTree {
  /// Original transactions in order, excluding any padding.
  fn leaves(&self) -> &[Vec<u8>];

  /// Number of levels between the root and the leaves.
  fn height(&self) -> u8;

  fn root(&self) -> Option<&NodeChild>;

  /// Get the number of transactions
  fn size(&self) -> usize {
    self.leaves().len()
  }

  /// Get the root hash; a single-leaf tree's root is the raw leaf itself.
  fn root_hash(&self) -> Option<&[u8]> {
    self.root().map(NodeChild::data)
  }
}

/// Child slot of an internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeChild {
  Leaf(Vec<u8>),
  Internal(Box<Node>),
}

impl NodeChild {
  /// The value a parent concatenates: raw content for a leaf, cached hash for an internal node.
  pub fn data(&self) -> &[u8] {
    match self {
      NodeChild::Leaf(data) => data,
      NodeChild::Internal(node) => &node.data,
    }
  }
}

/// Internal node whose subtree spans `2^height` leaf positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
  pub height: u8,
  pub data: Vec<u8>,
  pub left: NodeChild,
  pub right: NodeChild,
}

impl Node {
  pub fn new<H: HashFunction>(hasher: &H, height: u8, left: NodeChild, right: NodeChild) -> Self {
    let data = Self::combine(hasher, left.data(), right.data());
    Node { height, data, left, right }
  }

  pub fn combine<H: HashFunction>(hasher: &H, left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(left.len() + right.len());
    buffer.extend_from_slice(left);
    buffer.extend_from_slice(right);
    hasher.hash(&buffer)
  }
}

/// In-memory binary Merkle tree built bottom-up from its transactions.
///
/// A leaf count that is not a power of two is padded by repeating the last transaction, so every level is full
/// and leaf `i` always sits at position `i` of the bottom level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
  leaves: Vec<Vec<u8>>,
  height: u8,
  root: Option<NodeChild>,
}

impl MerkleTree {
  pub fn new<H, I, T>(hasher: &H, leaves: I) -> Self
  where
    H: HashFunction,
    I: IntoIterator<Item = T>,
    T: Into<Vec<u8>>,
  {
    let leaves = leaves.into_iter().map(Into::into).collect::<Vec<Vec<u8>>>();
    if leaves.is_empty() {
      return MerkleTree { leaves, height: 0, root: None };
    }

    let width = leaves.len().next_power_of_two();
    let mut nodes = Vec::with_capacity(width);
    nodes.extend(leaves.iter().cloned().map(NodeChild::Leaf));
    let last = nodes[nodes.len() - 1].clone();
    nodes.resize(width, last);

    // Store all of the branches level by level
    let mut height = 0u8;
    while nodes.len() > 1 {
      height += 1;
      let mut children = nodes.into_iter();
      let mut branches = Vec::with_capacity(children.len() / 2);
      while let (Some(left), Some(right)) = (children.next(), children.next()) {
        branches.push(NodeChild::Internal(Box::new(Node::new(hasher, height, left, right))));
      }
      nodes = branches;
    }

    MerkleTree { leaves, height, root: nodes.pop() }
  }
}

impl HashTree for MerkleTree {
  fn leaves(&self) -> &[Vec<u8>] {
    &self.leaves
  }

  fn height(&self) -> u8 {
    self.height
  }

  fn root(&self) -> Option<&NodeChild> {
    self.root.as_ref()
  }
}
