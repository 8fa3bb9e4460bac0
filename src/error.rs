use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  /// The requested transaction is not one of the tree's leaves.
  #[error("transaction {} is not in the Merkle tree", String::from_utf8_lossy(.0))]
  NotFound(Vec<u8>),

  /// A proof step carries a direction tag other than left or right.
  #[error("invalid proof direction {0:#04x}, should be either left or right")]
  InvalidDirection(u8),

  /// The tree's shape contradicts the descent toward the requested leaf.
  #[error("malformed Merkle tree: {0}")]
  MalformedTree(String),

  #[error("invalid data: {0}")]
  InvalidData(String),

  #[error("unknown hash function: {0}")]
  UnknownHash(String),

  #[error("computed root {} does not match expected root {}", hex::encode(.computed), hex::encode(.expected))]
  RootMismatch { computed: Vec<u8>, expected: Vec<u8> },

  #[error(transparent)]
  Io(#[from] std::io::Error),
}
