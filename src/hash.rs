use std::fmt::Display;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::Error;

/// Fixed-width, deterministic hash primitive applied once per fold step.
pub trait HashFunction {
  /// Identifier the function is selected by.
  fn name(&self) -> &'static str;

  fn hash(&self, data: &[u8]) -> Vec<u8>;
}

impl<H: HashFunction + ?Sized> HashFunction for &H {
  fn name(&self) -> &'static str {
    (**self).name()
  }

  fn hash(&self, data: &[u8]) -> Vec<u8> {
    (**self).hash(data)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
  #[default]
  Sha256,
  Blake3,
}

impl HashAlgorithm {
  pub const ALL: [HashAlgorithm; 2] = [HashAlgorithm::Sha256, HashAlgorithm::Blake3];

  /// Digest width in bytes.
  pub fn output_len(&self) -> usize {
    match self {
      HashAlgorithm::Sha256 => 32,
      HashAlgorithm::Blake3 => blake3::OUT_LEN,
    }
  }
}

impl HashFunction for HashAlgorithm {
  fn name(&self) -> &'static str {
    match self {
      HashAlgorithm::Sha256 => "sha256",
      HashAlgorithm::Blake3 => "blake3",
    }
  }

  fn hash(&self, data: &[u8]) -> Vec<u8> {
    match self {
      HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
      HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
    }
  }
}

impl FromStr for HashAlgorithm {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
      "blake3" => Ok(HashAlgorithm::Blake3),
      _ => Err(Error::UnknownHash(s.to_string())),
    }
  }
}

impl Display for HashAlgorithm {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn select_by_name() {
    for algorithm in HashAlgorithm::ALL {
      assert_eq!(algorithm, algorithm.to_string().parse::<HashAlgorithm>().unwrap());
    }
    assert_eq!(HashAlgorithm::Sha256, "SHA-256".parse().unwrap());
    assert!(matches!("md5".parse::<HashAlgorithm>(), Err(Error::UnknownHash(name)) if name == "md5"));
  }

  #[test]
  fn digests_have_fixed_width() {
    for algorithm in HashAlgorithm::ALL {
      for input in [&b""[..], b"a", &[0xffu8; 1000]] {
        assert_eq!(algorithm.output_len(), algorithm.hash(input).len(), "{algorithm}");
      }
    }
  }

  #[test]
  fn known_digests() {
    assert_eq!(
      "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb",
      hex::encode(HashAlgorithm::Sha256.hash(b"a"))
    );
    assert_eq!(blake3::hash(b"a").as_bytes().to_vec(), HashAlgorithm::Blake3.hash(b"a"));
  }
}
