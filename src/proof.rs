use std::fmt::Display;
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{Error, Result};

pub mod builder;
pub mod verifier;

/// Upper bound on the number of steps accepted from an encoded proof.
pub const MAX_STEPS: usize = u8::MAX as usize;

/// Upper bound on a single step value accepted from an encoded proof.
pub const MAX_VALUE_SIZE: usize = 1024 * 1024;

/// Side of the working hash a sibling value is concatenated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
  Left,
  Right,
}

impl Direction {
  /// Wire tag of this direction.
  pub fn tag(&self) -> u8 {
    match self {
      Direction::Left => b'l',
      Direction::Right => b'r',
    }
  }
}

impl TryFrom<u8> for Direction {
  type Error = Error;

  fn try_from(tag: u8) -> Result<Self> {
    match tag {
      b'l' => Ok(Direction::Left),
      b'r' => Ok(Direction::Right),
      _ => Err(Error::InvalidDirection(tag)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
  pub direction: Direction,
  /// Sibling hash, or the raw sibling leaf at the bottom level.
  pub value: Vec<u8>,
}

impl ProofStep {
  pub fn new(direction: Direction, value: Vec<u8>) -> Self {
    ProofStep { direction, value }
  }

  pub fn left(value: Vec<u8>) -> Self {
    Self::new(Direction::Left, value)
  }

  pub fn right(value: Vec<u8>) -> Self {
    Self::new(Direction::Right, value)
  }
}

/// Sibling path of a leaf, ordered from the root's child level down to the leaf's own sibling.
///
/// Verification consumes it in reverse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proof {
  steps: Vec<ProofStep>,
}

impl Proof {
  pub fn steps(&self) -> &[ProofStep] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, ProofStep> {
    self.steps.iter()
  }

  pub fn into_steps(self) -> Vec<ProofStep> {
    self.steps
  }

  /// Serialize as: step count (u32), then per step the direction tag (u8), value length (u32) and value.
  ///
  /// Proofs that [`Proof::read`] would refuse are rejected before anything is written.
  pub fn write<W: Write>(&self, w: &mut W) -> Result<usize> {
    let count = encoded_len(self.steps.len(), MAX_STEPS, "steps")?;
    for step in self.steps.iter() {
      encoded_len(step.value.len(), MAX_VALUE_SIZE, "bytes in a proof step")?;
    }

    w.write_u32::<LittleEndian>(count)?;
    let mut len = 4;
    for step in self.steps.iter() {
      w.write_u8(step.direction.tag())?;
      w.write_u32::<LittleEndian>(encoded_len(step.value.len(), MAX_VALUE_SIZE, "bytes in a proof step")?)?;
      w.write_all(&step.value)?;
      len += 1 + 4 + step.value.len();
    }
    Ok(len)
  }

  pub fn read<R: Read>(r: &mut R) -> Result<Self> {
    let count = r.read_u32::<LittleEndian>()? as usize;
    if count > MAX_STEPS {
      return Err(Error::InvalidData(format!("proof has {count} steps, at most {MAX_STEPS} allowed")));
    }
    let mut steps = Vec::with_capacity(count);
    for _ in 0..count {
      let direction = Direction::try_from(r.read_u8()?)?;
      let len = r.read_u32::<LittleEndian>()? as usize;
      if len > MAX_VALUE_SIZE {
        return Err(Error::InvalidData(format!("proof step of {len} bytes, at most {MAX_VALUE_SIZE} allowed")));
      }
      let mut value = vec![0u8; len];
      r.read_exact(&mut value)?;
      steps.push(ProofStep { direction, value });
    }
    Ok(Proof { steps })
  }

  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    self.write(&mut buffer)?;
    Ok(buffer)
  }

  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    let mut cursor = bytes;
    let proof = Self::read(&mut cursor)?;
    if !cursor.is_empty() {
      return Err(Error::InvalidData(format!("{} trailing bytes after proof", cursor.len())));
    }
    Ok(proof)
  }
}

fn encoded_len(len: usize, max: usize, what: &str) -> Result<u32> {
  match u32::try_from(len) {
    Ok(n) if len <= max => Ok(n),
    _ => Err(Error::InvalidData(format!("proof has {len} {what}, at most {max} allowed"))),
  }
}

impl From<Vec<ProofStep>> for Proof {
  fn from(steps: Vec<ProofStep>) -> Self {
    Proof { steps }
  }
}

impl FromIterator<ProofStep> for Proof {
  fn from_iter<I: IntoIterator<Item = ProofStep>>(iter: I) -> Self {
    Proof { steps: iter.into_iter().collect() }
  }
}

impl IntoIterator for Proof {
  type Item = ProofStep;
  type IntoIter = std::vec::IntoIter<ProofStep>;

  fn into_iter(self) -> Self::IntoIter {
    self.steps.into_iter()
  }
}

impl<'a> IntoIterator for &'a Proof {
  type Item = &'a ProofStep;
  type IntoIter = std::slice::Iter<'a, ProofStep>;

  fn into_iter(self) -> Self::IntoIter {
    self.steps.iter()
  }
}

impl Display for Proof {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (i, step) in self.steps.iter().enumerate() {
      if i > 0 {
        f.write_str(" ")?;
      }
      write!(f, "{}:{}", step.direction.tag() as char, hex::encode(&step.value))?;
    }
    Ok(())
  }
}
