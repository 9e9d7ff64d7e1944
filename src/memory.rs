use crate::error::{Error, Result};

/// Number of addressable bytes
pub const MEMORY_SIZE: usize = 256;

/// Flat, zero-initialized byte memory
#[derive(Debug, Clone)]
pub struct Memory {
  bytes: [u8; MEMORY_SIZE],
}

impl Memory {
  pub fn new() -> Self {
    Self {
      bytes: [0; MEMORY_SIZE],
    }
  }

  /// Read the byte stored at `address`
  pub fn read(&self, address: usize) -> Result<u8> {
    self
      .bytes
      .get(address)
      .copied()
      .ok_or_else(|| out_of_bounds(address))
  }

  /// Store `value` at `address`
  pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
    let slot = self
      .bytes
      .get_mut(address)
      .ok_or_else(|| out_of_bounds(address))?;
    *slot = value;
    Ok(())
  }

  /// Like [`Memory::read`], but without an error for diagnostics
  pub fn peek(&self, address: usize) -> Option<u8> {
    self.bytes.get(address).copied()
  }
}

impl Default for Memory {
  fn default() -> Self {
    Self::new()
  }
}

fn out_of_bounds(address: usize) -> Error {
  Error::OutOfBounds {
    address: address as isize,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_is_zeroed() {
    let memory = Memory::new();
    for address in 0..MEMORY_SIZE {
      assert_eq!(memory.read(address).unwrap(), 0);
    }
  }

  #[test]
  fn write_then_read() {
    let mut memory = Memory::new();
    memory.write(0, 1).unwrap();
    memory.write(255, 0xAB).unwrap();
    assert_eq!(memory.read(0).unwrap(), 1);
    assert_eq!(memory.read(255).unwrap(), 0xAB);
    assert_eq!(memory.read(1).unwrap(), 0);
  }

  #[test]
  fn read_past_end() {
    let memory = Memory::new();
    assert!(matches!(
      memory.read(256),
      Err(Error::OutOfBounds { address: 256 })
    ));
    assert_eq!(memory.peek(256), None);
  }

  #[test]
  fn write_past_end() {
    let mut memory = Memory::new();
    assert!(matches!(
      memory.write(256, 7),
      Err(Error::OutOfBounds { address: 256 })
    ));
  }
}
