use crate::error::{Error, Result};

/// Number of general-purpose registers
pub const REGISTER_COUNT: usize = 8;

/// Register conventionally seeded with the top of the stack
pub const STACK_REGISTER: u8 = 7;

/// Address the stack starts growing down from
pub const STACK_START: u8 = 0xF4;

/// Condition flags held in the `FL` register
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
  /// Set by `CMP` when both operands are equal
  Equal = 0b0000_0001,
}

/// General-purpose registers plus the flags register
#[derive(Debug, Clone)]
pub struct RegisterFile {
  registers: [u8; REGISTER_COUNT],
  flags: u8,
}

impl RegisterFile {
  /// All registers zeroed, except the stack register
  pub fn new() -> Self {
    let mut registers = [0; REGISTER_COUNT];
    registers[STACK_REGISTER as usize] = STACK_START;
    Self {
      registers,
      flags: 0,
    }
  }

  pub fn get(&self, index: u8) -> Result<u8> {
    self
      .registers
      .get(index as usize)
      .copied()
      .ok_or(Error::InvalidRegister { index })
  }

  /// Values are bytes, so anything stored is already reduced modulo 256
  pub fn set(&mut self, index: u8, value: u8) -> Result<()> {
    let register = self
      .registers
      .get_mut(index as usize)
      .ok_or(Error::InvalidRegister { index })?;
    *register = value;
    Ok(())
  }

  pub fn get_flag(&self, flag: Flag) -> bool {
    self.flags & flag as u8 != 0
  }

  pub fn set_flag(&mut self, flag: Flag, value: bool) {
    if value {
      self.flags |= flag as u8;
    } else {
      self.flags &= !(flag as u8);
    }
  }

  /// Raw contents of the `FL` register
  pub fn flags(&self) -> u8 {
    self.flags
  }

  pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
    self.registers.iter().copied()
  }
}

impl Default for RegisterFile {
  fn default() -> Self {
    Self::new()
  }
}
