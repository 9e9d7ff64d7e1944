//! Instruction byte layout, MSB to LSB:
//!
//! ```text
//! AABCDDDD
//! ││││└┴┴┴── identity
//! │││└────── sets PC itself
//! ││└─────── ALU operation
//! └┴──────── operand count
//! ```

/// Fields of a decoded instruction byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
  /// The full byte, which is what the dispatch table is keyed by
  pub opcode: u8,
  pub operand_count: u8,
  pub alu: bool,
  pub sets_pc: bool,
  pub identity: u8,
}

impl Instruction {
  /// Decoding never fails, unknown opcodes are rejected at dispatch
  pub const fn decode(byte: u8) -> Self {
    Self {
      opcode: byte,
      operand_count: byte >> 6,
      alu: byte & 0b0010_0000 != 0,
      sets_pc: byte & 0b0001_0000 != 0,
      identity: byte & 0x0F,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decode_ldi() {
    let ldi = Instruction::decode(0b1000_0010);
    assert_eq!(ldi.opcode, 130);
    assert_eq!(ldi.operand_count, 2);
    assert!(!ldi.alu);
    assert!(!ldi.sets_pc);
    assert_eq!(ldi.identity, 0b0010);
  }

  #[test]
  fn decode_call() {
    let call = Instruction::decode(0b0101_0000);
    assert_eq!(call.operand_count, 1);
    assert!(call.sets_pc);
    assert!(!call.alu);
  }

  #[test]
  fn decode_cmp() {
    let cmp = Instruction::decode(0b1010_0111);
    assert_eq!(cmp.operand_count, 2);
    assert!(cmp.alu);
    assert!(!cmp.sets_pc);
    assert_eq!(cmp.identity, 0b0111);
  }

  #[test]
  fn decode_any_byte() {
    for byte in 0..=u8::MAX {
      let instruction = Instruction::decode(byte);
      assert_eq!(instruction.opcode, byte);
      assert!(instruction.operand_count <= 3);
    }
  }
}
