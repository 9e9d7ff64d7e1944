use crate::decoder::Instruction;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
  /// | Operation | Semantics/RTL      | Assembly |
  /// |-----------|--------------------|----------|
  /// | Halt      | `(stop execution)` | `HLT`    |
  Halt = 0b0000_0001,

  /// | Operation      | Semantics/RTL | Assembly      |
  /// |----------------|---------------|---------------|
  /// | Load Immediate | `r[a] ← v`    | `LDI ra, v`   |
  LoadImmediate = 0b1000_0010,

  /// Writes the register in decimal, followed by a newline.
  ///
  /// | Operation | Semantics/RTL   | Assembly |
  /// |-----------|-----------------|----------|
  /// | Print     | `out ← r[a]`    | `PRN ra` |
  Print = 0b0100_0111,

  /// | Operation | Semantics/RTL                | Assembly  |
  /// |-----------|------------------------------|-----------|
  /// | Push      | `sp ← sp − 1; m[sp] ← r[a]`  | `PUSH ra` |
  Push = 0b0100_0101,

  /// | Operation | Semantics/RTL                | Assembly |
  /// |-----------|------------------------------|----------|
  /// | Pop       | `r[a] ← m[sp]; sp ← sp + 1`  | `POP ra` |
  Pop = 0b0100_0110,

  /// Pushes the address of the following instruction, then jumps.
  ///
  /// | Operation | Semantics/RTL                              | Assembly  |
  /// |-----------|--------------------------------------------|-----------|
  /// | Call      | `sp ← sp − 1; m[sp] ← pc + 2; pc ← r[a]`   | `CALL ra` |
  Call = 0b0101_0000,

  /// | Operation | Semantics/RTL               | Assembly |
  /// |-----------|-----------------------------|----------|
  /// | Return    | `pc ← m[sp]; sp ← sp + 1`   | `RET`    |
  Return = 0b0001_0001,

  /// | Operation | Semantics/RTL | Assembly |
  /// |-----------|---------------|----------|
  /// | Jump      | `pc ← r[a]`   | `JMP ra` |
  Jump = 0b0101_0100,

  /// | Operation   | Semantics/RTL                  | Assembly |
  /// |-------------|--------------------------------|----------|
  /// | Jump Equal  | `if fl.e == 1 : pc ← r[a]`     | `JEQ ra` |
  JumpIfEqual = 0b0101_0101,

  /// | Operation      | Semantics/RTL                  | Assembly |
  /// |----------------|--------------------------------|----------|
  /// | Jump Not Equal | `if fl.e == 0 : pc ← r[a]`     | `JNE ra` |
  JumpIfNotEqual = 0b0101_0110,

  /// | Operation | Semantics/RTL                   | Assembly     |
  /// |-----------|---------------------------------|--------------|
  /// | Add       | `r[a] ← (r[a] + r[b]) mod 256`  | `ADD ra, rb` |
  Add = 0b1010_0000,

  /// | Operation | Semantics/RTL                   | Assembly     |
  /// |-----------|---------------------------------|--------------|
  /// | Multiply  | `r[a] ← (r[a] × r[b]) mod 256`  | `MUL ra, rb` |
  Multiply = 0b1010_0010,

  /// | Operation | Semantics/RTL              | Assembly     |
  /// |-----------|----------------------------|--------------|
  /// | Compare   | `fl.e ← r[a] == r[b]`      | `CMP ra, rb` |
  Compare = 0b1010_0111,
}

impl Opcode {
  pub const ALL: [Opcode; 13] = [
    Self::Halt,
    Self::LoadImmediate,
    Self::Print,
    Self::Push,
    Self::Pop,
    Self::Call,
    Self::Return,
    Self::Jump,
    Self::JumpIfEqual,
    Self::JumpIfNotEqual,
    Self::Add,
    Self::Multiply,
    Self::Compare,
  ];

  pub const fn mnemonic(self) -> &'static str {
    match self {
      Self::Halt => "HLT",
      Self::LoadImmediate => "LDI",
      Self::Print => "PRN",
      Self::Push => "PUSH",
      Self::Pop => "POP",
      Self::Call => "CALL",
      Self::Return => "RET",
      Self::Jump => "JMP",
      Self::JumpIfEqual => "JEQ",
      Self::JumpIfNotEqual => "JNE",
      Self::Add => "ADD",
      Self::Multiply => "MUL",
      Self::Compare => "CMP",
    }
  }
}

/// A single dispatch table slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
  pub opcode: Opcode,
  pub operands: u8,
  /// When set, the handler may move the PC and the generic advance is
  /// skipped if it does
  pub sets_pc: bool,
}

impl Entry {
  fn new(opcode: Opcode) -> Self {
    let decoded = Instruction::decode(opcode as u8);
    Self {
      opcode,
      operands: decoded.operand_count,
      sets_pc: decoded.sets_pc,
    }
  }

  pub const fn width(&self) -> usize {
    self.operands as usize + 1
  }
}

/// Table from opcode byte to operation, built once per machine
#[derive(Debug, Clone)]
pub struct DispatchTable {
  entries: [Option<Entry>; 256],
}

impl DispatchTable {
  pub fn new() -> Self {
    let mut entries = [None; 256];
    for opcode in Opcode::ALL {
      entries[opcode as usize] = Some(Entry::new(opcode));
    }
    Self { entries }
  }

  pub fn lookup(&self, byte: u8) -> Option<Entry> {
    self.entries[byte as usize]
  }
}

impl Default for DispatchTable {
  fn default() -> Self {
    Self::new()
  }
}
