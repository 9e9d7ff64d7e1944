use std::io;

/// Result type used throughout the emulator
pub type Result<T> = std::result::Result<T, Error>;

/// An error that occurred while loading or executing a program
///
/// Every variant is fatal: the machine halts and the error is handed back to
/// the caller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("address {address} is outside of memory")]
  OutOfBounds { address: isize },

  #[error("unsupported opcode {opcode:#04x} ({opcode:#010b}) at {pc:#04x}")]
  UnsupportedOpcode { opcode: u8, pc: usize },

  #[error("register index {index} does not exist")]
  InvalidRegister { index: u8 },

  #[error("line {line}: `{text}` is not a binary instruction byte")]
  MalformedProgramLine { line: usize, text: String },

  #[error("machine is halted")]
  MachineHalted,

  #[error("failed to read program: {0}")]
  Io(#[from] io::Error),

  #[error("failed to write output: {0}")]
  Output(#[source] io::Error),
}
