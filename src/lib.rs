//! An emulator for the LS-8, a tiny 8-bit machine with 256 bytes of memory,
//! eight registers and a fixed one-byte instruction format.
//!
//! Programs are handed over as raw bytes (see [`program::ProgramLoader`]),
//! placed at address 0 and run until `HLT`.

pub mod alu;
pub mod decoder;
pub mod error;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod program;
pub mod registers;
pub mod vm;

pub use error::{Error, Result};
