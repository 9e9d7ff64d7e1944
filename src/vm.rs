use tracing::{debug, trace};

use crate::alu::{alu, AluOp, Outcome};
use crate::decoder::Instruction;
use crate::error::{Error, Result};
use crate::memory::{Memory, MEMORY_SIZE};
use crate::opcode::{DispatchTable, Opcode};
use crate::output::OutputSink;
use crate::program::ProgramLoader;
use crate::registers::{Flag, RegisterFile, STACK_START};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Running,
  Halted,
}

/// A virtual machine for the LS-8.
///
/// PC and SP are plain indices into memory owned by the machine itself, not
/// registers. The stack grows down from [`STACK_START`].
#[derive(Debug)]
pub struct Vm {
  pc: usize,
  sp: usize,
  memory: Memory,
  registers: RegisterFile,
  table: DispatchTable,
  state: State,
}

impl Vm {
  /// Create a new, empty virtual machine
  pub fn new() -> Self {
    Self {
      pc: 0,
      sp: STACK_START as usize,
      memory: Memory::new(),
      registers: RegisterFile::new(),
      table: DispatchTable::new(),
      state: State::Running,
    }
  }

  /// Copy a program into memory, starting at address 0
  pub fn load<P>(&mut self, program: &P) -> Result<()>
  where
    P: ProgramLoader,
  {
    let instructions = program.instructions();
    if instructions.len() > MEMORY_SIZE {
      return Err(Error::OutOfBounds {
        address: MEMORY_SIZE as isize,
      });
    }
    for (address, byte) in instructions.iter().enumerate() {
      self.memory.write(address, *byte)?;
    }
    debug!(bytes = instructions.len(), "program loaded");
    Ok(())
  }

  /// Execute a single instruction.
  ///
  /// Any error halts the machine, leaving PC, SP and registers as they were
  /// when the failing instruction was fetched.
  pub fn step<O>(&mut self, out: &mut O) -> Result<()>
  where
    O: OutputSink,
  {
    if self.state == State::Halted {
      return Err(Error::MachineHalted);
    }
    trace!("{}", self.trace_line());
    let result = Task::new(self, out).run();
    if result.is_err() {
      self.state = State::Halted;
    }
    result
  }

  /// Step until the machine halts, or fails
  pub fn run<O>(&mut self, out: &mut O) -> Result<()>
  where
    O: OutputSink,
  {
    while self.state == State::Running {
      self.step(out)?;
    }
    Ok(())
  }

  /// Machine state as `TRACE: pc | m[pc] m[pc+1] m[pc+2] | r0 .. r7`
  pub fn trace_line(&self) -> String {
    let peek = |offset| self.memory.peek(self.pc + offset).unwrap_or(0);
    let mut line = format!(
      "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
      self.pc,
      peek(0),
      peek(1),
      peek(2)
    );
    for register in self.registers.iter() {
      line.push_str(&format!(" {register:02X}"));
    }
    line
  }

  pub fn pc(&self) -> usize {
    self.pc
  }

  pub fn sp(&self) -> usize {
    self.sp
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn registers(&self) -> &RegisterFile {
    &self.registers
  }
}

impl Default for Vm {
  fn default() -> Self {
    Self::new()
  }
}

/// The new PC, for handlers that moved it
type Jump = Option<usize>;

struct Task<'vm, 'out, O> {
  vm: &'vm mut Vm,
  out: &'out mut O,
}

impl<'vm, 'out, O> Task<'vm, 'out, O>
where
  O: OutputSink,
{
  fn new(vm: &'vm mut Vm, out: &'out mut O) -> Self {
    Self { vm, out }
  }

  /// The `n`th byte following the opcode
  #[inline]
  fn operand(&self, n: usize) -> Result<u8> {
    self.vm.memory.read(self.vm.pc + 1 + n)
  }

  /// The register named by the `n`th operand
  #[inline]
  fn register(&self, n: usize) -> Result<u8> {
    let index = self.operand(n)?;
    self.vm.registers.get(index)
  }

  fn push(&mut self, value: u8) -> Result<()> {
    let sp = self
      .vm
      .sp
      .checked_sub(1)
      .ok_or(Error::OutOfBounds { address: -1 })?;
    self.vm.memory.write(sp, value)?;
    self.vm.sp = sp;
    Ok(())
  }

  fn pop(&mut self) -> Result<u8> {
    let value = self.vm.memory.read(self.vm.sp)?;
    self.vm.sp += 1;
    Ok(value)
  }

  fn run(&mut self) -> Result<()> {
    let pc = self.vm.pc;
    let instruction = Instruction::decode(self.vm.memory.read(pc)?);
    let entry = self
      .vm
      .table
      .lookup(instruction.opcode)
      .ok_or(Error::UnsupportedOpcode {
        opcode: instruction.opcode,
        pc,
      })?;
    trace!(pc, opcode = entry.opcode.mnemonic(), "dispatch");
    let target = match entry.opcode {
      Opcode::Halt => halt(self),
      Opcode::LoadImmediate => load_immediate(self)?,
      Opcode::Print => print(self)?,
      Opcode::Push => push(self)?,
      Opcode::Pop => pop(self)?,
      Opcode::Call => call(self)?,
      Opcode::Return => ret(self)?,
      Opcode::Jump => jump(self)?,
      Opcode::JumpIfEqual => jump_if(self, true)?,
      Opcode::JumpIfNotEqual => jump_if(self, false)?,
      Opcode::Add => arithmetic(self, AluOp::Add)?,
      Opcode::Multiply => arithmetic(self, AluOp::Multiply)?,
      Opcode::Compare => arithmetic(self, AluOp::Compare)?,
    };
    self.vm.pc = match target {
      Some(target) if entry.sets_pc => target,
      _ => pc + entry.width(),
    };
    Ok(())
  }
}

// (stop execution)
fn halt<O>(task: &mut Task<'_, '_, O>) -> Jump
where
  O: OutputSink,
{
  debug!(pc = task.vm.pc, "HLT command encountered");
  task.vm.state = State::Halted;
  None
}

// r[a] ← v
fn load_immediate<O>(task: &mut Task<'_, '_, O>) -> Result<Jump>
where
  O: OutputSink,
{
  let a = task.operand(0)?;
  let value = task.operand(1)?;
  task.vm.registers.set(a, value)?;
  Ok(None)
}

// out ← r[a]
fn print<O>(task: &mut Task<'_, '_, O>) -> Result<Jump>
where
  O: OutputSink,
{
  let value = task.register(0)?;
  task.out.emit(value).map_err(Error::Output)?;
  Ok(None)
}

// sp ← sp − 1; m[sp] ← r[a]
fn push<O>(task: &mut Task<'_, '_, O>) -> Result<Jump>
where
  O: OutputSink,
{
  let value = task.register(0)?;
  task.push(value)?;
  Ok(None)
}

// r[a] ← m[sp]; sp ← sp + 1
fn pop<O>(task: &mut Task<'_, '_, O>) -> Result<Jump>
where
  O: OutputSink,
{
  let a = task.operand(0)?;
  task.vm.registers.get(a)?;
  let value = task.pop()?;
  task.vm.registers.set(a, value)?;
  Ok(None)
}

// sp ← sp − 1; m[sp] ← pc + 2; pc ← r[a]
fn call<O>(task: &mut Task<'_, '_, O>) -> Result<Jump>
where
  O: OutputSink,
{
  let target = task.register(0)?;
  let next = task.vm.pc + 2;
  let next = u8::try_from(next).map_err(|_| Error::OutOfBounds {
    address: next as isize,
  })?;
  task.push(next)?;
  Ok(Some(target as usize))
}

// pc ← m[sp]; sp ← sp + 1
fn ret<O>(task: &mut Task<'_, '_, O>) -> Result<Jump>
where
  O: OutputSink,
{
  let target = task.pop()?;
  Ok(Some(target as usize))
}

// pc ← r[a]
fn jump<O>(task: &mut Task<'_, '_, O>) -> Result<Jump>
where
  O: OutputSink,
{
  let target = task.register(0)?;
  Ok(Some(target as usize))
}

// if fl.e == equal : pc ← r[a]
fn jump_if<O>(task: &mut Task<'_, '_, O>, equal: bool) -> Result<Jump>
where
  O: OutputSink,
{
  let target = task.register(0)?;
  if task.vm.registers.get_flag(Flag::Equal) == equal {
    Ok(Some(target as usize))
  } else {
    Ok(None)
  }
}

// r[a] ← r[a] op r[b], or fl.e ← r[a] == r[b]
fn arithmetic<O>(task: &mut Task<'_, '_, O>, op: AluOp) -> Result<Jump>
where
  O: OutputSink,
{
  let a = task.operand(0)?;
  let lhs = task.vm.registers.get(a)?;
  let rhs = task.register(1)?;
  match alu(op, lhs, rhs) {
    Outcome::Value(value) => task.vm.registers.set(a, value)?,
    Outcome::Equal(equal) => task.vm.registers.set_flag(Flag::Equal, equal),
  }
  Ok(None)
}
