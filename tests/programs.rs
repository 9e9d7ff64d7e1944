use std::path::PathBuf;

use emulator::program::{Chunk, ProgramLoader};
use emulator::vm::{State, Vm};

fn program(name: &str) -> Chunk {
  let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("programs")
    .join(name);
  Chunk::from_path(path).unwrap()
}

fn run(name: &str) -> (Vm, String) {
  let mut vm = Vm::new();
  vm.load(&program(name)).unwrap();
  let mut out = Vec::new();
  vm.run(&mut out).unwrap();
  (vm, String::from_utf8(out).unwrap())
}

#[test]
fn load() {
  let chunk = program("load.ls8");
  assert_eq!(chunk.instructions(), &[1, 2, 3, 4]);

  let mut vm = Vm::new();
  vm.load(&chunk).unwrap();
  for (address, expected) in [1, 2, 3, 4].into_iter().enumerate() {
    assert_eq!(vm.memory().read(address).unwrap(), expected);
  }
}

#[test]
fn print8() {
  let (vm, out) = run("print8.ls8");
  assert_eq!(out, "8\n");
  assert_eq!(vm.state(), State::Halted);
}

#[test]
fn mult() {
  let (_, out) = run("mult.ls8");
  assert_eq!(out, "72\n");
}

#[test]
fn stack() {
  let (vm, out) = run("stack.ls8");
  assert_eq!(out, "2\n1\n");
  assert_eq!(vm.sp(), 0xF4);
}

#[test]
fn call() {
  let (vm, out) = run("call.ls8");
  assert_eq!(out, "6\n12\n");
  assert_eq!(vm.sp(), 0xF4);
  assert_eq!(vm.pc(), 15);
}

#[test]
fn cmp() {
  let (vm, out) = run("cmp.ls8");
  assert_eq!(out, "1\n2\n3\n");
  assert_eq!(vm.registers().get(0).unwrap(), 3);
}
