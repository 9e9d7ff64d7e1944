/// Operations the ALU understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
  Add,
  Multiply,
  Compare,
}

/// What the engine should do with the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// Store into the first operand register
  Value(u8),
  /// Update the equal flag
  Equal(bool),
}

/// Run `op` over two register values, wrapping modulo 256
pub fn alu(op: AluOp, a: u8, b: u8) -> Outcome {
  match op {
    AluOp::Add => Outcome::Value(a.wrapping_add(b)),
    AluOp::Multiply => Outcome::Value(a.wrapping_mul(b)),
    AluOp::Compare => Outcome::Equal(a == b),
  }
}
