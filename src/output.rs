use std::io::{self, Write};

/// Destination for values printed by `PRN`
pub trait OutputSink {
  fn emit(&mut self, value: u8) -> io::Result<()>;
}

/// Any writer is a sink, one decimal value per line
impl<W> OutputSink for W
where
  W: Write,
{
  fn emit(&mut self, value: u8) -> io::Result<()> {
    writeln!(self, "{value}")
  }
}
