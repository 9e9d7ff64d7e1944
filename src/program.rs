use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Width of an instruction byte written out in binary
const DIGITS: usize = 8;

/// Supplies the bytes placed into memory, starting at address 0
pub trait ProgramLoader {
  fn instructions(&self) -> &[u8];
}

/// A `Chunk` is a complete program, ready to be loaded into a machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
  instructions: Vec<u8>,
}

impl Chunk {
  /// Parse program source, one binary byte per line.
  ///
  /// Everything from a `#` onwards is a comment, blank lines are skipped,
  /// and only the first eight characters of what remains are significant:
  ///
  /// ```text
  /// # print8
  /// 10000010 # LDI R0,8
  /// 00000000
  /// 00001000
  /// ```
  pub fn parse(source: &str) -> Result<Self> {
    Self::from_reader(source.as_bytes())
  }

  pub fn from_reader<R>(reader: R) -> Result<Self>
  where
    R: BufRead,
  {
    let mut instructions = Vec::new();
    for (index, bytes) in reader.split(b'\n').enumerate() {
      let line = index + 1;
      let mut bytes = bytes?;
      if bytes.last() == Some(&b'\r') {
        bytes.pop();
      }
      let text =
        String::from_utf8(bytes).map_err(|e| Error::MalformedProgramLine {
          line,
          text: String::from_utf8_lossy(e.as_bytes()).trim().to_owned(),
        })?;
      if let Some(byte) = parse_line(line, &text)? {
        instructions.push(byte);
      }
    }
    Ok(Self { instructions })
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file))
  }

  pub fn len(&self) -> usize {
    self.instructions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.instructions.is_empty()
  }
}

impl From<Vec<u8>> for Chunk {
  fn from(instructions: Vec<u8>) -> Self {
    Self { instructions }
  }
}

impl ProgramLoader for Chunk {
  fn instructions(&self) -> &[u8] {
    &self.instructions
  }
}

fn parse_line(line: usize, text: &str) -> Result<Option<u8>> {
  let code = text.split_once('#').map_or(text, |(code, _)| code).trim();
  if code.is_empty() {
    return Ok(None);
  }
  let digits = match code.char_indices().nth(DIGITS) {
    Some((end, _)) => &code[..end],
    None => code,
  };
  u8::from_str_radix(digits, 2)
    .map(Some)
    .map_err(|_| Error::MalformedProgramLine {
      line,
      text: text.trim().to_owned(),
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_bytes() {
    let chunk = Chunk::parse("00000001\n00000010\n00000011\n00000100\n").unwrap();
    assert_eq!(chunk.instructions(), &[1, 2, 3, 4]);
  }

  #[test]
  fn parse_skips_comments_and_blanks() {
    let source = "\
# a whole line comment
10000010 # LDI R0,8

   00000000
00001000#no space
    # indented comment
01000111
";
    let chunk = Chunk::parse(source).unwrap();
    assert_eq!(chunk.instructions(), &[0b1000_0010, 0, 8, 0b0100_0111]);
  }

  #[test]
  fn parse_truncates_to_eight_characters() {
    let chunk = Chunk::parse("0000000111111\n").unwrap();
    assert_eq!(chunk.instructions(), &[1]);
  }

  #[test]
  fn parse_malformed_line() {
    let error = Chunk::parse("00000001\nLDI R0,8\n").unwrap_err();
    match error {
      Error::MalformedProgramLine { line, text } => {
        assert_eq!(line, 2);
        assert_eq!(text, "LDI R0,8");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn parse_empty() {
    let chunk = Chunk::parse("# nothing\n\n").unwrap();
    assert!(chunk.is_empty());
  }

  #[test]
  fn from_reader_matches_parse() {
    let source = "10000010\n00000000 # R0\n00001000\n";
    let chunk = Chunk::from_reader(source.as_bytes()).unwrap();
    assert_eq!(chunk, Chunk::parse(source).unwrap());
    assert_eq!(chunk.len(), 3);
  }

  #[test]
  fn from_reader_invalid_utf8() {
    let source: &[u8] = b"00000001\r\n0000\xFF\xFE\n00000010\n";
    match Chunk::from_reader(source).unwrap_err() {
      Error::MalformedProgramLine { line, text } => {
        assert_eq!(line, 2);
        assert!(text.starts_with("0000"));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn from_reader_crlf() {
    let chunk = Chunk::from_reader(&b"10000010\r\n00000000 # R0\r\n"[..]).unwrap();
    assert_eq!(chunk.instructions(), &[0b1000_0010, 0]);
  }

  #[test]
  fn from_path_missing_file() {
    let error = Chunk::from_path("this/does/not/exist.ls8").unwrap_err();
    assert!(
      matches!(error, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound)
    );
  }
}
