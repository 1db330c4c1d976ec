use crate::error::DecodeError;

/// Read-only view of the stream beginning at an instruction boundary.
/// Every read is bounds checked and fails with `TruncatedInstruction`.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
  stream: &'a [u8],
  start: usize,
}

impl<'a> Window<'a> {
  pub fn new(stream: &'a [u8], start: usize) -> Self {
    Self { stream, start }
  }

  /// Offset of the instruction in the whole stream.
  pub fn start(&self) -> usize {
    self.start
  }

  pub fn available(&self) -> usize {
    self.stream.len().saturating_sub(self.start)
  }

  pub fn byte(&self, at: usize) -> Result<u8, DecodeError> {
    self
      .stream
      .get(self.start + at)
      .copied()
      .ok_or_else(|| self.truncated(at + 1))
  }

  /// Little-endian: low byte at `at`, high byte at `at + 1`.
  pub fn word(&self, at: usize) -> Result<u16, DecodeError> {
    if self.available() < at + 2 {
      return Err(self.truncated(at + 2));
    }
    let lo = self.byte(at)?;
    let hi = self.byte(at + 1)?;
    Ok(u16::from_le_bytes([lo, hi]))
  }

  fn truncated(&self, needed: usize) -> DecodeError {
    DecodeError::TruncatedInstruction {
      offset: self.start,
      needed,
      available: self.available(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_reads_relative_to_instruction_start() {
    let stream = [0x90, 0x34, 0x12];
    let window = Window::new(&stream, 1);
    assert_eq!(window.byte(0), Ok(0x34));
    assert_eq!(window.word(0), Ok(0x1234));
    assert_eq!(window.available(), 2);
  }

  #[test]
  fn test_reading_past_the_end_is_truncation() {
    let stream = [0x89, 0xD9, 0x01];
    let window = Window::new(&stream, 2);
    assert_eq!(
      window.byte(1),
      Err(DecodeError::TruncatedInstruction { offset: 2, needed: 2, available: 1 })
    );
    assert_eq!(
      window.word(0),
      Err(DecodeError::TruncatedInstruction { offset: 2, needed: 2, available: 1 })
    );
  }
}
