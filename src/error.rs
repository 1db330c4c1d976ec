use thiserror::Error;

/// Fatal conditions that halt decoding of a stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
  #[error("unsupported opcode {byte:#04x} at offset {offset}")]
  UnsupportedOpcode { offset: usize, byte: u8 },

  #[error("truncated instruction at offset {offset}: need {needed} bytes, have {available}")]
  TruncatedInstruction {
    offset: usize,
    needed: usize,
    available: usize,
  },

  /// Register-direct operands have no effective address. Reaching this is a
  /// dispatch bug, not bad input.
  #[error("invalid addressing mode at offset {offset}: register-direct operand passed to effective address resolution")]
  InvalidAddressingMode { offset: usize },
}
