use std::fmt;

use crate::error::DecodeError;
use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Immediate {
  pub value: i16,
  pub len: usize,
}

impl fmt::Display for Immediate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.value)
  }
}

/// Reads immediate data starting `at` bytes into the instruction window.
///
/// A byte-wide immediate is printed as the raw unsigned byte; only word-wide
/// immediates with the sign-extend flag set widen a single signed byte.
pub fn resolve(
  window: &Window,
  at: usize,
  sign_extend: bool,
  wide: bool,
) -> Result<Immediate, DecodeError> {
  let immediate = match (wide, sign_extend) {
    (false, _) => Immediate { value: i16::from(window.byte(at)?), len: 1 },
    (true, true) => Immediate { value: i16::from(window.byte(at)? as i8), len: 1 },
    (true, false) => Immediate { value: window.word(at)? as i16, len: 2 },
  };
  Ok(immediate)
}
