//! Effective address resolution for the memory forms of `mod`/`r/m`.

use crate::error::DecodeError;
use crate::fields::Mode;
use crate::tables;
use crate::window::Window;

const DIRECT_ADDRESS: u8 = 0b_110;

/// Rendered effective address and the displacement bytes it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
  pub text: String,
  pub len: usize,
}

/// Resolves the effective address whose displacement (if any) starts `at`
/// bytes into the instruction window.
pub fn resolve(window: &Window, at: usize, mode: Mode, rm: u8) -> Result<Address, DecodeError> {
  let (displacement, len) = match mode {
    Mode::Memory if rm == DIRECT_ADDRESS => {
      let address = window.word(at)?;
      return Ok(Address { text: format!("[{address}]"), len: 2 });
    }
    Mode::Memory => (0, 0),
    Mode::Memory8 => (i16::from(window.byte(at)? as i8), 1),
    Mode::Memory16 => (window.word(at)? as i16, 2),
    Mode::Register => {
      return Err(DecodeError::InvalidAddressingMode { offset: window.start() });
    }
  };
  Ok(Address { text: render(tables::effective_address_base(rm), displacement), len })
}

fn render(base: &str, displacement: i16) -> String {
  match displacement {
    0 => format!("[{base}]"),
    d if d < 0 => format!("[{base} - {}]", d.unsigned_abs()),
    d => format!("[{base} + {d}]"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn text(bytes: &[u8], mode: Mode, rm: u8) -> (String, usize) {
    let address = resolve(&Window::new(bytes, 0), 0, mode, rm).unwrap();
    (address.text, address.len)
  }

  #[test]
  fn test_direct_address() {
    assert_eq!(text(&[0x34, 0x12], Mode::Memory, 0b_110), ("[4660]".to_string(), 2));
    assert_eq!(text(&[0x00, 0x00], Mode::Memory, 0b_110), ("[0]".to_string(), 2));
  }

  #[test]
  fn test_no_displacement() {
    assert_eq!(text(&[], Mode::Memory, 0b_000), ("[bx + si]".to_string(), 0));
    assert_eq!(text(&[], Mode::Memory, 0b_111), ("[bx]".to_string(), 0));
  }

  #[test]
  fn test_signed_displacements() {
    assert_eq!(text(&[0xFB], Mode::Memory8, 0b_000), ("[bx + si - 5]".to_string(), 1));
    assert_eq!(text(&[0x04], Mode::Memory8, 0b_011), ("[bp + di + 4]".to_string(), 1));
    assert_eq!(text(&[0x87, 0x13], Mode::Memory16, 0b_010), ("[bp + si + 4999]".to_string(), 2));
    assert_eq!(text(&[0xDB, 0xFF], Mode::Memory16, 0b_111), ("[bx - 37]".to_string(), 2));
    assert_eq!(text(&[0x00, 0x80], Mode::Memory16, 0b_101), ("[di - 32768]".to_string(), 2));
  }

  #[test]
  fn test_zero_displacement_renders_no_term() {
    assert_eq!(text(&[0x00, 0x00], Mode::Memory16, 0b_100), ("[si]".to_string(), 2));
    // [bp] can only be encoded with an explicit zero displacement
    assert_eq!(text(&[0x00], Mode::Memory8, 0b_110), ("[bp]".to_string(), 1));
  }

  #[test]
  fn test_register_mode_is_rejected() {
    let stream = [0x00, 0x00, 0x00];
    assert_eq!(
      resolve(&Window::new(&stream, 1), 2, Mode::Register, 0b_001),
      Err(DecodeError::InvalidAddressingMode { offset: 1 })
    );
  }

  #[test]
  fn test_missing_displacement_is_truncation() {
    let stream = [0x8B, 0x86, 0x10];
    assert_eq!(
      resolve(&Window::new(&stream, 0), 2, Mode::Memory16, 0b_110),
      Err(DecodeError::TruncatedInstruction { offset: 0, needed: 4, available: 3 })
    );
  }
}
