//! Field extraction and opcode classification.
//!
//! The first byte of every supported instruction selects one of a handful of
//! encoding shapes. Bit layouts, high bit first:
//!
//! ```text
//! 100010dw              mov   reg/mem to/from reg
//! 00ooo0dw              arith reg/mem with reg to either
//! 00ooo10w              arith immediate to accumulator
//! 1100011w              mov   immediate to reg/mem
//! 100000sw              arith immediate to reg/mem (op in reg field)
//! 1011wrrr              mov   immediate to register
//! 101000dw              mov   memory to/from accumulator
//! 0111cccc              conditional jump
//! 111000cc              loop / jcxz
//! ```

use crate::tables;

/// Which mnemonic family a reg/mem or immediate shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Mov,
  /// Arithmetic/logic sub-op, taken from opcode bits 5..3.
  Arithmetic(u8),
  /// Arithmetic/logic sub-op carried in the `reg` field of the second byte.
  ArithmeticGroup,
}

impl Operation {
  /// `reg` is only consulted for `ArithmeticGroup`.
  pub fn mnemonic(self, reg: u8) -> &'static str {
    match self {
      Operation::Mov => "mov",
      Operation::Arithmetic(sub_op) => tables::arithmetic(sub_op),
      Operation::ArithmeticGroup => tables::arithmetic(reg),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
  RegMemToEither {
    operation: Operation,
    to_reg: bool,
    wide: bool,
  },
  ImmediateToAccumulator {
    sub_op: u8,
    sign_extend: bool,
    wide: bool,
  },
  ImmediateToRegMem {
    operation: Operation,
    sign_extend: bool,
    wide: bool,
  },
  ImmediateToRegister {
    reg: u8,
    wide: bool,
  },
  AccumulatorMemory {
    to_memory: bool,
    wide: bool,
  },
  ConditionalJump {
    selector: u8,
  },
  Loop {
    selector: u8,
  },
}

/// Primary opcode, the top six bits of the first byte.
pub fn opcode(byte: u8) -> u8 {
  byte >> 2
}

/// Direction (or sign-extend) bit.
pub fn d_bit(byte: u8) -> bool {
  (byte >> 1) & 0b_1 == 1
}

/// Width bit.
pub fn w_bit(byte: u8) -> bool {
  byte & 0b_1 == 1
}

fn sub_op(byte: u8) -> u8 {
  (byte >> 3) & 0b_111
}

/// Classifies the first byte of an instruction. `None` means the opcode is
/// outside the supported subset.
pub fn classify(byte: u8) -> Option<Shape> {
  let (d, w) = (d_bit(byte), w_bit(byte));
  let shape = match byte {
    0b_1000_1000..=0b_1000_1011 => Shape::RegMemToEither {
      operation: Operation::Mov,
      to_reg: d,
      wide: w,
    },
    0b_1100_0110..=0b_1100_0111 => Shape::ImmediateToRegMem {
      operation: Operation::Mov,
      sign_extend: false,
      wide: w,
    },
    0b_1000_0000..=0b_1000_0011 => Shape::ImmediateToRegMem {
      operation: Operation::ArithmeticGroup,
      sign_extend: d,
      wide: w,
    },
    0b_1011_0000..=0b_1011_1111 => Shape::ImmediateToRegister {
      reg: byte & 0b_111,
      wide: (byte >> 3) & 0b_1 == 1,
    },
    0b_1010_0000..=0b_1010_0011 => Shape::AccumulatorMemory { to_memory: d, wide: w },
    0b_0111_0000..=0b_0111_1111 => Shape::ConditionalJump { selector: byte & 0b_1111 },
    0b_1110_0000..=0b_1110_0011 => Shape::Loop { selector: byte & 0b_11 },
    b if b & 0b_1100_0100 == 0 => Shape::RegMemToEither {
      operation: Operation::Arithmetic(sub_op(b)),
      to_reg: d,
      wide: w,
    },
    b if b & 0b_1100_0110 == 0b_0000_0100 => Shape::ImmediateToAccumulator {
      sub_op: sub_op(b),
      sign_extend: d,
      wide: w,
    },
    _ => return None,
  };
  Some(shape)
}

/// The 2-bit `mod` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// `00`: no displacement, except the direct address form.
  Memory,
  /// `01`: 8-bit signed displacement.
  Memory8,
  /// `10`: 16-bit signed displacement.
  Memory16,
  /// `11`: register direct.
  Register,
}

impl Mode {
  pub fn from_bits(bits: u8) -> Self {
    match bits & 0b_11 {
      0b_00 => Mode::Memory,
      0b_01 => Mode::Memory8,
      0b_10 => Mode::Memory16,
      _ => Mode::Register,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRegRm {
  pub mode: Mode,
  pub reg: u8,
  pub rm: u8,
}

impl From<u8> for ModRegRm {
  fn from(byte: u8) -> Self {
    Self {
      mode: Mode::from_bits(byte >> 6),
      reg: (byte >> 3) & 0b_111,
      rm: byte & 0b_111,
    }
  }
}
