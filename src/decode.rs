use std::fmt;

use tracing::{debug, debug_span, trace};

use crate::address;
use crate::error::DecodeError;
use crate::fields::{self, Mode, ModRegRm, Operation, Shape};
use crate::immediate;
use crate::tables;
use crate::window::Window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operands {
  Unary(String),
  Binary { destination: String, source: String },
}

/// One decoded instruction. Rendered and dropped by `disassemble`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
  pub mnemonic: &'static str,
  pub operands: Operands,
  pub len: usize,
}

impl Instruction {
  fn binary(mnemonic: &'static str, destination: String, source: String, len: usize) -> Self {
    Self {
      mnemonic,
      operands: Operands::Binary { destination, source },
      len,
    }
  }
}

impl fmt::Display for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.operands {
      Operands::Unary(destination) => write!(f, "{} {destination}", self.mnemonic),
      Operands::Binary { destination, source } => {
        write!(f, "{} {destination}, {source}", self.mnemonic)
      }
    }
  }
}

/// Decodes a whole object-code image into a NASM listing. Any decode error
/// discards the listing built so far.
pub fn disassemble(instructions: &[u8]) -> Result<String, DecodeError> {
  let _span = debug_span!("disassemble", len = instructions.len()).entered();
  let mut lines = vec!["bits 16".to_string(), "".to_string()];
  let mut ip = 0;
  while ip < instructions.len() {
    let instruction = decode_instruction(instructions, ip)?;
    trace!(ip, len = instruction.len, "{instruction}");
    ip += instruction.len;
    lines.push(instruction.to_string());
  }
  debug!(count = lines.len() - 2, "decoded stream");
  lines.push("".to_string());
  Ok(lines.join("\n"))
}

/// Decodes the single instruction starting at `ip`.
pub fn decode_instruction(stream: &[u8], ip: usize) -> Result<Instruction, DecodeError> {
  let window = Window::new(stream, ip);
  let byte = window.byte(0)?;
  let shape = fields::classify(byte).ok_or(DecodeError::UnsupportedOpcode { offset: ip, byte })?;
  trace!(ip, opcode = fields::opcode(byte), ?shape);
  match shape {
    Shape::RegMemToEither { operation, to_reg, wide } => {
      reg_mem_to_either(&window, operation, to_reg, wide)
    }
    Shape::ImmediateToAccumulator { sub_op, sign_extend, wide } => {
      let imm = immediate::resolve(&window, 1, sign_extend, wide)?;
      let acc = tables::accumulator(wide).to_string();
      Ok(Instruction::binary(tables::arithmetic(sub_op), acc, imm.to_string(), 1 + imm.len))
    }
    Shape::ImmediateToRegMem { operation, sign_extend, wide } => {
      immediate_to_reg_mem(&window, operation, sign_extend, wide)
    }
    Shape::ImmediateToRegister { reg, wide } => {
      let imm = immediate::resolve(&window, 1, false, wide)?;
      let dst = tables::register(reg, wide).to_string();
      Ok(Instruction::binary("mov", dst, imm.to_string(), 1 + imm.len))
    }
    Shape::AccumulatorMemory { to_memory, wide } => {
      let memory = format!("[{}]", window.word(1)?);
      let acc = tables::accumulator(wide).to_string();
      let (dst, src) = if to_memory { (memory, acc) } else { (acc, memory) };
      Ok(Instruction::binary("mov", dst, src, 3))
    }
    Shape::ConditionalJump { selector } => jump(&window, tables::conditional_jump(selector)),
    Shape::Loop { selector } => jump(&window, tables::loop_mnemonic(selector)),
  }
}

fn reg_mem_to_either(
  window: &Window,
  operation: Operation,
  to_reg: bool,
  wide: bool,
) -> Result<Instruction, DecodeError> {
  let modrm = ModRegRm::from(window.byte(1)?);
  let reg = tables::register(modrm.reg, wide).to_string();
  let (rm, disp_len) = reg_or_memory(window, modrm, wide)?;
  let (dst, src) = if to_reg { (reg, rm) } else { (rm, reg) };
  Ok(Instruction::binary(operation.mnemonic(modrm.reg), dst, src, 2 + disp_len))
}

fn immediate_to_reg_mem(
  window: &Window,
  operation: Operation,
  sign_extend: bool,
  wide: bool,
) -> Result<Instruction, DecodeError> {
  let modrm = ModRegRm::from(window.byte(1)?);
  let (dst, disp_len) = reg_or_memory(window, modrm, wide)?;
  let imm = immediate::resolve(window, 2 + disp_len, sign_extend, wide)?;
  let src = match modrm.mode {
    Mode::Register => imm.to_string(),
    _ if wide => format!("word {imm}"),
    _ => format!("byte {imm}"),
  };
  Ok(Instruction::binary(operation.mnemonic(modrm.reg), dst, src, 2 + disp_len + imm.len))
}

/// The `r/m` operand: a register in register-direct mode, otherwise an
/// effective address. Returns the displacement bytes consumed.
fn reg_or_memory(
  window: &Window,
  modrm: ModRegRm,
  wide: bool,
) -> Result<(String, usize), DecodeError> {
  match modrm.mode {
    Mode::Register => Ok((tables::register(modrm.rm, wide).to_string(), 0)),
    mode => {
      let address = address::resolve(window, 2, mode, modrm.rm)?;
      Ok((address.text, address.len))
    }
  }
}

fn jump(window: &Window, mnemonic: &'static str) -> Result<Instruction, DecodeError> {
  let displacement = window.byte(1)? as i8;
  Ok(Instruction {
    mnemonic,
    operands: Operands::Unary(relative_target(displacement)),
    len: 2,
  })
}

/// NASM `$`-relative target. The displacement counts from the end of the
/// 2-byte jump.
fn relative_target(displacement: i8) -> String {
  match displacement {
    0 => "$+0".to_string(),
    d if d < 0 => format!("$+2-{}", d.unsigned_abs()),
    d => format!("$+2+{d}"),
  }
}
