const BYTE_REGISTERS: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];
const WORD_REGISTERS: [&str; 8] = ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"];

/// Base/index text for each `r/m` code in a memory addressing mode.
/// `r/m == 110` with `mod == 00` is the direct address case and never
/// reaches this table.
const EFFECTIVE_ADDRESS_BASES: [&str; 8] = [
  "bx + si", "bx + di", "bp + si", "bp + di", "si", "di", "bp", "bx",
];

const ARITHMETIC: [&str; 8] = ["add", "or", "adc", "sbb", "and", "sub", "xor", "cmp"];

const CONDITIONAL_JUMPS: [&str; 16] = [
  "jo", "jno", "jb", "jnb", "je", "jne", "jbe", "ja", "js", "jns", "jp", "jnp", "jl", "jnl",
  "jle", "jg",
];

const LOOPS: [&str; 4] = ["loopnz", "loopz", "loop", "jcxz"];

pub fn register(reg: u8, wide: bool) -> &'static str {
  let table = if wide { &WORD_REGISTERS } else { &BYTE_REGISTERS };
  table[usize::from(reg & 0b_111)]
}

pub fn accumulator(wide: bool) -> &'static str {
  register(0b_000, wide)
}

pub fn effective_address_base(rm: u8) -> &'static str {
  EFFECTIVE_ADDRESS_BASES[usize::from(rm & 0b_111)]
}

pub fn arithmetic(sub_op: u8) -> &'static str {
  ARITHMETIC[usize::from(sub_op & 0b_111)]
}

pub fn conditional_jump(selector: u8) -> &'static str {
  CONDITIONAL_JUMPS[usize::from(selector & 0b_1111)]
}

pub fn loop_mnemonic(selector: u8) -> &'static str {
  LOOPS[usize::from(selector & 0b_11)]
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use proptest::prelude::*;

  #[test]
  fn test_register_names() {
    assert_eq!(register(0b_000, false), "al");
    assert_eq!(register(0b_101, false), "ch");
    assert_eq!(register(0b_011, true), "bx");
    assert_eq!(register(0b_111, true), "di");
    assert_eq!(accumulator(false), "al");
    assert_eq!(accumulator(true), "ax");
  }

  #[test]
  fn test_mnemonic_tables() {
    assert_eq!(arithmetic(0b_000), "add");
    assert_eq!(arithmetic(0b_101), "sub");
    assert_eq!(arithmetic(0b_111), "cmp");
    assert_eq!(conditional_jump(0x4), "je");
    assert_eq!(conditional_jump(0xD), "jnl");
    assert_eq!(loop_mnemonic(0b_10), "loop");
    assert_eq!(loop_mnemonic(0b_11), "jcxz");
    assert_eq!(effective_address_base(0b_000), "bx + si");
    assert_eq!(effective_address_base(0b_110), "bp");
  }

  proptest! {
    #[test]
    fn register_lookup_is_total_and_stable(reg in 0u8..8, wide in any::<bool>()) {
      let name = register(reg, wide);
      prop_assert_eq!(name.len(), 2);
      prop_assert_eq!(name, register(reg, wide));
    }
  }
}
