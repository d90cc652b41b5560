//! Instruction decoding: a 32-bit word in, a tagged `Decoded` record out.
//!
//! All five auxiliary fields (`ra`, `rb`, `rc`, `ld_a`, `imm`) are
//! extracted unconditionally; the opcode selects which are meaningful.
//! Field extraction goes through `crate::bitpack` so the same
//! overflow-checked geometry rules govern both the decoder and its tests.

use crate::bitpack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    CMov,
    SLoad,
    SStore,
    Add,
    Mul,
    Div,
    Nand,
    Halt,
    Map,
    Unmap,
    Output,
    Input,
    LoadProgram,
    LoadValue,
}

impl Opcode {
    fn from_bits(bits: u32) -> Option<Opcode> {
        Some(match bits {
            0 => Opcode::CMov,
            1 => Opcode::SLoad,
            2 => Opcode::SStore,
            3 => Opcode::Add,
            4 => Opcode::Mul,
            5 => Opcode::Div,
            6 => Opcode::Nand,
            7 => Opcode::Halt,
            8 => Opcode::Map,
            9 => Opcode::Unmap,
            10 => Opcode::Output,
            11 => Opcode::Input,
            12 => Opcode::LoadProgram,
            13 => Opcode::LoadValue,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Decoded {
    pub opcode: Opcode,
    pub ra: u32,
    pub rb: u32,
    pub rc: u32,
    pub ld_a: u32,
    pub imm: u32,
}

/// Decodes `word`. Returns `None` (opcode 14 or 15) for a reserved opcode,
/// leaving the caller to attach the word and IP to a `BadOpcode` error.
pub fn decode(word: u32) -> Option<Decoded> {
    let opcode_bits = bitpack::get_unsigned(word as u64, 4, 28).expect("fixed geometry") as u32;
    let opcode = Opcode::from_bits(opcode_bits)?;

    let (ra, rb, rc, ld_a, imm) = if opcode == Opcode::LoadValue {
        let ld_a = bitpack::get_unsigned(word as u64, 3, 25).expect("fixed geometry") as u32;
        let imm = bitpack::get_unsigned(word as u64, 25, 0).expect("fixed geometry") as u32;
        (0, 0, 0, ld_a, imm)
    } else {
        let ra = bitpack::get_unsigned(word as u64, 3, 6).expect("fixed geometry") as u32;
        let rb = bitpack::get_unsigned(word as u64, 3, 3).expect("fixed geometry") as u32;
        let rc = bitpack::get_unsigned(word as u64, 3, 0).expect("fixed geometry") as u32;
        (ra, rb, rc, 0, 0)
    };

    Some(Decoded { opcode, ra, rb, rc, ld_a, imm })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_three_register_instruction() {
        // ADD (opcode 3), ra=1, rb=2, rc=3 -> 0b0011_...._001_010_011
        let word = (3u32 << 28) | (1 << 6) | (2 << 3) | 3;
        let d = decode(word).unwrap();
        assert_eq!(d.opcode, Opcode::Add);
        assert_eq!((d.ra, d.rb, d.rc), (1, 2, 3));
    }

    #[test]
    fn decodes_load_value_instruction() {
        // LV (opcode 13), ra=1, imm=51
        let word = (13u32 << 28) | (1 << 25) | 51;
        let d = decode(word).unwrap();
        assert_eq!(d.opcode, Opcode::LoadValue);
        assert_eq!(d.ld_a, 1);
        assert_eq!(d.imm, 51);
    }

    #[test]
    fn ignores_dont_care_bits_of_three_register_instructions() {
        let base = (0u32 << 28) | (1 << 6) | (2 << 3) | 3;
        let with_garbage = base | (0x7FF << 9); // bits 27-9 set
        assert_eq!(decode(base).unwrap().rc, decode(with_garbage).unwrap().rc);
    }

    #[test]
    fn reserved_opcodes_decode_to_none() {
        assert!(decode(14u32 << 28).is_none());
        assert!(decode(15u32 << 28).is_none());
    }
}
