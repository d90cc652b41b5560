//! The fetch-decode-execute loop: threads Segmented Memory, the Register
//! File, and the host's I/O streams together and dispatches on opcode.

use std::io::{Read, Write};

use log::{debug, trace, warn};

use crate::decode::{self, Opcode};
use crate::error::UmError;
use crate::memory::SegmentedMemory;
use crate::registers::RegisterFile;

/// A Universal Machine instance, generic over the input/output streams its
/// IN/OUT instructions talk to. `main.rs` wires this to stdin/stdout;
/// tests wire it to in-memory buffers.
pub struct Um<R: Read, W: Write> {
    memory: SegmentedMemory,
    registers: RegisterFile,
    input: R,
    output: W,
}

impl<R: Read, W: Write> Um<R, W> {
    pub fn new(memory: SegmentedMemory, input: R, output: W) -> Um<R, W> {
        Um { memory, registers: RegisterFile::new(), input, output }
    }

    /// Runs the fetch-decode-execute loop until HALT or a propagated error.
    pub fn run(&mut self) -> Result<(), UmError> {
        loop {
            let ip_before = self.memory.ip();
            let word = self.memory.fetch_next()?;
            let decoded = decode::decode(word).ok_or_else(|| {
                let opcode_bits = (word >> 28) & 0xF;
                warn!("reserved opcode {opcode_bits} at ip={ip_before}");
                UmError::BadOpcode { word, ip: ip_before, opcode: opcode_bits }
            })?;

            trace!("ip={ip_before} word={word:#010x} opcode={:?}", decoded.opcode);

            if self.step(decoded, ip_before)? {
                debug!("halted after executing instruction at ip={ip_before}");
                return Ok(());
            }
        }
    }

    /// Executes one decoded instruction. Returns `Ok(true)` on HALT.
    fn step(&mut self, d: decode::Decoded, ip: u32) -> Result<bool, UmError> {
        match d.opcode {
            Opcode::CMov => {
                if self.registers[d.rc] != 0 {
                    self.registers[d.ra] = self.registers[d.rb];
                }
            }
            Opcode::SLoad => {
                let value = self.memory.read(self.registers[d.rb], self.registers[d.rc])?;
                self.registers[d.ra] = value;
            }
            Opcode::SStore => {
                self.memory.write(self.registers[d.ra], self.registers[d.rb], self.registers[d.rc])?;
            }
            Opcode::Add => {
                self.registers[d.ra] = self.registers[d.rb].wrapping_add(self.registers[d.rc]);
            }
            Opcode::Mul => {
                self.registers[d.ra] = self.registers[d.rb].wrapping_mul(self.registers[d.rc]);
            }
            Opcode::Div => {
                let divisor = self.registers[d.rc];
                if divisor == 0 {
                    return Err(UmError::DivisionByZero { ip });
                }
                self.registers[d.ra] = self.registers[d.rb] / divisor;
            }
            Opcode::Nand => {
                self.registers[d.ra] = !(self.registers[d.rb] & self.registers[d.rc]);
            }
            Opcode::Halt => return Ok(true),
            Opcode::Map => {
                let id = self.memory.map(self.registers[d.rc])?;
                self.registers[d.rb] = id;
            }
            Opcode::Unmap => {
                self.memory.unmap(self.registers[d.rc])?;
            }
            Opcode::Output => {
                let value = self.registers[d.rc];
                if value > 0xFF {
                    return Err(UmError::OutOfByteRange { ip, value });
                }
                self.output
                    .write_all(&[value as u8])
                    .and_then(|_| self.output.flush())
                    .map_err(|source| UmError::Io { ip, source })?;
            }
            Opcode::Input => {
                let mut buf = [0u8; 1];
                match self.input.read(&mut buf) {
                    Ok(0) => self.registers[d.rc] = u32::MAX,
                    Ok(_) => self.registers[d.rc] = buf[0] as u32,
                    Err(source) => return Err(UmError::Io { ip, source }),
                }
            }
            Opcode::LoadProgram => {
                self.memory.load_program(self.registers[d.rb], self.registers[d.rc])?;
            }
            Opcode::LoadValue => {
                self.registers[d.ld_a] = d.imm;
            }
        }
        Ok(false)
    }
}
