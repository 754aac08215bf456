mod alu;
mod control;
mod ld;
mod stack;
mod system;

use super::{Cpu, UndocumentedOpcodes};
use crate::opcodes::{self, Opcode};

/// How the tick loop should continue after an instruction executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Step {
    /// Fall through: advance PC past the instruction.
    Next,
    /// Control transferred: PC becomes the target as-is.
    Jump(u16),
    /// Stop: PC stays on this instruction and no cycles are charged.
    Halt,
}

impl Cpu {
    /// Execute one fetched instruction and report how PC should move.
    pub(super) fn execute(&mut self, opcode: Opcode) -> Step {
        let code = match opcodes::undocumented_alias(opcode.code) {
            None => opcode.code,
            Some(alias) => match self.undocumented {
                UndocumentedOpcodes::Emulate => alias,
                UndocumentedOpcodes::Fault => return self.decode_failure(opcode),
            },
        };

        match code {
            0x00 => Step::Next,

            // LXI rp, d16
            0x01 | 0x11 | 0x21 | 0x31 => self.exec_lxi(code, opcode.word()),

            // STAX / LDAX (BC, DE)
            0x02 | 0x12 => self.exec_stax(code),
            0x0A | 0x1A => self.exec_ldax(code),

            // SHLD / LHLD / STA / LDA
            0x22 | 0x2A | 0x32 | 0x3A => self.exec_direct(code, opcode.word()),

            // INX / DCX rp
            0x03 | 0x13 | 0x23 | 0x33 => self.exec_inx(code),
            0x0B | 0x1B | 0x2B | 0x3B => self.exec_dcx(code),

            // DAD rp
            0x09 | 0x19 | 0x29 | 0x39 => self.exec_dad(code),

            // INR / DCR r (and M)
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => self.exec_inr(code),
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => self.exec_dcr(code),

            // MVI r, d8 (and MVI M)
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                self.exec_mvi(code, opcode.byte())
            }

            // RLC / RRC / RAL / RAR
            0x07 | 0x0F | 0x17 | 0x1F => self.exec_rotate(code),

            // DAA / CMA / STC / CMC
            0x27 | 0x2F | 0x37 | 0x3F => self.exec_accumulator_misc(code),

            // HLT sits in the middle of the MOV block.
            0x76 => self.exec_hlt(),
            0x40..=0x7F => self.exec_mov(code),

            // ADD..CMP r (and M)
            0x80..=0xBF => self.exec_alu_reg(code),

            // ADI..CPI d8
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                self.exec_alu_imm(code, opcode.byte())
            }

            // Conditional RET / JMP / CALL
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => self.exec_ret_cc(code),
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
                self.exec_jmp_cc(code, opcode.word())
            }
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
                self.exec_call_cc(code, opcode.word())
            }

            0xC3 => Step::Jump(opcode.word()),
            0xC9 => self.exec_ret(),
            0xCD => self.exec_call(code, opcode.word()),
            0xE9 => Step::Jump(self.state.regs.hl()),

            // RST n
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => self.exec_rst(code),

            // PUSH / POP rp (PSW in place of SP)
            0xC5 | 0xD5 | 0xE5 | 0xF5 => self.exec_push(code),
            0xC1 | 0xD1 | 0xE1 | 0xF1 => self.exec_pop(code),

            0xE3 => self.exec_xthl(),
            0xF9 => self.exec_sphl(),
            0xEB => self.exec_xchg(),

            0xD3 => self.exec_out(opcode.byte()),
            0xDB => self.exec_in(opcode.byte()),

            0xF3 | 0xFB => self.exec_interrupt_enable(code),

            // Every undocumented code has been resolved to its alias above.
            _ => self.decode_failure(opcode),
        }
    }
}
