use crate::cpu::exec::Step;
use crate::cpu::{Cpu, Flags};

impl Cpu {
    pub(in crate::cpu) fn exec_alu_reg(&mut self, code: u8) -> Step {
        debug_assert!((0x80..=0xBF).contains(&code));
        let value = self.read_reg(code);
        self.alu_op(code >> 3, value);
        Step::Next
    }

    pub(in crate::cpu) fn exec_alu_imm(&mut self, code: u8, value: u8) -> Step {
        self.alu_op(code >> 3, value);
        Step::Next
    }

    pub(in crate::cpu) fn exec_inr(&mut self, code: u8) -> Step {
        let reg = code >> 3;
        let value = self.read_reg(reg);
        let result = self.alu_inc(value);
        self.write_reg(reg, result);
        Step::Next
    }

    pub(in crate::cpu) fn exec_dcr(&mut self, code: u8) -> Step {
        let reg = code >> 3;
        let value = self.read_reg(reg);
        let result = self.alu_dec(value);
        self.write_reg(reg, result);
        Step::Next
    }

    pub(in crate::cpu) fn exec_inx(&mut self, code: u8) -> Step {
        let pair = code >> 4;
        self.write_pair(pair, self.read_pair(pair).wrapping_add(1));
        Step::Next
    }

    pub(in crate::cpu) fn exec_dcx(&mut self, code: u8) -> Step {
        let pair = code >> 4;
        self.write_pair(pair, self.read_pair(pair).wrapping_sub(1));
        Step::Next
    }

    pub(in crate::cpu) fn exec_dad(&mut self, code: u8) -> Step {
        let value = self.read_pair(code >> 4);
        self.alu_dad(value);
        Step::Next
    }

    pub(in crate::cpu) fn exec_rotate(&mut self, code: u8) -> Step {
        self.alu_rotate(code >> 3);
        Step::Next
    }

    pub(in crate::cpu) fn exec_accumulator_misc(&mut self, code: u8) -> Step {
        match code {
            0x27 => self.alu_daa(),
            0x2F => self.state.regs.a = !self.state.regs.a,
            0x37 => self.state.regs.flags.insert(Flags::CARRY),
            _ => self.state.regs.flags.toggle(Flags::CARRY),
        }
        Step::Next
    }
}
