use crate::cpu::exec::Step;
use crate::cpu::{Cpu, Flags, CONDITION_MET_PENALTY};
use crate::opcodes;

impl Cpu {
    /// Condition encoded in bits 5..3 of a conditional branch.
    #[inline]
    fn condition(&self, code: u8) -> bool {
        let flags = self.state.regs.flags;
        match (code >> 3) & 0x07 {
            0 => !flags.contains(Flags::ZERO),   // NZ
            1 => flags.contains(Flags::ZERO),    // Z
            2 => !flags.contains(Flags::CARRY),  // NC
            3 => flags.contains(Flags::CARRY),   // C
            4 => !flags.contains(Flags::PARITY), // PO
            5 => flags.contains(Flags::PARITY),  // PE
            6 => !flags.contains(Flags::SIGN),   // P
            _ => flags.contains(Flags::SIGN),    // M
        }
    }

    pub(in crate::cpu) fn exec_jmp_cc(&mut self, code: u8, target: u16) -> Step {
        if self.condition(code) {
            Step::Jump(target)
        } else {
            Step::Next
        }
    }

    /// CALL pushes the address of the following instruction.
    pub(in crate::cpu) fn exec_call(&mut self, code: u8, target: u16) -> Step {
        let return_to = self
            .state
            .regs
            .pc
            .wrapping_add(opcodes::info(code).size());
        self.push(return_to);
        Step::Jump(target)
    }

    pub(in crate::cpu) fn exec_call_cc(&mut self, code: u8, target: u16) -> Step {
        if self.condition(code) {
            self.state.cycles += CONDITION_MET_PENALTY;
            self.exec_call(code, target)
        } else {
            Step::Next
        }
    }

    pub(in crate::cpu) fn exec_ret(&mut self) -> Step {
        Step::Jump(self.pop())
    }

    pub(in crate::cpu) fn exec_ret_cc(&mut self, code: u8) -> Step {
        if self.condition(code) {
            self.state.cycles += CONDITION_MET_PENALTY;
            self.exec_ret()
        } else {
            Step::Next
        }
    }

    pub(in crate::cpu) fn exec_rst(&mut self, code: u8) -> Step {
        let return_to = self.state.regs.pc.wrapping_add(1);
        self.push(return_to);
        Step::Jump(opcodes::rst_vector(code))
    }
}
