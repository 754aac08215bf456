use crate::cpu::exec::Step;
use crate::cpu::Cpu;

impl Cpu {
    pub(in crate::cpu) fn exec_lxi(&mut self, code: u8, value: u16) -> Step {
        self.write_pair(code >> 4, value);
        Step::Next
    }

    pub(in crate::cpu) fn exec_stax(&mut self, code: u8) -> Step {
        let addr = self.read_pair(code >> 4);
        self.bus.mem_write(addr, self.state.regs.a);
        Step::Next
    }

    pub(in crate::cpu) fn exec_ldax(&mut self, code: u8) -> Step {
        let addr = self.read_pair(code >> 4);
        self.state.regs.a = self.bus.mem_read(addr);
        Step::Next
    }

    /// SHLD, LHLD, STA and LDA: transfers against a direct address.
    pub(in crate::cpu) fn exec_direct(&mut self, code: u8, addr: u16) -> Step {
        match code {
            0x22 => self.bus.mem_write_word(addr, self.state.regs.hl()),
            0x2A => {
                let value = self.bus.mem_read_word(addr);
                self.state.regs.set_hl(value);
            }
            0x32 => self.bus.mem_write(addr, self.state.regs.a),
            _ => self.state.regs.a = self.bus.mem_read(addr),
        }
        Step::Next
    }

    pub(in crate::cpu) fn exec_mvi(&mut self, code: u8, value: u8) -> Step {
        self.write_reg(code >> 3, value);
        Step::Next
    }

    /// MOV dst, src. 0x76 (which would be MOV M,M) is HLT and never lands here.
    pub(in crate::cpu) fn exec_mov(&mut self, code: u8) -> Step {
        debug_assert!((0x40..=0x7F).contains(&code) && code != 0x76);
        let value = self.read_reg(code);
        self.write_reg(code >> 3, value);
        Step::Next
    }

    pub(in crate::cpu) fn exec_xchg(&mut self) -> Step {
        let regs = &mut self.state.regs;
        std::mem::swap(&mut regs.h, &mut regs.d);
        std::mem::swap(&mut regs.l, &mut regs.e);
        Step::Next
    }
}
