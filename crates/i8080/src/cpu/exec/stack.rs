use crate::cpu::exec::Step;
use crate::cpu::Cpu;

/// Pair index used by PUSH/POP for PSW (where LXI & co. would mean SP).
const PSW: u8 = 3;

impl Cpu {
    pub(in crate::cpu) fn exec_push(&mut self, code: u8) -> Step {
        let pair = (code >> 4) & 0x03;
        let value = if pair == PSW {
            self.state.regs.psw()
        } else {
            self.read_pair(pair)
        };
        self.push(value);
        Step::Next
    }

    pub(in crate::cpu) fn exec_pop(&mut self, code: u8) -> Step {
        let pair = (code >> 4) & 0x03;
        let value = self.pop();
        if pair == PSW {
            self.state.regs.set_psw(value);
        } else {
            self.write_pair(pair, value);
        }
        Step::Next
    }

    /// XTHL: exchange HL with the word on top of the stack.
    pub(in crate::cpu) fn exec_xthl(&mut self) -> Step {
        let sp = self.state.regs.sp;
        let top = self.bus.mem_read_word(sp);
        self.bus.mem_write_word(sp, self.state.regs.hl());
        self.state.regs.set_hl(top);
        Step::Next
    }

    pub(in crate::cpu) fn exec_sphl(&mut self) -> Step {
        self.state.regs.sp = self.state.regs.hl();
        Step::Next
    }
}
