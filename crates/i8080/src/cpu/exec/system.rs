use crate::cpu::exec::Step;
use crate::cpu::Cpu;
use crate::opcodes::Opcode;

impl Cpu {
    pub(in crate::cpu) fn exec_hlt(&mut self) -> Step {
        log::debug!("HLT at 0x{:04X}", self.state.regs.pc);
        Step::Halt
    }

    /// DI (0xF3) / EI (0xFB).
    pub(in crate::cpu) fn exec_interrupt_enable(&mut self, code: u8) -> Step {
        self.state.interrupts_enabled = code == 0xFB;
        Step::Next
    }

    /// OUT port: hand A to the device bound to `port`.
    pub(in crate::cpu) fn exec_out(&mut self, port: u8) -> Step {
        self.bus.write(port, self.state.regs.a, &self.state.regs);
        Step::Next
    }

    /// IN port: let the device bound to `port` replace A.
    pub(in crate::cpu) fn exec_in(&mut self, port: u8) -> Step {
        let mut value = self.state.regs.a;
        self.bus.read(port, &mut value, &self.state.regs);
        self.state.regs.a = value;
        Step::Next
    }

    pub(in crate::cpu) fn decode_failure(&mut self, opcode: Opcode) -> Step {
        let regs = &self.state.regs;
        log::error!(
            "CPU locked: cannot decode 0x{:02X} ({}) at PC=0x{:04X} \
             A={:02X} F={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
            opcode.code,
            opcode.info().mnemonic,
            regs.pc,
            regs.a,
            regs.flags.to_psw_byte(),
            regs.bc(),
            regs.de(),
            regs.hl(),
            regs.sp
        );
        Step::Halt
    }
}
