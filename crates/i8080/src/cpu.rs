mod alu;
mod exec;
mod regs;

pub use regs::{parity, Flags, Registers};

use crate::bus::Bus;
use crate::opcodes;
use exec::Step;

/// Extra cycles charged when a conditional CALL or RET takes its branch.
pub const CONDITION_MET_PENALTY: u64 = 6;

/// What to do with the twelve undocumented instruction codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UndocumentedOpcodes {
    /// Execute them the way the silicon does: NOP, JMP, RET or CALL aliases.
    #[default]
    Emulate,
    /// Treat them as decode failures, which halt the CPU.
    Fault,
}

/// Everything the CPU owns apart from the bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub regs: Registers,
    /// Total cycles of every executed instruction, penalties included.
    pub cycles: u64,
    pub halted: bool,
    pub interrupts_enabled: bool,
    /// RST instruction waiting to be injected at the end of the next tick.
    pub pending_interrupt: Option<u8>,
}

impl State {
    fn new(entry_point: u16) -> Self {
        Self {
            regs: Registers {
                pc: entry_point,
                ..Registers::default()
            },
            cycles: 0,
            halted: false,
            interrupts_enabled: true,
            pending_interrupt: None,
        }
    }
}

/// Intel 8080 CPU bound to the bus it executes from.
#[derive(Debug)]
pub struct Cpu {
    state: State,
    bus: Bus,
    debug: bool,
    undocumented: UndocumentedOpcodes,
}

impl Cpu {
    /// Create a CPU in its power-on state that starts executing at
    /// `entry_point`. Interrupts start out enabled.
    pub fn new(bus: Bus, entry_point: u16) -> Self {
        Self {
            state: State::new(entry_point),
            bus,
            debug: false,
            undocumented: UndocumentedOpcodes::default(),
        }
    }

    /// Log a disassembly line (target `i8080::disasm`, level debug) for
    /// every executed instruction.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_undocumented(&mut self, policy: UndocumentedOpcodes) {
        self.undocumented = policy;
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn halted(&self) -> bool {
        self.state.halted
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn into_bus(self) -> Bus {
        self.bus
    }

    /// Execute exactly one instruction.
    ///
    /// A pending interrupt is serviced right after the instruction, within
    /// the same call. Once [`Cpu::halted`] reports true the caller is
    /// expected to stop ticking; further ticks re-execute the `HLT`.
    pub fn tick(&mut self) {
        let pc = self.state.regs.pc;
        let opcode = self.bus.fetch(pc);
        if self.debug {
            log::debug!(target: "i8080::disasm", "{}", opcode.disassemble(pc));
        }

        let info = opcode.info();
        match self.execute(opcode) {
            Step::Halt => {
                self.state.halted = true;
                return;
            }
            Step::Next => {
                self.state.regs.pc = pc.wrapping_add(info.size());
            }
            Step::Jump(target) => {
                self.state.regs.pc = target;
            }
        }
        self.state.cycles += info.cycles as u64;

        if let Some(code) = self.state.pending_interrupt.take() {
            self.service_interrupt(code);
        }
    }

    /// Request that `instruction` (an `RST n`) be injected.
    ///
    /// The request is only accepted while interrupts are enabled; accepting
    /// it disables them, so the handler must run `EI` to receive the next
    /// one. Requests made while disabled are dropped, not queued.
    pub fn interrupt(&mut self, instruction: u8) {
        if !opcodes::is_rst(instruction) {
            log::warn!(
                "ignoring interrupt request with non-RST instruction 0x{instruction:02X}"
            );
            return;
        }
        if !self.state.interrupts_enabled {
            log::trace!(
                "interrupts disabled, dropping {}",
                opcodes::info(instruction).mnemonic
            );
            return;
        }
        self.state.interrupts_enabled = false;
        self.state.pending_interrupt = Some(instruction);
    }

    /// Request interrupt line `isr` (0–7), serviced by `RST isr`.
    pub fn interrupt_isr(&mut self, isr: u8) {
        self.interrupt(opcodes::rst_for_isr(isr));
    }

    /// Run an injected RST exactly like a fetched one, returning to the
    /// instruction that would have executed next.
    fn service_interrupt(&mut self, code: u8) {
        let return_to = self.state.regs.pc;
        self.push(return_to);
        self.state.regs.pc = opcodes::rst_vector(code);
        self.state.cycles += opcodes::info(code).cycles as u64;
    }

    /// Read register `index` in the standard operand encoding:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=M (memory at HL), 7=A.
    #[inline]
    fn read_reg(&self, index: u8) -> u8 {
        let regs = &self.state.regs;
        match index & 0x07 {
            0 => regs.b,
            1 => regs.c,
            2 => regs.d,
            3 => regs.e,
            4 => regs.h,
            5 => regs.l,
            6 => self.bus.mem_read(regs.hl()),
            _ => regs.a,
        }
    }

    /// Write register `index`, same encoding as [`Cpu::read_reg`].
    #[inline]
    fn write_reg(&mut self, index: u8, value: u8) {
        let regs = &mut self.state.regs;
        match index & 0x07 {
            0 => regs.b = value,
            1 => regs.c = value,
            2 => regs.d = value,
            3 => regs.e = value,
            4 => regs.h = value,
            5 => regs.l = value,
            6 => self.bus.mem_write(regs.hl(), value),
            _ => regs.a = value,
        }
    }

    /// Register pair `index` as encoded in LXI/INX/DCX/DAD: 0=BC, 1=DE,
    /// 2=HL, 3=SP.
    #[inline]
    fn read_pair(&self, index: u8) -> u16 {
        let regs = &self.state.regs;
        match index & 0x03 {
            0 => regs.bc(),
            1 => regs.de(),
            2 => regs.hl(),
            _ => regs.sp,
        }
    }

    #[inline]
    fn write_pair(&mut self, index: u8, value: u16) {
        let regs = &mut self.state.regs;
        match index & 0x03 {
            0 => regs.set_bc(value),
            1 => regs.set_de(value),
            2 => regs.set_hl(value),
            _ => regs.sp = value,
        }
    }

    #[inline]
    fn push(&mut self, value: u16) {
        self.state.regs.sp = self.state.regs.sp.wrapping_sub(2);
        self.bus.mem_write_word(self.state.regs.sp, value);
    }

    #[inline]
    fn pop(&mut self) -> u16 {
        let value = self.bus.mem_read_word(self.state.regs.sp);
        self.state.regs.sp = self.state.regs.sp.wrapping_add(2);
        value
    }
}
