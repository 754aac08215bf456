//! Harness that runs CP/M `.COM` diagnostics (TST8080, 8080PRE, CPUTEST,
//! 8080EXM) on the [`i8080`] core, with just enough BDOS to print.

mod devices;
mod loader;
#[cfg(test)]
mod tests;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use i8080::{Cpu, UndocumentedOpcodes};
use typed_builder::TypedBuilder;

pub use devices::{ConsoleDevice, FinishDevice};
pub use loader::{load_image, read_rom, BDOS_ENTRY, CONSOLE_PORT, FINISH_PORT, TPA_START};

#[derive(Debug, Clone, TypedBuilder)]
pub struct RunConfig {
    pub rom: Vec<u8>,
    /// Log a disassembly line per instruction.
    #[builder(default = false)]
    pub debug: bool,
    /// Stop once this many cycles have elapsed.
    #[builder(default)]
    pub max_cycles: Option<u64>,
    #[builder(default)]
    pub undocumented: UndocumentedOpcodes,
    /// Print console output to stdout while running.
    #[builder(default = false)]
    pub echo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The program jumped to 0x0000.
    Finished,
    /// `HLT`, or an instruction the CPU refused to decode.
    Halted,
    /// `max_cycles` ran out first.
    CycleLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub stop: StopReason,
    pub cycles: u64,
    pub instructions: u64,
    /// Everything written through the BDOS console.
    pub output: String,
}

impl RunReport {
    pub fn finished(&self) -> bool {
        self.stop == StopReason::Finished
    }
}

/// Load the image, wire up the BDOS traps and tick until the program warm
/// boots, the CPU halts or the cycle budget is spent.
pub fn run(config: RunConfig) -> Result<RunReport> {
    let RunConfig {
        rom,
        debug,
        max_cycles,
        undocumented,
        echo,
    } = config;

    let mut bus = load_image(&rom)?;
    let finished = Rc::new(Cell::new(false));
    let output = Rc::new(RefCell::new(String::new()));
    bus.register_device(FINISH_PORT, FinishDevice::new(Rc::clone(&finished)));
    bus.register_device(
        CONSOLE_PORT,
        ConsoleDevice::new(Rc::clone(&output)).with_echo(echo),
    );

    let mut cpu = Cpu::new(bus, TPA_START);
    cpu.set_debug(debug);
    cpu.set_undocumented(undocumented);
    log::info!(
        "running {} byte image from 0x{:04X} ({:?} undocumented opcodes)",
        rom.len(),
        TPA_START,
        undocumented
    );

    let mut instructions: u64 = 0;
    let stop = loop {
        if finished.get() {
            break StopReason::Finished;
        }
        if cpu.halted() {
            break StopReason::Halted;
        }
        if max_cycles.is_some_and(|limit| cpu.state().cycles >= limit) {
            break StopReason::CycleLimit;
        }
        cpu.tick();
        instructions += 1;
    };

    let cycles = cpu.state().cycles;
    log::info!(
        "stopped ({:?}) at PC=0x{:04X} after {} instructions, {} cycles",
        stop,
        cpu.state().regs.pc,
        instructions,
        cycles
    );

    let output = output.borrow().clone();
    Ok(RunReport {
        stop,
        cycles,
        instructions,
        output,
    })
}
