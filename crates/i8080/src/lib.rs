//! Cycle-counted Intel 8080 interpreter.
//!
//! The host owns a [`Bus`] (64 KiB of memory plus an 8-slot port table),
//! registers [`Device`]s on it, hands it to a [`Cpu`] together with an entry
//! point, and calls [`Cpu::tick`] until it is satisfied or the CPU halts.

pub mod bus;
pub mod cpu;
pub mod device;
pub mod opcodes;

pub use bus::{Bus, MEMORY_SIZE, PORT_COUNT};
pub use cpu::{Cpu, Flags, Registers, State, UndocumentedOpcodes};
pub use device::{Device, DeviceContext};
pub use opcodes::{Opcode, OpcodeInfo};
