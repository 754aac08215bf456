use crate::bus::MEMORY_SIZE;
use crate::cpu::Registers;

/// A port-mapped peripheral.
///
/// The CPU only ever talks to peripherals through this trait: `OUT` calls
/// [`Device::write`] and `IN` calls [`Device::read`]. Both default to doing
/// nothing, so a device only implements the direction it cares about.
pub trait Device {
    fn write(&mut self, _value: u8, _ctx: &DeviceContext<'_>) {}

    /// Leave `value` untouched to keep whatever the CPU had in the target
    /// register.
    fn read(&mut self, _value: &mut u8, _ctx: &DeviceContext<'_>) {}
}

/// Read-only view of the machine handed to a device for the duration of one
/// port access.
///
/// Devices such as a CP/M console need to look at registers (function code,
/// string address) and memory; they borrow them here and never own them.
#[derive(Clone, Copy)]
pub struct DeviceContext<'a> {
    registers: &'a Registers,
    memory: &'a [u8; MEMORY_SIZE],
}

impl<'a> DeviceContext<'a> {
    pub fn new(registers: &'a Registers, memory: &'a [u8; MEMORY_SIZE]) -> Self {
        Self { registers, memory }
    }

    pub fn registers(&self) -> &'a Registers {
        self.registers
    }

    /// The whole 64 KiB address space.
    pub fn memory(&self) -> &'a [u8] {
        &self.memory[..]
    }
}
