use std::fmt;

use crate::cpu::Registers;
use crate::device::{Device, DeviceContext};
use crate::opcodes::{self, Opcode};

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Number of device slots. `IN`/`OUT` to a port at or above this number
/// behave like an access to an empty slot.
pub const PORT_COUNT: usize = 8;

/// Memory plus the port-mapped device table.
///
/// Memory is a fixed 64 KiB array, so every 16-bit address is in range and
/// word accesses simply wrap from 0xFFFF to 0x0000.
pub struct Bus {
    memory: Box<[u8; MEMORY_SIZE]>,
    devices: [Option<Box<dyn Device>>; PORT_COUNT],
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<usize> = self
            .devices
            .iter()
            .enumerate()
            .filter_map(|(port, slot)| slot.as_ref().map(|_| port))
            .collect();
        f.debug_struct("Bus")
            .field("memory_size", &MEMORY_SIZE)
            .field("bound_ports", &bound)
            .finish()
    }
}

impl Bus {
    /// Create a bus with zeroed memory and no devices.
    pub fn new() -> Self {
        Self::with_memory(Box::new([0; MEMORY_SIZE]))
    }

    /// Create a bus over a memory image prepared by the host.
    pub fn with_memory(memory: Box<[u8; MEMORY_SIZE]>) -> Self {
        Self {
            memory,
            devices: Default::default(),
        }
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut [u8; MEMORY_SIZE] {
        &mut self.memory
    }

    /// Copy `data` into memory starting at `addr`, wrapping at the top of
    /// the address space.
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let mut at = addr;
        for &byte in data {
            self.memory[at as usize] = byte;
            at = at.wrapping_add(1);
        }
    }

    /// Read the instruction at `pc` together with as many operand bytes as
    /// its metadata declares.
    pub fn fetch(&self, pc: u16) -> Opcode {
        let code = self.mem_read(pc);
        let operand = match opcodes::info(code).operand_len {
            0 => 0,
            1 => self.mem_read(pc.wrapping_add(1)) as u16,
            _ => self.mem_read_word(pc.wrapping_add(1)),
        };
        Opcode::new(code, operand)
    }

    #[inline]
    pub fn mem_read(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    /// Little-endian word read. The two bytes are read independently.
    #[inline]
    pub fn mem_read_word(&self, addr: u16) -> u16 {
        let lo = self.mem_read(addr);
        let hi = self.mem_read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub fn mem_write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    /// Little-endian word write. The two bytes are written independently.
    #[inline]
    pub fn mem_write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.mem_write(addr, lo);
        self.mem_write(addr.wrapping_add(1), hi);
    }

    /// Bind `device` to `port`, replacing whatever was bound there.
    ///
    /// # Panics
    ///
    /// Panics if `port` is not below [`PORT_COUNT`].
    pub fn register_device<D: Device + 'static>(&mut self, port: u8, device: D) {
        assert!(
            (port as usize) < PORT_COUNT,
            "port {port} outside the {PORT_COUNT}-slot device table"
        );
        self.devices[port as usize] = Some(Box::new(device));
    }

    pub fn is_bound(&self, port: u8) -> bool {
        matches!(self.devices.get(port as usize), Some(Some(_)))
    }

    /// Route an `OUT` to the device on `port`. Unbound ports drop the byte.
    pub fn write(&mut self, port: u8, value: u8, registers: &Registers) {
        let Self { memory, devices } = self;
        if let Some(device) = devices.get_mut(port as usize).and_then(Option::as_mut) {
            device.write(value, &DeviceContext::new(registers, memory));
        }
    }

    /// Route an `IN` to the device on `port`. Unbound ports leave `value`
    /// unmodified.
    pub fn read(&mut self, port: u8, value: &mut u8, registers: &Registers) {
        let Self { memory, devices } = self;
        if let Some(device) = devices.get_mut(port as usize).and_then(Option::as_mut) {
            device.read(value, &DeviceContext::new(registers, memory));
        }
    }
}
