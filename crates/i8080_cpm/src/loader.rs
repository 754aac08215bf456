use std::path::Path;

use anyhow::{bail, Context, Result};
use i8080::{Bus, MEMORY_SIZE};

/// CP/M programs are loaded at, and start executing from, the bottom of the
/// transient program area.
pub const TPA_START: u16 = 0x0100;
/// BDOS entry point that programs `CALL` for console output.
pub const BDOS_ENTRY: u16 = 0x0005;

/// Port whose write marks the program as finished (warm boot at 0x0000).
pub const FINISH_PORT: u8 = 0;
/// Port whose write performs a BDOS console call.
pub const CONSOLE_PORT: u8 = 1;

/// Build a bus holding `rom` at [`TPA_START`] with the two CP/M traps
/// patched into low memory:
///
/// - `0x0000: OUT 0` so a warm boot (`JMP 0`) signals completion,
/// - `0x0005: OUT 1 ; RET` so BDOS calls reach the console device.
pub fn load_image(rom: &[u8]) -> Result<Bus> {
    let capacity = MEMORY_SIZE - TPA_START as usize;
    if rom.len() > capacity {
        bail!(
            "image is {} bytes but only {} fit above 0x{:04X}",
            rom.len(),
            capacity,
            TPA_START
        );
    }

    let mut bus = Bus::new();
    let start = TPA_START as usize;
    bus.memory_mut()[start..start + rom.len()].copy_from_slice(rom);
    bus.load(0x0000, &[0xD3, FINISH_PORT]);
    bus.load(BDOS_ENTRY, &[0xD3, CONSOLE_PORT, 0xC9]);
    Ok(bus)
}

pub fn read_rom(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).with_context(|| format!("failed to read ROM '{}'", path.display()))
}
