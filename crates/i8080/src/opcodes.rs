//! Static opcode metadata and small decoding helpers.
//!
//! Every one of the 256 instruction codes has an entry, including the
//! undocumented aliases (marked with a leading `*` in their mnemonic).

/// Mnemonic, encoded operand width and base cycle cost of one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    /// Number of operand bytes following the instruction code (0, 1 or 2).
    pub operand_len: u8,
    /// Base cost in clock cycles. Conditional calls and returns add
    /// [`crate::cpu::CONDITION_MET_PENALTY`] when their condition holds.
    pub cycles: u8,
}

impl OpcodeInfo {
    /// Total encoded length in bytes (instruction code plus operands).
    #[inline]
    pub const fn size(&self) -> u16 {
        1 + self.operand_len as u16
    }
}

const fn op(mnemonic: &'static str, operand_len: u8, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        operand_len,
        cycles,
    }
}

/// Metadata indexed by instruction code.
pub static OPCODES: [OpcodeInfo; 256] = [
    // 0x00
    op("NOP", 0, 4),
    op("LXI B", 2, 10),
    op("STAX B", 0, 7),
    op("INX B", 0, 5),
    op("INR B", 0, 5),
    op("DCR B", 0, 5),
    op("MVI B", 1, 7),
    op("RLC", 0, 4),
    // 0x08
    op("*NOP", 0, 4),
    op("DAD B", 0, 10),
    op("LDAX B", 0, 7),
    op("DCX B", 0, 5),
    op("INR C", 0, 5),
    op("DCR C", 0, 5),
    op("MVI C", 1, 7),
    op("RRC", 0, 4),
    // 0x10
    op("*NOP", 0, 4),
    op("LXI D", 2, 10),
    op("STAX D", 0, 7),
    op("INX D", 0, 5),
    op("INR D", 0, 5),
    op("DCR D", 0, 5),
    op("MVI D", 1, 7),
    op("RAL", 0, 4),
    // 0x18
    op("*NOP", 0, 4),
    op("DAD D", 0, 10),
    op("LDAX D", 0, 7),
    op("DCX D", 0, 5),
    op("INR E", 0, 5),
    op("DCR E", 0, 5),
    op("MVI E", 1, 7),
    op("RAR", 0, 4),
    // 0x20
    op("*NOP", 0, 4),
    op("LXI H", 2, 10),
    op("SHLD", 2, 16),
    op("INX H", 0, 5),
    op("INR H", 0, 5),
    op("DCR H", 0, 5),
    op("MVI H", 1, 7),
    op("DAA", 0, 4),
    // 0x28
    op("*NOP", 0, 4),
    op("DAD H", 0, 10),
    op("LHLD", 2, 16),
    op("DCX H", 0, 5),
    op("INR L", 0, 5),
    op("DCR L", 0, 5),
    op("MVI L", 1, 7),
    op("CMA", 0, 4),
    // 0x30
    op("*NOP", 0, 4),
    op("LXI SP", 2, 10),
    op("STA", 2, 13),
    op("INX SP", 0, 5),
    op("INR M", 0, 10),
    op("DCR M", 0, 10),
    op("MVI M", 1, 10),
    op("STC", 0, 4),
    // 0x38
    op("*NOP", 0, 4),
    op("DAD SP", 0, 10),
    op("LDA", 2, 13),
    op("DCX SP", 0, 5),
    op("INR A", 0, 5),
    op("DCR A", 0, 5),
    op("MVI A", 1, 7),
    op("CMC", 0, 4),
    // 0x40
    op("MOV B,B", 0, 5),
    op("MOV B,C", 0, 5),
    op("MOV B,D", 0, 5),
    op("MOV B,E", 0, 5),
    op("MOV B,H", 0, 5),
    op("MOV B,L", 0, 5),
    op("MOV B,M", 0, 7),
    op("MOV B,A", 0, 5),
    // 0x48
    op("MOV C,B", 0, 5),
    op("MOV C,C", 0, 5),
    op("MOV C,D", 0, 5),
    op("MOV C,E", 0, 5),
    op("MOV C,H", 0, 5),
    op("MOV C,L", 0, 5),
    op("MOV C,M", 0, 7),
    op("MOV C,A", 0, 5),
    // 0x50
    op("MOV D,B", 0, 5),
    op("MOV D,C", 0, 5),
    op("MOV D,D", 0, 5),
    op("MOV D,E", 0, 5),
    op("MOV D,H", 0, 5),
    op("MOV D,L", 0, 5),
    op("MOV D,M", 0, 7),
    op("MOV D,A", 0, 5),
    // 0x58
    op("MOV E,B", 0, 5),
    op("MOV E,C", 0, 5),
    op("MOV E,D", 0, 5),
    op("MOV E,E", 0, 5),
    op("MOV E,H", 0, 5),
    op("MOV E,L", 0, 5),
    op("MOV E,M", 0, 7),
    op("MOV E,A", 0, 5),
    // 0x60
    op("MOV H,B", 0, 5),
    op("MOV H,C", 0, 5),
    op("MOV H,D", 0, 5),
    op("MOV H,E", 0, 5),
    op("MOV H,H", 0, 5),
    op("MOV H,L", 0, 5),
    op("MOV H,M", 0, 7),
    op("MOV H,A", 0, 5),
    // 0x68
    op("MOV L,B", 0, 5),
    op("MOV L,C", 0, 5),
    op("MOV L,D", 0, 5),
    op("MOV L,E", 0, 5),
    op("MOV L,H", 0, 5),
    op("MOV L,L", 0, 5),
    op("MOV L,M", 0, 7),
    op("MOV L,A", 0, 5),
    // 0x70
    op("MOV M,B", 0, 7),
    op("MOV M,C", 0, 7),
    op("MOV M,D", 0, 7),
    op("MOV M,E", 0, 7),
    op("MOV M,H", 0, 7),
    op("MOV M,L", 0, 7),
    op("HLT", 0, 7),
    op("MOV M,A", 0, 7),
    // 0x78
    op("MOV A,B", 0, 5),
    op("MOV A,C", 0, 5),
    op("MOV A,D", 0, 5),
    op("MOV A,E", 0, 5),
    op("MOV A,H", 0, 5),
    op("MOV A,L", 0, 5),
    op("MOV A,M", 0, 7),
    op("MOV A,A", 0, 5),
    // 0x80
    op("ADD B", 0, 4),
    op("ADD C", 0, 4),
    op("ADD D", 0, 4),
    op("ADD E", 0, 4),
    op("ADD H", 0, 4),
    op("ADD L", 0, 4),
    op("ADD M", 0, 7),
    op("ADD A", 0, 4),
    // 0x88
    op("ADC B", 0, 4),
    op("ADC C", 0, 4),
    op("ADC D", 0, 4),
    op("ADC E", 0, 4),
    op("ADC H", 0, 4),
    op("ADC L", 0, 4),
    op("ADC M", 0, 7),
    op("ADC A", 0, 4),
    // 0x90
    op("SUB B", 0, 4),
    op("SUB C", 0, 4),
    op("SUB D", 0, 4),
    op("SUB E", 0, 4),
    op("SUB H", 0, 4),
    op("SUB L", 0, 4),
    op("SUB M", 0, 7),
    op("SUB A", 0, 4),
    // 0x98
    op("SBB B", 0, 4),
    op("SBB C", 0, 4),
    op("SBB D", 0, 4),
    op("SBB E", 0, 4),
    op("SBB H", 0, 4),
    op("SBB L", 0, 4),
    op("SBB M", 0, 7),
    op("SBB A", 0, 4),
    // 0xA0
    op("ANA B", 0, 4),
    op("ANA C", 0, 4),
    op("ANA D", 0, 4),
    op("ANA E", 0, 4),
    op("ANA H", 0, 4),
    op("ANA L", 0, 4),
    op("ANA M", 0, 7),
    op("ANA A", 0, 4),
    // 0xA8
    op("XRA B", 0, 4),
    op("XRA C", 0, 4),
    op("XRA D", 0, 4),
    op("XRA E", 0, 4),
    op("XRA H", 0, 4),
    op("XRA L", 0, 4),
    op("XRA M", 0, 7),
    op("XRA A", 0, 4),
    // 0xB0
    op("ORA B", 0, 4),
    op("ORA C", 0, 4),
    op("ORA D", 0, 4),
    op("ORA E", 0, 4),
    op("ORA H", 0, 4),
    op("ORA L", 0, 4),
    op("ORA M", 0, 7),
    op("ORA A", 0, 4),
    // 0xB8
    op("CMP B", 0, 4),
    op("CMP C", 0, 4),
    op("CMP D", 0, 4),
    op("CMP E", 0, 4),
    op("CMP H", 0, 4),
    op("CMP L", 0, 4),
    op("CMP M", 0, 7),
    op("CMP A", 0, 4),
    // 0xC0
    op("RNZ", 0, 5),
    op("POP B", 0, 10),
    op("JNZ", 2, 10),
    op("JMP", 2, 10),
    op("CNZ", 2, 11),
    op("PUSH B", 0, 11),
    op("ADI", 1, 7),
    op("RST 0", 0, 11),
    // 0xC8
    op("RZ", 0, 5),
    op("RET", 0, 10),
    op("JZ", 2, 10),
    op("*JMP", 2, 10),
    op("CZ", 2, 11),
    op("CALL", 2, 17),
    op("ACI", 1, 7),
    op("RST 1", 0, 11),
    // 0xD0
    op("RNC", 0, 5),
    op("POP D", 0, 10),
    op("JNC", 2, 10),
    op("OUT", 1, 10),
    op("CNC", 2, 11),
    op("PUSH D", 0, 11),
    op("SUI", 1, 7),
    op("RST 2", 0, 11),
    // 0xD8
    op("RC", 0, 5),
    op("*RET", 0, 10),
    op("JC", 2, 10),
    op("IN", 1, 10),
    op("CC", 2, 11),
    op("*CALL", 2, 17),
    op("SBI", 1, 7),
    op("RST 3", 0, 11),
    // 0xE0
    op("RPO", 0, 5),
    op("POP H", 0, 10),
    op("JPO", 2, 10),
    op("XTHL", 0, 18),
    op("CPO", 2, 11),
    op("PUSH H", 0, 11),
    op("ANI", 1, 7),
    op("RST 4", 0, 11),
    // 0xE8
    op("RPE", 0, 5),
    op("PCHL", 0, 5),
    op("JPE", 2, 10),
    op("XCHG", 0, 4),
    op("CPE", 2, 11),
    op("*CALL", 2, 17),
    op("XRI", 1, 7),
    op("RST 5", 0, 11),
    // 0xF0
    op("RP", 0, 5),
    op("POP PSW", 0, 10),
    op("JP", 2, 10),
    op("DI", 0, 4),
    op("CP", 2, 11),
    op("PUSH PSW", 0, 11),
    op("ORI", 1, 7),
    op("RST 6", 0, 11),
    // 0xF8
    op("RM", 0, 5),
    op("SPHL", 0, 5),
    op("JM", 2, 10),
    op("EI", 0, 4),
    op("CM", 2, 11),
    op("*CALL", 2, 17),
    op("CPI", 1, 7),
    op("RST 7", 0, 11),
];

/// Look up the metadata for an instruction code.
#[inline]
pub fn info(code: u8) -> &'static OpcodeInfo {
    &OPCODES[code as usize]
}

/// One fetched instruction: the code plus its (possibly unused) operand.
///
/// A single-byte operand lives in the low byte of `operand`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Opcode {
    pub code: u8,
    pub operand: u16,
}

impl Opcode {
    pub fn new(code: u8, operand: u16) -> Self {
        Self { code, operand }
    }

    #[inline]
    pub fn info(&self) -> &'static OpcodeInfo {
        info(self.code)
    }

    /// Immediate byte operand (MVI, ADI, IN, OUT, ...).
    #[inline]
    pub fn byte(&self) -> u8 {
        self.operand as u8
    }

    /// Immediate word operand (LXI, JMP, CALL, STA, ...).
    #[inline]
    pub fn word(&self) -> u16 {
        self.operand
    }

    /// Render a one-line listing of this instruction located at `pc`.
    pub fn disassemble(&self, pc: u16) -> String {
        let info = self.info();
        // Mnemonics that already name a register take the operand after a comma.
        let sep = if info.mnemonic.contains(' ') { "," } else { " " };
        match info.operand_len {
            0 => format!("{pc:04X}  {:02X}        {}", self.code, info.mnemonic),
            1 => format!(
                "{pc:04X}  {:02X} {:02X}     {}{sep}{:02X}h",
                self.code,
                self.byte(),
                info.mnemonic,
                self.byte()
            ),
            _ => {
                let [lo, hi] = self.word().to_le_bytes();
                format!(
                    "{pc:04X}  {:02X} {lo:02X} {hi:02X}  {}{sep}{:04X}h",
                    self.code,
                    info.mnemonic,
                    self.word()
                )
            }
        }
    }
}

/// Whether `code` is one of the eight `RST n` instructions.
#[inline]
pub fn is_rst(code: u8) -> bool {
    code & 0xC7 == 0xC7
}

/// Call target of an `RST n` instruction (`8 * n`).
#[inline]
pub fn rst_vector(code: u8) -> u16 {
    (code & 0x38) as u16
}

/// The `RST n` instruction servicing interrupt line `isr` (0–7).
#[inline]
pub fn rst_for_isr(isr: u8) -> u8 {
    debug_assert!(isr < 8, "ISR index {isr} out of range");
    0xC7 | ((isr & 0x07) << 3)
}

/// Map an undocumented instruction code to the documented one the silicon
/// actually executes. Returns `None` for documented codes.
pub fn undocumented_alias(code: u8) -> Option<u8> {
    match code {
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => Some(0x00), // NOP
        0xCB => Some(0xC3),                                          // JMP
        0xD9 => Some(0xC9),                                          // RET
        0xDD | 0xED | 0xFD => Some(0xCD),                            // CALL
        _ => None,
    }
}
