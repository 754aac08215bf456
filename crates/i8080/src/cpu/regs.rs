use bitflags::bitflags;

bitflags! {
    /// Condition flags as laid out in the low byte of PSW.
    ///
    /// - bit 7: S (sign)
    /// - bit 6: Z (zero)
    /// - bit 4: AC (auxiliary carry)
    /// - bit 2: P (parity, set when even)
    /// - bit 0: CY (carry)
    ///
    /// Bits 5 and 3 always read as 0 and bit 1 always reads as 1 when the
    /// flags are pushed; they are not stored.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const SIGN = 0x80;
        const ZERO = 0x40;
        const AUX_CARRY = 0x10;
        const PARITY = 0x04;
        const CARRY = 0x01;
    }
}

const PSW_ALWAYS_ONE: u8 = 0x02;

impl Flags {
    /// Byte pushed by `PUSH PSW`.
    #[inline]
    pub fn to_psw_byte(self) -> u8 {
        self.bits() | PSW_ALWAYS_ONE
    }

    /// Flags restored by `POP PSW`. Reserved bits are discarded.
    #[inline]
    pub fn from_psw_byte(value: u8) -> Self {
        Self::from_bits_truncate(value)
    }
}

/// 16-bit view over two 8-bit registers, high byte first.
macro_rules! register_pair {
    ($get:ident, $set:ident, $hi:ident, $lo:ident) => {
        #[inline]
        pub fn $get(&self) -> u16 {
            ((self.$hi as u16) << 8) | self.$lo as u16
        }

        #[inline]
        pub fn $set(&mut self, value: u16) {
            self.$hi = (value >> 8) as u8;
            self.$lo = value as u8;
        }
    };
}

/// Intel 8080 register file.
///
/// Pairs are stored as their two halves; the `bc()`/`set_bc()` family gives
/// the 16-bit view, so byte and word views can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub flags: Flags,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// Accumulator in the high byte, flags in the low byte.
    #[inline]
    pub fn psw(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags.to_psw_byte()])
    }

    #[inline]
    pub fn set_psw(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.flags = Flags::from_psw_byte(f);
    }

    register_pair!(bc, set_bc, b, c);
    register_pair!(de, set_de, d, e);
    register_pair!(hl, set_hl, h, l);
}

/// True when `value` has an even number of set bits.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}
