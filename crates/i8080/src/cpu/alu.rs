use super::{parity, Cpu, Flags};

impl Cpu {
    #[inline]
    fn set_flag(&mut self, flag: Flags, value: bool) {
        self.state.regs.flags.set(flag, value);
    }

    #[inline]
    fn get_flag(&self, flag: Flags) -> bool {
        self.state.regs.flags.contains(flag)
    }

    /// Update Z, S and P from an 8-bit result.
    #[inline]
    fn set_zsp(&mut self, result: u8) {
        self.set_flag(Flags::ZERO, result == 0);
        self.set_flag(Flags::SIGN, result & 0x80 != 0);
        self.set_flag(Flags::PARITY, parity(result));
    }

    /// 8-bit addition with carry-in, setting every flag.
    ///
    /// Subtraction goes through here too as `a + !value + !borrow`, which is
    /// how the 8080 derives AC for SUB/SBB/CMP.
    fn add_core(&mut self, a: u8, value: u8, carry_in: bool) -> u8 {
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;
        self.set_flag(Flags::CARRY, full > 0xFF);
        self.set_flag(Flags::AUX_CARRY, (a ^ value ^ result) & 0x10 != 0);
        self.set_zsp(result);
        result
    }

    /// ADD/ADC.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let carry_in = use_carry && self.get_flag(Flags::CARRY);
        self.state.regs.a = self.add_core(self.state.regs.a, value, carry_in);
    }

    /// SUB/SBB. Returns the difference without storing it so CMP can share it.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) -> u8 {
        let borrow = use_carry && self.get_flag(Flags::CARRY);
        let result = self.add_core(self.state.regs.a, !value, !borrow);
        // Carry out of the complement addition means no borrow.
        self.state.regs.flags.toggle(Flags::CARRY);
        result
    }

    pub(super) fn alu_cmp(&mut self, value: u8) {
        self.alu_sub(value, false);
    }

    pub(super) fn alu_and(&mut self, value: u8) {
        let a = self.state.regs.a;
        let result = a & value;
        self.state.regs.a = result;
        self.set_flag(Flags::CARRY, false);
        self.set_flag(Flags::AUX_CARRY, (a | value) & 0x08 != 0);
        self.set_zsp(result);
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.state.regs.a ^ value;
        self.state.regs.a = result;
        self.set_flag(Flags::CARRY, false);
        self.set_flag(Flags::AUX_CARRY, false);
        self.set_zsp(result);
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.state.regs.a | value;
        self.state.regs.a = result;
        self.set_flag(Flags::CARRY, false);
        self.set_flag(Flags::AUX_CARRY, false);
        self.set_zsp(result);
    }

    /// Run one of the eight accumulator operations selected by bits 5..3 of
    /// an ALU opcode (ADD, ADC, SUB, SBB, ANA, XRA, ORA, CMP).
    pub(super) fn alu_op(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.state.regs.a = self.alu_sub(value, false),
            3 => self.state.regs.a = self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cmp(value),
        }
    }

    /// INR. Carry is left alone.
    pub(super) fn alu_inc(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flags::AUX_CARRY, result & 0x0F == 0);
        self.set_zsp(result);
        result
    }

    /// DCR. Carry is left alone.
    pub(super) fn alu_dec(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flags::AUX_CARRY, result & 0x0F != 0x0F);
        self.set_zsp(result);
        result
    }

    /// DAD: HL += value, only CY is affected.
    pub(super) fn alu_dad(&mut self, value: u16) {
        let (result, carry) = self.state.regs.hl().overflowing_add(value);
        self.state.regs.set_hl(result);
        self.set_flag(Flags::CARRY, carry);
    }

    /// DAA: decimal-adjust A after a BCD addition.
    pub(super) fn alu_daa(&mut self) {
        let a = self.state.regs.a;
        let lsb = a & 0x0F;
        let msb = a >> 4;
        let mut carry = self.get_flag(Flags::CARRY);
        let mut correction = 0u8;

        if self.get_flag(Flags::AUX_CARRY) || lsb > 9 {
            correction += 0x06;
        }
        if carry || msb > 9 || (msb >= 9 && lsb > 9) {
            correction += 0x60;
            carry = true;
        }

        self.state.regs.a = self.add_core(a, correction, false);
        self.set_flag(Flags::CARRY, carry);
    }

    /// RLC, RRC, RAL and RAR, selected by bits 4..3 of the opcode.
    /// Only CY changes.
    pub(super) fn alu_rotate(&mut self, kind: u8) {
        let a = self.state.regs.a;
        let carry = self.get_flag(Flags::CARRY);
        let (result, carry_out) = match kind & 0x03 {
            0 => (a.rotate_left(1), a & 0x80 != 0),
            1 => (a.rotate_right(1), a & 0x01 != 0),
            2 => ((a << 1) | carry as u8, a & 0x80 != 0),
            _ => ((a >> 1) | ((carry as u8) << 7), a & 0x01 != 0),
        };
        self.state.regs.a = result;
        self.set_flag(Flags::CARRY, carry_out);
    }
}
