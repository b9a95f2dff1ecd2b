use super::Cpu;

/// A 16-bit register pair addressable as two 8-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair(u16);

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn wide(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_wide(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub fn set_high(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | ((value as u16) << 8);
    }

    #[inline]
    pub fn set_low(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }
}

/// LR35902 register file.
///
/// The pairs are kept private so every write to F goes through a mask:
/// the low nibble of F always reads as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    af: RegisterPair,
    bc: RegisterPair,
    de: RegisterPair,
    hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// Register values the boot program leaves behind when it hands control
    /// to the cartridge at 0x0100.
    pub const POST_BOOT: Registers = Registers {
        af: RegisterPair::new(0x01B0),
        bc: RegisterPair::new(0x0013),
        de: RegisterPair::new(0x00D8),
        hl: RegisterPair::new(0x014D),
        sp: 0xFFFE,
        pc: 0x0100,
    };

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.wide()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        self.af.set_wide(value & 0xFFF0);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.wide()
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc.set_wide(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.wide()
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de.set_wide(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.wide()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set_wide(value);
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.af.high()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_high(value);
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.af.low()
    }

    #[inline]
    pub fn set_f(&mut self, value: u8) {
        self.af.set_low(value & 0xF0);
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.bc.high()
    }

    #[inline]
    pub fn set_b(&mut self, value: u8) {
        self.bc.set_high(value);
    }

    #[inline]
    pub fn c(&self) -> u8 {
        self.bc.low()
    }

    #[inline]
    pub fn set_c(&mut self, value: u8) {
        self.bc.set_low(value);
    }

    #[inline]
    pub fn d(&self) -> u8 {
        self.de.high()
    }

    #[inline]
    pub fn set_d(&mut self, value: u8) {
        self.de.set_high(value);
    }

    #[inline]
    pub fn e(&self) -> u8 {
        self.de.low()
    }

    #[inline]
    pub fn set_e(&mut self, value: u8) {
        self.de.set_low(value);
    }

    #[inline]
    pub fn h(&self) -> u8 {
        self.hl.high()
    }

    #[inline]
    pub fn set_h(&mut self, value: u8) {
        self.hl.set_high(value);
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.hl.low()
    }

    #[inline]
    pub fn set_l(&mut self, value: u8) {
        self.hl.set_low(value);
    }
}

/// Flag bits in the F register.
///
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        (self.regs.f() & (1 << flag as u8)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let mask = 1 << flag as u8;
        let f = self.regs.f();
        self.regs.set_f(if value { f | mask } else { f & !mask });
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.set_f(0);
    }
}
