use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Handle a CB-prefixed instruction (rotates, shifts and bit ops).
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let on_hl = z == 6;

        match x {
            0 => {
                let value = self.read_reg8(bus, z);
                let result = self.alu_rotate_shift(y, value);
                self.write_reg8(bus, z, result);
                if on_hl { 16 } else { 8 }
            }
            1 => {
                // BIT y, r: C preserved, H set, N cleared.
                let value = self.read_reg8(bus, z);
                self.set_flag(Flag::Z, value & (1 << y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                if on_hl { 12 } else { 8 }
            }
            2 => {
                let value = self.read_reg8(bus, z) & !(1 << y);
                self.write_reg8(bus, z, value);
                if on_hl { 16 } else { 8 }
            }
            3 => {
                let value = self.read_reg8(bus, z) | (1 << y);
                self.write_reg8(bus, z, value);
                if on_hl { 16 } else { 8 }
            }
            _ => unreachable!(),
        }
    }
}
