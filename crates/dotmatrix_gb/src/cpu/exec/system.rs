use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        4
    }

    /// STOP is two bytes; the padding byte is fetched and discarded.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _padding = self.fetch8(bus);
        self.stopped = true;
        self.halted = false;
        4
    }

    /// DI, applied once the following instruction completes.
    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime_disable_pending = true;
        self.ime_enable_pending = false;
        4
    }

    /// EI, applied once the following instruction completes.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime_enable_pending = true;
        self.ime_disable_pending = false;
        4
    }

    /// Opcode holes hard-lock the CPU until reset.
    pub(super) fn exec_opcode_hole(&mut self, opcode: u8) -> u32 {
        if !self.locked {
            log::error!(
                "CPU locked: invalid opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                opcode = opcode,
                pc = self.regs.pc.wrapping_sub(1),
                sp = self.regs.sp,
                af = self.regs.af(),
                bc = self.regs.bc(),
                de = self.regs.de(),
                hl = self.regs.hl(),
            );
        }
        self.locked = true;
        4
    }
}
