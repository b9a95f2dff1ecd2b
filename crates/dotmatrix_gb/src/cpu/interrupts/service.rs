use crate::interrupts::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR};

use super::super::{Bus, Cpu};

impl Cpu {
    /// Dispatch the highest-priority interrupt that is both requested and
    /// enabled, if IME allows it.
    ///
    /// A halted CPU wakes up on any pending source even with IME clear, in
    /// which case nothing is serviced. Dispatch pushes PC, clears the
    /// request bit and IME, and jumps to the source's vector.
    pub fn service_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<Interrupt> {
        if self.stopped {
            return None;
        }

        let enabled = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
        let requested = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        let pending = enabled & requested;
        if pending.is_empty() {
            return None;
        }

        if !self.ime {
            self.halted = false;
            return None;
        }

        let interrupt = Interrupt::highest(pending)?;
        self.ime = false;
        self.halted = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        bus.write8(IF_ADDR, (requested - interrupt.flag()).bits());
        self.regs.pc = interrupt.vector();

        log::debug!(
            "CPU interrupt {:?}: vector=0x{:04X} from pc=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
            interrupt,
            interrupt.vector(),
            pc,
            self.regs.sp,
            requested.bits(),
            enabled.bits(),
        );
        Some(interrupt)
    }
}
