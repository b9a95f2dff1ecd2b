use super::super::Cpu;

impl Cpu {
    /// Advance the EI/DI latches once an instruction has completed.
    ///
    /// The instruction that set a latch only arms it; the change lands after
    /// the next instruction.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        }
        if self.ime_disable_delay {
            self.ime = false;
            self.ime_disable_delay = false;
        }
        if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
        if self.ime_disable_pending {
            self.ime_disable_pending = false;
            self.ime_disable_delay = true;
        }
    }
}
