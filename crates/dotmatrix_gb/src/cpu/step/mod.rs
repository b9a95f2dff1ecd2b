use super::{Bus, Cpu};

impl Cpu {
    /// Execute a single instruction and return the clock cycles it took.
    ///
    /// While halted, stopped or locked the CPU fetches nothing and each call
    /// accounts a 4-cycle idle slot so the rest of the machine keeps time.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.locked {
            return 4;
        }

        if self.stopped {
            // STOP ends when any joypad input line reads low.
            if bus.read8(0xFF00) & 0x0F != 0x0F {
                self.stopped = false;
            }
            return 4;
        }

        if self.halted {
            return 4;
        }

        let opcode = self.fetch8(bus);
        let cycles = self.exec_opcode(bus, opcode);
        self.total_opcodes += 1;
        self.apply_ime_delay();
        cycles
    }
}
