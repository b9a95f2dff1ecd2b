use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the boot program leaves it in (PC = 0x0100).
    pub fn new() -> Self {
        Self {
            regs: Registers::POST_BOOT,
            ime: false,
            halted: false,
            stopped: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            ime_disable_pending: false,
            ime_disable_delay: false,
            locked: false,
            total_opcodes: 0,
        }
    }

    /// CPU at power-on, about to run the boot program from 0x0000.
    pub fn new_at_boot_entry() -> Self {
        Self {
            regs: Registers::default(),
            ..Self::new()
        }
    }

    /// Re-initialise to the cartridge-execution defaults.
    ///
    /// Called when the boot program unmaps itself. The opcode counter is
    /// kept so debuggers see a continuous count.
    pub fn reset_post_boot(&mut self) {
        *self = Self {
            total_opcodes: self.total_opcodes,
            ..Self::new()
        };
    }
}
