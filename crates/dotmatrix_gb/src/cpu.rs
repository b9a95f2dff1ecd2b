//! LR35902 instruction engine.
//!
//! `Cpu::step` executes one instruction and reports the clock cycles it
//! took; interrupt dispatch is a separate call so the machine can run the
//! timer and PPU in between.

mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use bus::Bus;
pub use regs::{Flag, RegisterPair, Registers};

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state, left when a joypad line reads low.
    stopped: bool,
    /// EI executed; armed at the end of EI, applied after the next
    /// instruction completes.
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Same latch for DI.
    ime_disable_pending: bool,
    ime_disable_delay: bool,
    /// Executed an opcode hole. The CPU idles until reset.
    locked: bool,
    total_opcodes: u64,
}

impl Cpu {
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Instructions executed since the CPU was created.
    #[inline]
    pub fn total_opcodes(&self) -> u64 {
        self.total_opcodes
    }
}

#[cfg(test)]
mod tests;
