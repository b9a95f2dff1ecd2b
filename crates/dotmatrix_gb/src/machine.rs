mod boot;
mod bus;
mod cartridge;
mod gameboy;
mod joypad;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use cartridge::ControllerKind;
pub use gameboy::{FrameOutcome, GameBoy, PausePredicate};
pub use ppu::LcdMode;
pub use serial::SerialSink;

/// Total addressable memory for the Game Boy (64 KiB).
///
/// Work RAM, video RAM, OAM, I/O and high RAM live in one flat array; the
/// cartridge windows are routed to the `Cartridge` instead.
const MEMORY_SIZE: usize = 0x10000;
