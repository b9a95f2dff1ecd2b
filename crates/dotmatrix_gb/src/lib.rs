pub mod app;
pub mod config;
pub mod cpu;
pub mod error;
pub mod interrupts;
pub mod machine;

pub use app::GameBoyApp;
pub use config::GameBoyConfig;
pub use dotmatrix_common::Button;
pub use error::LoadError;
pub use machine::{ControllerKind, FrameOutcome, GameBoy, SerialSink};

/// Logical screen width in pixels for the DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Default integer scaling factor for windowed frontends.
pub const SCREEN_SCALE: u32 = 4;
/// The framebuffer stores one RGBA quad per pixel.
pub const BYTES_PER_PIXEL: usize = 4;
/// Length in bytes of a full RGBA frame.
pub const FRAMEBUFFER_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL;
/// CPU clock cycles in one video frame (154 lines of 456 cycles).
pub const CYCLES_PER_FRAME: u32 = 70_224;
