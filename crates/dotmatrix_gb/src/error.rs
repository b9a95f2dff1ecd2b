use thiserror::Error;

/// Reasons a cartridge image is rejected at load time.
///
/// A failed load never leaves a half-initialised machine behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("cartridge image is empty")]
    EmptyRom,
    #[error("cartridge image is only {0} bytes, too short for a header")]
    HeaderTruncated(usize),
    #[error("cartridge image is {0} bytes, more than the 2 MiB bank range")]
    RomTooLarge(usize),
    #[error("unsupported bank controller type 0x{0:02X}")]
    UnsupportedController(u8),
}
