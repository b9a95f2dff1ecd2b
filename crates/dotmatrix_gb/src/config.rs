use typed_builder::TypedBuilder;

/// Start-up options for a [`GameBoy`](crate::GameBoy).
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct GameBoyConfig {
    /// Map the built-in boot program over 0x0000-0x00FF and start at PC 0.
    /// When false the machine starts in the post-boot state at 0x0100.
    #[builder(default = false)]
    pub boot_rom: bool,
    /// Mirror bytes written through the serial sentinel to the log.
    #[builder(default = true)]
    pub serial_echo: bool,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
