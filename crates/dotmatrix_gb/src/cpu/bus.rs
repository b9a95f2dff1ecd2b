/// Memory interface the CPU executes against.
///
/// The system bus implements this over the full memory map; tests use a
/// flat 64 KiB array.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}
