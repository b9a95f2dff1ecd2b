use bitflags::bitflags;

/// IF register (0xFF0F).
pub const IF_ADDR: u16 = 0xFF0F;
/// IE register (0xFFFF).
pub const IE_ADDR: u16 = 0xFFFF;

bitflags! {
    /// Interrupt request / enable bits as laid out in IF and IE.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// Interrupt sources the dispatcher services, in priority order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Joypad,
}

impl Interrupt {
    /// Dispatch order: V-blank first, joypad last.
    pub const PRIORITY: [Interrupt; 4] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Joypad,
    ];

    #[inline]
    pub const fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::LcdStat => InterruptFlags::LCD_STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    #[inline]
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::VBlank => 0x0040,
            Interrupt::LcdStat => 0x0048,
            Interrupt::Timer => 0x0050,
            Interrupt::Joypad => 0x0060,
        }
    }

    /// Highest-priority source set in `pending`, if any.
    ///
    /// The serial bit is never serviced.
    pub fn highest(pending: InterruptFlags) -> Option<Interrupt> {
        Self::PRIORITY
            .into_iter()
            .find(|interrupt| pending.contains(interrupt.flag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_follows_priority_and_skips_serial() {
        let pending = InterruptFlags::JOYPAD | InterruptFlags::TIMER;
        assert_eq!(Interrupt::highest(pending), Some(Interrupt::Timer));
        assert_eq!(
            Interrupt::highest(InterruptFlags::all()),
            Some(Interrupt::VBlank)
        );
        assert_eq!(Interrupt::highest(InterruptFlags::SERIAL), None);
        assert_eq!(Interrupt::highest(InterruptFlags::empty()), None);
    }

    #[test]
    fn vectors_match_sources() {
        let vectors: Vec<u16> = Interrupt::PRIORITY.iter().map(|i| i.vector()).collect();
        assert_eq!(vectors, vec![0x40, 0x48, 0x50, 0x60]);
    }
}
