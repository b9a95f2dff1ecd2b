use dotmatrix_common::Button;

/// P1 selector bit for the directional group (0 = selected).
const SELECT_DIRECTIONS: u8 = 0x10;
/// P1 selector bit for the action group (0 = selected).
const SELECT_ACTIONS: u8 = 0x20;

/// Button latch behind P1 (0xFF00).
///
/// `state` holds one bit per button in `Button` index order with a cleared
/// bit meaning "pressed"; bits 0-3 are the directional pad, 4-7 the
/// action buttons.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(super) struct Joypad {
    state: u8,
    select: u8,
}

impl Joypad {
    pub(super) fn new() -> Self {
        Self {
            state: 0xFF,
            select: SELECT_DIRECTIONS | SELECT_ACTIONS,
        }
    }

    /// P1 as the CPU sees it: bits 7-6 read 1, bits 5-4 echo the selector
    /// and the low nibble ANDs every selected group.
    pub(super) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & SELECT_DIRECTIONS == 0 {
            low &= self.state & 0x0F;
        }
        if self.select & SELECT_ACTIONS == 0 {
            low &= self.state >> 4;
        }
        0xC0 | self.select | low
    }

    /// Only the selector bits are writable.
    pub(super) fn write_select(&mut self, value: u8) {
        self.select = value & (SELECT_DIRECTIONS | SELECT_ACTIONS);
    }

    /// Mark `button` pressed. Returns true when this press should raise the
    /// joypad interrupt: the button was released before and its group is
    /// currently selected.
    pub(super) fn press(&mut self, button: Button) -> bool {
        let mask = 1u8 << button.index();
        let was_released = self.state & mask != 0;
        self.state &= !mask;

        let group = if button.is_directional() {
            SELECT_DIRECTIONS
        } else {
            SELECT_ACTIONS
        };
        was_released && self.select & group == 0
    }

    pub(super) fn release(&mut self, button: Button) {
        self.state |= 1u8 << button.index();
    }

    #[inline]
    pub(super) fn state(&self) -> u8 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_ands_selected_groups() {
        let mut joypad = Joypad::new();
        assert_eq!(joypad.read(), 0xFF);

        joypad.press(Button::Down);
        joypad.press(Button::Start);

        joypad.write_select(0x20);
        assert_eq!(joypad.read(), 0xE7);

        joypad.write_select(0x10);
        assert_eq!(joypad.read(), 0xD7);

        joypad.write_select(0x00);
        assert_eq!(joypad.read(), 0xC7);

        joypad.write_select(0x30);
        assert_eq!(joypad.read(), 0xFF);
    }

    #[test]
    fn release_sets_the_bit_again() {
        let mut joypad = Joypad::new();
        joypad.press(Button::A);
        assert_eq!(joypad.state(), 0xEF);
        joypad.release(Button::A);
        assert_eq!(joypad.state(), 0xFF);
    }

    #[test]
    fn press_only_signals_for_selected_group() {
        let mut joypad = Joypad::new();
        joypad.write_select(0x10);
        assert!(!joypad.press(Button::Right));
        assert!(joypad.press(Button::B));
        assert!(!joypad.press(Button::B));
    }
}
