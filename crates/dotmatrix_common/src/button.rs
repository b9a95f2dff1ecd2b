/// Console buttons in joypad bit order.
///
/// Indices 0-3 are the directional pad, 4-7 the action buttons. Mapping
/// host keys onto these is left to the frontend.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Button {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    A = 4,
    B = 5,
    Select = 6,
    Start = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
    ];

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Button> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub const fn is_directional(self) -> bool {
        (self as u8) < 4
    }
}
