pub mod app;
pub mod button;

pub use app::App;
pub use button::Button;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn rgba(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Byte layout used by RGBA framebuffers: `[r, g, b, a]`.
    #[inline]
    pub const fn to_rgba_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_colors_are_opaque() {
        let c = Color::new_rgb(155, 188, 15);
        assert_eq!(c.rgba(), (155, 188, 15, 0xff));
        assert_eq!(c.to_rgba_bytes(), [155, 188, 15, 0xff]);
    }
}
