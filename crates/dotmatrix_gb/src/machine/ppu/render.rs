use dotmatrix_common::Color;

use crate::{BYTES_PER_PIXEL, SCREEN_HEIGHT, SCREEN_WIDTH};

use super::super::MEMORY_SIZE;
use super::{
    Ppu, BGP_ADDR, LCDC_ADDR, OBP0_ADDR, OBP1_ADDR, SCX_ADDR, SCY_ADDR, SHADES, WX_ADDR,
    WY_ADDR,
};

const OAM_BASE: usize = 0xFE00;
const SPRITE_COUNT: usize = 40;

/// Address of a tile's first byte. With unsigned addressing tiles start at
/// 0x8000; otherwise the index is signed around 0x9000.
fn tile_data_address(tile: u8, signed: bool) -> usize {
    if signed {
        (0x9000 + (tile as i8 as i32) * 16) as usize
    } else {
        0x8000 + tile as usize * 16
    }
}

/// 2-bit colour index of one pixel of a tile row.
fn tile_pixel(memory: &[u8; MEMORY_SIZE], tile_addr: usize, row: usize, col: u8) -> u8 {
    let lo = memory[tile_addr + row * 2];
    let hi = memory[tile_addr + row * 2 + 1];
    let bit = 7 - col;
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}

#[inline]
fn palette_shade(palette: u8, color_index: u8) -> u8 {
    (palette >> (color_index * 2)) & 0x03
}

impl Ppu {
    pub(super) fn render_line(&mut self, ly: u8, memory: &[u8; MEMORY_SIZE]) {
        let lcdc = memory[LCDC_ADDR];
        self.render_background(ly, lcdc, memory);
        if lcdc & 0x02 != 0 {
            self.render_sprites(ly, lcdc, memory);
        }
    }

    fn render_background(&mut self, ly: u8, lcdc: u8, memory: &[u8; MEMORY_SIZE]) {
        if lcdc & 0x01 == 0 {
            for x in 0..SCREEN_WIDTH {
                self.line_shades[x] = 0;
                self.put_pixel(x, ly as usize, SHADES[0]);
            }
            return;
        }

        let scy = memory[SCY_ADDR];
        let scx = memory[SCX_ADDR];
        let wy = memory[WY_ADDR];
        let window_left = memory[WX_ADDR] as i32 - 7;
        let window_line = lcdc & 0x20 != 0 && wy <= ly;
        let signed_tiles = lcdc & 0x10 == 0;
        let bg_map: usize = if lcdc & 0x08 != 0 { 0x9C00 } else { 0x9800 };
        let window_map: usize = if lcdc & 0x40 != 0 { 0x9C00 } else { 0x9800 };
        let bgp = memory[BGP_ADDR];

        for x in 0..SCREEN_WIDTH {
            let (map, map_x, map_y) = if window_line && x as i32 >= window_left {
                (window_map, (x as i32 - window_left) as u8, ly - wy)
            } else {
                (bg_map, scx.wrapping_add(x as u8), scy.wrapping_add(ly))
            };

            let tile = memory[map + (map_y as usize / 8) * 32 + map_x as usize / 8];
            let tile_addr = tile_data_address(tile, signed_tiles);
            let color_index = tile_pixel(memory, tile_addr, (map_y % 8) as usize, map_x % 8);
            let shade = palette_shade(bgp, color_index);

            self.line_shades[x] = shade;
            self.put_pixel(x, ly as usize, SHADES[shade as usize]);
        }
    }

    fn render_sprites(&mut self, ly: u8, lcdc: u8, memory: &[u8; MEMORY_SIZE]) {
        let height: i32 = if lcdc & 0x04 != 0 { 16 } else { 8 };
        let line = ly as i32;

        for sprite in 0..SPRITE_COUNT {
            let entry = OAM_BASE + sprite * 4;
            let top = memory[entry] as i32 - 16;
            let left = memory[entry + 1] as i32 - 8;
            let mut tile = memory[entry + 2];
            let attrs = memory[entry + 3];

            if line < top || line >= top + height {
                continue;
            }
            if height == 16 {
                tile &= 0xFE;
            }

            let mut row = line - top;
            if attrs & 0x40 != 0 {
                row = height - 1 - row;
            }
            let palette = if attrs & 0x10 != 0 {
                memory[OBP1_ADDR]
            } else {
                memory[OBP0_ADDR]
            };
            let behind_background = attrs & 0x80 != 0;
            let tile_addr = 0x8000 + tile as usize * 16;

            for col in 0..8u8 {
                let x = left + col as i32;
                if !(0..SCREEN_WIDTH as i32).contains(&x) {
                    continue;
                }
                let src_col = if attrs & 0x20 != 0 { 7 - col } else { col };
                let color_index = tile_pixel(memory, tile_addr, row as usize, src_col);
                if color_index == 0 {
                    continue;
                }
                if behind_background && self.line_shades[x as usize] != 0 {
                    continue;
                }
                let shade = palette_shade(palette, color_index);
                self.put_pixel(x as usize, ly as usize, SHADES[shade as usize]);
            }
        }
    }

    fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            panic!(
                "pixel ({}, {}) outside the {}x{} screen",
                x, y, SCREEN_WIDTH, SCREEN_HEIGHT
            );
        }
        let offset = (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL;
        self.framebuffer[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgba_bytes());
    }
}
