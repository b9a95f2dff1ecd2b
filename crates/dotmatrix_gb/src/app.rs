use dotmatrix_common::{App, Button};

use crate::{
    FrameOutcome, GameBoy, GameBoyConfig, LoadError, SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH,
};

/// Frontend-facing wrapper around a [`GameBoy`].
///
/// Implements the shared `App` trait so a windowed or headless frontend can
/// drive the machine one presented frame at a time.
#[derive(Default)]
pub struct GameBoyApp {
    should_exit: bool,
    gb: Option<GameBoy>,
    config: GameBoyConfig,
    frame_counter: u64,
    last_pc: u16,
    pc_stagnant_frames: u32,
}

impl GameBoyApp {
    pub fn new(config: GameBoyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace any running machine with one built around `rom`.
    ///
    /// On failure no machine is left loaded.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        self.stop_game();
        let gb = GameBoy::new(rom, &self.config)?;
        log::info!(
            "GB: loaded '{}' ({:?}, {} bytes)",
            gb.cartridge_title(),
            gb.controller_kind(),
            rom.len()
        );
        self.last_pc = gb.registers().pc;
        self.gb = Some(gb);
        Ok(())
    }

    pub fn stop_game(&mut self) {
        if self.gb.take().is_some() {
            log::info!("GB: game stopped after {} frames", self.frame_counter);
        }
        self.frame_counter = 0;
        self.pc_stagnant_frames = 0;
    }

    pub fn is_game_loaded(&self) -> bool {
        self.gb.is_some()
    }

    pub fn game_boy(&self) -> Option<&GameBoy> {
        self.gb.as_ref()
    }

    pub fn game_boy_mut(&mut self) -> Option<&mut GameBoy> {
        self.gb.as_mut()
    }

    /// Frames presented since the current game was loaded.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    fn log_progress(&mut self) {
        let Some(gb) = self.gb.as_ref() else {
            return;
        };

        let regs = gb.registers();
        if regs.pc == self.last_pc {
            self.pc_stagnant_frames = self.pc_stagnant_frames.saturating_add(1);
        } else {
            self.pc_stagnant_frames = 0;
            self.last_pc = regs.pc;
        }

        if self.frame_counter == 1 || self.frame_counter % 60 == 0 {
            log::debug!(
                "GB: frame={} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} ime={} halted={} IF=0x{:02X} IE=0x{:02X} LCDC=0x{:02X} LY={}",
                self.frame_counter,
                regs.pc,
                regs.sp,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                gb.cpu.ime,
                gb.cpu.halted,
                gb.interrupt_flags().bits(),
                gb.interrupt_enable(),
                gb.peek(0xFF40),
                gb.peek(0xFF44),
            );
        }

        if self.pc_stagnant_frames == 600 {
            log::warn!(
                "GB: PC unchanged for ~600 frames at 0x{:04X} (halted={} stopped={} locked={})",
                regs.pc,
                gb.cpu.halted,
                gb.cpu.is_stopped(),
                gb.cpu.is_locked(),
            );
        }
    }
}

impl App for GameBoyApp {
    fn init(&mut self) {
        log::info!("Game Boy init");
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        let Some(gb) = self.gb.as_mut() else {
            return;
        };

        let outcome = gb.run_frame(|frame| {
            let len = frame.len().min(screen_state.len());
            screen_state[..len].copy_from_slice(&frame[..len]);
        });

        if outcome == FrameOutcome::Completed {
            self.frame_counter = self.frame_counter.wrapping_add(1);
            self.log_progress();
        }
    }

    fn handle_button_event(&mut self, button: Button, is_down: bool) {
        log::debug!("GB button event: {:?} pressed={}", button, is_down);
        let Some(gb) = self.gb.as_mut() else {
            return;
        };
        if is_down {
            gb.press(button);
        } else {
            gb.release(button);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Game Boy exit");
        self.should_exit = true;
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        match self.gb.as_ref().map(GameBoy::cartridge_title) {
            Some(title) if !title.is_empty() => format!("dotmatrix - {}", title),
            _ => "dotmatrix".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FRAMEBUFFER_LEN;

    fn idle_rom() -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        // JR -2
        rom[0x100] = 0x18;
        rom[0x101] = 0xFE;
        rom[0x134..0x138].copy_from_slice(b"IDLE");
        rom
    }

    #[test]
    fn failed_load_leaves_no_game() {
        let mut app = GameBoyApp::default();
        app.load_rom(&idle_rom()).unwrap();
        assert!(app.is_game_loaded());

        assert_eq!(app.load_rom(&[]), Err(LoadError::EmptyRom));
        assert!(!app.is_game_loaded());
    }

    #[test]
    fn update_presents_frames_and_counts_them() {
        let mut app = GameBoyApp::default();
        app.load_rom(&idle_rom()).unwrap();
        assert_eq!(app.title(), "dotmatrix - IDLE");

        let mut screen = vec![0u8; FRAMEBUFFER_LEN];
        app.update(&mut screen);
        app.update(&mut screen);
        assert_eq!(app.frame_counter(), 2);
        // The idle cartridge never touches VRAM, so every pixel is opaque.
        assert!(screen.chunks_exact(4).all(|pixel| pixel[3] == 0xFF));

        app.stop_game();
        assert!(!app.is_game_loaded());
        assert_eq!(app.frame_counter(), 0);
        app.update(&mut screen);
        assert_eq!(app.title(), "dotmatrix");
    }

    #[test]
    fn exit_requests_shutdown() {
        let mut app = GameBoyApp::new(GameBoyConfig::builder().serial_echo(false).build());
        assert!(!app.should_exit());
        app.exit();
        assert!(app.should_exit());
    }
}
