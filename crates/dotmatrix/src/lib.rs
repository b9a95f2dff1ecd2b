use std::path::PathBuf;

use anyhow::{Context, Result};
use typed_builder::TypedBuilder;

pub use dotmatrix_common::App;
use dotmatrix_gb::{GameBoyApp, GameBoyConfig};

/// Default number of frames a headless run presents.
pub const DEFAULT_FRAMES: u64 = 600;

#[derive(Debug, Clone, TypedBuilder)]
pub struct HeadlessInitInfo {
    #[builder(default = DEFAULT_FRAMES)]
    pub frames: u64,
    /// Run the built-in boot program before the cartridge.
    #[builder(default = false)]
    pub boot_rom: bool,
    /// Write the last presented frame here as raw RGBA.
    #[builder(default, setter(strip_option))]
    pub dump_path: Option<PathBuf>,
}

/// Drives an [`App`] without a window, presenting into an in-memory screen.
pub struct HeadlessContext {
    pub screen: Vec<u8>,
    pub frames: u64,
}

impl HeadlessContext {
    pub fn run(frames: u64, app: &mut impl App) -> Self {
        let width = app.width();
        let height = app.height();
        let mut screen = vec![0u8; (width * height * 4) as usize];

        app.init();
        let mut presented = 0;
        while presented < frames {
            if app.should_exit() {
                break;
            }
            app.update(&mut screen);
            presented += 1;
        }
        app.exit();

        Self {
            screen,
            frames: presented,
        }
    }
}

/// What a headless run left behind.
#[derive(Debug)]
pub struct RunReport {
    pub frames: u64,
    pub serial: Vec<u8>,
    pub screen: Vec<u8>,
}

pub fn run_gameboy(rom_data: &[u8], init_info: HeadlessInitInfo) -> Result<RunReport> {
    let HeadlessInitInfo {
        frames,
        boot_rom,
        dump_path,
    } = init_info;

    // The runner prints serial output itself once the run ends.
    let config = GameBoyConfig::builder()
        .boot_rom(boot_rom)
        .serial_echo(false)
        .build();
    let mut app = GameBoyApp::new(config);
    app.load_rom(rom_data).context("failed to load cartridge")?;
    log::info!("Running '{}' for {} frames", app.title(), frames);

    let context = HeadlessContext::run(frames, &mut app);

    let serial = app
        .game_boy_mut()
        .map(|gb| gb.take_serial_output())
        .unwrap_or_default();

    if let Some(path) = dump_path {
        std::fs::write(&path, &context.screen)
            .with_context(|| format!("failed to write frame dump to {}", path.display()))?;
        log::info!(
            "Wrote {}x{} RGBA frame to {}",
            app.width(),
            app.height(),
            path.display()
        );
    }

    Ok(RunReport {
        frames: context.frames,
        serial,
        screen: context.screen,
    })
}
