use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotmatrix::{HeadlessInitInfo, DEFAULT_FRAMES};

const USAGE: &str = "Usage: dotmatrix <rom> [frames] [--boot-rom] [--dump <path>]";

fn main() -> Result<()> {
    env_logger::init();

    let mut rom_path = None;
    let mut frames = DEFAULT_FRAMES;
    let mut boot_rom = false;
    let mut dump_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--boot-rom" => boot_rom = true,
            "--dump" => match args.next() {
                Some(path) => dump_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--dump needs a file path.\n{}", USAGE);
                    std::process::exit(1);
                }
            },
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ if rom_path.is_none() => rom_path = Some(PathBuf::from(arg)),
            _ => match arg.parse::<u64>() {
                Ok(count) => frames = count,
                Err(_) => {
                    eprintln!("Unexpected argument '{}'.\n{}", arg, USAGE);
                    std::process::exit(1);
                }
            },
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!(
            "No ROM path provided.\n{}\n\
             For example: dotmatrix path/to/your.gb 1200 --dump frame.rgba",
            USAGE
        );
        std::process::exit(1);
    };

    log::info!("Playing ROM path: '{}'", rom_path.display());
    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM file {}", rom_path.display()))?;

    let init_info = match dump_path {
        Some(path) => HeadlessInitInfo::builder()
            .frames(frames)
            .boot_rom(boot_rom)
            .dump_path(path)
            .build(),
        None => HeadlessInitInfo::builder()
            .frames(frames)
            .boot_rom(boot_rom)
            .build(),
    };

    let report = dotmatrix::run_gameboy(&rom, init_info)?;
    log::info!("Presented {} frames", report.frames);

    if !report.serial.is_empty() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&report.serial)
            .context("failed to print serial output")?;
        stdout.flush().context("failed to print serial output")?;
    }

    Ok(())
}
