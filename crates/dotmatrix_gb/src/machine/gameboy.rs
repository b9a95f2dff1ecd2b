use dotmatrix_common::Button;

use crate::config::GameBoyConfig;
use crate::cpu::{Cpu, Flag, Registers};
use crate::error::LoadError;
use crate::interrupts::InterruptFlags;
use crate::CYCLES_PER_FRAME;

use super::cartridge::{Cartridge, ControllerKind};
use super::ppu::{LcdMode, STAT_ADDR};
use super::serial::SerialSink;
use super::GameBoyBus;

/// Debugger hook consulted before each step while a pause is pending.
pub type PausePredicate = Box<dyn FnMut(&GameBoy) -> bool>;

/// How a call to [`GameBoy::run_frame`] ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The frame budget was used up and the frame was presented.
    Completed,
    /// A debug pause stopped the frame early; the next call resumes it.
    Paused,
}

/// High-level Game Boy machine.
///
/// Owns the CPU and the bus, and sequences CPU → timer → PPU → interrupt
/// dispatch for every step.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    /// Cycles already spent on the frame in progress.
    frame_cycles: u32,
    paused: bool,
    pause_pending: bool,
    pause_predicate: Option<PausePredicate>,
}

impl GameBoy {
    /// Build a machine around a cartridge image.
    ///
    /// With `config.boot_rom` the boot program runs first from 0x0000;
    /// otherwise the machine starts in the post-boot state at 0x0100.
    pub fn new(rom: &[u8], config: &GameBoyConfig) -> Result<Self, LoadError> {
        let cartridge = Cartridge::from_rom(rom)?;
        let mut bus = GameBoyBus::new(cartridge, config.boot_rom, config.serial_echo);

        let cpu = if config.boot_rom {
            Cpu::new_at_boot_entry()
        } else {
            bus.apply_post_boot_state();
            Cpu::new()
        };

        Ok(Self {
            cpu,
            bus,
            frame_cycles: 0,
            paused: false,
            pause_pending: false,
            pause_predicate: None,
        })
    }

    /// Execute one instruction and everything that follows it, returning
    /// the cycles it took.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);

        if self.bus.take_boot_exit() {
            self.finish_boot();
            return cycles;
        }

        self.bus.poll_serial();
        self.bus.tick(cycles);
        self.cpu.service_interrupts(&mut self.bus);
        cycles
    }

    fn finish_boot(&mut self) {
        self.cpu.reset_post_boot();
        self.bus.apply_post_boot_state();
        log::info!(
            "Boot complete: pc=0x{:04X} af=0x{:04X} sp=0x{:04X}",
            self.cpu.regs.pc,
            self.cpu.regs.af(),
            self.cpu.regs.sp
        );
    }

    /// Run until one frame's worth of cycles has elapsed, then hand the
    /// framebuffer to `present`.
    ///
    /// A debug pause can end the call early; the cycles already spent are
    /// kept and the next call picks the frame up where it stopped.
    pub fn run_frame<F>(&mut self, mut present: F) -> FrameOutcome
    where
        F: FnMut(&[u8]),
    {
        while self.frame_cycles < CYCLES_PER_FRAME {
            if self.paused {
                return FrameOutcome::Paused;
            }
            if self.pause_pending && self.pause_predicate_fires() {
                self.pause_pending = false;
                self.paused = true;
                log::debug!("Debug pause at pc=0x{:04X}", self.cpu.regs.pc);
                return FrameOutcome::Paused;
            }
            self.frame_cycles += self.step();
        }

        self.frame_cycles = 0;
        present(self.bus.ppu.framebuffer());
        FrameOutcome::Completed
    }

    fn pause_predicate_fires(&mut self) -> bool {
        let Some(mut predicate) = self.pause_predicate.take() else {
            return false;
        };
        let fire = predicate(self);
        self.pause_predicate = Some(predicate);
        fire
    }

    pub fn set_pause(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Arm the pause predicate: it is consulted before every step until it
    /// returns true.
    pub fn set_pause_pending(&mut self, pending: bool) {
        self.pause_pending = pending;
    }

    pub fn set_pause_predicate<P>(&mut self, predicate: P)
    where
        P: FnMut(&GameBoy) -> bool + 'static,
    {
        self.pause_predicate = Some(Box::new(predicate));
    }

    pub fn clear_pause_predicate(&mut self) {
        self.pause_predicate = None;
    }

    pub fn press(&mut self, button: Button) {
        if self.bus.joypad.press(button) {
            self.bus.request_interrupt(InterruptFlags::JOYPAD);
            log::debug!("Joypad interrupt requested by {:?}", button);
        }
    }

    pub fn release(&mut self, button: Button) {
        self.bus.joypad.release(button);
    }

    /// Press by joypad bit index (0-3 directional, 4-7 action).
    pub fn press_index(&mut self, index: u8) {
        match Button::from_index(index) {
            Some(button) => self.press(button),
            None => log::warn!("Ignoring press of unknown button index {}", index),
        }
    }

    pub fn release_index(&mut self, index: u8) {
        match Button::from_index(index) {
            Some(button) => self.release(button),
            None => log::warn!("Ignoring release of unknown button index {}", index),
        }
    }

    /// Button latch, one bit per button in index order, 0 = pressed.
    pub fn joypad_state(&self) -> u8 {
        self.bus.joypad.state()
    }

    /// Install (or remove) the receiver for serial diagnostic bytes.
    pub fn set_serial_sink(&mut self, sink: Option<SerialSink>) {
        self.bus.serial.set_sink(sink);
    }

    /// Every byte sent through the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial.output()
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.serial.take_output()
    }

    /// Latest rendered frame, 160×144 RGBA.
    pub fn frame_buffer(&self) -> &[u8] {
        self.bus.ppu.framebuffer()
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.regs
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.cpu.get_flag(flag)
    }

    pub fn total_opcodes(&self) -> u64 {
        self.cpu.total_opcodes()
    }

    /// Read memory without side effects.
    pub fn peek(&self, addr: u16) -> u8 {
        self.bus.peek(addr)
    }

    /// Opcode at PC and the two bytes after it.
    pub fn peek_opcode(&self) -> [u8; 3] {
        let pc = self.cpu.regs.pc;
        [
            self.peek(pc),
            self.peek(pc.wrapping_add(1)),
            self.peek(pc.wrapping_add(2)),
        ]
    }

    pub fn interrupt_flags(&self) -> InterruptFlags {
        self.bus.if_reg
    }

    pub fn interrupt_enable(&self) -> u8 {
        self.bus.ie_reg
    }

    /// LCD mode currently reported in STAT.
    pub fn lcd_mode(&self) -> LcdMode {
        LcdMode::from_stat(self.bus.memory[STAT_ADDR])
    }

    pub fn is_boot_mode(&self) -> bool {
        self.bus.boot_mode
    }

    pub fn controller_kind(&self) -> ControllerKind {
        self.bus.cartridge.kind()
    }

    pub fn cartridge_title(&self) -> &str {
        self.bus.cartridge.title()
    }

    pub fn rom_bank(&self) -> usize {
        self.bus.cartridge.rom_bank()
    }

    pub fn ram_bank(&self) -> usize {
        self.bus.cartridge.ram_bank()
    }

    pub fn ram_enabled(&self) -> bool {
        self.bus.cartridge.ram_enabled()
    }

    /// Cycles already spent on the frame in progress.
    pub fn frame_cycles(&self) -> u32 {
        self.frame_cycles
    }
}
