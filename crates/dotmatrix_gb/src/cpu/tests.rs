use super::*;
use crate::interrupts::{Interrupt, IE_ADDR, IF_ADDR};

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl TestBus {
    fn with_program(program: &[u8]) -> Self {
        let mut bus = Self::default();
        bus.memory[..program.len()].copy_from_slice(program);
        bus
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

fn cpu_at_zero() -> Cpu {
    let mut cpu = Cpu::new();
    cpu.regs.pc = 0x0000;
    cpu
}

#[test]
fn new_cpu_starts_in_post_boot_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs, Registers::POST_BOOT);
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);

    let boot = Cpu::new_at_boot_entry();
    assert_eq!(boot.regs.pc, 0x0000);
    assert_eq!(boot.regs.af(), 0x0000);
}

#[test]
fn reset_post_boot_keeps_opcode_count() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::with_program(&[0x00, 0x00, 0x3C]);
    for _ in 0..3 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.total_opcodes(), 3);

    cpu.reset_post_boot();
    assert_eq!(cpu.regs, Registers::POST_BOOT);
    assert_eq!(cpu.total_opcodes(), 3);
}

#[test]
fn nop_advances_pc() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::with_program(&[0x00]);

    let cycles = cpu.step(&mut bus);

    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.total_opcodes(), 1);
}

#[test]
fn f_register_low_nibble_reads_zero() {
    let mut regs = Registers::default();
    regs.set_af(0x12FF);
    assert_eq!(regs.af(), 0x12F0);
    regs.set_f(0x0F);
    assert_eq!(regs.f(), 0x00);
}

#[test]
fn ld_16bit_and_indirect_forms() {
    let mut cpu = cpu_at_zero();
    // LD BC,0x1234 ; LD (BC),A ; LD A,(BC)
    let mut bus = TestBus::with_program(&[0x01, 0x34, 0x12, 0x02, 0x0A]);
    cpu.regs.set_a(0xAB);

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.bc(), 0x1234);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(bus.memory[0x1234], 0xAB);

    cpu.regs.set_a(0x00);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a(), 0xAB);
    assert_eq!(cpu.regs.pc, 0x0005);
}

#[test]
fn ld_hl_increment_and_decrement() {
    let mut cpu = cpu_at_zero();
    // LD (HL+),A ; LD (HL-),A
    let mut bus = TestBus::with_program(&[0x22, 0x32]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.set_a(0x5A);

    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC001);

    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC001], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn inc_dec_8bit_update_flags_and_preserve_carry() {
    let mut cpu = cpu_at_zero();
    // INC B ; DEC B ; DEC B
    let mut bus = TestBus::with_program(&[0x04, 0x05, 0x05]);
    cpu.regs.set_b(0x0F);
    cpu.set_flag(Flag::C, true);

    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.b(), 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b(), 0x0F);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::N));

    cpu.regs.set_b(0x01);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.b(), 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn add_and_sub_set_half_carry_and_carry() {
    let mut cpu = cpu_at_zero();
    // ADD A,0x01 ; SUB 0x01 ; CP 0x10
    let mut bus = TestBus::with_program(&[0xC6, 0x01, 0xD6, 0x01, 0xFE, 0x10]);
    cpu.regs.set_a(0xFF);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0xFF);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    // CP leaves A alone.
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0xFF);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn push_pop_round_trip_and_pop_af_masks_flags() {
    let mut cpu = cpu_at_zero();
    // PUSH BC ; POP DE ; POP AF
    let mut bus = TestBus::with_program(&[0xC5, 0xD1, 0xF1]);
    cpu.regs.sp = 0xFFFE;
    cpu.regs.set_bc(0x1234);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x34);
    assert_eq!(bus.memory[0xFFFD], 0x12);

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.de(), 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFE);

    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x3F;
    bus.memory[0xFFFD] = 0x12;
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.af(), 0x1230);
}

#[test]
fn daa_adjusts_after_add_and_subtract() {
    let mut cpu = cpu_at_zero();
    // ADD A,0x38 ; DAA
    let mut bus = TestBus::with_program(&[0xC6, 0x38, 0x27]);
    cpu.regs.set_a(0x45);
    cpu.step(&mut bus);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.a(), 0x83);
    assert!(!cpu.get_flag(Flag::C));

    let mut cpu = cpu_at_zero();
    // SUB 0x15 ; DAA
    let mut bus = TestBus::with_program(&[0xD6, 0x15, 0x27]);
    cpu.regs.set_a(0x42);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x27);
    assert!(cpu.get_flag(Flag::N));

    let mut cpu = cpu_at_zero();
    // ADD A,0x01 ; DAA: 99 + 1 wraps to 00 with carry.
    let mut bus = TestBus::with_program(&[0xC6, 0x01, 0x27]);
    cpu.regs.set_a(0x99);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    let mut cpu = cpu_at_zero();
    // RLCA
    let mut bus = TestBus::with_program(&[0x07]);
    cpu.regs.set_a(0x80);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x01);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));

    let mut cpu = cpu_at_zero();
    // RLA with a clear carry and A = 0x80 leaves zero in A, Z still clear.
    let mut bus = TestBus::with_program(&[0x17]);
    cpu.regs.set_a(0x80);
    cpu.set_flag(Flag::C, false);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn cb_swap_bit_and_rotate() {
    let mut cpu = cpu_at_zero();
    // SWAP A ; BIT 7,H ; BIT 7,H ; RL C
    let mut bus = TestBus::with_program(&[0xCB, 0x37, 0xCB, 0x7C, 0xCB, 0x7C, 0xCB, 0x11]);
    cpu.regs.set_a(0xF0);
    cpu.regs.set_h(0x80);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x0F);
    assert_eq!(cpu.regs.f(), 0x00);

    cpu.set_flag(Flag::C, true);
    cpu.step(&mut bus);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    cpu.regs.set_h(0x00);
    cpu.step(&mut bus);
    assert!(cpu.get_flag(Flag::Z));

    cpu.regs.set_c(0x80);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.c(), 0x01);
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn cb_res_and_set_on_hl() {
    let mut cpu = cpu_at_zero();
    // SET 0,(HL) ; RES 7,(HL)
    let mut bus = TestBus::with_program(&[0xCB, 0xC6, 0xCB, 0xBE]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x81);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x01);
}

#[test]
fn jumps_calls_and_returns() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::default();
    // 0x0000: CALL 0x0010 ; 0x0010: JR +2 ; 0x0014: RET
    bus.memory[0x0000..0x0003].copy_from_slice(&[0xCD, 0x10, 0x00]);
    bus.memory[0x0010..0x0012].copy_from_slice(&[0x18, 0x02]);
    bus.memory[0x0014] = 0xC9;
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0010);
    assert_eq!(cpu.regs.sp, 0xFFFC);

    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0014);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_jr_not_taken_costs_less() {
    let mut cpu = cpu_at_zero();
    // JR NZ,-2
    let mut bus = TestBus::with_program(&[0x20, 0xFE]);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0002);

    cpu.regs.pc = 0x0000;
    cpu.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0000);
}

#[test]
fn ei_sets_ime_after_next_instruction() {
    let mut cpu = cpu_at_zero();
    // EI ; NOP
    let mut bus = TestBus::with_program(&[0xFB, 0x00]);

    cpu.step(&mut bus);
    assert!(!cpu.ime);

    cpu.step(&mut bus);
    assert!(cpu.ime);
}

#[test]
fn di_clears_ime_after_next_instruction() {
    let mut cpu = cpu_at_zero();
    // DI ; NOP
    let mut bus = TestBus::with_program(&[0xF3, 0x00]);
    cpu.ime = true;

    cpu.step(&mut bus);
    assert!(cpu.ime);

    cpu.step(&mut bus);
    assert!(!cpu.ime);
}

#[test]
fn reti_enables_ime_immediately() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::with_program(&[0xD9]);
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x34;
    bus.memory[0xFFFD] = 0x12;

    assert_eq!(cpu.step(&mut bus), 16);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn dispatch_pushes_pc_and_jumps_to_highest_priority_vector() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::default();
    cpu.ime = true;
    cpu.regs.pc = 0x1234;
    cpu.regs.sp = 0xFFFE;
    bus.memory[IE_ADDR as usize] = 0x05;
    bus.memory[IF_ADDR as usize] = 0x05;

    assert_eq!(cpu.service_interrupts(&mut bus), Some(Interrupt::VBlank));
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x34);
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x04);
    assert!(!cpu.ime);

    // IME is now clear, so the timer request waits.
    assert_eq!(cpu.service_interrupts(&mut bus), None);
    assert_eq!(cpu.regs.pc, 0x0040);
}

#[test]
fn disabled_sources_are_not_dispatched() {
    let mut cpu = cpu_at_zero();
    let mut bus = TestBus::default();
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x04;

    assert_eq!(cpu.service_interrupts(&mut bus), None);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0000);
}

#[test]
fn halt_wakes_without_dispatch_when_ime_clear() {
    let mut cpu = cpu_at_zero();
    // HALT ; INC A
    let mut bus = TestBus::with_program(&[0x76, 0x3C]);
    cpu.regs.set_a(0x00);

    cpu.step(&mut bus);
    assert!(cpu.halted);

    // Nothing pending: the CPU idles without fetching.
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0001);

    bus.memory[IE_ADDR as usize] = 0x04;
    bus.memory[IF_ADDR as usize] = 0x04;
    assert_eq!(cpu.service_interrupts(&mut bus), None);
    assert!(!cpu.halted);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x04);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x01);
}

#[test]
fn stop_waits_for_a_joypad_line() {
    let mut cpu = cpu_at_zero();
    // STOP 0 ; INC A
    let mut bus = TestBus::with_program(&[0x10, 0x00, 0x3C]);
    bus.memory[0xFF00] = 0xFF;
    cpu.regs.set_a(0x00);

    cpu.step(&mut bus);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0002);

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_stopped());

    bus.memory[0xFF00] = 0xEE;
    cpu.step(&mut bus);
    assert!(!cpu.is_stopped());
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x01);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn opcode_hole_locks_the_cpu() {
    let mut cpu = cpu_at_zero();
    // 0xDD is unassigned; the NOP after it must never run.
    let mut bus = TestBus::with_program(&[0xDD, 0x00]);

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.is_locked());
    assert_eq!(cpu.regs.pc, 0x0001);

    for _ in 0..4 {
        assert_eq!(cpu.step(&mut bus), 4);
    }
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cpu.total_opcodes(), 1);
}
