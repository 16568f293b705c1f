use super::alu::{res_bit, set_bit};
use super::*;
use crate::error::Error;

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

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn peek8(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }
}

/// CPU in its post-boot state with `program` placed at PC (0x0100).
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let cpu = Cpu::new();
    let mut bus = TestBus::default();
    let start = cpu.regs.pc as usize;
    bus.memory[start..start + program.len()].copy_from_slice(program);
    (cpu, bus)
}

fn step(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    cpu.step(bus).unwrap()
}

#[test]
fn power_on_state_matches_dmg_boot_rom() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
    assert_eq!(cpu.mode(), CpuMode::Running);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn power_up_with_zero_header_checksum_clears_h_and_c() {
    let mut cpu = Cpu::new();
    cpu.power_up(0x00);
    assert_eq!(cpu.regs.f, 0x80);

    cpu.power_up(0x33);
    assert_eq!(cpu.regs.f, 0xB0);
}

#[test]
fn nop_advances_pc() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    let before = cpu.regs;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cycles, 1);
    assert_eq!(cpu.cycles(), 1);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(
        Registers {
            pc: before.pc,
            ..cpu.regs
        },
        before
    );
}

#[test]
fn ld_sp_d16_loads_little_endian_immediate() {
    let (mut cpu, mut bus) = setup(&[]);
    cpu.regs.pc = 0x0000;
    bus.memory[0x0000..0x0003].copy_from_slice(&[0x31, 0xFE, 0xFF]);
    cpu.regs.sp = 0;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cycles, 3);
}

#[test]
fn inc_b_wraps_and_preserves_carry() {
    // INC B
    let (mut cpu, mut bus) = setup(&[0x04, 0x04]);
    cpu.regs.b = 0xFF;
    cpu.regs.f = 0x50; // N and C set

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    cpu.clear_flags();
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0x01);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn dec_sets_subtract_and_half_borrow() {
    // DEC C
    let (mut cpu, mut bus) = setup(&[0x0D]);
    cpu.regs.c = 0x10;
    cpu.regs.f = 0x00;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.c, 0x0F);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
}

#[test]
fn xor_a_clears_accumulator_and_flags() {
    // XOR A
    let (mut cpu, mut bus) = setup(&[0xAF]);
    cpu.regs.a = 0x3C;
    cpu.regs.f = 0x70;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0x80);
}

#[test]
fn add_flags_hold_for_all_operands() {
    let mut cpu = Cpu::new();
    for a in 0..=0xFFu8 {
        for b in 0..=0xFFu8 {
            cpu.regs.a = a;
            let result = cpu.alu_add(b, false);
            let sum = a as u16 + b as u16;

            assert_eq!(result, sum as u8);
            assert_eq!(cpu.get_flag(Flag::Z), sum as u8 == 0, "Z for {a:02X}+{b:02X}");
            assert_eq!(cpu.get_flag(Flag::C), sum > 0xFF, "C for {a:02X}+{b:02X}");
            assert_eq!(
                cpu.get_flag(Flag::H),
                (a & 0x0F) + (b & 0x0F) > 0x0F,
                "H for {a:02X}+{b:02X}"
            );
            assert!(!cpu.get_flag(Flag::N));
        }
    }
}

#[test]
fn adc_and_sbc_use_incoming_carry() {
    // ADC A,B ; SBC A,B
    let (mut cpu, mut bus) = setup(&[0x88, 0x98]);
    cpu.regs.a = 0x0E;
    cpu.regs.b = 0x01;
    cpu.set_flag(Flag::C, true);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    cpu.set_flag(Flag::C, true);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x0E);
    assert!(cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn cp_only_updates_flags() {
    // CP $42
    let (mut cpu, mut bus) = setup(&[0xFE, 0x42]);
    cpu.regs.a = 0x42;

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 2);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn daa_corrects_bcd_addition_and_subtraction() {
    // ADD A,B ; DAA ; SUB B ; DAA
    let (mut cpu, mut bus) = setup(&[0x80, 0x27, 0x90, 0x27]);
    cpu.regs.a = 0x45;
    cpu.regs.b = 0x38;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x45);
    assert!(cpu.get_flag(Flag::N));

    // 0x99 + 0x01 = 0x100 in BCD: A=00, Z and C set.
    let (mut cpu, mut bus) = setup(&[0xC6, 0x01, 0x27]);
    cpu.regs.a = 0x99;
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::H));
}

#[test]
fn add_hl_rr_carries_from_bits_11_and_15() {
    // ADD HL,BC ; ADD HL,SP
    let (mut cpu, mut bus) = setup(&[0x09, 0x39]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x1234);
    cpu.regs.sp = 0xE000;
    cpu.regs.f = 0x80;

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cycles, 2);
    assert_eq!(cpu.regs.hl(), 0x2233);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.hl(), 0x0233);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::H));
}

#[test]
fn add_hl_half_carry_includes_low_byte_carry() {
    // 0x0FFF + 0x0001: the low byte carries into the high nibble add.
    let (mut cpu, mut bus) = setup(&[0x19]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_de(0x0001);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn add_sp_and_ld_hl_sp_use_signed_offsets() {
    // ADD SP,-1 ; LD HL,SP+2 ; LD SP,HL
    let (mut cpu, mut bus) = setup(&[0xE8, 0xFF, 0xF8, 0x02, 0xF9]);
    cpu.regs.sp = 0x1000;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.sp, 0x0FFF);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.hl(), 0x1001);
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));

    cpu.regs.set_hl(0xC123);
    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.sp, 0xC123);
}

#[test]
fn ld_indirect_forms_move_through_memory() {
    // LD (HL+),A ; LD (HL-),A ; LD A,(BC) ; LD ($C000),A ; LD A,($C001)
    let (mut cpu, mut bus) = setup(&[0x22, 0x32, 0x0A, 0xEA, 0x00, 0xC0, 0xFA, 0x01, 0xC0]);
    cpu.regs.a = 0xAB;
    cpu.regs.set_hl(0xC100);
    cpu.regs.set_bc(0xC200);
    bus.memory[0xC200] = 0x5A;
    bus.memory[0xC001] = 0x77;

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(bus.memory[0xC100], 0xAB);
    assert_eq!(cpu.regs.hl(), 0xC101);

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(bus.memory[0xC101], 0xAB);
    assert_eq!(cpu.regs.hl(), 0xC100);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x5A);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(bus.memory[0xC000], 0x5A);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x77);
    assert_eq!(cpu.regs.pc, 0x0109);
}

#[test]
fn ldh_forms_address_high_page() {
    // LDH ($80),A ; LDH A,(C) ; LDH (C),A ; LDH A,($81)
    let (mut cpu, mut bus) = setup(&[0xE0, 0x80, 0xF2, 0xE2, 0xF0, 0x81]);
    cpu.regs.a = 0x12;
    cpu.regs.c = 0x81;
    bus.memory[0xFF81] = 0x34;

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(bus.memory[0xFF80], 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x34);

    cpu.regs.a = 0x56;
    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xFF81], 0x56);

    cpu.regs.a = 0;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x56);
}

#[test]
fn ld_a16_sp_stores_little_endian() {
    let (mut cpu, mut bus) = setup(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xBEEF;

    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(bus.memory[0xC000], 0xEF);
    assert_eq!(bus.memory[0xC001], 0xBE);
}

#[test]
fn hl_operands_cost_one_cycle_per_access() {
    // LD B,(HL) ; LD (HL),$99 ; INC (HL) ; ADD A,(HL) ; RLC (HL) ; BIT 0,(HL)
    let (mut cpu, mut bus) = setup(&[0x46, 0x36, 0x99, 0x34, 0x86, 0xCB, 0x06, 0xCB, 0x46]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x10;

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.b, 0x10);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(bus.memory[0xC000], 0x99);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(bus.memory[0xC000], 0x9A);

    assert_eq!(step(&mut cpu, &mut bus), 2);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(bus.memory[0xC000], 0x35);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.cycles(), 2 + 3 + 3 + 2 + 4 + 3);
}

#[test]
fn push_then_pop_restores_word_and_stack_pointer() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();

    for word in [0x0000, 0x1234, 0xBEEF, 0xFFFF] {
        cpu.regs.sp = 0xDFF0;
        cpu.push(&mut bus, word);
        assert_eq!(cpu.regs.sp, 0xDFEE);
        assert_eq!(bus.memory[0xDFEF], (word >> 8) as u8);
        assert_eq!(bus.memory[0xDFEE], word as u8);
        assert_eq!(cpu.pop(&mut bus), word);
        assert_eq!(cpu.regs.sp, 0xDFF0);
    }
}

#[test]
fn push_and_pop_roundtrip_and_pop_af_masks_low_flags() {
    // PUSH BC ; POP DE ; POP AF
    let (mut cpu, mut bus) = setup(&[0xC5, 0xD1, 0xF1]);
    cpu.regs.sp = 0xFFFE;
    cpu.regs.set_bc(0x1234);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.sp, 0xFFFC);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.de(), 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFE);

    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x3F;
    bus.memory[0xFFFD] = 0x12;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0x30);
}

#[test]
fn call_then_ret_returns_after_call() {
    let (mut cpu, mut bus) = setup(&[]);
    cpu.regs.pc = 0x0200;
    bus.memory[0x0200..0x0203].copy_from_slice(&[0xCD, 0x50, 0x01]); // CALL $0150
    bus.memory[0x0150] = 0xC9; // RET
    let sp = cpu.regs.sp;

    assert_eq!(step(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.regs.pc, 0x0150);
    assert_eq!(cpu.regs.sp, sp.wrapping_sub(2));

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(cpu.regs.sp, sp);
}

#[test]
fn jumps_land_on_their_targets() {
    let (mut cpu, mut bus) = setup(&[0xC3, 0x00, 0x02]); // JP $0200
    bus.memory[0x0200..0x0202].copy_from_slice(&[0x18, 0x10]); // JR +16
    bus.memory[0x0212..0x0214].copy_from_slice(&[0x18, 0xFE]); // JR -2
    cpu.regs.set_hl(0x4000);
    bus.memory[0x0214] = 0xE9; // JP HL (unreached)

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0200);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.pc, 0x0212);

    // JR -2 jumps onto itself.
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0212);

    cpu.regs.pc = 0x0214;
    assert_eq!(step(&mut cpu, &mut bus), 1);
    assert_eq!(cpu.regs.pc, 0x4000);
}

#[test]
fn rst_pushes_return_address_and_jumps_to_vector() {
    let (mut cpu, mut bus) = setup(&[0xEF]); // RST $28
    let sp = cpu.regs.sp;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(cpu.regs.sp, sp.wrapping_sub(2));
    assert_eq!(cpu.pop(&mut bus), 0x0101);
}

#[test]
fn untaken_conditionals_only_advance_pc() {
    // Z is set after power-up, so every NZ form falls through.
    let cases: [(&[u8], u32); 4] = [
        (&[0x20, 0x10], 2),       // JR NZ
        (&[0xC2, 0x00, 0x40], 3), // JP NZ
        (&[0xC4, 0x00, 0x40], 3), // CALL NZ
        (&[0xC0], 2),             // RET NZ
    ];

    for (program, cost) in cases {
        let (mut cpu, mut bus) = setup(program);
        assert!(cpu.get_flag(Flag::Z));
        let regs = cpu.regs;
        let memory = bus.memory;

        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cycles, cost, "cycles for {:02X}", program[0]);
        assert_eq!(cpu.regs.pc, regs.pc + program.len() as u16);
        assert_eq!(
            Registers {
                pc: regs.pc,
                ..cpu.regs
            },
            regs
        );
        assert!(bus.memory == memory, "memory changed by {:02X}", program[0]);
    }
}

#[test]
fn taken_conditionals_charge_extra_cycles() {
    let cases: [(&[u8], u32, u16); 4] = [
        (&[0x28, 0x10], 3, 0x0112),       // JR Z
        (&[0xCA, 0x00, 0x40], 4, 0x4000), // JP Z
        (&[0xCC, 0x00, 0x40], 6, 0x4000), // CALL Z
        (&[0xC8], 5, 0xC0DE),             // RET Z
    ];

    for (program, cost, target) in cases {
        let (mut cpu, mut bus) = setup(program);
        cpu.regs.sp = 0xDFF0;
        bus.memory[0xDFF0] = 0xDE;
        bus.memory[0xDFF1] = 0xC0;

        let cycles = step(&mut cpu, &mut bus);

        assert_eq!(cycles, cost, "cycles for {:02X}", program[0]);
        assert_eq!(cpu.regs.pc, target, "target for {:02X}", program[0]);
    }
}

#[test]
fn bit_tests_without_mutating() {
    // BIT 7,H
    let (mut cpu, mut bus) = setup(&[0xCB, 0x7C, 0xCB, 0x7C]);
    cpu.regs.h = 0x80;
    cpu.regs.f = 0x50; // N and C set

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.h, 0x80);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
    assert!(cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
    assert_eq!(cpu.regs.pc, 0x0102);

    cpu.regs.h = 0x7F;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.h, 0x7F);
    assert!(cpu.get_flag(Flag::Z));
}

#[test]
fn set_and_res_touch_exactly_one_bit() {
    for value in [0x00u8, 0x5A, 0xA5, 0xFF] {
        for bit in 0..8 {
            let set = set_bit(bit, value);
            let res = res_bit(bit, value);
            assert_eq!(set ^ value, (set ^ value) & (1 << bit));
            assert_eq!(res ^ value, (res ^ value) & (1 << bit));
            assert_ne!(set & (1 << bit), 0);
            assert_eq!(res & (1 << bit), 0);
            if value & (1 << bit) == 0 {
                assert_eq!(res_bit(bit, set_bit(bit, value)), value);
            }
        }
    }
}

#[test]
fn cb_set_and_res_execute_on_registers_and_memory() {
    // SET 3,B ; RES 7,(HL) ; SET 0,(HL)
    let (mut cpu, mut bus) = setup(&[0xCB, 0xD8, 0xCB, 0xBE, 0xCB, 0xC6]);
    cpu.regs.b = 0x00;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0xFE;
    let flags = cpu.regs.f;

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.b, 0x08);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(bus.memory[0xC000], 0x7E);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.memory[0xC000], 0x7F);
    assert_eq!(cpu.regs.f, flags);
}

#[test]
fn cb_shifts_set_carry_from_shifted_out_bit() {
    // SLA A ; SRA A ; SRL A ; SWAP A ; RR A
    let (mut cpu, mut bus) = setup(&[0xCB, 0x27, 0xCB, 0x2F, 0xCB, 0x3F, 0xCB, 0x37, 0xCB, 0x1F]);
    cpu.regs.a = 0xC1;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x82);
    assert!(cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xC1);
    assert!(!cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x60);
    assert!(cpu.get_flag(Flag::C));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x06);
    assert!(!cpu.get_flag(Flag::C));

    cpu.set_flag(Flag::C, true);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    // RLCA with A=0 would set Z in the CB form.
    let (mut cpu, mut bus) = setup(&[0x07, 0x17]);
    cpu.regs.a = 0x00;
    cpu.regs.f = 0x80;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(!cpu.get_flag(Flag::Z));

    cpu.regs.a = 0x80;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
}

#[test]
fn cpl_scf_ccf_update_flags() {
    let (mut cpu, mut bus) = setup(&[0x2F, 0x37, 0x3F]);
    cpu.regs.a = 0x0F;
    cpu.regs.f = 0x80;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xF0);
    assert_eq!(cpu.regs.f, 0xE0);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f, 0x90);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f, 0x80);
}

#[test]
fn read16_is_little_endian_and_wraps() {
    let mut bus = TestBus::default();
    for (addr, value) in [(0xC000u16, 0x1234u16), (0xFFFF, 0xABCD), (0x0000, 0x00FF)] {
        bus.write8(addr, value as u8);
        bus.write8(addr.wrapping_add(1), (value >> 8) as u8);
        assert_eq!(bus.read16(addr), value);
    }

    bus.write16(0xD000, 0xBEEF);
    assert_eq!(bus.memory[0xD000], 0xEF);
    assert_eq!(bus.memory[0xD001], 0xBE);
}

#[test]
fn halt_and_stop_park_the_cpu() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    assert_eq!(step(&mut cpu, &mut bus), 1);
    assert!(cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x0101);

    // Nothing is retired while halted.
    assert_eq!(step(&mut cpu, &mut bus), 0);
    assert_eq!(cpu.regs.pc, 0x0101);

    // STOP is two bytes long.
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);
    step(&mut cpu, &mut bus);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.mode(), CpuMode::Stopped);
    assert_eq!(cpu.regs.pc, 0x0102);

    cpu.reset();
    assert_eq!(cpu.mode(), CpuMode::Running);
}

#[test]
fn ei_takes_effect_after_the_next_instruction() {
    // EI ; NOP ; DI ; EI ; DI
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0xF3, 0xFB, 0xF3]);

    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
    step(&mut cpu, &mut bus);
    assert!(cpu.ime);

    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);

    // DI right after EI cancels the pending enable.
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
}

#[test]
fn reti_enables_interrupts_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xDFF0;
    bus.memory[0xDFF0] = 0x34;
    bus.memory[0xDFF1] = 0x12;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn unimplemented_opcode_is_fatal_and_leaves_state_untouched() {
    let (mut cpu, mut bus) = setup(&[0xD3]);
    let regs = cpu.regs;

    let err = cpu.step(&mut bus).unwrap_err();

    assert!(matches!(
        err,
        Error::UnimplementedOpcode {
            opcode: 0xD3,
            addr: 0x0100
        }
    ));
    assert_eq!(cpu.regs, regs);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn self_modifying_code_is_fetched_fresh() {
    // LD A,$04 ; LD ($0105),A ; <patched to INC B>
    let (mut cpu, mut bus) = setup(&[0x3E, 0x04, 0xEA, 0x05, 0x01, 0x00]);
    cpu.regs.b = 0;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 1);
}

#[test]
fn register_halves_stay_in_sync_with_pairs() {
    let mut regs = Registers::default();
    for pair in [Pair::BC, Pair::DE, Pair::HL] {
        regs.set_pair(pair, 0xA1B2);
        assert_eq!(regs.high(pair), 0xA1);
        assert_eq!(regs.low(pair), 0xB2);

        regs.set_low(pair, 0xFF);
        regs.inc_pair(pair);
        assert_eq!(regs.pair(pair), 0xA200);

        regs.set_pair(pair, 0x0000);
        regs.dec_pair(pair);
        assert_eq!(regs.pair(pair), 0xFFFF);
    }

    regs.set_pair(Pair::AF, 0x12FF);
    assert_eq!(regs.pair(Pair::AF), 0x12F0);
}
