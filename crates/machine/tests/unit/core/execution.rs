//! # Execution Tests
//!
//! Each test loads a short program, sets registers directly, and steps the
//! machine one instruction at a time.

use pretty_assertions::assert_eq;
use rstest::rstest;
use umvm_core::VmError;
use umvm_core::core::Flow;

use crate::common::builder::*;
use crate::common::harness::TestContext;

#[rstest]
#[case(3, 0xFFFF_FFFF, 1, 0)]
#[case(3, 0x8000_0000, 0x8000_0000, 0)]
#[case(3, 2, 40, 42)]
#[case(4, 0x1_0000, 0x1_0000, 0)]
#[case(4, 0xFFFF_FFFF, 2, 0xFFFF_FFFE)]
#[case(4, 6, 7, 42)]
#[case(5, 85, 2, 42)]
#[case(5, 0xFFFF_FFFF, 0x10, 0x0FFF_FFFF)]
#[case(5, 3, 7, 0)]
#[case(6, 0xFFFF_FFFF, 0xFFFF_FFFF, 0)]
#[case(6, 0, 0, 0xFFFF_FFFF)]
#[case(6, 0xF0F0_F0F0, 0xFF00_FF00, 0x0FFF_0FFF)]
fn test_binary_operations(
    #[case] opcode: u32,
    #[case] b: u32,
    #[case] c: u32,
    #[case] expected: u32,
) {
    let mut ctx = TestContext::new(&[op(opcode, 1, 2, 3), halt()]);
    ctx.set_reg(2, b);
    ctx.set_reg(3, c);
    assert_eq!(ctx.step().unwrap(), Flow::Continue);
    assert_eq!(ctx.reg(1), expected);
    assert_eq!(ctx.pc(), 1);
}

#[test]
fn test_conditional_move_taken() {
    let mut ctx = TestContext::new(&[cmov(1, 2, 3), halt()]);
    ctx.set_reg(1, 5);
    ctx.set_reg(2, 9);
    ctx.set_reg(3, 1);
    ctx.steps(1);
    assert_eq!(ctx.reg(1), 9);
}

#[test]
fn test_conditional_move_not_taken() {
    let mut ctx = TestContext::new(&[cmov(1, 2, 3), halt()]);
    ctx.set_reg(1, 5);
    ctx.set_reg(2, 9);
    ctx.steps(1);
    assert_eq!(ctx.reg(1), 5);
}

#[test]
fn test_divide_by_zero_faults() {
    let mut ctx = TestContext::new(&[div(1, 2, 3), halt()]);
    ctx.set_reg(1, 77);
    ctx.set_reg(2, 10);
    assert!(matches!(ctx.step(), Err(VmError::DivisionByZero)));
    assert_eq!(ctx.reg(1), 77);
}

#[test]
fn test_load_immediate_uses_its_own_register_field() {
    // Bits 8:6 of this word are 0b001; the destination is bits 27:25.
    let word = orto(5, 0x40);
    let mut ctx = TestContext::new(&[word, halt()]);
    ctx.steps(1);
    assert_eq!(ctx.reg(5), 0x40);
    assert_eq!(ctx.reg(1), 0);
}

#[test]
fn test_load_immediate_max_value() {
    let mut ctx = TestContext::new(&[orto(0, 0x01FF_FFFF), halt()]);
    ctx.steps(1);
    assert_eq!(ctx.reg(0), 0x01FF_FFFF);
}

#[test]
fn test_halt_returns_halt_flow() {
    let mut ctx = TestContext::new(&[halt()]);
    assert_eq!(ctx.step().unwrap(), Flow::Halt);
    assert_eq!(ctx.pc(), 1);
}

#[test]
fn test_allocate_write_read() {
    let mut ctx = TestContext::new(&[
        orto(1, 8),
        alloc(2, 1),    // r2 = alloc(8)
        orto(3, 5),
        orto(4, 1234),
        set(2, 3, 4),   // seg[r2][5] = 1234
        get(5, 2, 3),   // r5 = seg[r2][5]
        halt(),
    ]);
    ctx.run().unwrap();
    assert_eq!(ctx.reg(2), 1);
    assert_eq!(ctx.reg(5), 1234);
    assert_eq!(ctx.sim.machine.memory.segment(1).unwrap().len(), 8);
}

#[test]
fn test_read_out_of_bounds_faults() {
    let mut ctx = TestContext::new(&[orto(1, 2), alloc(2, 1), orto(3, 2), get(4, 2, 3), halt()]);
    let err = ctx.run().unwrap_err();
    assert!(matches!(
        err,
        VmError::OffsetOutOfBounds { handle: 1, offset: 2, len: 2 }
    ));
}

#[test]
fn test_free_releases_segment() {
    let mut ctx = TestContext::new(&[orto(1, 2), alloc(2, 1), free(2), get(4, 2, 0), halt()]);
    let err = ctx.run().unwrap_err();
    assert!(matches!(err, VmError::InactiveSegment(1)));
}

#[test]
fn test_free_program_segment_faults() {
    let mut ctx = TestContext::new(&[free(0), halt()]);
    assert!(matches!(ctx.step(), Err(VmError::FreeProgramSegment)));
}

#[test]
fn test_output_writes_low_byte() {
    let mut ctx = TestContext::new(&[orto(1, 255), out(1), orto(1, 0), out(1), halt()]);
    ctx.run().unwrap();
    assert_eq!(ctx.output(), &[255, 0]);
}

#[test]
fn test_output_above_255_faults() {
    let mut ctx = TestContext::new(&[orto(1, 256), out(1), halt()]);
    assert!(matches!(ctx.run(), Err(VmError::OutputOutOfRange(256))));
    assert!(ctx.output().is_empty());
}

#[test]
fn test_input_reads_bytes_then_end_of_stream() {
    let mut ctx = TestContext::with_input(&[inp(1), inp(2), inp(3), halt()], &[0x00, 0xFF]);
    ctx.run().unwrap();
    assert_eq!(ctx.reg(1), 0x00);
    assert_eq!(ctx.reg(2), 0xFF);
    assert_eq!(ctx.reg(3), 0xFFFF_FFFF);
}

#[test]
fn test_load_program_from_zero_is_a_jump() {
    let mut ctx = TestContext::new(&[orto(1, 3), load(0, 1), orto(2, 99), halt()]);
    ctx.run().unwrap();
    assert_eq!(ctx.reg(2), 0);
    assert_eq!(ctx.sim.stats.instructions_retired, 3);
}

#[test]
fn test_load_program_replaces_segment_zero_and_jumps() {
    let mut ctx = TestContext::new(&[
        orto(1, 3),
        alloc(2, 1), // r2 = 3-word segment
        orto(3, 1),
        load(2, 3), // segment 0 = seg[r2], pc = 1
        halt(),
    ]);
    ctx.steps(3);
    let h = ctx.reg(2);
    ctx.sim.machine.memory.write(h, 0, orto(6, 7)).unwrap();
    ctx.sim.machine.memory.write(h, 1, orto(7, 9)).unwrap();
    ctx.sim.machine.memory.write(h, 2, halt()).unwrap();

    assert_eq!(ctx.step().unwrap(), Flow::Continue);
    assert_eq!(ctx.pc(), 1);
    assert_eq!(ctx.sim.machine.memory.program().len(), 3);
    assert_eq!(ctx.sim.machine.memory.stats().program_loads, 1);

    ctx.run().unwrap();
    assert_eq!(ctx.reg(6), 0, "offset 0 of the new program must be skipped");
    assert_eq!(ctx.reg(7), 9);
}

#[test]
fn test_load_program_reads_operands_before_mutation() {
    // `load r1, r1`: the same register names the source segment and the new pc.
    let mut ctx = TestContext::new(&[orto(3, 4), alloc(1, 3), load(1, 1), halt()]);
    ctx.steps(2);
    let h = ctx.reg(1);
    assert_eq!(h, 1);
    ctx.sim.machine.memory.write(h, 0, orto(5, 50)).unwrap();
    ctx.sim.machine.memory.write(h, 1, orto(6, 60)).unwrap();
    ctx.sim.machine.memory.write(h, 2, orto(7, 70)).unwrap();
    ctx.sim.machine.memory.write(h, 3, halt()).unwrap();

    ctx.steps(1);
    assert_eq!(ctx.pc(), 1);
    ctx.run().unwrap();
    assert_eq!(ctx.reg(5), 0);
    assert_eq!(ctx.reg(6), 60);
    assert_eq!(ctx.reg(7), 70);
}

#[test]
fn test_load_program_from_inactive_segment_faults() {
    let mut ctx = TestContext::new(&[orto(1, 9), load(1, 0), halt()]);
    assert!(matches!(ctx.run(), Err(VmError::InactiveSegment(9))));
}

#[test]
fn test_self_modifying_write_to_segment_zero() {
    // Build the halt word 0x7000_0000 and store it over the faulting output at index 8.
    let mut ctx = TestContext::new(&[
        orto(1, 7),
        orto(2, 1 << 24),
        mul(1, 1, 2),
        orto(2, 16),
        mul(1, 1, 2), // r1 = 0x7000_0000
        orto(3, 8),
        set(0, 3, 1), // seg[0][8] = r1
        orto(4, 0x1FF),
        out(4), // would fault; replaced by halt before it is fetched
    ]);
    ctx.run().unwrap();
    assert!(ctx.output().is_empty());
    assert_eq!(ctx.sim.machine.memory.read(0, 8).unwrap(), halt());
}

#[test]
fn test_invalid_opcode_has_no_effect() {
    let mut ctx = TestContext::new(&[orto(1, 1), 0xE000_0000 | (1 << 6), halt()]);
    ctx.steps(1);
    let err = ctx.step().unwrap_err();
    assert!(matches!(err, VmError::InvalidOpcode { opcode: 14, .. }));
    assert_eq!(ctx.pc(), 1);
    assert_eq!(ctx.reg(1), 1);
}

#[test]
fn test_running_off_the_end_faults() {
    let mut ctx = TestContext::new(&[orto(1, 1)]);
    assert!(matches!(
        ctx.run(),
        Err(VmError::PcOutOfBounds { pc: 1, len: 1 })
    ));
}
