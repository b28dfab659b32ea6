//! # Console Interaction Tests
//!
//! Drives `Machine::step` directly against a mock channel to pin down exactly
//! which console calls each operation makes.

use mockall::predicate::eq;
use umvm_core::common::Reg;
use umvm_core::config::MemoryConfig;
use umvm_core::core::{Flow, Machine};
use umvm_core::VmError;

use crate::common::builder::*;
use crate::common::mocks::MockChannel;

fn machine(program: &[u32]) -> Machine {
    Machine::with_program(program.to_vec(), &MemoryConfig::default()).unwrap()
}

#[test]
fn test_halt_flushes_once() {
    let mut m = machine(&[halt()]);
    let mut console = MockChannel::new();
    console.expect_flush().times(1).returning(|| Ok(()));
    console.expect_write_byte().never();
    console.expect_read_byte().never();

    let (_, flow) = m.step(&mut console).unwrap();
    assert_eq!(flow, Flow::Halt);
}

#[test]
fn test_output_writes_exactly_one_byte() {
    let mut m = machine(&[out(3), halt()]);
    m.regs.write(Reg::from_bits(3), 42);
    let mut console = MockChannel::new();
    console
        .expect_write_byte()
        .with(eq(42u8))
        .times(1)
        .returning(|_| Ok(()));
    console.expect_flush().never();

    let _ = m.step(&mut console).unwrap();
}

#[test]
fn test_input_end_of_stream_yields_all_ones() {
    let mut m = machine(&[inp(2), halt()]);
    let mut console = MockChannel::new();
    console.expect_read_byte().times(1).returning(|| Ok(None));

    let _ = m.step(&mut console).unwrap();
    assert_eq!(m.regs.read(Reg::from_bits(2)), 0xFFFF_FFFF);
}

#[test]
fn test_input_error_is_an_io_fault() {
    let mut m = machine(&[inp(2), halt()]);
    let mut console = MockChannel::new();
    console
        .expect_read_byte()
        .times(1)
        .returning(|| Err(std::io::Error::other("tty gone")));

    let err = m.step(&mut console).unwrap_err();
    assert!(matches!(err, VmError::Io(_)));
}

#[test]
fn test_arithmetic_never_touches_console() {
    let mut m = machine(&[add(1, 2, 3), nand(1, 1, 1), orto(0, 1), halt()]);
    let mut console = MockChannel::new();
    console.expect_read_byte().never();
    console.expect_write_byte().never();
    console.expect_flush().never();

    for _ in 0..3 {
        let (_, flow) = m.step(&mut console).unwrap();
        assert_eq!(flow, Flow::Continue);
    }
}
