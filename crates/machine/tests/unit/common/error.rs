//! # Fault Tests
//!
//! Display text and category for the machine fault type.

use rstest::rstest;
use umvm_core::VmError;

#[rstest]
#[case(VmError::EmptyProgram, "load")]
#[case(VmError::MisalignedProgram { len: 3 }, "load")]
#[case(VmError::InvalidOpcode { opcode: 14, word: 0xE000_0000 }, "decode")]
#[case(VmError::PcOutOfBounds { pc: 4, len: 4 }, "memory")]
#[case(VmError::InactiveSegment(9), "memory")]
#[case(VmError::OffsetOutOfBounds { handle: 1, offset: 5, len: 5 }, "memory")]
#[case(VmError::FreeProgramSegment, "memory")]
#[case(VmError::SegmentTooLarge { requested: 1 << 24, max: (1 << 24) - 1 }, "memory")]
#[case(VmError::EmptySegment(2), "memory")]
#[case(VmError::HandlesExhausted(1 << 31), "memory")]
#[case(VmError::DivisionByZero, "arithmetic")]
#[case(VmError::OutputOutOfRange(256), "io")]
#[case(VmError::InstructionLimit(10), "limit")]
fn test_fault_categories(#[case] err: VmError, #[case] category: &str) {
    assert_eq!(err.category(), category);
}

#[test]
fn test_invalid_opcode_display_includes_word() {
    let err = VmError::InvalidOpcode {
        opcode: 15,
        word: 0xF000_0001,
    };
    let text = err.to_string();
    assert!(text.contains("15"));
    assert!(text.contains("0xf0000001"));
}

#[test]
fn test_offset_out_of_bounds_display() {
    let err = VmError::OffsetOutOfBounds {
        handle: 3,
        offset: 8,
        len: 8,
    };
    assert_eq!(
        err.to_string(),
        "offset 8 out of bounds for segment 3 of 8 words"
    );
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err: VmError = io.into();
    assert_eq!(err.category(), "io");
    assert!(err.to_string().contains("pipe closed"));
}
