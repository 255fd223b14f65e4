//! Register File and Flag Tests.

use rstest::rstest;
use vpusim_core::common::{Flag, Flags, REGISTER_COUNT, Register, RegisterFile};

#[test]
fn register_file_starts_cleared() {
    let regs = RegisterFile::new();
    assert_eq!(regs.as_array(), &[0; REGISTER_COUNT]);
}

#[rstest]
#[case(Register::Acc)]
#[case(Register::Pc)]
#[case(Register::R1)]
#[case(Register::R13)]
fn write_then_read(#[case] reg: Register) {
    let mut regs = RegisterFile::new();
    regs.write(reg, 0xCAFE_F00D);
    assert_eq!(regs.read(reg), 0xCAFE_F00D);
    assert_eq!(regs.as_array()[reg.index()], 0xCAFE_F00D);
}

#[test]
fn null_discards_writes() {
    let mut regs = RegisterFile::new();
    regs.write(Register::Null, 1);
    assert_eq!(regs.read(Register::Null), 0);
}

#[test]
fn register_names() {
    assert_eq!(Register::Acc.to_string(), "ACC");
    assert_eq!(Register::R13.to_string(), "R13");
    assert_eq!(Register::Pc.name(), "PC");
}

#[test]
fn flags_set_and_clear() {
    let mut flags = Flags::new();
    assert!(!flags.get(Flag::C));
    flags.set(Flag::C, true);
    assert!(flags.get(Flag::C));
    flags.set(Flag::C, false);
    assert!(!flags.get(Flag::C));
}
