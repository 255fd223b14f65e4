//! Memory Contract Tests.

use pretty_assertions::assert_eq;
use vpusim_core::common::constants::MEM_ACCESS_WIDTH;
use vpusim_core::soc::memory::Memory;

#[test]
fn block_round_trip_and_word_view() {
    let mut mem = Memory::new(4096);
    let mut block = [0u8; MEM_ACCESS_WIDTH];
    for (i, b) in block.iter_mut().enumerate() {
        *b = i as u8;
    }
    mem.write_block(0x40, &block);

    assert_eq!(mem.read_block(0x40), block);
    assert_eq!(mem.read_word(0x44), u32::from_le_bytes([4, 5, 6, 7]));
    assert_eq!(mem.bytes(0x3F, 1), &[0]);
    assert_eq!(mem.bytes(0x80, 1), &[0]);
}

#[test]
fn contains_checks_the_end() {
    let mem = Memory::new(128);
    assert!(mem.contains(0, 128));
    assert!(mem.contains(124, 4));
    assert!(!mem.contains(125, 4));
    assert!(!mem.contains(u32::MAX, 2));
}

#[test]
#[should_panic(expected = "exceeds memory size")]
fn word_past_end_is_fatal() {
    let mem = Memory::new(64);
    let _ = mem.read_word(64);
}

#[test]
#[should_panic(expected = "not 64-byte aligned")]
fn misaligned_block_write_is_fatal() {
    let mut mem = Memory::new(256);
    mem.write_block(0x44, &[0; MEM_ACCESS_WIDTH]);
}
