//! DMA Engine Tests.
//!
//! Drives the DMA unit directly, one `run_cycle` per simulated cycle, and
//! compares its memory effects against a plain byte-slice model.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vpusim_core::soc::devices::{Dma, DmaCommand, DmaOperation};
use vpusim_core::soc::memory::Memory;
use vpusim_core::soc::traits::{Coprocessor, UnitState};

const SIZE: usize = 4096;

/// Memory whose every byte differs from its neighbours.
fn patterned() -> Memory {
    let mut mem = Memory::new(SIZE);
    let bytes: Vec<u8> = (0..SIZE).map(|i| (i * 7 + 3) as u8).collect();
    mem.write_bytes(0, &bytes);
    mem
}

fn set(dest: u32, length: u32, value: u8) -> DmaCommand {
    DmaCommand {
        dest,
        length,
        value,
        operation: DmaOperation::Set,
        ..DmaCommand::default()
    }
}

fn copy(dest: u32, source: u32, length: u32) -> DmaCommand {
    DmaCommand {
        dest,
        source,
        length,
        operation: DmaOperation::Copy,
        ..DmaCommand::default()
    }
}

/// Result of running one command to completion.
struct Run {
    working_cycles: u64,
    callbacks: u32,
}

/// Submits `cmd` in cycle 0 and ticks until the unit is idle again.
fn run(dma: &mut Dma, mem: &mut Memory, cmd: DmaCommand) -> Run {
    let fired = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&fired);
    let accepted = dma.submit(
        0,
        cmd,
        Box::new(move || {
            let _ = counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert!(accepted);

    let mut working_cycles = 0;
    for now in 1..100_000 {
        match dma.state() {
            UnitState::Idle => break,
            UnitState::Working => working_cycles += 1,
            UnitState::Finished => assert_eq!(fired.load(Ordering::SeqCst), 0),
        }
        dma.run_cycle(now, mem);
    }
    assert_eq!(dma.state(), UnitState::Idle);
    Run {
        working_cycles,
        callbacks: fired.load(Ordering::SeqCst),
    }
}

// ══════════════════════════════════════════════════════════
// 1. SET
// ══════════════════════════════════════════════════════════

#[test]
fn set_aligned_writes_whole_blocks() {
    let mut mem = patterned();
    let mut dma = Dma::new();
    let before = mem.bytes(0, SIZE).to_vec();

    let r = run(&mut dma, &mut mem, set(0x400, 128, 0xAB));

    assert_eq!(r.working_cycles, 2);
    assert_eq!(r.callbacks, 1);
    assert!(mem.bytes(0x400, 128).iter().all(|&b| b == 0xAB));
    assert_eq!(mem.bytes(0, 0x400), &before[..0x400]);
    assert_eq!(mem.bytes(0x480, SIZE - 0x480), &before[0x480..]);
}

#[test]
fn set_partial_head_block_costs_a_read() {
    let mut mem = patterned();
    let mut dma = Dma::new();
    let before = mem.bytes(0x400, 16).to_vec();

    let r = run(&mut dma, &mut mem, set(0x410, 112, 0x5C));

    assert_eq!(r.working_cycles, 3);
    assert_eq!(mem.bytes(0x400, 16), &before[..]);
    assert!(mem.bytes(0x410, 112).iter().all(|&b| b == 0x5C));
}

#[test]
fn zero_length_finishes_after_one_cycle() {
    let mut mem = patterned();
    let mut dma = Dma::new();
    let before = mem.bytes(0, SIZE).to_vec();

    let r = run(&mut dma, &mut mem, copy(0x10, 0x20, 0));

    assert_eq!(r.working_cycles, 1);
    assert_eq!(r.callbacks, 1);
    assert_eq!(mem.bytes(0, SIZE), &before[..]);
}

// ══════════════════════════════════════════════════════════
// 2. Lifecycle
// ══════════════════════════════════════════════════════════

#[test]
fn callback_fires_the_cycle_after_finishing() {
    let mut mem = patterned();
    let mut dma = Dma::new();
    let fired = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&fired);
    assert!(dma.submit(
        10,
        set(0, 64, 1),
        Box::new(move || {
            let _ = counter.fetch_add(1, Ordering::SeqCst);
        }),
    ));

    dma.run_cycle(10, &mut mem);
    assert_eq!(dma.state(), UnitState::Working, "no work in the submit cycle");
    assert_eq!(mem.bytes(0, 1), &[3u8]);

    dma.run_cycle(11, &mut mem);
    assert_eq!(dma.state(), UnitState::Finished);
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    dma.run_cycle(12, &mut mem);
    assert_eq!(dma.state(), UnitState::Idle);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn busy_unit_refuses_without_side_effects() {
    let mut mem = patterned();
    let mut dma = Dma::new();
    assert!(dma.submit(0, set(0, 256, 9), Box::new(|| {})));
    dma.run_cycle(1, &mut mem);

    assert!(!dma.submit(1, set(0x800, 64, 1), Box::new(|| {})));
    assert_eq!(dma.command(), &set(0, 256, 9));
    assert_eq!(dma.state(), UnitState::Working);
}

#[test]
#[should_panic(expected = "exceeds memory size")]
fn out_of_range_source_is_fatal() {
    let mut mem = patterned();
    let mut dma = Dma::new();
    assert!(dma.submit(0, copy(0, SIZE as u32 - 32, 64), Box::new(|| {})));
    dma.run_cycle(1, &mut mem);
}

#[test]
#[should_panic(expected = "destination range 0xfe0+0x40 in cycle 5 exceeds memory size 0x1000")]
fn out_of_range_destination_is_fatal_on_first_work_cycle() {
    let mut mem = patterned();
    let mut dma = Dma::new();
    assert!(dma.submit(4, set(SIZE as u32 - 32, 64, 1), Box::new(|| {})));

    dma.run_cycle(4, &mut mem);
    assert_eq!(dma.state(), UnitState::Working);
    dma.run_cycle(5, &mut mem);
}

#[test]
#[should_panic(expected = "without an operation")]
fn command_without_operation_is_fatal() {
    let mut dma = Dma::new();
    let _ = dma.submit(0, DmaCommand::default(), Box::new(|| {}));
}

// ══════════════════════════════════════════════════════════
// 3. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_matches_byte_model(dest in 0u32..2048, length in 0u32..700, value: u8) {
        let mut mem = patterned();
        let mut expected = mem.bytes(0, SIZE).to_vec();
        expected[dest as usize..(dest + length) as usize].fill(value);

        let r = run(&mut Dma::new(), &mut mem, set(dest, length, value));

        prop_assert_eq!(r.callbacks, 1);
        prop_assert_eq!(mem.bytes(0, SIZE), &expected[..]);
    }

    #[test]
    fn copy_matches_memmove(dest in 0u32..2048, source in 0u32..2048, length in 0u32..700) {
        let mut mem = patterned();
        let before = mem.bytes(0, SIZE).to_vec();
        let mut expected = before.clone();
        let (d, s, n) = (dest as usize, source as usize, length as usize);
        expected[d..d + n].copy_from_slice(&before[s..s + n]);

        let r = run(&mut Dma::new(), &mut mem, copy(dest, source, length));

        prop_assert_eq!(r.callbacks, 1);
        prop_assert_eq!(mem.bytes(0, SIZE), &expected[..]);
    }

    #[test]
    fn overlapping_copy_by_small_offsets(base in 0u32..1024, shift in 1u32..80, up: bool, length in 1u32..400) {
        let (dest, source) = if up { (base + shift, base) } else { (base, base + shift) };
        let mut mem = patterned();
        let before = mem.bytes(0, SIZE).to_vec();
        let mut expected = before.clone();
        let (d, s, n) = (dest as usize, source as usize, length as usize);
        expected[d..d + n].copy_from_slice(&before[s..s + n]);

        let _ = run(&mut Dma::new(), &mut mem, copy(dest, source, length));

        prop_assert_eq!(mem.bytes(0, SIZE), &expected[..]);
    }
}
