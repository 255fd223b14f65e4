//! Statistics Tests.

use pretty_assertions::assert_eq;
use vpusim_core::SimStats;

#[test]
fn derived_metrics_handle_zero_denominators() {
    let stats = SimStats::new();
    assert_eq!(stats.ipc(), 0.0);
    assert_eq!(stats.prediction_accuracy(), 1.0);
}

#[test]
fn derived_metrics() {
    let stats = SimStats {
        cycles: 200,
        instructions_retired: 150,
        branch_predictions: 40,
        branch_mispredictions: 10,
        ..SimStats::default()
    };
    assert!((stats.ipc() - 0.75).abs() < 1e-12);
    assert!((stats.prediction_accuracy() - 0.75).abs() < 1e-12);
}

#[test]
fn report_lists_every_counter() {
    let stats = SimStats {
        cycles: 12,
        instructions_retired: 6,
        flushes: 2,
        scheduler_stalls: 3,
        dma_enqueued: 4,
        dma_completed: 4,
        blitter_enqueued: 1,
        ..SimStats::default()
    };
    let report = stats.to_string();

    for line in [
        "sim_cycles               12",
        "sim_insts                6",
        "sim_ipc                  0.5000",
        "bp.accuracy            100.00%",
        "pipeline.flushes       2",
        "stalls.scheduler       3",
        "dma.commands           4 enqueued, 4 completed",
        "blitter.commands       1 enqueued, 0 completed",
    ] {
        assert!(report.contains(line), "missing {line:?} in\n{report}");
    }
}
