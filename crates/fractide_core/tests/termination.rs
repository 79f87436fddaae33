mod common;

use common::MemorySink;
use fractide_core::config::{EngineConfig, RenderConfig, SaturationConfig, SweepConfig};
use fractide_core::explore;
use fractide_core::runner::{RunOutcome, Runner};
use fractide_data::{ColorScheme, Rule};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rule(counts: &[u8]) -> Rule {
    Rule::new(true, false, false, counts.iter().copied().collect()).unwrap()
}

fn runner(depth: usize, max_frames: u32, min_frames: u32, saturation: SaturationConfig) -> Runner {
    let engine = EngineConfig {
        depth,
        max_frames,
        min_frames,
        saturation,
        ..Default::default()
    };
    let render = RenderConfig {
        frame_size: 16,
        ..Default::default()
    };
    Runner::new(engine, render)
}

fn no_saturation() -> SaturationConfig {
    SaturationConfig {
        enabled: false,
        ..Default::default()
    }
}

#[test]
fn test_all_dead_converges_immediately_regardless_of_rule() {
    // k = 0 means the finest level is already dead when the run starts; the
    // convergence check fires before any step, even for a rule accepting 0.
    let runner = runner(4, 100, 1, no_saturation());
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for r in [rule(&[3]), rule(&[0])] {
        let mut sink = MemorySink::new();
        let report = runner
            .run(&r, &ColorScheme::default(), 0.0, &mut rng, &mut sink)
            .unwrap();
        assert_eq!(report.outcome, RunOutcome::Converged);
        assert_eq!(report.frames, 0);
        assert!(!report.kept);
        assert!(sink.frames.is_empty());
    }
}

#[test]
fn test_dead_grid_without_zero_in_rule_stays_dead() {
    let runner = runner(3, 100, 1, no_saturation());
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut sink = MemorySink::new();
    let report = runner
        .run(&rule(&[3]), &ColorScheme::default(), 0.0, &mut rng, &mut sink)
        .unwrap();
    assert_eq!(report.outcome, RunOutcome::Converged);
    assert_eq!(report.generations, 0);
}

#[test]
fn test_all_alive_eight_rule_hits_max_frames() {
    // Every finest-level cell keeps exactly 8 wrapped neighbors, so the run
    // never converges and stops at the frame cap.
    let runner = runner(4, 25, 1, no_saturation());
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut sink = MemorySink::new();
    let report = runner
        .run(&rule(&[8]), &ColorScheme::default(), 1.0, &mut rng, &mut sink)
        .unwrap();
    assert_eq!(report.outcome, RunOutcome::MaxFrames);
    assert_eq!(report.frames, 25);
    assert_eq!(sink.frames.len(), 25);
}

#[test]
fn test_all_alive_blows_up_when_saturation_enabled() {
    let runner = runner(4, 25, 1, SaturationConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut sink = MemorySink::new();
    let report = runner
        .run(&rule(&[8]), &ColorScheme::default(), 1.0, &mut rng, &mut sink)
        .unwrap();
    assert_eq!(report.outcome, RunOutcome::BlownUp);
    assert_eq!(report.frames, 0, "Saturated from the start, nothing rendered");
}

#[test]
fn test_kept_flag_follows_min_frames() {
    let strict = runner(4, 25, 30, no_saturation());
    let lax = runner(4, 25, 10, no_saturation());
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut sink = MemorySink::new();
    let report = strict
        .run(&rule(&[8]), &ColorScheme::default(), 1.0, &mut rng, &mut sink)
        .unwrap();
    assert!(!report.kept, "25 frames < 30 minimum");
    let report = lax
        .run(&rule(&[8]), &ColorScheme::default(), 1.0, &mut rng, &mut sink)
        .unwrap();
    assert!(report.kept, "25 frames >= 10 minimum");
}

#[test]
fn test_frame_indices_are_sequential() {
    let runner = runner(4, 12, 1, no_saturation());
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut sink = MemorySink::new();
    let report = runner
        .run(&rule(&[8]), &ColorScheme::default(), 1.0, &mut rng, &mut sink)
        .unwrap();
    let indices = sink.by_run().remove(&report.id).unwrap();
    assert_eq!(indices, (0..12).collect::<Vec<_>>());
}

#[test]
fn test_sweep_from_zero_density_terminates() {
    let runner = runner(3, 10, 5, no_saturation());
    let sweep_config = SweepConfig {
        factor: 2.0,
        ceiling: 0.5,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let mut sink = MemorySink::new();
    let report = explore::sweep(
        &runner,
        &sweep_config,
        0.0,
        &rule(&[3]),
        &ColorScheme::default(),
        &mut rng,
        &mut sink,
    )
    .unwrap();
    assert!(!report.kept);
    assert_eq!(report.outcome, RunOutcome::Converged);
}

#[test]
fn test_sweep_discards_rejected_runs_and_keeps_first_success() {
    // Sparse starts die off under the {8} rule well before min_frames, so the
    // sweep keeps climbing. Whether a kept run arrives before the ceiling
    // depends on the sampled grids; both exits must leave no stray frames.
    let engine = EngineConfig {
        depth: 3,
        max_frames: 15,
        min_frames: 5,
        saturation: SaturationConfig {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let render = RenderConfig {
        frame_size: 16,
        ..Default::default()
    };
    let runner = Runner::new(engine, render);
    let sweep_config = SweepConfig {
        factor: 4.0,
        ceiling: 1.0,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut sink = MemorySink::new();
    let report = explore::sweep(
        &runner,
        &sweep_config,
        0.001,
        &rule(&[8]),
        &ColorScheme::default(),
        &mut rng,
        &mut sink,
    )
    .unwrap();

    for discarded in &sink.discarded {
        assert!(
            sink.frames.iter().all(|(run, _, _)| run != discarded),
            "Discarded runs must leave no frames behind"
        );
    }
    if report.kept {
        assert!(sink.frames.iter().any(|(run, _, _)| *run == report.id));
        assert!(report.frames >= 5);
    } else {
        // Sweep exhausted the ceiling; the last attempt was still discarded.
        assert!(sink.discarded.contains(&report.id));
    }
}
