//! Performance measurement for full-trial reconstruction and projection

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use stimgen::resolve::assignment::{Orientation, Trial, reconstruct};
use stimgen::resolve::bars::{BarsTrial, ChangeAttribute, SubsetKind};
use stimgen::resolve::dumbbell::{BindingCondition, DumbbellConsistency, DumbbellTrial};
use stimgen::resolve::wheel::{WheelKind, WheelTrial};
use stimgen::scene::project::project;
use stimgen::spatial::grid::Direction;

fn bench_trials() -> Vec<(&'static str, Trial)> {
    vec![
        (
            "dumbbell",
            Trial::Dumbbell(DumbbellTrial {
                subject: 1,
                condition: BindingCondition::TwoBindingsTwoObjects,
                orientation: Orientation::Horizontal,
                consistency: DumbbellConsistency::CuedChanged,
            }),
        ),
        (
            "bars",
            Trial::Bars(BarsTrial {
                subject: 1,
                subset: SubsetKind::MultiColorMultiOrientation,
                cue_items: 3,
                direction: Direction::Up,
                probe_change: true,
                change_attribute: ChangeAttribute::Position,
            }),
        ),
        (
            "wheel",
            Trial::Wheel(WheelTrial {
                subject: 1,
                kind: WheelKind::Color,
                memory_index: 120,
                probe_index: Some(200),
            }),
        ),
    ]
}

/// Measures condition resolution cost per family
fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");
    for (name, trial) in bench_trials() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &trial, |b, trial| {
            b.iter(|| reconstruct(black_box(trial), black_box(42)));
        });
    }
    group.finish();
}

/// Measures projection of every phase in a family's sequence
fn bench_project_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    for (name, trial) in bench_trials() {
        let Ok(reconstruction) = reconstruct(&trial, 42) else {
            group.finish();
            return;
        };
        let phases = trial.experiment().phases();
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &reconstruction.assignment,
            |b, assignment| {
                b.iter(|| {
                    for &phase in phases {
                        let _ = black_box(project(black_box(assignment), phase));
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_reconstruct, bench_project_phases);
criterion_main!(benches);
