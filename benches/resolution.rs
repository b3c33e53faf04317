//! Benchmarks for matrix assembly and multi-contact impulse resolution.

use accuscene_impulse_core::body::{MassProperties, PlanarBody};
use accuscene_impulse_core::config::{CollisionHandling, ResolutionConfig};
use accuscene_impulse_core::contact::Contact;
use accuscene_impulse_core::lcp::ProjectedGaussSeidelSolver;
use accuscene_impulse_core::matrix::InfluenceMatrix;
use accuscene_impulse_core::{handle_collisions, ResolutionTotals};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector2;

/// A line of `n` unit disks, each touching the next, with the first disk
/// moving toward the rest. Exercises the worst case for the serial
/// strategies: every contact but the first starts at rest.
fn disk_chain(n: usize) -> (Vec<PlanarBody>, Vec<Contact>) {
    let mut bodies: Vec<PlanarBody> = (0..n as u64)
        .map(|id| PlanarBody::new(id, MassProperties::disk(1.0, 1.0)))
        .collect();
    bodies[0].linear_velocity = Vector2::new(1.0, 0.0);

    let contacts = (0..n - 1)
        .map(|i| {
            Contact::new(
                i,
                i + 1,
                Vector2::new(1.0, 0.0),
                Vector2::new(-1.0, 0.0),
                Vector2::new(-1.0, 0.0),
                if i == 0 { -1.0 } else { 0.0 },
                1.0,
                false,
            )
        })
        .collect();
    (bodies, contacts)
}

fn matrix_assembly_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_assembly");
    for n in [4usize, 16, 64, 256] {
        let (bodies, contacts) = disk_chain(n + 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(InfluenceMatrix::assemble(&bodies, &contacts)));
        });
    }
    group.finish();
}

fn resolution_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for handling in [
        CollisionHandling::Simultaneous,
        CollisionHandling::SerialGrouped,
        CollisionHandling::SerialGroupedLastPass,
    ] {
        for n in [4usize, 16, 64] {
            let id = BenchmarkId::new(format!("{handling:?}"), n);
            group.bench_with_input(id, &n, |b, &n| {
                b.iter_batched(
                    || {
                        let (bodies, contacts) = disk_chain(n + 1);
                        let mut config = ResolutionConfig::default();
                        config.collision_handling = handling;
                        (bodies, contacts, config, ProjectedGaussSeidelSolver::default())
                    },
                    |(mut bodies, mut contacts, config, mut solver)| {
                        let mut totals = ResolutionTotals::default();
                        black_box(
                            handle_collisions(
                                &mut bodies,
                                &mut contacts,
                                &config,
                                &mut solver,
                                0.0,
                                Some(&mut totals),
                            )
                            .unwrap(),
                        )
                    },
                    criterion::BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, matrix_assembly_benchmarks, resolution_benchmarks);
criterion_main!(benches);
