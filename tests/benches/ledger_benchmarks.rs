//! # VANET Ledger Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | Fingerprint | one Keccak-256 over sender, location, bucket |
//! | Guard admit | cooldown lookup, fingerprint, set insert |
//! | Report | admit, digest, append, event dispatch |
//! | Chain verify | one digest per stored record |

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use shared_types::entities::Address;
use tokio::runtime::Runtime;
use vanet_ledger::adapters::{ManualClock, NoOpSink};
use vanet_ledger::domain::{compute_fingerprint, time_bucket, LedgerState, ReportGuard};
use vanet_ledger::ports::inbound::AccidentLedgerApi;
use vanet_ledger::service::AccidentLedgerService;
use vanet_ledger::LedgerConfig;

const T0: u64 = 1_700_000_000;

fn random_addresses(n: usize, seed: u64) -> Vec<Address> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut bytes = [0u8; 20];
            rng.fill(&mut bytes);
            Address::new(bytes)
        })
        .collect()
}

/// Authority plus `n` registered vehicles, each with one report on record.
fn populated_state(n: usize) -> LedgerState {
    let authority = Address::repeat_byte(0xA0);
    let mut state = LedgerState::new(authority, LedgerConfig::default());
    for (i, vehicle) in random_addresses(n, 1).into_iter().enumerate() {
        let _ = state.register_vehicle(authority, vehicle).result;
        let _ = state
            .report_accident(vehicle, &format!("Hwy {i}"), T0 + i as u64)
            .result;
    }
    state
}

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    let reporter = Address::repeat_byte(1);

    for len in [16usize, 256, 4096] {
        let location = "x".repeat(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("keccak", len), &location, |b, loc| {
            b.iter(|| {
                black_box(compute_fingerprint(
                    &reporter,
                    loc,
                    time_bucket(black_box(T0), 1),
                ))
            })
        });
    }
    group.finish();
}

fn bench_guard_admit(c: &mut Criterion) {
    let mut group = c.benchmark_group("guard");

    for senders in [100usize, 1_000, 10_000] {
        let addresses = random_addresses(senders, 2);
        group.throughput(Throughput::Elements(senders as u64));
        group.bench_with_input(
            BenchmarkId::new("admit_distinct_senders", senders),
            &addresses,
            |b, addresses| {
                b.iter(|| {
                    let mut guard = ReportGuard::new(60, 1);
                    for a in addresses {
                        black_box(guard.admit(*a, "Hwy 1", T0).is_ok());
                    }
                })
            },
        );
    }

    let sender = Address::repeat_byte(3);
    let mut throttled = ReportGuard::new(60, 1);
    let _ = throttled.admit(sender, "Hwy 1", T0);
    group.bench_function("admit_rate_limited", |b| {
        b.iter(|| black_box(throttled.admit(sender, "Hwy 2", T0 + 1).is_err()))
    });
    group.finish();
}

fn bench_service_report(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("service");
    let authority = Address::repeat_byte(0xA0);
    let vehicles = random_addresses(256, 3);

    group.throughput(Throughput::Elements(vehicles.len() as u64));
    group.bench_function("register_and_report_256", |b| {
        b.iter(|| {
            rt.block_on(async {
                let clock = Arc::new(ManualClock::new(T0));
                let ledger = AccidentLedgerService::new(
                    authority,
                    LedgerConfig::default(),
                    NoOpSink,
                    clock.clone(),
                )
                .unwrap();
                for v in &vehicles {
                    ledger.register_vehicle(authority, *v).await.unwrap();
                }
                for v in &vehicles {
                    clock.advance(1);
                    black_box(ledger.report_accident(*v, "Hwy 1").await.unwrap());
                }
            })
        })
    });
    group.finish();
}

fn bench_verify_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");

    for records in [100usize, 1_000, 10_000] {
        let state = populated_state(records);
        group.throughput(Throughput::Elements(records as u64));
        group.bench_with_input(BenchmarkId::new("verify", records), &state, |b, state| {
            b.iter(|| black_box(state.verify_chain().is_ok()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fingerprint,
    bench_guard_admit,
    bench_service_report,
    bench_verify_chain
);
criterion_main!(benches);
