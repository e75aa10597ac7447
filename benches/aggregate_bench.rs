//! Benchmarks for the complaint aggregates
//!
//! Run with: cargo bench

use complaint_dash::aggregate::*;
use complaint_dash::dashboard::ComplaintTable;
use complaint_dash::feed::{decode_feed, Complaint, DisplayZone, FeedResponse};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const MEALS: [&str; 5] = ["breakfast", "lunch", "dinner", "brunch", "Supper"];
const STATUSES: [&str; 3] = ["Open", "Resolved", "Closed"];

fn create_test_feed(count: usize) -> FeedResponse {
    let complaints = (0..count)
        .map(|i| {
            let day = 1 + i % 28;
            let hour = i % 24;
            Complaint::new(i as i64)
                .customer(format!("Customer {}", i))
                .description("Cold food and slow service")
                .severity((i % 7) as i64)
                .filed(format!("2024-03-{:02}T{:02}:15:00", day, hour))
                .meal_type(MEALS[i % MEALS.len()])
                .status(STATUSES[i % STATUSES.len()])
        })
        .collect();
    FeedResponse::new(complaints)
}

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");

    for size in [100, 1000, 10000] {
        let feed = create_test_feed(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("severity_{}", size), |b| {
            b.iter(|| severity_histogram(black_box(&feed.complaints)))
        });

        group.bench_function(format!("meal_types_{}", size), |b| {
            b.iter(|| meal_type_distribution(black_box(&feed.complaints)))
        });

        group.bench_function(format!("heatmap_points_{}", size), |b| {
            b.iter(|| heatmap_points(black_box(&feed.complaints), DisplayZone::Utc))
        });

        group.bench_function(format!("heatmap_cells_{}", size), |b| {
            b.iter(|| heatmap_cells(black_box(&feed.complaints), DisplayZone::Utc))
        });

        group.bench_function(format!("overview_{}", size), |b| {
            b.iter(|| OverviewMetrics::compute(black_box(&feed)))
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    let feed = create_test_feed(1000);

    group.bench_function("build_1000", |b| {
        b.iter(|| DashboardSnapshot::build(black_box(&feed), DisplayZone::Utc))
    });

    group.bench_function("table_page_1000", |b| {
        b.iter(|| {
            let table = ComplaintTable::new(black_box(&feed.complaints), 5, DisplayZone::Utc);
            table.page_view(black_box(7))
        })
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [100, 1000] {
        let body = serde_json::to_vec(&create_test_feed(size)).unwrap();
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_function(format!("decode_feed_{}", size), |b| {
            b.iter(|| decode_feed(black_box(&body)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregates, bench_snapshot, bench_decode);
criterion_main!(benches);
