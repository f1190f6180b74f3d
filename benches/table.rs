use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use relique_dash::models::{Client, Job, JobStatus, Module};
use relique_dash::table::{DataTable, TableOptions, rank_item};
use relique_dash::view::columns::job_columns;

// Synthetic jobs spread over a handful of clients and modules
fn generate_jobs(size: usize) -> Vec<Job> {
    let statuses = [
        JobStatus::Success,
        JobStatus::Active,
        JobStatus::Error,
        JobStatus::Incomplete,
    ];
    (0..size)
        .map(|i| Job {
            uuid: format!("{:08x}-0000-4000-8000-{:012x}", i, i),
            client: Some(Client {
                name: format!("client-{:03}", i % 97),
                ..Default::default()
            }),
            module: Some(Module {
                name: format!("module-{}", i % 7),
                ..Default::default()
            }),
            status: statuses[i % statuses.len()],
            ..Default::default()
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for size in [100, 1_000, 10_000] {
        let mut table = DataTable::new(job_columns(), TableOptions::default())
            .with_rows(generate_jobs(size));
        group.bench_with_input(BenchmarkId::new("contains", size), &size, |b, _| {
            b.iter(|| {
                table.set_global_filter(black_box("client-04"));
                black_box(table.filtered_len())
            })
        });
        group.bench_with_input(BenchmarkId::new("fuzzy", size), &size, |b, _| {
            b.iter(|| {
                table.set_global_filter(black_box("cl4m3"));
                black_box(table.filtered_len())
            })
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for size in [100, 1_000, 10_000] {
        let mut table = DataTable::new(job_columns(), TableOptions::default())
            .with_rows(generate_jobs(size));
        group.bench_with_input(BenchmarkId::new("client_column", size), &size, |b, _| {
            b.iter(|| {
                // asc, desc, unsorted
                for _ in 0..3 {
                    table.toggle_sort(black_box(1));
                }
                black_box(table.page_rows().len())
            })
        });
    }
    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let table = DataTable::new(job_columns(), TableOptions::default().with_page_size(25))
        .with_rows(generate_jobs(10_000));
    c.bench_function("page_walk_10000", |b| {
        b.iter(|| {
            let mut rows = 0;
            for index in 0..table.page_count() {
                rows += table.page(black_box(index)).len();
            }
            black_box(rows)
        })
    });
}

fn bench_rank(c: &mut Criterion) {
    c.bench_function("rank_item_closeness", |b| {
        b.iter(|| rank_item(black_box("backup-job-postgresql-primary"), black_box("bjpp")))
    });
}

criterion_group!(benches, bench_filter, bench_sort, bench_paginate, bench_rank);
criterion_main!(benches);
