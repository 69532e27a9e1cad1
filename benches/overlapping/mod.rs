use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use interval_avl::{Interval, IntervalTree};

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("overlapping");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = IntervalTree::new();

    for _i in 0..n_values {
        t.insert(rand.next_interval());
    }

    bench_iter(n_values, g, &t);
    bench_overlapping_point(n_values, g, &t);
    bench_overlapping_narrow(n_values, g, &t);
    bench_overlapping_wide(n_values, g, &t);
}

fn bench_iter<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &IntervalTree<u16>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "iter",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}

macro_rules! overlapping_bench {
    (
        $name:ident, $lower:expr, $upper:expr
    ) => {
        paste::paste! {
            fn [<bench_overlapping_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &IntervalTree<u16>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: concat!("overlapping_", stringify!($name)),
                };

                let query = Interval::new($lower, $upper).unwrap();

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        for v in t.overlapping(&query) {
                            black_box(v);
                        }
                    })
                });
            }
        }
    }
}

overlapping_bench!(point, 4_200, 4_200);
overlapping_bench!(narrow, 4_200, 10_000);
overlapping_bench!(wide, 0, u16::MAX);
