use std::hint::black_box;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mnemosyne::{range, FibonacciMemo, RangeKey, RecencyCache};

#[derive(Parser, Debug)]
#[command(name = "mnemosyne", about = "Timing drivers for the memoization structures")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time a mixed range-sum/update workload with and without the recency cache.
    Range {
        /// Array length.
        #[arg(long, default_value_t = 100_000)]
        len: usize,
        /// Number of operations in the workload.
        #[arg(long, default_value_t = 50_000)]
        ops: usize,
        /// Recency cache capacity.
        #[arg(long, default_value_t = 1_000)]
        cache_size: usize,
        /// Workload seed (runs are reproducible).
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Compare LRU-memoized Fibonacci against the splay-backed engine.
    Fib {
        /// Largest index to compute (values overflow u128 past 186).
        #[arg(long, default_value_t = 180)]
        max_n: u64,
        /// Stride between sampled indices.
        #[arg(long, default_value_t = 20)]
        step: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Range {
            len,
            ops,
            cache_size,
            seed,
        } => run_range(len, ops, cache_size, seed)?,
        Commands::Fib { max_n, step } => run_fib(max_n, step)?,
    }
    Ok(())
}

/// One operation of the synthetic workload.
enum WorkloadOp {
    Sum { left: usize, right: usize },
    Update { index: usize, value: i64 },
}

/// Seeded mixed workload: values in 1..=100, even split of sums and updates.
fn random_workload(seed: u64, len: usize, count: usize) -> (Vec<i64>, Vec<WorkloadOp>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let values: Vec<i64> = (0..len).map(|_| rng.random_range(1..=100)).collect();
    let ops = (0..count)
        .map(|_| {
            if rng.random_bool(0.5) {
                let left = rng.random_range(1..=len);
                let right = rng.random_range(left..=len);
                WorkloadOp::Sum { left, right }
            } else {
                WorkloadOp::Update {
                    index: rng.random_range(1..=len),
                    value: rng.random_range(1..=100),
                }
            }
        })
        .collect();
    (values, ops)
}

fn run_range(len: usize, ops: usize, cache_size: usize, seed: u64) -> Result<()> {
    ensure!(len > 0, "array length must be positive");

    let (mut plain_values, plain_ops) = random_workload(seed, len, ops);
    let start = Instant::now();
    for op in &plain_ops {
        match *op {
            WorkloadOp::Sum { left, right } => {
                black_box(range::range_sum_uncached(&plain_values, left, right)?);
            }
            WorkloadOp::Update { index, value } => {
                range::update_uncached(&mut plain_values, index, value)?;
            }
        }
    }
    let uncached_elapsed = start.elapsed();

    let (mut cached_values, cached_ops) = random_workload(seed.wrapping_add(1), len, ops);
    let mut cache: RecencyCache<RangeKey, i64> =
        RecencyCache::new(cache_size).context("invalid cache capacity")?;
    let start = Instant::now();
    for op in &cached_ops {
        match *op {
            WorkloadOp::Sum { left, right } => {
                black_box(range::range_sum_cached(&cached_values, left, right, &mut cache)?);
            }
            WorkloadOp::Update { index, value } => {
                range::update_cached(&mut cached_values, index, value, &mut cache)?;
            }
        }
    }
    let cached_elapsed = start.elapsed();

    println!("array length {len}, {ops} operations, cache capacity {cache_size}, seed {seed}");
    println!("uncached: {:.3} s", uncached_elapsed.as_secs_f64());
    println!("cached:   {:.3} s", cached_elapsed.as_secs_f64());
    println!("cache: {} entries live, {}", cache.len(), cache.stats());
    Ok(())
}

/// Consumer-side LRU memoization of the recurrence, for the comparison arm.
fn fib_lru(n: u64, cache: &mut RecencyCache<u64, u128>) -> u128 {
    if let Some(&value) = cache.get(&n) {
        return value;
    }
    let value = if n <= 1 {
        u128::from(n)
    } else {
        fib_lru(n - 1, cache) + fib_lru(n - 2, cache)
    };
    cache.put(n, value);
    value
}

fn run_fib(max_n: u64, step: u64) -> Result<()> {
    ensure!(
        max_n <= mnemosyne::memo::MAX_FIB_INDEX,
        "indices past {} overflow u128",
        mnemosyne::memo::MAX_FIB_INDEX
    );
    let step = step.max(1);

    println!("{:<10}{:<25}{}", "n", "lru cache (s)", "splay tree (s)");
    println!("{}", "-".repeat(50));

    let mut n = 0;
    while n <= max_n {
        let mut cache =
            RecencyCache::new(n as usize + 2).context("invalid cache capacity")?;
        let start = Instant::now();
        let via_lru = fib_lru(n, &mut cache);
        let lru_elapsed = start.elapsed();

        let mut engine = FibonacciMemo::new();
        let start = Instant::now();
        let via_splay = engine.compute(n);
        let splay_elapsed = start.elapsed();

        ensure!(via_lru == via_splay, "engines disagree at n = {n}");
        println!(
            "{:<10}{:<25.9}{:.9}",
            n,
            lru_elapsed.as_secs_f64(),
            splay_elapsed.as_secs_f64()
        );
        n += step;
    }
    Ok(())
}
