use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;

use matmult::benchmarking::{benchmark_observed, default_tries};
use matmult::generate::random_matrix;
use matmult::matrix::{Matrix, Scalar};
use matmult::report::{BenchRecord, CsvReporter};
use matmult::strategies::{MultiplyOpts, Strategy, DEFAULT_TILE, DEFAULT_WORKERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Precision {
    F32,
    F64,
}

#[derive(Parser, Debug)]
#[command(about = "Benchmark dense matrix multiplication strategies")]
struct Opt {
    /// Matrix dimension; two size x size inputs are generated.
    #[arg(short, long, default_value_t = 100)]
    size: usize,

    /// Trials per strategy; defaults to a size-dependent count.
    #[arg(short, long)]
    tries: Option<usize>,

    /// Worker threads for the parallel strategies.
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Row tile height for the tiled strategies.
    #[arg(long, default_value_t = DEFAULT_TILE)]
    row_tile: usize,

    /// Reduction tile width for the tiled strategies.
    #[arg(long, default_value_t = DEFAULT_TILE)]
    k_tile: usize,

    /// Element type for this run.
    #[arg(long, value_enum, default_value = "f32")]
    precision: Precision,

    /// PRNG seed; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run key for the first CSV field (historically the compiler
    /// optimisation level).
    #[arg(short, long, default_value = "default")]
    label: String,

    /// CSV file to append results to.
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Print the inputs and each strategy's result to stderr as octave
    /// matrices.
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    match opt.precision {
        Precision::F32 => run::<f32>(&opt),
        Precision::F64 => run::<f64>(&opt),
    }
}

fn run<T: Scalar>(opt: &Opt) -> Result<()> {
    let seed = opt.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let lo = T::ZERO;
    let hi = T::from_f64(10.0);
    let a = random_matrix::<T>(opt.size, opt.size, lo, hi, &mut rng)?;
    let b = random_matrix::<T>(opt.size, opt.size, lo, hi, &mut rng)?;
    let mut res = Matrix::<T>::zeroed(opt.size, opt.size)?;

    if opt.dump {
        let mut err = io::stderr().lock();
        a.write_octave(&mut err, "A")?;
        b.write_octave(&mut err, "B")?;
    }

    let opts = MultiplyOpts {
        row_tile: opt.row_tile,
        k_tile: opt.k_tile,
        workers: opt.workers,
    };
    let tries = opt.tries.unwrap_or_else(|| default_tries(opt.size));
    let reporter = CsvReporter::new(&opt.output);

    println!(
        "Multiplying two {n}x{n} matrices, averaging over {tries} tries (seed {seed})",
        n = opt.size
    );

    let bar = ProgressBar::new((Strategy::ALL.len() * tries) as u64);
    for (index, strategy) in Strategy::ALL.into_iter().enumerate() {
        res.fill_zero();
        let mean_ms =
            benchmark_observed(&a, &b, &mut res, strategy, &opts, tries, |_| bar.inc(1))?;
        bar.suspend(|| println!("{:16} {:8.2} ms", strategy.label(), mean_ms));
        reporter.append(&BenchRecord {
            label: opt.label.clone(),
            dimension: opt.size,
            strategy,
            mean_ms,
        })?;
        if opt.dump {
            res.write_octave(&mut io::stderr().lock(), &format!("C{}", index + 1))?;
        }
    }
    bar.finish_and_clear();
    Ok(())
}
