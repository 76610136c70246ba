use clap::{Parser, ValueEnum};
use log::info;
use scaling::{
    Algorithm, BenchConfig, BenchError, Driver, PermanentRoutine, WorkerProcess,
};

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Permanent scaling benchmark over Haar-random unitaries")]
struct Args {
    /// Worker command line answering `perm` requests
    #[arg(long)]
    worker: String,

    /// Comma-separated permanent algorithms to time
    #[arg(long, value_enum, value_delimiter = ',', default_value = "glynn,ryser4")]
    algorithms: Vec<AlgorithmArg>,

    /// Repetitions at size 1
    #[arg(long, default_value_t = 300)]
    start_reps: usize,

    /// Repetitions at the largest size
    #[arg(long, default_value_t = 2)]
    end_reps: usize,

    /// Largest matrix size (sizes run 1..=max_size)
    #[arg(long, default_value_t = 30)]
    max_size: usize,

    /// RNG seed (omit for a clock-derived seed)
    #[arg(long)]
    seed: Option<String>,

    /// Directory for <algorithm>-pcvl.txt result files
    #[arg(long, default_value = "benchmarks/data")]
    out_dir: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AlgorithmArg {
    Glynn,
    Ryser4,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(a: AlgorithmArg) -> Self {
        match a {
            AlgorithmArg::Glynn => Algorithm::Glynn,
            AlgorithmArg::Ryser4 => Algorithm::Ryser4,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("permanent_bench: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> scaling::Result<()> {
    let config = BenchConfig {
        start_reps: args.start_reps,
        end_reps: args.end_reps,
        max_size: args.max_size,
        seed: args.seed,
        out_dir: args.out_dir,
    };
    let schedule = config.schedule()?;
    let algorithms = distinct(&args.algorithms)?;

    let worker = Rc::new(RefCell::new(WorkerProcess::spawn(&args.worker)?));
    info!("worker: {}", args.worker);

    let mut routines: Vec<_> = algorithms
        .into_iter()
        .map(|a| PermanentRoutine::new(worker.clone(), a))
        .collect();

    let labels: Vec<&str> = routines.iter().map(|r| r.algorithm().label()).collect();
    println!("size {}", labels.join(" "));

    let mut driver = Driver::new(schedule, config.resolved_seed());
    for path in driver.run_to_dir(&mut routines, &config.out_dir)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn distinct(args: &[AlgorithmArg]) -> scaling::Result<Vec<Algorithm>> {
    if args.is_empty() {
        return Err(BenchError::Config("at least one algorithm is required".into()));
    }
    let mut out: Vec<Algorithm> = Vec::with_capacity(args.len());
    for &a in args {
        let a = Algorithm::from(a);
        if out.contains(&a) {
            return Err(BenchError::Config(format!("algorithm {} listed twice", a.label())));
        }
        out.push(a);
    }
    Ok(out)
}
