use clap::Parser;
use log::info;
use scaling::{sampling_suite, BenchConfig, Driver, Routine, WorkerProcess};

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Boson-sampling scaling benchmark (n photons in n modes)")]
struct Args {
    /// Worker command line answering `unitary` / `sample` requests
    #[arg(long)]
    worker: String,

    /// Repetitions at size 1
    #[arg(long, default_value_t = 300)]
    start_reps: usize,

    /// Repetitions at the largest size
    #[arg(long, default_value_t = 2)]
    end_reps: usize,

    /// Largest size (sizes run 1..=max_size)
    #[arg(long, default_value_t = 30)]
    max_size: usize,

    /// RNG seed (omit for a clock-derived seed)
    #[arg(long)]
    seed: Option<String>,

    /// Also time glynn and ryser4 permanents on the same worker and matrices
    #[arg(long)]
    with_permanents: bool,

    /// Directory for the <label>-pcvl.txt result files
    #[arg(long, default_value = "benchmarks")]
    out_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("sampling_bench: {}", err);
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

    let worker = Rc::new(RefCell::new(WorkerProcess::spawn(&args.worker)?));
    info!("worker: {}", args.worker);

    let mut routines = sampling_suite(worker, args.with_permanents);
    let labels: Vec<&str> = routines.iter().map(|r| r.label()).collect();
    println!("size {}", labels.join(" "));

    let mut driver = Driver::new(schedule, config.resolved_seed());
    for path in driver.run_to_dir(&mut routines, &config.out_dir)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}
