use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::output::write_table;
use crate::routine::Routine;
use crate::schedule::RepSchedule;
use haar::{haar_unitary, Unitary};
use log::{debug, info};
use rng::ONDRng;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub struct TimingTable {
    label: String,
    seconds: Vec<f64>,
}

impl TimingTable {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            seconds: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn seconds(&self) -> &[f64] {
        &self.seconds
    }

    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    fn push(&mut self, avg: f64) {
        self.seconds.push(avg);
    }
}

pub struct Driver<C = SystemClock> {
    schedule: RepSchedule,
    seed: String,
    clock: C,
}

impl Driver<SystemClock> {
    pub fn new(schedule: RepSchedule, seed: impl Into<String>) -> Self {
        Self::with_clock(schedule, seed, SystemClock::new())
    }
}

impl<C: Clock> Driver<C> {
    pub fn with_clock(schedule: RepSchedule, seed: impl Into<String>, clock: C) -> Self {
        Self {
            schedule,
            seed: seed.into(),
            clock,
        }
    }

    pub fn schedule(&self) -> &RepSchedule {
        &self.schedule
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Times each routine on every size of the schedule.
    ///
    /// All routines see the same batch of matrices for a given size. The
    /// first error aborts the run and discards every table.
    pub fn run<R: Routine>(&mut self, routines: &mut [R]) -> Result<Vec<TimingTable>> {
        let mut tables: Vec<TimingTable> =
            routines.iter().map(|r| TimingTable::new(r.label())).collect();

        info!(
            "benchmark: sizes 1..={} with {} routine(s), seed {:?}",
            self.schedule.max_size(),
            routines.len(),
            self.seed
        );

        for (size, reps) in self.schedule.iter() {
            let seed_str = format!("{}-size-{}", self.seed, size);
            let mut rng = ONDRng::new(seed_str.as_bytes());
            let batch = generate_batch(size, reps, &mut rng)?;
            debug!("size {}: generated {} unitaries", size, reps);

            for (routine, table) in routines.iter_mut().zip(tables.iter_mut()) {
                routine.prepare(size, &mut rng)?;

                let start = self.clock.now();
                for u in &batch {
                    routine.call(u)?;
                }
                let elapsed = self.clock.now().saturating_sub(start);

                table.push(elapsed.as_secs_f64() / reps as f64);
            }

            let row: Vec<String> = tables
                .iter()
                .map(|t| format!("{:.6e}", t.seconds[size - 1]))
                .collect();
            println!("{} {}", size, row.join(" "));
        }

        Ok(tables)
    }

    pub fn run_to_dir<R: Routine>(
        &mut self,
        routines: &mut [R],
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let tables = self.run(routines)?;
        let mut paths = Vec::with_capacity(tables.len());
        for table in &tables {
            let path = out_dir.join(format!("{}-pcvl.txt", table.label()));
            write_table(&path, table.seconds())?;
            info!("wrote {} ({} sizes)", path.display(), table.len());
            paths.push(path);
        }
        Ok(paths)
    }
}

fn generate_batch(size: usize, reps: usize, rng: &mut ONDRng) -> Result<Vec<Unitary>> {
    let mut batch = Vec::with_capacity(reps);
    for _ in 0..reps {
        batch.push(haar_unitary(size, rng)?);
    }
    Ok(batch)
}
