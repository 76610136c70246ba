use crate::error::{BenchError, Result};
use crate::schedule::{RepSchedule, END_REPS, MAX_SIZE, START_REPS};
use log::info;
use rng::ONDRng;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    pub start_reps: usize,
    pub end_reps: usize,
    pub max_size: usize,
    /// `None` draws a seed from the clock.
    pub seed: Option<String>,
    pub out_dir: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            start_reps: START_REPS,
            end_reps: END_REPS,
            max_size: MAX_SIZE,
            seed: None,
            out_dir: PathBuf::from("benchmarks/data"),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(BenchError::Config("max_size must be >= 1".into()));
        }
        if self.start_reps == 0 || self.end_reps == 0 {
            return Err(BenchError::Config(format!(
                "repetition counts must be >= 1 (start = {}, end = {})",
                self.start_reps, self.end_reps
            )));
        }
        if self.end_reps > self.start_reps {
            return Err(BenchError::Config(format!(
                "end_reps ({}) must not exceed start_reps ({})",
                self.end_reps, self.start_reps
            )));
        }
        Ok(())
    }

    pub fn schedule(&self) -> Result<RepSchedule> {
        self.validate()?;
        RepSchedule::geometric(self.start_reps, self.end_reps, self.max_size)
    }

    /// The configured seed, or a fresh clock seed (logged so the run can be replayed).
    pub fn resolved_seed(&self) -> String {
        match &self.seed {
            Some(s) => s.clone(),
            None => {
                let s = ONDRng::clock_seed();
                info!("no seed given, using {:?}", s);
                s
            }
        }
    }
}
