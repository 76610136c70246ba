pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod output;
pub mod routine;
pub mod schedule;
pub mod state;
pub mod worker;

pub use clock::{Clock, SystemClock};
pub use config::BenchConfig;
pub use driver::{Driver, TimingTable};
pub use error::{BenchError, Result};
pub use routine::{
    sampling_suite, Algorithm, PermanentBackend, PermanentRoutine, Routine, SamplingBackend,
    SamplingRoutine,
};
pub use schedule::RepSchedule;
pub use state::BasicState;
pub use worker::WorkerProcess;
