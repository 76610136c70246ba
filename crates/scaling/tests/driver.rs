use haar::Unitary;
use scaling::output::read_table;
use scaling::{Clock, Driver, RepSchedule, Routine, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Advances by a fixed step every time it is read.
struct StepClock {
    t: Duration,
    step: Duration,
}

impl Clock for StepClock {
    fn now(&mut self) -> Duration {
        let t = self.t;
        self.t += self.step;
        t
    }
}

/// Mocked routine: constant result, counts calls and sizes seen.
struct Constant {
    label: &'static str,
    calls: Vec<usize>,
}

impl Constant {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            calls: Vec::new(),
        }
    }
}

impl Routine for Constant {
    fn label(&self) -> &str {
        self.label
    }

    fn call(&mut self, u: &Unitary) -> Result<()> {
        assert!(u.unitarity_deviation() < 1e-10);
        self.calls.push(u.size());
        Ok(())
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scaling-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn step_clock() -> StepClock {
    StepClock {
        t: Duration::from_secs(10),
        step: Duration::from_millis(250),
    }
}

#[test]
fn three_sizes_five_reps_end_to_end() {
    let dir = scratch_dir("e2e");
    let schedule = RepSchedule::from_reps(vec![5, 5, 5]).unwrap();
    let mut driver = Driver::with_clock(schedule, "e2e", step_clock());
    let mut routines = vec![Constant::new("constant")];

    let paths = driver.run_to_dir(&mut routines, &dir).unwrap();
    assert_eq!(paths, vec![dir.join("constant-pcvl.txt")]);

    let text = std::fs::read_to_string(&paths[0]).unwrap();
    assert_eq!(text.lines().count(), 3);

    // each batch spans exactly one clock step
    let values = read_table(&paths[0]).unwrap();
    for v in &values {
        assert!((v - 0.25 / 5.0).abs() < 1e-15, "{:?}", values);
    }

    assert_eq!(
        routines[0].calls,
        vec![1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3]
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rerun_overwrites_output() {
    let dir = scratch_dir("rerun");
    let path = dir.join("constant-pcvl.txt");

    for _ in 0..2 {
        let schedule = RepSchedule::from_reps(vec![5, 5, 5]).unwrap();
        let mut driver = Driver::with_clock(schedule, "rerun", step_clock());
        driver
            .run_to_dir(&mut [Constant::new("constant")], &dir)
            .unwrap();
    }

    assert_eq!(read_table(&path).unwrap().len(), 3);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn routines_share_each_batch() {
    let schedule = RepSchedule::from_reps(vec![3, 2]).unwrap();
    let mut driver = Driver::with_clock(schedule, "shared", step_clock());
    let mut routines = vec![Constant::new("a"), Constant::new("b")];

    let tables = driver.run(&mut routines).unwrap();

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].label(), "a");
    assert_eq!(tables[1].label(), "b");
    assert_eq!(tables[0].seconds().len(), 2);
    assert!((tables[0].seconds()[0] - 0.25 / 3.0).abs() < 1e-15);
    assert!((tables[1].seconds()[1] - 0.25 / 2.0).abs() < 1e-15);
    assert_eq!(routines[0].calls, routines[1].calls);
}

#[test]
fn wall_clock_run_is_finite_and_non_negative() {
    let schedule = RepSchedule::geometric(6, 2, 4).unwrap();
    let mut driver = Driver::new(schedule, "wall");
    let tables = driver.run(&mut [Constant::new("wall")]).unwrap();

    assert_eq!(tables[0].len(), 4);
    assert!(tables[0].seconds().iter().all(|s| s.is_finite() && *s >= 0.0));
}

struct Failing;

impl Routine for Failing {
    fn label(&self) -> &str {
        "failing"
    }

    fn call(&mut self, u: &Unitary) -> Result<()> {
        if u.size() == 2 {
            return Err(scaling::BenchError::Worker("boom".into()));
        }
        Ok(())
    }
}

#[test]
fn routine_error_aborts_without_writing() {
    let dir = scratch_dir("abort");
    let schedule = RepSchedule::from_reps(vec![2, 2, 2]).unwrap();
    let mut driver = Driver::with_clock(schedule, "abort", step_clock());

    let err = driver.run_to_dir(&mut [Failing], &dir).unwrap_err();
    assert!(matches!(err, scaling::BenchError::Worker(_)), "{}", err);
    assert!(!dir.join("failing-pcvl.txt").exists());
}

#[test]
fn seeded_runs_see_identical_matrices() {
    struct Record(Vec<Vec<haar::C64>>);
    impl Routine for Record {
        fn label(&self) -> &str {
            "record"
        }
        fn call(&mut self, u: &Unitary) -> Result<()> {
            self.0.push(u.row_major());
            Ok(())
        }
    }

    let run = || {
        let schedule = RepSchedule::from_reps(vec![2, 2, 1]).unwrap();
        let mut driver = Driver::with_clock(schedule, "replay", step_clock());
        let mut r = [Record(Vec::new())];
        driver.run(&mut r).unwrap();
        let [Record(seen)] = r;
        seen
    };

    assert_eq!(run(), run());
}
