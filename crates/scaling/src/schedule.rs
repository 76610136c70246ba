use crate::error::{BenchError, Result};

pub const START_REPS: usize = 300;
pub const END_REPS: usize = 2;
pub const MAX_SIZE: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepSchedule {
    reps: Vec<usize>,
}

impl RepSchedule {
    pub fn standard() -> Self {
        Self::geometric(START_REPS, END_REPS, MAX_SIZE)
            .expect("standard schedule constants are valid")
    }

    /// `len` entries interpolated geometrically from `start` to `end`.
    ///
    /// Entry `i` is `round(start * (end / start)^(i / (len - 1)))`, never
    /// below 1. The first and last entries are exactly `start` and `end`.
    pub fn geometric(start: usize, end: usize, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(BenchError::Schedule("schedule must cover at least one size".into()));
        }
        if start == 0 || end == 0 {
            return Err(BenchError::Schedule(format!(
                "repetition counts must be >= 1 (start = {}, end = {})",
                start, end
            )));
        }
        if end > start {
            return Err(BenchError::Schedule(format!(
                "end repetitions ({}) exceed start repetitions ({})",
                end, start
            )));
        }
        if len == 1 {
            return Ok(Self { reps: vec![start] });
        }

        let ratio = (end as f64 / start as f64).powf(1.0 / (len - 1) as f64);
        let mut reps: Vec<usize> = (0..len)
            .map(|i| {
                let r = (start as f64 * ratio.powi(i as i32)).round() as usize;
                r.clamp(end, start)
            })
            .collect();
        reps[0] = start;
        reps[len - 1] = end;

        Ok(Self { reps })
    }

    pub fn from_reps(reps: Vec<usize>) -> Result<Self> {
        if reps.is_empty() {
            return Err(BenchError::Schedule("schedule must cover at least one size".into()));
        }
        if let Some(pos) = reps.iter().position(|&r| r == 0) {
            return Err(BenchError::Schedule(format!(
                "size {} has zero repetitions",
                pos + 1
            )));
        }
        Ok(Self { reps })
    }

    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.reps.len()
    }

    pub fn reps_for(&self, size: usize) -> Option<usize> {
        size.checked_sub(1).and_then(|i| self.reps.get(i).copied())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.reps
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.reps.iter().enumerate().map(|(i, &r)| (i + 1, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry() {
        let s = RepSchedule::geometric(7, 3, 1).unwrap();
        assert_eq!(s.as_slice(), &[7]);
    }

    #[test]
    fn flat_schedule() {
        let s = RepSchedule::geometric(5, 5, 4).unwrap();
        assert_eq!(s.as_slice(), &[5, 5, 5, 5]);
    }

    #[test]
    fn rejects_growth_and_zeros() {
        assert!(RepSchedule::geometric(2, 300, 30).is_err());
        assert!(RepSchedule::geometric(0, 0, 30).is_err());
        assert!(RepSchedule::geometric(300, 2, 0).is_err());
        assert!(RepSchedule::from_reps(vec![]).is_err());
        assert!(RepSchedule::from_reps(vec![3, 0, 1]).is_err());
    }

    #[test]
    fn size_lookup_is_one_based() {
        let s = RepSchedule::from_reps(vec![9, 4, 1]).unwrap();
        assert_eq!(s.reps_for(0), None);
        assert_eq!(s.reps_for(1), Some(9));
        assert_eq!(s.reps_for(3), Some(1));
        assert_eq!(s.reps_for(4), None);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![(1, 9), (2, 4), (3, 1)]);
    }
}
