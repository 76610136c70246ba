use crate::error::{BenchError, Result};
use rng::ONDRng;
use std::fmt;
use std::str::FromStr;

/// Photon occupation numbers over a fixed set of modes, written `|1,0,1>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BasicState {
    occupations: Vec<usize>,
}

impl BasicState {
    pub fn new(occupations: Vec<usize>) -> Self {
        Self { occupations }
    }

    pub fn from_modes(m: usize, modes: &[usize]) -> Result<Self> {
        let mut occupations = vec![0usize; m];
        for &mode in modes {
            if mode >= m {
                return Err(BenchError::InvalidState(format!(
                    "mode {} out of range for {} modes",
                    mode, m
                )));
            }
            if occupations[mode] != 0 {
                return Err(BenchError::InvalidState(format!("mode {} listed twice", mode)));
            }
            occupations[mode] = 1;
        }
        Ok(Self { occupations })
    }

    /// `n` photons placed in `n` distinct, uniformly chosen modes out of `m`.
    pub fn random(n: usize, m: usize, rng: &mut ONDRng) -> Result<Self> {
        if n > m {
            return Err(BenchError::InvalidState(format!(
                "cannot place {} photons in {} modes",
                n, m
            )));
        }
        let modes = rng.choose_sorted(n, m, b"INPUT_MODES");
        Self::from_modes(m, &modes)
    }

    pub fn modes(&self) -> usize {
        self.occupations.len()
    }

    pub fn photons(&self) -> usize {
        self.occupations.iter().sum()
    }

    pub fn occupations(&self) -> &[usize] {
        &self.occupations
    }
}

impl fmt::Display for BasicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for (i, n) in self.occupations.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", n)?;
        }
        write!(f, ">")
    }
}

impl FromStr for BasicState {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix('|')
            .and_then(|t| t.strip_suffix('>'))
            .ok_or_else(|| BenchError::InvalidState(format!("expected |n0,n1,...>, got {:?}", s)))?;

        if inner.trim().is_empty() {
            return Ok(Self::new(Vec::new()));
        }

        let occupations = inner
            .split(',')
            .map(|t| {
                t.trim().parse::<usize>().map_err(|_| {
                    BenchError::InvalidState(format!("bad occupation {:?} in {:?}", t, s))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(occupations))
    }
}
