//! Haar-distributed random unitaries.
//!
//! Mezzadri, "How to generate random matrices from the classical compact
//! groups" (arXiv:math-ph/0609050): QR-factor a complex Ginibre matrix and
//! fix the phases of R's diagonal so Q is uniform on U(n).

use crate::error::{HaarError, Result};
use crate::unitary::{Unitary, C64};
use faer::Mat;
use log::warn;
use rng::ONDRng;

pub const MAX_RESAMPLES: usize = 8;

/// Draws an n×n unitary from the Haar measure on U(n).
pub fn haar_unitary(n: usize, rng: &mut ONDRng) -> Result<Unitary> {
    haar_unitary_with(n, |n| ginibre(n, rng))
}

/// Phase-fixed QR of matrices from `draw`, redrawing while R has a
/// degenerate diagonal. Gives up after `MAX_RESAMPLES` draws.
pub fn haar_unitary_with<F>(n: usize, mut draw: F) -> Result<Unitary>
where
    F: FnMut(usize) -> Mat<C64>,
{
    if n == 0 {
        return Err(HaarError::EmptySize);
    }

    let mut last_bad = 0;
    for attempt in 0..MAX_RESAMPLES {
        let z = draw(n);
        match phase_fixed_q(&z) {
            Ok(q) => return Ok(Unitary::from_mat_unchecked(q)),
            Err(index) => {
                warn!(
                    "degenerate R diagonal at index {} (n = {}, attempt {}), resampling",
                    index,
                    n,
                    attempt + 1
                );
                last_bad = index;
            }
        }
    }

    Err(HaarError::DegenerateDiagonal { index: last_bad })
}

/// Z = (X + iY) / √2 with X, Y standard normal.
fn ginibre(n: usize, rng: &mut ONDRng) -> Mat<C64> {
    let s = 1.0 / 2.0_f64.sqrt();
    let mut z = Mat::<C64>::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            let re = rng.next_gaussian(b"GINIBRE_RE");
            let im = rng.next_gaussian(b"GINIBRE_IM");
            z.write(i, j, C64::new(re * s, im * s));
        }
    }
    z
}

/// Q·diag(R_jj / |R_jj|). Returns the offending index when some |R_jj| is
/// zero or not finite.
fn phase_fixed_q(z: &Mat<C64>) -> std::result::Result<Mat<C64>, usize> {
    let n = z.nrows();
    let qr = z.qr();
    let mut q = qr.compute_q();
    let r = qr.compute_r();

    for j in 0..n {
        let d = r.read(j, j);
        let norm = d.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(j);
        }
        let ph = d / norm;
        for i in 0..n {
            let v = q.read(i, j);
            q.write(i, j, v * ph);
        }
    }

    Ok(q)
}
