use crate::error::{HaarError, Result};
use faer::Mat;
use num_complex::Complex64;

pub type C64 = Complex64;

/// Square complex matrix with U·U† ≈ I. Read-only once built.
#[derive(Clone, Debug)]
pub struct Unitary {
    mat: Mat<C64>,
}

impl Unitary {
    /// Wraps a matrix the caller guarantees to be unitary.
    pub(crate) fn from_mat_unchecked(mat: Mat<C64>) -> Self {
        debug_assert_eq!(mat.nrows(), mat.ncols());
        Self { mat }
    }

    /// Validating constructor: square, and max |UU† - I| within `tol`.
    pub fn from_mat(mat: Mat<C64>, tol: f64) -> Result<Self> {
        if mat.nrows() != mat.ncols() {
            return Err(HaarError::NotSquare {
                rows: mat.nrows(),
                cols: mat.ncols(),
            });
        }
        if mat.nrows() == 0 {
            return Err(HaarError::EmptySize);
        }

        let u = Self { mat };
        let deviation = u.unitarity_deviation();
        if deviation > tol {
            return Err(HaarError::NotUnitary { deviation });
        }
        Ok(u)
    }

    pub fn size(&self) -> usize {
        self.mat.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> C64 {
        self.mat.read(i, j)
    }

    pub fn as_mat(&self) -> &Mat<C64> {
        &self.mat
    }

    pub fn row_major(&self) -> Vec<C64> {
        let n = self.size();
        let mut out = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                out.push(self.mat.read(i, j));
            }
        }
        out
    }

    /// Maximum entry-wise |(U·U†) - I|.
    pub fn unitarity_deviation(&self) -> f64 {
        let n = self.size();
        let mut worst = 0.0f64;
        for i in 0..n {
            for j in 0..n {
                let mut acc = C64::new(0.0, 0.0);
                for k in 0..n {
                    acc += self.mat.read(i, k) * self.mat.read(j, k).conj();
                }
                if i == j {
                    acc -= C64::new(1.0, 0.0);
                }
                let d = acc.norm();
                // NaN must not hide behind max()
                if d.is_nan() {
                    return f64::INFINITY;
                }
                worst = worst.max(d);
            }
        }
        worst
    }

    pub fn mul(&self, other: &Unitary) -> Result<Unitary> {
        let n = self.size();
        if other.size() != n {
            return Err(HaarError::SizeMismatch {
                left: n,
                right: other.size(),
            });
        }
        let mut out = Mat::<C64>::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let mut acc = C64::new(0.0, 0.0);
                for k in 0..n {
                    acc += self.mat.read(i, k) * other.mat.read(k, j);
                }
                out.write(i, j, acc);
            }
        }
        Ok(Unitary::from_mat_unchecked(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Mat<C64> {
        let mut m = Mat::<C64>::zeros(n, n);
        for i in 0..n {
            m.write(i, i, C64::new(1.0, 0.0));
        }
        m
    }

    #[test]
    fn identity_is_unitary() {
        let u = Unitary::from_mat(identity(4), 1e-12).unwrap();
        assert_eq!(u.size(), 4);
        assert_eq!(u.unitarity_deviation(), 0.0);
        assert_eq!(u.row_major()[5], C64::new(1.0, 0.0));
    }

    #[test]
    fn rejects_scaled_identity() {
        let mut m = identity(2);
        m.write(0, 0, C64::new(2.0, 0.0));
        let err = Unitary::from_mat(m, 1e-10).unwrap_err();
        assert!(matches!(err, HaarError::NotUnitary { .. }), "{:?}", err);
    }

    #[test]
    fn rejects_non_square() {
        let m = Mat::<C64>::zeros(2, 3);
        assert_eq!(
            Unitary::from_mat(m, 1e-10).unwrap_err(),
            HaarError::NotSquare { rows: 2, cols: 3 }
        );
    }
}
