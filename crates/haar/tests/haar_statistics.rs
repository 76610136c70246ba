use approx::assert_abs_diff_eq;
use haar::{haar_unitary, Unitary};
use rng::ONDRng;

const SAMPLES: usize = 4000;

/// Mean and variance of |U_00|^2. For Haar U(2) this is uniform on [0, 1].
fn corner_moments<F>(mut sample: F) -> (f64, f64)
where
    F: FnMut() -> Unitary,
{
    let xs: Vec<f64> = (0..SAMPLES).map(|_| sample().get(0, 0).norm_sqr()).collect();
    let mean = xs.iter().sum::<f64>() / SAMPLES as f64;
    let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / SAMPLES as f64;
    (mean, var)
}

fn fixed_unitary() -> Unitary {
    let mut rng = ONDRng::new(b"fixed-rotation");
    haar_unitary(2, &mut rng).unwrap()
}

#[test]
fn corner_weight_is_uniform() {
    let mut rng = ONDRng::new(b"stats-plain");
    let (mean, var) = corner_moments(|| haar_unitary(2, &mut rng).unwrap());

    assert_abs_diff_eq!(mean, 0.5, epsilon = 0.03);
    assert_abs_diff_eq!(var, 1.0 / 12.0, epsilon = 0.01);
}

#[test]
fn left_invariance() {
    let v = fixed_unitary();
    let mut rng = ONDRng::new(b"stats-left");
    let (mean, var) = corner_moments(|| v.mul(&haar_unitary(2, &mut rng).unwrap()).unwrap());

    assert_abs_diff_eq!(mean, 0.5, epsilon = 0.03);
    assert_abs_diff_eq!(var, 1.0 / 12.0, epsilon = 0.01);
}

#[test]
fn right_invariance() {
    let v = fixed_unitary();
    let mut rng = ONDRng::new(b"stats-right");
    let (mean, var) = corner_moments(|| haar_unitary(2, &mut rng).unwrap().mul(&v).unwrap());

    assert_abs_diff_eq!(mean, 0.5, epsilon = 0.03);
    assert_abs_diff_eq!(var, 1.0 / 12.0, epsilon = 0.01);
}

#[test]
fn entries_have_zero_mean_and_uniform_phase() {
    let mut rng = ONDRng::new(b"stats-phase");
    let mut sum = haar::C64::new(0.0, 0.0);
    let mut upper_half = 0usize;
    for _ in 0..SAMPLES {
        let z = haar_unitary(3, &mut rng).unwrap().get(2, 2);
        sum += z;
        if z.arg() > 0.0 {
            upper_half += 1;
        }
    }
    let mean = sum / SAMPLES as f64;
    let frac = upper_half as f64 / SAMPLES as f64;

    assert!(mean.norm() < 0.03, "mean = {}", mean);
    assert_abs_diff_eq!(frac, 0.5, epsilon = 0.04);
}
