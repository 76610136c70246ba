use sha3::{digest::{ExtendableOutput, Update, XofReader}, Shake256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic SHAKE256 stream. Every draw is tagged with a context label
/// so independent consumers of one stream stay distinguishable.
pub struct ONDRng {
    state: [u8; 32],
    step: u64,
}

impl ONDRng {
    pub fn new(seed: &[u8]) -> Self {
        let mut state = [0u8; 32];
        shake(&[seed, b"OND_INIT"], &mut state);
        Self { state, step: 0 }
    }

    /// Seed string derived from the wall clock, for runs without `--seed`.
    pub fn clock_seed() -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        format!("clock-{}-{}", nanos, std::process::id())
    }

    pub fn next_f64(&mut self, ctx: &[u8]) -> f64 {
        self.step += 1;

        let state = self.state;
        let step_bytes = self.step.to_be_bytes();
        let mut next_state = self.state;
        shake(&[&state, &step_bytes, b"HAAR"], &mut next_state);
        self.state = next_state;

        let mut out = [0u8; 8];
        shake(&[&self.state, ctx], &mut out);

        (u64::from_be_bytes(out) as f64) / (u64::MAX as f64)
    }

    /// Standard normal draw (Box-Muller, cosine branch).
    pub fn next_gaussian(&mut self, ctx: &[u8]) -> f64 {
        let mut u1 = self.next_f64(ctx);
        while u1 <= 0.0 {
            u1 = self.next_f64(ctx);
        }
        let u2 = self.next_f64(ctx);
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    pub fn next_index(&mut self, bound: usize, ctx: &[u8]) -> usize {
        debug_assert!(bound > 0, "next_index needs a non-empty range");
        let x = (self.next_f64(ctx) * bound as f64) as usize;
        x.min(bound - 1)
    }

    /// `k` distinct indices from `0..n`, sorted ascending (partial Fisher-Yates).
    pub fn choose_sorted(&mut self, k: usize, n: usize, ctx: &[u8]) -> Vec<usize> {
        let k = k.min(n);
        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = i + self.next_index(n - i, ctx);
            pool.swap(i, j);
        }
        let mut picked = pool[..k].to_vec();
        picked.sort_unstable();
        picked
    }
}

fn shake(parts: &[&[u8]], out: &mut [u8]) {
    let mut h = Shake256::default();
    for p in parts {
        h.update(p);
    }
    let mut r = h.finalize_xof();
    r.read(out);
}
