//! The seam between the driver and the routines being timed.

use crate::error::{BenchError, Result};
use crate::state::BasicState;
use haar::{Unitary, C64};
use rng::ONDRng;
use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

/// Permanent algorithm, passed to the backend as its selector code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Glynn,
    Ryser4,
}

impl Algorithm {
    pub fn selector(self) -> u32 {
        match self {
            Algorithm::Glynn => 2,
            Algorithm::Ryser4 => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Glynn => "glynn",
            Algorithm::Ryser4 => "ryser4",
        }
    }
}

pub trait PermanentBackend {
    fn permanent(&mut self, u: &Unitary, algorithm: Algorithm) -> Result<C64>;
}

/// Boson sampler: configure with a unitary, then draw an output state.
pub trait SamplingBackend {
    fn configure(&mut self, u: &Unitary) -> Result<()>;
    fn sample(&mut self, input: &BasicState) -> Result<BasicState>;
}

// Several routines may share one backend (one worker process serves both
// permanent algorithms).
impl<B: PermanentBackend> PermanentBackend for Rc<RefCell<B>> {
    fn permanent(&mut self, u: &Unitary, algorithm: Algorithm) -> Result<C64> {
        self.borrow_mut().permanent(u, algorithm)
    }
}

impl<B: SamplingBackend> SamplingBackend for Rc<RefCell<B>> {
    fn configure(&mut self, u: &Unitary) -> Result<()> {
        self.borrow_mut().configure(u)
    }

    fn sample(&mut self, input: &BasicState) -> Result<BasicState> {
        self.borrow_mut().sample(input)
    }
}

/// Something the driver times once per generated matrix.
pub trait Routine {
    fn label(&self) -> &str;

    /// Untimed setup before the batch for `size`.
    fn prepare(&mut self, _size: usize, _rng: &mut ONDRng) -> Result<()> {
        Ok(())
    }

    fn call(&mut self, u: &Unitary) -> Result<()>;
}

pub struct PermanentRoutine<B> {
    backend: B,
    algorithm: Algorithm,
}

impl<B: PermanentBackend> PermanentRoutine<B> {
    pub fn new(backend: B, algorithm: Algorithm) -> Self {
        Self { backend, algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: PermanentBackend> Routine for PermanentRoutine<B> {
    fn label(&self) -> &str {
        self.algorithm.label()
    }

    fn call(&mut self, u: &Unitary) -> Result<()> {
        let p = self.backend.permanent(u, self.algorithm)?;
        black_box(p);
        Ok(())
    }
}

/// Samples `size` photons in `size` modes through each generated unitary.
pub struct SamplingRoutine<B> {
    backend: B,
    input: Option<BasicState>,
}

impl<B: SamplingBackend> SamplingRoutine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            input: None,
        }
    }

    pub fn input(&self) -> Option<&BasicState> {
        self.input.as_ref()
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: SamplingBackend> Routine for SamplingRoutine<B> {
    fn label(&self) -> &str {
        "cliffords"
    }

    fn prepare(&mut self, size: usize, rng: &mut ONDRng) -> Result<()> {
        self.input = Some(BasicState::random(size, size, rng)?);
        Ok(())
    }

    fn call(&mut self, u: &Unitary) -> Result<()> {
        let input = self.input.as_ref().ok_or_else(|| {
            BenchError::InvalidState("sampling routine called before prepare".into())
        })?;
        self.backend.configure(u)?;
        let out = self.backend.sample(input)?;
        black_box(out);
        Ok(())
    }
}

/// Routines of one sampling run on a shared backend: glynn and ryser4
/// first when `with_permanents`, then cliffords.
pub fn sampling_suite<B>(backend: Rc<RefCell<B>>, with_permanents: bool) -> Vec<Box<dyn Routine>>
where
    B: PermanentBackend + SamplingBackend + 'static,
{
    let mut routines: Vec<Box<dyn Routine>> = Vec::with_capacity(3);
    if with_permanents {
        for algorithm in [Algorithm::Glynn, Algorithm::Ryser4] {
            routines.push(Box::new(PermanentRoutine::new(backend.clone(), algorithm)));
        }
    }
    routines.push(Box::new(SamplingRoutine::new(backend)));
    routines
}

impl<R: Routine + ?Sized> Routine for Box<R> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn prepare(&mut self, size: usize, rng: &mut ONDRng) -> Result<()> {
        (**self).prepare(size, rng)
    }

    fn call(&mut self, u: &Unitary) -> Result<()> {
        (**self).call(u)
    }
}
