use rand::{Rng, SeedableRng as _};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Source of every random decision the generator makes.
///
/// The generator never touches a platform random function, so any implementation of this trait
/// fully determines its output.
pub trait Randomness {
    /// Uniform integer in `[0, 100)`.
    fn percentage(&mut self) -> u8;

    /// Uniform index in `[0, n)`. `n` is never zero.
    fn choose_index(&mut self, n: usize) -> usize;
}

impl<T: Randomness + ?Sized> Randomness for &mut T {
    fn percentage(&mut self) -> u8 {
        (**self).percentage()
    }

    fn choose_index(&mut self, n: usize) -> usize {
        (**self).choose_index(n)
    }
}

/// [`Randomness`] backed by any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngRandomness<R = Random> {
    rng: R,
}

impl<R: Rng> RngRandomness<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRandomness<Random> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(Random::seed_from_u64(seed))
    }
}

impl<R: Rng> Randomness for RngRandomness<R> {
    fn percentage(&mut self) -> u8 {
        self.rng.gen_range(0..100)
    }

    fn choose_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

/// Replays a pre-recorded sequence of values, starting over once it runs out.
///
/// Percentages are taken modulo 100 and indices modulo `n`, so any recorded value is usable for
/// both kinds of draw. An empty sequence always yields zero, that is the lowest percentage and
/// the first candidate.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandomness {
    values: Vec<usize>,
    next: usize,
}

impl SequenceRandomness {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: 0,
        }
    }

    /// Always draws zero.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }

    fn next_value(&mut self) -> usize {
        if self.values.is_empty() {
            self.next += 1;
            return 0;
        }

        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

impl Randomness for SequenceRandomness {
    fn percentage(&mut self) -> u8 {
        (self.next_value() % 100) as u8
    }

    fn choose_index(&mut self, n: usize) -> usize {
        self.next_value() % n
    }
}
