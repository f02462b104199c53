/***************************************/
/*        3rd party libraries          */
/***************************************/
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random source for the simulation.
///
/// Seeded runs are reproducible: the same seed and configuration produce the
/// same calls, assignments and passengers.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: Option<u64>) -> SimRng {
        match seed {
            Some(seed) => SimRng(SmallRng::seed_from_u64(seed)),
            None => SimRng(SmallRng::from_entropy()),
        }
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
