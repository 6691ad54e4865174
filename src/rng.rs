use rand::SeedableRng;
use rand_pcg::Pcg64;

pub type DealRng = Pcg64;

/// Deterministic RNG for a seed. Identical seeds give identical streams.
#[inline]
pub fn rng_for_seed(seed: u64) -> DealRng {
    Pcg64::seed_from_u64(seed)
}

/// Fresh seed from OS entropy, for callers that did not ask for reproducibility.
#[inline]
pub fn entropy_seed() -> u64 {
    rand::random()
}
