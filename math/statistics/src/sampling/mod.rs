mod sobol;
pub use sobol::*;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// https://www.pbr-book.org/3ed-2018/Sampling_and_Reconstruction/Sampling_Interface#fragment-SamplerInterface-2
///
/// The task of a Sampler is to generate a sequence of d-dimensional samples in
/// [0, 1) ^ d. A sampler is deterministic: resetting it to the same sampling index
/// replays the same values dimension by dimension.
pub trait Sampler {
  fn reset(&mut self, next_sampling_index: usize);

  fn next(&mut self) -> f32;

  /// While a 2D sample value could be constructed by using values returned by a pair of calls to
  /// sample(), some samplers can generate better point distributions if they know that two
  /// dimensions will be used together.
  fn next_2d(&mut self) -> (f32, f32) {
    (self.next(), self.next())
  }
}

/// Because sample values must be strictly less than 1, we clamp to the largest f32 below 1.
pub const ONE_MINUS_EPSILON: f32 = 1.0 - f32::EPSILON / 2.0;

/// Pseudo random sampler with a fixed seed, mainly useful for tests and reference renders.
pub struct RngSampler {
  seed: u64,
  rng: StdRng,
}

impl RngSampler {
  pub fn new(seed: u64) -> Self {
    Self {
      seed,
      rng: StdRng::seed_from_u64(seed),
    }
  }
}

impl Default for RngSampler {
  fn default() -> Self {
    Self::new(0)
  }
}

impl Sampler for RngSampler {
  fn reset(&mut self, next_sampling_index: usize) {
    self.rng = StdRng::seed_from_u64(self.seed ^ (next_sampling_index as u64).rotate_left(32));
  }

  fn next(&mut self) -> f32 {
    self.rng.gen::<f32>().min(ONE_MINUS_EPSILON)
  }
}

/// Sampler that always yields the same value, handy to drive sampling code to a known branch.
pub struct ConstantSampler(pub f32);

impl Sampler for ConstantSampler {
  fn reset(&mut self, _: usize) {}

  fn next(&mut self) -> f32 {
    self.0
  }
}

#[test]
fn rng_sampler_replays_after_reset() {
  let mut sampler = RngSampler::new(11);
  sampler.reset(4);
  let first: Vec<f32> = (0..4).map(|_| sampler.next()).collect();
  sampler.reset(4);
  let second: Vec<f32> = (0..4).map(|_| sampler.next()).collect();
  assert_eq!(first, second);
  assert!(first.iter().all(|v| (0.0..1.0).contains(v)));
}
