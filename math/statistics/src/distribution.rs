/// Turn unnormalized non negative `weights` into a pmf in place and write the matching cdf.
///
/// The last cdf element is pinned to exactly 1.0 so that no probability mass becomes
/// unreachable because of rounding. A single weight always maps to pmf = cdf = [1.0]. When the
/// weight total is not a positive finite number the distribution falls back to uniform, and
/// false is returned so the caller can report the degenerate input.
///
/// https://pbr-book.org/4ed/Monte_Carlo_Integration/Sampling_Using_the_Inversion_Method#DiscreteCase
pub fn build_discrete_cdf(weights: &mut [f32], cdf: &mut [f32]) -> bool {
  assert_eq!(weights.len(), cdf.len());

  match weights.len() {
    0 => return true,
    1 => {
      weights[0] = 1.0;
      cdf[0] = 1.0;
      return true;
    }
    _ => {}
  }

  let mut total = 0.0_f32;
  for (weight, c) in weights.iter().zip(cdf.iter_mut()) {
    total += *weight;
    *c = total;
  }

  let well_formed = total > 0. && total.is_finite();
  if well_formed {
    let rcp_total = 1.0 / total;
    weights.iter_mut().for_each(|w| *w *= rcp_total);
    cdf.iter_mut().for_each(|c| *c *= rcp_total);
  } else {
    log::warn!("discrete distribution has a degenerate total weight {total}, using uniform");
    let count = weights.len() as f32;
    weights.iter_mut().for_each(|w| *w = 1.0 / count);
    cdf
      .iter_mut()
      .enumerate()
      .for_each(|(i, c)| *c = (i + 1) as f32 / count);
  }

  if let Some(last) = cdf.last_mut() {
    *last = 1.0;
  }

  well_formed
}

/// Return the smallest index whose cdf value is not less than `sample`.
///
/// `cdf` must be non decreasing and non empty. Samples at or above the final element (which
/// should not happen for samples in [0, 1)) select the last index.
pub fn sample_discrete_cdf(cdf: &[f32], sample: f32) -> usize {
  assert!(!cdf.is_empty());
  cdf.partition_point(|&c| c < sample).min(cdf.len() - 1)
}
