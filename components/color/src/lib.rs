mod rgb;
pub use rgb::*;

/// clamp into [0, 1]
pub fn saturate(v: f32) -> f32 {
  v.clamp(0.0, 1.0)
}
