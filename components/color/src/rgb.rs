use std::ops::{Add, AddAssign, Div, Mul, MulAssign};

/// Rec. 709 relative luminance coefficients.
pub const LUMINANCE_WEIGHTS: [f32; 3] = [0.212671, 0.715160, 0.072169];

#[repr(C)]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct LinearRGBColor<T> {
  pub r: T,
  pub g: T,
  pub b: T,
}

unsafe impl<T: bytemuck::Pod> bytemuck::Pod for LinearRGBColor<T> {}
unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for LinearRGBColor<T> {}

impl<T> LinearRGBColor<T> {
  pub fn new(r: T, g: T, b: T) -> Self {
    Self { r, g, b }
  }
}

impl<T: Copy> LinearRGBColor<T> {
  pub fn splat(v: T) -> Self {
    Self { r: v, g: v, b: v }
  }

  pub fn map<U>(self, f: impl Fn(T) -> U) -> LinearRGBColor<U> {
    LinearRGBColor {
      r: f(self.r),
      g: f(self.g),
      b: f(self.b),
    }
  }
}

impl LinearRGBColor<f32> {
  pub fn zero() -> Self {
    Self::splat(0.)
  }

  pub fn white() -> Self {
    Self::splat(1.)
  }

  pub fn luminance(&self) -> f32 {
    self.r * LUMINANCE_WEIGHTS[0] + self.g * LUMINANCE_WEIGHTS[1] + self.b * LUMINANCE_WEIGHTS[2]
  }

  /// the largest single channel, NaN channels are ignored
  pub fn max_channel(&self) -> f32 {
    self.r.max(self.g).max(self.b)
  }

  pub fn is_black(&self) -> bool {
    self.r == 0. && self.g == 0. && self.b == 0.
  }
}

impl Mul<f32> for LinearRGBColor<f32> {
  type Output = Self;

  fn mul(self, rhs: f32) -> Self::Output {
    Self {
      r: self.r * rhs,
      g: self.g * rhs,
      b: self.b * rhs,
    }
  }
}

impl<T: Mul<Output = T>> Mul for LinearRGBColor<T> {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self::Output {
    Self {
      r: self.r * rhs.r,
      g: self.g * rhs.g,
      b: self.b * rhs.b,
    }
  }
}

impl<T: MulAssign> MulAssign for LinearRGBColor<T> {
  fn mul_assign(&mut self, rhs: Self) {
    self.r *= rhs.r;
    self.g *= rhs.g;
    self.b *= rhs.b;
  }
}

impl<T: Div<Output = T> + Copy> Div<T> for LinearRGBColor<T> {
  type Output = Self;

  fn div(self, rhs: T) -> Self::Output {
    Self {
      r: self.r / rhs,
      g: self.g / rhs,
      b: self.b / rhs,
    }
  }
}

impl<T: Add<Output = T>> Add for LinearRGBColor<T> {
  type Output = Self;

  fn add(self, rhs: Self) -> Self::Output {
    Self {
      r: self.r + rhs.r,
      g: self.g + rhs.g,
      b: self.b + rhs.b,
    }
  }
}

impl<T: AddAssign> AddAssign for LinearRGBColor<T> {
  fn add_assign(&mut self, rhs: Self) {
    self.r += rhs.r;
    self.g += rhs.g;
    self.b += rhs.b;
  }
}

impl<T> From<(T, T, T)> for LinearRGBColor<T> {
  fn from(value: (T, T, T)) -> Self {
    Self {
      r: value.0,
      g: value.1,
      b: value.2,
    }
  }
}

impl<T> From<LinearRGBColor<T>> for (T, T, T) {
  fn from(value: LinearRGBColor<T>) -> Self {
    (value.r, value.g, value.b)
  }
}

impl<T> From<[T; 3]> for LinearRGBColor<T> {
  fn from([r, g, b]: [T; 3]) -> Self {
    Self { r, g, b }
  }
}

#[test]
fn luminance_of_white_is_one() {
  let l = LinearRGBColor::white().luminance();
  assert!((l - 1.0).abs() < 1e-5);
}

#[test]
fn max_channel_picks_strongest() {
  let c = LinearRGBColor::new(0.2, 3.0, -1.0);
  assert_eq!(c.max_channel(), 3.0);
  assert_eq!(LinearRGBColor::new(-1., -2., -0.5).max_channel(), -0.5);
}

#[test]
fn color_is_pod() {
  let c = LinearRGBColor::new(1.0_f32, 2.0, 3.0);
  let bytes: &[u8] = bytemuck::bytes_of(&c);
  assert_eq!(bytes.len(), 12);
  let back: LinearRGBColor<f32> = *bytemuck::from_bytes(bytes);
  assert_eq!(back, c);
}
