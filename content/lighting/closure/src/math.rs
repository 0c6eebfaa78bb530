use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
  pub x: f32,
  pub y: f32,
  pub z: f32,
}

impl Vec3 {
  pub const fn new(x: f32, y: f32, z: f32) -> Self {
    Self { x, y, z }
  }

  pub const fn zero() -> Self {
    Self::new(0., 0., 0.)
  }

  pub fn dot(self, rhs: Self) -> f32 {
    self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
  }

  pub fn cross(self, rhs: Self) -> Self {
    Self::new(
      self.y * rhs.z - self.z * rhs.y,
      self.z * rhs.x - self.x * rhs.z,
      self.x * rhs.y - self.y * rhs.x,
    )
  }

  pub fn length2(self) -> f32 {
    self.dot(self)
  }

  pub fn length(self) -> f32 {
    self.length2().sqrt()
  }

  /// the caller must make sure the vector is not zero
  pub fn normalize(self) -> Self {
    self / self.length()
  }

  /// none for zero length or non finite vectors
  pub fn try_normalize(self) -> Option<Self> {
    let length2 = self.length2();
    (length2 != 0. && length2.is_finite()).then(|| self / length2.sqrt())
  }
}

impl Add for Vec3 {
  type Output = Self;
  fn add(self, rhs: Self) -> Self {
    Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
  }
}

impl Sub for Vec3 {
  type Output = Self;
  fn sub(self, rhs: Self) -> Self {
    Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
  }
}

impl Mul<f32> for Vec3 {
  type Output = Self;
  fn mul(self, rhs: f32) -> Self {
    Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
  }
}

impl Div<f32> for Vec3 {
  type Output = Self;
  fn div(self, rhs: f32) -> Self {
    Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
  }
}

impl Neg for Vec3 {
  type Output = Self;
  fn neg(self) -> Self {
    Self::new(-self.x, -self.y, -self.z)
  }
}

impl From<[f32; 3]> for Vec3 {
  fn from([x, y, z]: [f32; 3]) -> Self {
    Self::new(x, y, z)
  }
}

/// Orthonormal local frame used to orient a closure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingBasis {
  pub normal: Vec3,
  pub tangent_u: Vec3,
  pub tangent_v: Vec3,
}

impl Default for ShadingBasis {
  fn default() -> Self {
    Self {
      normal: Vec3::new(0., 0., 1.),
      tangent_u: Vec3::new(1., 0., 0.),
      tangent_v: Vec3::new(0., 1., 0.),
    }
  }
}

impl ShadingBasis {
  /// `normal` must be unit length. The tangent hint is projected onto the plane of the normal,
  /// if it is (nearly) parallel to the normal any perpendicular direction is used instead.
  pub fn from_normal_and_tangent(normal: Vec3, tangent_hint: Vec3) -> Self {
    let tangent_u = (tangent_hint - normal * normal.dot(tangent_hint))
      .try_normalize()
      .filter(|t| t.dot(normal).abs() < 1e-3)
      .unwrap_or_else(|| any_perpendicular(normal));
    Self {
      normal,
      tangent_u,
      tangent_v: normal.cross(tangent_u),
    }
  }

  /// Derive the frame of one closure from its (optional) normal and tangent parameters.
  ///
  /// - a zero normal keeps `fallback` untouched, whatever the tangent is
  /// - a zero or missing tangent builds the frame from the normal alone, using the
  ///   tangent of `fallback` as hint
  /// - otherwise both are normalized and orthogonalized
  pub fn derive(fallback: &Self, normal: Vec3, tangent: Option<Vec3>) -> Self {
    let Some(normal) = normal.try_normalize() else {
      return *fallback;
    };

    match tangent.and_then(Vec3::try_normalize) {
      Some(tangent) => Self::from_normal_and_tangent(normal, tangent),
      None => Self::from_normal_and_tangent(normal, fallback.tangent_u),
    }
  }
}

fn any_perpendicular(n: Vec3) -> Vec3 {
  let axis = if n.x.abs() < 0.9 {
    Vec3::new(1., 0., 0.)
  } else {
    Vec3::new(0., 1., 0.)
  };
  axis.cross(n).normalize()
}
