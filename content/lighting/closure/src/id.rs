/// Dense small integer naming a closure kind.
///
/// User facing closures (the ones shaders emit) and the internal scattering model ids the
/// conversions store in composites share one id space. Ids from [`ClosureId::FIRST_LAYERED`]
/// on are layered closures: their parameter block embeds another closure tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClosureId(pub u32);

impl ClosureId {
  pub const ASHIKHMIN_SHIRLEY: Self = Self(0);
  pub const DISNEY: Self = Self(1);
  pub const OREN_NAYAR: Self = Self(2);
  pub const DIFFUSE: Self = Self(3);
  pub const PHONG: Self = Self(4);
  pub const REFLECTION: Self = Self(5);
  pub const SHEEN: Self = Self(6);
  pub const TRANSLUCENT: Self = Self(7);

  pub const GLOSSY: Self = Self(8);
  pub const GLOSSY_BECKMANN: Self = Self(9);
  pub const GLOSSY_GGX: Self = Self(10);

  pub const METAL: Self = Self(11);
  pub const METAL_BECKMANN: Self = Self(12);
  pub const METAL_GGX: Self = Self(13);

  pub const GLASS: Self = Self(14);
  pub const GLASS_BECKMANN: Self = Self(15);
  pub const GLASS_GGX: Self = Self(16);

  pub const EMISSION: Self = Self(17);

  pub const SUBSURFACE: Self = Self(18);
  pub const SUBSURFACE_BETTER_DIPOLE: Self = Self(19);
  pub const SUBSURFACE_STANDARD_DIPOLE: Self = Self(20);
  pub const SUBSURFACE_DIRECTIONAL_DIPOLE: Self = Self(21);
  pub const SUBSURFACE_NORMALIZED_DIFFUSION: Self = Self(22);

  pub const BACKGROUND: Self = Self(23);
  pub const DEBUG: Self = Self(24);
  pub const HOLDOUT: Self = Self(25);
  pub const TRANSPARENT: Self = Self(26);

  pub const AL_SURFACE_LAYER: Self = Self(27);
  pub const FIRST_LAYERED: Self = Self::AL_SURFACE_LAYER;

  /// one past the largest known id
  pub const COUNT: Self = Self(28);

  pub fn is_layered(self) -> bool {
    self >= Self::FIRST_LAYERED && self < Self::COUNT
  }

  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl std::fmt::Display for ClosureId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[test]
fn layered_range() {
  assert!(ClosureId::AL_SURFACE_LAYER.is_layered());
  assert!(!ClosureId::GLOSSY_GGX.is_layered());
  assert!(!ClosureId(9999).is_layered());
}
