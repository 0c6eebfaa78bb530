use crate::*;

/// The symbolic closure expression produced by running a shading network at one point.
///
/// Missing children are null closures and contribute nothing.
#[derive(Debug, Clone)]
pub enum ClosureTree {
  /// multiply the running weight of the child by a per channel weight
  Scale {
    child: Option<Box<ClosureTree>>,
    weight: LinearRGBColor<f32>,
  },
  /// both children receive the full running weight, their contributions add up
  Combine {
    left: Option<Box<ClosureTree>>,
    right: Option<Box<ClosureTree>>,
  },
  Leaf(ClosureComponent),
}

#[derive(Debug, Clone)]
pub struct ClosureComponent {
  pub id: ClosureId,
  pub weight: LinearRGBColor<f32>,
  pub params: ClosureParams,
}

impl ClosureTree {
  pub fn leaf(
    id: ClosureId,
    weight: LinearRGBColor<f32>,
    params: impl Into<ClosureParams>,
  ) -> Self {
    Self::Leaf(ClosureComponent {
      id,
      weight,
      params: params.into(),
    })
  }

  pub fn scale(child: ClosureTree, weight: LinearRGBColor<f32>) -> Self {
    Self::Scale {
      child: Some(Box::new(child)),
      weight,
    }
  }

  pub fn combine(left: ClosureTree, right: ClosureTree) -> Self {
    Self::Combine {
      left: Some(Box::new(left)),
      right: Some(Box::new(right)),
    }
  }
}

/// Parameter block of one closure component, laid out per closure kind.
#[derive(Debug, Clone, Default)]
pub enum ClosureParams {
  /// closures without parameters: background, holdout, transparent, emission
  #[default]
  Empty,
  Debug {
    tag: String,
  },
  AshikhminShirley(AshikhminShirleyParams),
  Disney(DisneyParams),
  Diffuse {
    n: Vec3,
  },
  OrenNayar {
    n: Vec3,
    roughness: f32,
  },
  Phong {
    n: Vec3,
    exponent: f32,
  },
  Reflection {
    n: Vec3,
    ior: f32,
  },
  Sheen {
    n: Vec3,
  },
  Translucent {
    n: Vec3,
  },
  Glossy(GlossyParams),
  Metal(MetalParams),
  Glass(GlassParams),
  Subsurface(SubsurfaceParams),
  AlSurfaceLayer(AlSurfaceLayerParams),
}

impl ClosureParams {
  /// the nested tree of a layered closure
  pub fn substrate(&self) -> Option<&ClosureTree> {
    match self {
      Self::AlSurfaceLayer(p) => p.substrate.as_deref(),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct AshikhminShirleyParams {
  pub n: Vec3,
  pub t: Vec3,
  pub diffuse_reflectance: LinearRGBColor<f32>,
  pub glossy_reflectance: LinearRGBColor<f32>,
  pub exponent_u: f32,
  pub exponent_v: f32,
  pub fresnel_multiplier: f32,
}

#[derive(Debug, Clone, Default)]
pub struct DisneyParams {
  pub n: Vec3,
  pub t: Vec3,
  pub base_color: LinearRGBColor<f32>,
  pub subsurface: f32,
  pub metallic: f32,
  pub specular: f32,
  pub specular_tint: f32,
  pub anisotropic: f32,
  pub roughness: f32,
  pub sheen: f32,
  pub sheen_tint: f32,
  pub clearcoat: f32,
  pub clearcoat_gloss: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GlossyParams {
  /// microfacet distribution name, "ggx" or "beckmann"
  pub dist: String,
  pub n: Vec3,
  pub t: Vec3,
  pub roughness: f32,
  pub anisotropy: f32,
  pub ior: f32,
}

#[derive(Debug, Clone, Default)]
pub struct MetalParams {
  pub dist: String,
  pub n: Vec3,
  pub t: Vec3,
  pub normal_reflectance: LinearRGBColor<f32>,
  pub edge_tint: LinearRGBColor<f32>,
  pub roughness: f32,
  pub anisotropy: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GlassParams {
  pub dist: String,
  pub n: Vec3,
  pub t: Vec3,
  pub surface_transmittance: LinearRGBColor<f32>,
  pub reflection_tint: LinearRGBColor<f32>,
  pub refraction_tint: LinearRGBColor<f32>,
  pub roughness: f32,
  pub anisotropy: f32,
  pub ior: f32,
  pub volume_transmittance: LinearRGBColor<f32>,
  pub volume_transmittance_distance: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SubsurfaceParams {
  /// "standard_dipole", "better_dipole", "directional_dipole" or "normalized_diffusion"
  pub profile: String,
  pub n: Vec3,
  pub reflectance: LinearRGBColor<f32>,
  pub mean_free_path: LinearRGBColor<f32>,
  pub ior: f32,
}

#[derive(Debug, Clone, Default)]
pub struct AlSurfaceLayerParams {
  pub substrate: Option<Box<ClosureTree>>,
  pub distribution: i32,
  pub n: Vec3,
  pub t: Vec3,
  pub reflectance: LinearRGBColor<f32>,
  pub roughness: f32,
  pub anisotropy: f32,
  pub fresnel_mode: i32,
  pub ior: f32,
  pub normal_reflectance: LinearRGBColor<f32>,
  pub edge_tint: LinearRGBColor<f32>,
}

impl From<AshikhminShirleyParams> for ClosureParams {
  fn from(p: AshikhminShirleyParams) -> Self {
    Self::AshikhminShirley(p)
  }
}

impl From<DisneyParams> for ClosureParams {
  fn from(p: DisneyParams) -> Self {
    Self::Disney(p)
  }
}

impl From<GlossyParams> for ClosureParams {
  fn from(p: GlossyParams) -> Self {
    Self::Glossy(p)
  }
}

impl From<MetalParams> for ClosureParams {
  fn from(p: MetalParams) -> Self {
    Self::Metal(p)
  }
}

impl From<GlassParams> for ClosureParams {
  fn from(p: GlassParams) -> Self {
    Self::Glass(p)
  }
}

impl From<SubsurfaceParams> for ClosureParams {
  fn from(p: SubsurfaceParams) -> Self {
    Self::Subsurface(p)
  }
}

impl From<AlSurfaceLayerParams> for ClosureParams {
  fn from(p: AlSurfaceLayerParams) -> Self {
    Self::AlSurfaceLayer(p)
  }
}
