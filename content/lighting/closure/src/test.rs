use rendiation_statistics::ConstantSampler;

use crate::*;

fn splat(v: f32) -> LinearRGBColor<f32> {
  LinearRGBColor::splat(v)
}

fn up() -> Vec3 {
  Vec3::new(0., 0., 1.)
}

fn diffuse(weight: f32) -> ClosureTree {
  ClosureTree::leaf(
    ClosureId::DIFFUSE,
    splat(weight),
    ClosureParams::Diffuse { n: up() },
  )
}

fn glossy(dist: &str, weight: f32, ior: f32) -> ClosureTree {
  ClosureTree::leaf(
    ClosureId::GLOSSY,
    splat(weight),
    GlossyParams {
      dist: dist.into(),
      n: up(),
      t: Vec3::new(1., 0., 0.),
      roughness: 0.2,
      anisotropy: 0.,
      ior,
    },
  )
}

fn glass(weight: f32, ior: f32) -> ClosureTree {
  ClosureTree::leaf(
    ClosureId::GLASS,
    splat(weight),
    GlassParams {
      dist: "beckmann".into(),
      n: up(),
      surface_transmittance: splat(1.),
      reflection_tint: splat(1.),
      refraction_tint: splat(1.),
      roughness: 0.,
      ior,
      ..Default::default()
    },
  )
}

fn subsurface(profile: &str, weight: f32) -> ClosureTree {
  ClosureTree::leaf(
    ClosureId::SUBSURFACE,
    splat(weight),
    SubsurfaceParams {
      profile: profile.into(),
      n: up(),
      reflectance: splat(0.5),
      mean_free_path: splat(1.),
      ior: 1.3,
    },
  )
}

fn emission(weight: LinearRGBColor<f32>) -> ClosureTree {
  ClosureTree::leaf(ClosureId::EMISSION, weight, ClosureParams::Empty)
}

fn layer(substrate: ClosureTree, weight: f32) -> ClosureTree {
  ClosureTree::leaf(
    ClosureId::AL_SURFACE_LAYER,
    splat(weight),
    AlSurfaceLayerParams {
      substrate: Some(Box::new(substrate)),
      n: up(),
      reflectance: splat(1.),
      roughness: 0.1,
      anisotropy: 2.,
      ior: 1.5,
      ..Default::default()
    },
  )
}

fn combine_all(trees: impl IntoIterator<Item = ClosureTree>) -> ClosureTree {
  trees.into_iter().reduce(ClosureTree::combine).unwrap()
}

fn surface(tree: &ClosureTree) -> Result<CompositeSurfaceClosure, ClosureError> {
  CompositeSurfaceClosure::new(
    ClosureRegistry::global(),
    &ShadingBasis::default(),
    Some(tree),
  )
}

fn approx(a: f32, b: f32) -> bool {
  (a - b).abs() < 1e-5
}

#[test]
fn diffuse_plus_glossy() {
  let tree = ClosureTree::combine(
    ClosureTree::scale(diffuse(1.), splat(0.5)),
    glossy("ggx", 0.5, 1.5),
  );
  let composite = surface(&tree).unwrap();

  assert_eq!(composite.closure_count(), 2);
  assert_eq!(composite.closure_type(0), ClosureId::OREN_NAYAR);
  assert_eq!(composite.closure_type(1), ClosureId::GLOSSY_GGX);
  assert_eq!(composite.closure_weight(0), splat(0.5));
  assert_eq!(composite.closure_weight(1), splat(0.5));

  assert!(approx(composite.closure_pdf_weight(0), 0.5));
  assert!(approx(composite.closure_pdf_weight(1), 0.5));
  assert!(approx(composite.cdf()[0], 0.5));
  assert_eq!(composite.cdf()[1], 1.0);

  assert_eq!(composite.ior_count(), 1);
  assert_eq!(composite.ior(0), 1.5);
  assert_eq!(composite.ior_weight(0), 1.0);
  assert_eq!(composite.choose_ior(0.7), 1.5);

  let ClosureValues::Glossy(values) = composite.closure_values(1) else {
    panic!("glossy entry expected");
  };
  assert_eq!(values.roughness, 0.2);
  assert_eq!(values.ior, 1.5);
}

#[test]
fn emission_is_normalized_by_max_channel() {
  let tree = emission(LinearRGBColor::new(2., 0., 0.));
  let composite = CompositeEmissionClosure::new(Some(&tree)).unwrap();

  assert_eq!(composite.closure_count(), 1);
  assert_eq!(composite.metric(), WeightMetric::MaxChannel);
  let ClosureValues::DiffuseEdf(values) = composite.closure_values(0) else {
    panic!("edf entry expected");
  };
  assert_eq!(values.radiance, LinearRGBColor::new(1., 0., 0.));
  assert_eq!(values.radiance_multiplier, 2.);
  assert_eq!(composite.cdf(), &[1.0]);
}

#[test]
fn unregistered_closures_are_skipped() {
  let tree = ClosureTree::leaf(ClosureId(9999), splat(1.), ClosureParams::Empty);
  let composite = surface(&tree).unwrap();
  assert_eq!(composite.closure_count(), 0);
  assert!(composite.cdf().is_empty());

  let params = ClosureParams::Empty;
  let mut empty = CompositeSurfaceClosure::empty(Default::default());
  let result = ClosureRegistry::new().dispatch(
    ClosureId::DIFFUSE,
    &mut empty,
    &ShadingBasis::default(),
    &params,
    splat(1.),
  );
  assert_eq!(result, Ok(()));
  assert!(empty.is_empty());
}

#[test]
fn only_positive_weights_make_entries() {
  let tree = combine_all([
    diffuse(1.),
    diffuse(0.),
    diffuse(-1.),
    diffuse(f32::NAN),
    diffuse(0.5),
    ClosureTree::scale(diffuse(1.), LinearRGBColor::new(0., 0., 0.)),
  ]);
  let composite = surface(&tree).unwrap();

  assert_eq!(composite.closure_count(), 2);
  assert_eq!(composite.closure_weight(0), splat(1.));
  assert_eq!(composite.closure_weight(1), splat(0.5));

  let sum: f32 = composite.pdf_weights().iter().sum();
  assert!(approx(sum, 1.));
  assert!(approx(composite.closure_pdf_weight(0), 2. / 3.));
}

#[test]
fn surface_choice_follows_cdf() {
  let tree = combine_all([diffuse(1.), glossy("beckmann", 2., 1.5), diffuse(1.)]);
  let composite = surface(&tree).unwrap();
  let cdf = composite.cdf().to_vec();

  assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
  assert_eq!(cdf[2], 1.);
  assert_eq!(composite.choose_closure(0.), 0);
  assert_eq!(composite.choose_closure(1. - f32::EPSILON), 2);
  for (i, c) in cdf.iter().enumerate() {
    assert_eq!(composite.choose_closure(*c), i);
  }

  let mut sampler = ConstantSampler(0.5);
  assert_eq!(composite.choose_closure_with_sampler(&mut sampler), 1);
}

#[test]
fn vacuum_ior_without_refraction() {
  let tree = combine_all([diffuse(1.), diffuse(0.5)]);
  let composite = surface(&tree).unwrap();
  assert_eq!(composite.ior_count(), 1);
  assert_eq!(composite.ior(0), 1.);
  assert_eq!(composite.ior_cdf(), &[1.]);

  let nothing = ClosureTree::Combine {
    left: None,
    right: None,
  };
  let empty = surface(&nothing).unwrap();
  assert!(empty.is_empty());
  assert_eq!(empty.ior_count(), 1);
  assert_eq!(empty.choose_ior(0.3), 1.);
}

#[test]
fn ior_distribution_follows_refractive_weights() {
  let tree = combine_all([glass(1., 1.5), diffuse(1.), glass(3., 1.33)]);
  let composite = surface(&tree).unwrap();

  assert_eq!(composite.closure_count(), 3);
  assert_eq!(composite.closure_type(0), ClosureId::GLASS_BECKMANN);
  assert_eq!(composite.ior_count(), 2);
  assert!(approx(composite.ior_weight(0), 0.25));
  assert!(approx(composite.ior_weight(1), 0.75));
  assert_eq!(composite.choose_ior(0.1), 1.5);
  assert_eq!(composite.choose_ior(0.5), 1.33);

  let ClosureValues::Glass(values) = composite.closure_values(0) else {
    panic!("glass entry expected");
  };
  assert_eq!(values.roughness, 0.0001);
}

#[test]
fn reflection_keeps_vacuum_ior() {
  let tree = ClosureTree::leaf(
    ClosureId::REFLECTION,
    splat(1.),
    ClosureParams::Reflection { n: up(), ior: 1.8 },
  );
  let composite = surface(&tree).unwrap();
  assert_eq!(composite.closure_type(0), ClosureId::GLOSSY_BECKMANN);
  let ClosureValues::Glossy(values) = composite.closure_values(0) else {
    panic!("glossy entry expected");
  };
  assert_eq!(values.roughness, 0.);
  assert_eq!(values.ior, 1.8);

  assert_eq!(composite.ior_count(), 1);
  assert_eq!(composite.ior(0), 1.);
}

#[test]
fn closure_basis_policy() {
  let fallback =
    ShadingBasis::from_normal_and_tangent(Vec3::new(0., 1., 0.), Vec3::new(1., 0., 0.));
  let registry = ClosureRegistry::global();

  let zero_normal = ClosureTree::leaf(
    ClosureId::DIFFUSE,
    splat(1.),
    ClosureParams::Diffuse { n: Vec3::zero() },
  );
  let composite = CompositeSurfaceClosure::new(registry, &fallback, Some(&zero_normal)).unwrap();
  assert_eq!(composite.closure_shading_basis(0), &fallback);

  let zero_tangent = ClosureTree::leaf(
    ClosureId::GLOSSY,
    splat(1.),
    GlossyParams {
      dist: "ggx".into(),
      n: Vec3::new(0., 0., 4.),
      t: Vec3::zero(),
      ior: 1.5,
      ..Default::default()
    },
  );
  let composite = CompositeSurfaceClosure::new(registry, &fallback, Some(&zero_tangent)).unwrap();
  let basis = composite.closure_shading_basis(0);
  assert_eq!(basis.normal, up());
  assert_eq!(
    basis,
    &ShadingBasis::from_normal_and_tangent(up(), fallback.tangent_u)
  );
}

#[test]
fn too_many_closures_is_an_error() {
  let tree = combine_all((0..=MAX_CLOSURE_ENTRIES).map(|_| diffuse(1.)));
  let err = surface(&tree).unwrap_err();
  assert_eq!(
    err,
    ClosureError::EntryCapacityExceeded {
      limit: MAX_CLOSURE_ENTRIES
    }
  );

  let tree = combine_all([diffuse(1.), diffuse(1.)]);
  let err = CompositeSurfaceClosure::with_budget(
    ClosureRegistry::global(),
    &ShadingBasis::default(),
    Some(&tree),
    ClosureBudget::new(1, MAX_IOR_ENTRIES, MAX_POOL_SIZE),
  )
  .unwrap_err();
  assert!(err.is_capacity_exceeded());
}

#[test]
fn too_many_iors_is_an_error() {
  let tree = combine_all((0..=MAX_IOR_ENTRIES).map(|i| glass(1., 1. + i as f32 * 0.1)));
  let err = CompositeSurfaceClosure::with_budget(
    ClosureRegistry::global(),
    &ShadingBasis::default(),
    Some(&tree),
    ClosureBudget::new(MAX_CLOSURE_ENTRIES, 2, MAX_POOL_SIZE),
  )
  .unwrap_err();
  assert_eq!(err, ClosureError::IorCapacityExceeded { limit: 2 });
}

#[test]
fn full_ior_list_leaves_composite_unchanged() {
  let basis = ShadingBasis::default();
  let registry = ClosureRegistry::global();
  let budget = ClosureBudget::new(MAX_CLOSURE_ENTRIES, 0, MAX_POOL_SIZE);

  for tree in [glass(1., 1.5), glossy("ggx", 1., 1.5)] {
    let ClosureTree::Leaf(leaf) = &tree else {
      unreachable!()
    };
    let mut composite = CompositeSurfaceClosure::empty(budget);
    let result = registry.dispatch(leaf.id, &mut composite, &basis, &leaf.params, splat(1.));
    assert_eq!(result, Err(ClosureError::IorCapacityExceeded { limit: 0 }));
    assert_eq!(composite.closure_count(), 0);
    assert_eq!(composite.pool_bytes(), 0);
    assert_eq!(composite.ior_count(), 0);
  }
}

#[test]
fn invalid_parameters_are_reported() {
  let err = surface(&glossy("phong", 1., 1.5)).unwrap_err();
  assert_eq!(
    err,
    ClosureError::UnrecognizedVariant {
      parameter: "microfacet distribution function",
      value: "phong".to_owned(),
    }
  );

  let mismatched = ClosureTree::leaf(ClosureId::METAL, splat(1.), ClosureParams::Empty);
  assert_eq!(
    surface(&mismatched).unwrap_err(),
    ClosureError::ParameterMismatch {
      closure: ClosureId::METAL
    }
  );
}

#[test]
fn conversion_clamps_parameters() {
  let tree = combine_all([
    ClosureTree::leaf(
      ClosureId::PHONG,
      splat(1.),
      ClosureParams::Phong {
        n: up(),
        exponent: -3.,
      },
    ),
    ClosureTree::leaf(
      ClosureId::DISNEY,
      splat(1.),
      DisneyParams {
        n: up(),
        base_color: splat(0.8),
        metallic: 2.,
        roughness: 0.,
        clearcoat_gloss: 5.,
        anisotropic: -4.,
        ..Default::default()
      },
    ),
  ]);
  let composite = surface(&tree).unwrap();

  assert_eq!(composite.closure_type(0), ClosureId::ASHIKHMIN_SHIRLEY);
  let ClosureValues::Ashikhmin(phong) = composite.closure_values(0) else {
    panic!("ashikhmin entry expected");
  };
  assert_eq!((phong.nu, phong.nv), (0.01, 0.01));

  let ClosureValues::Disney(disney) = composite.closure_values(1) else {
    panic!("disney entry expected");
  };
  assert_eq!(disney.metallic, 1.);
  assert_eq!(disney.roughness, 0.0001);
  assert_eq!(disney.clearcoat_gloss, 1.);
  assert_eq!(disney.anisotropic, -1.);
}

#[test]
fn layered_closure_binds_its_substrate() {
  let registry = ClosureRegistry::global();
  let basis = ShadingBasis::default();
  let tree = ClosureTree::combine(layer(diffuse(1.), 0.5), diffuse(0.25));

  let mut composite = CompositeSurfaceClosure::new(registry, &basis, Some(&tree)).unwrap();
  assert_eq!(composite.closure_count(), 2);
  assert_eq!(composite.closure_type(0), ClosureId::AL_SURFACE_LAYER);
  assert!(composite.has_unbound_layers());

  let ClosureValues::AlSurfaceLayer(values) = composite.closure_values(0) else {
    panic!("layered entry expected");
  };
  assert_eq!(values.anisotropy, 1.);
  assert_eq!(values.substrate_bsdf, None);

  let layered: Vec<_> = composite.layered_entries().collect();
  assert_eq!(layered.len(), 1);
  let (entry, substrate) = layered[0];
  assert_eq!(entry.index(), 0);

  let substrate_composite = CompositeSurfaceClosure::new(registry, &basis, substrate).unwrap();
  assert_eq!(substrate_composite.closure_count(), 1);
  assert_eq!(substrate_composite.closure_type(0), ClosureId::OREN_NAYAR);

  composite.bind_substrate(entry, ScatteringHandle(7));
  assert!(!composite.has_unbound_layers());
  assert_eq!(composite.substrate_bsdf(entry), Some(ScatteringHandle(7)));
  assert_eq!(composite.closure_weight(0), splat(0.5));
}

#[test]
fn layered_entries_report_their_position() {
  let tree = combine_all([
    diffuse(1.),
    layer(glossy("ggx", 1., 1.5), 1.),
    layer(diffuse(1.), 1.),
  ]);
  let mut composite = surface(&tree).unwrap();

  let handles: Vec<_> = composite
    .layered_entries()
    .map(|(entry, substrate)| {
      assert!(substrate.is_some());
      entry
    })
    .collect();
  assert_eq!(handles.iter().map(|h| h.index()).collect::<Vec<_>>(), [1, 2]);

  composite.bind_substrate(handles[0], ScatteringHandle(1));
  assert!(composite.has_unbound_layers());
  assert_eq!(composite.substrate_bsdf(handles[1]), None);
  composite.bind_substrate(handles[1], ScatteringHandle(2));
  assert!(!composite.has_unbound_layers());
}

#[test]
#[should_panic]
fn binding_a_plain_closure_panics() {
  let mut composite = CompositeClosure::new(WeightMetric::Luminance, Default::default());
  let entry = composite
    .add_closure(
      ClosureId::OREN_NAYAR,
      &ShadingBasis::default(),
      splat(1.),
      up(),
      None,
      ClosureValues::OrenNayar(Default::default()),
    )
    .unwrap();
  composite.bind_substrate(entry, ScatteringHandle(0));
}

#[test]
fn subsurface_looks_through_layers() {
  let tree = ClosureTree::scale(
    combine_all([
      subsurface("better_dipole", 0.5),
      diffuse(1.),
      layer(subsurface("standard_dipole", 1.), 0.5),
      subsurface("directional_dipole", 0.),
    ]),
    splat(2.),
  );
  let composite = CompositeSubsurfaceClosure::new(&ShadingBasis::default(), Some(&tree)).unwrap();

  assert_eq!(composite.closure_count(), 2);
  assert_eq!(composite.closure_type(0), ClosureId::SUBSURFACE_BETTER_DIPOLE);
  assert_eq!(composite.closure_type(1), ClosureId::SUBSURFACE_STANDARD_DIPOLE);
  assert_eq!(composite.closure_weight(0), splat(1.));
  assert_eq!(composite.closure_weight(1), splat(1.));

  let ClosureValues::Dipole(values) = composite.closure_values(0) else {
    panic!("dipole entry expected");
  };
  assert_eq!(values.weight, 1.);
  assert_eq!(values.g, 0.);
  assert_eq!(values.ior, 1.3);
}

#[test]
fn unknown_subsurface_profile_is_reported() {
  let tree = subsurface("gaussian", 1.);
  let err = CompositeSubsurfaceClosure::new(&ShadingBasis::default(), Some(&tree)).unwrap_err();
  assert_eq!(err.to_string(), "invalid subsurface profile: gaussian");
}

#[cfg(feature = "normalized-diffusion")]
#[test]
fn normalized_diffusion_profile() {
  let tree = subsurface("normalized_diffusion", 1.);
  let composite = CompositeSubsurfaceClosure::new(&ShadingBasis::default(), Some(&tree)).unwrap();
  assert_eq!(
    composite.closure_type(0),
    ClosureId::SUBSURFACE_NORMALIZED_DIFFUSION
  );
  assert!(matches!(
    composite.closure_values(0),
    ClosureValues::NormalizedDiffusion(_)
  ));
}

#[cfg(not(feature = "normalized-diffusion"))]
#[test]
fn normalized_diffusion_profile_is_disabled() {
  let tree = subsurface("normalized_diffusion", 1.);
  let err = CompositeSubsurfaceClosure::new(&ShadingBasis::default(), Some(&tree)).unwrap_err();
  assert!(matches!(err, ClosureError::UnrecognizedVariant { .. }));
}

#[test]
fn emission_looks_through_layers() {
  let tree = combine_all([
    layer(emission(LinearRGBColor::new(0., 3., 0.)), 0.5),
    emission(splat(-1.)),
    layer(emission(splat(1.)), 0.),
    diffuse(1.),
  ]);
  let composite = CompositeEmissionClosure::new(Some(&tree)).unwrap();

  assert_eq!(composite.closure_count(), 1);
  let ClosureValues::DiffuseEdf(values) = composite.closure_values(0) else {
    panic!("edf entry expected");
  };
  assert_eq!(values.radiance, LinearRGBColor::new(0., 1., 0.));
  assert_eq!(values.radiance_multiplier, 1.5);
  assert_eq!(composite.closure_shading_basis(0), &ShadingBasis::default());
}

#[test]
fn emission_uses_max_channel_weights() {
  let tree = combine_all([
    emission(LinearRGBColor::new(0., 0., 1.)),
    emission(LinearRGBColor::new(1., 0., 0.)),
  ]);
  let composite = CompositeEmissionClosure::new(Some(&tree)).unwrap();
  assert_eq!(composite.pdf_weights(), &[0.5, 0.5]);
}

#[test]
fn scalar_extractors() {
  let tree = combine_all([
    ClosureTree::leaf(ClosureId::TRANSPARENT, splat(0.25), ClosureParams::Empty),
    layer(
      ClosureTree::leaf(
        ClosureId::BACKGROUND,
        LinearRGBColor::new(1., 2., 3.),
        ClosureParams::Empty,
      ),
      0.5,
    ),
    ClosureTree::scale(
      ClosureTree::leaf(ClosureId::HOLDOUT, splat(1.), ClosureParams::Empty),
      splat(2.),
    ),
    diffuse(1.),
  ]);

  assert!(approx(process_transparency_tree(Some(&tree)), 0.75));
  assert_eq!(process_holdout_tree(Some(&tree)), 1.);
  assert_eq!(
    process_background_tree(Some(&tree)),
    LinearRGBColor::new(0.5, 1., 1.5)
  );
  assert_eq!(
    sum_closure_weight(Some(&tree), ClosureId::DIFFUSE),
    splat(1.)
  );

  assert_eq!(process_transparency_tree(None), 1.);
  assert_eq!(process_holdout_tree(None), 0.);
  assert_eq!(process_background_tree(None), LinearRGBColor::zero());
}

#[test]
fn builtin_closure_table() {
  let registry = ClosureRegistry::with_builtin_closures();
  assert_eq!(registry.len(), 18);

  for descriptor in BUILTIN_CLOSURES {
    assert!(descriptor.id < ClosureId::COUNT);
    assert_eq!(registry.find_by_name(descriptor.name).map(|d| d.id), Some(descriptor.id));
  }

  let without_conversion: Vec<_> = registry
    .iter()
    .filter(|d| d.convert.is_none())
    .map(|d| d.name)
    .collect();
  assert_eq!(
    without_conversion,
    ["emission", "as_subsurface", "background", "debug", "holdout", "transparent"]
  );

  let layer = registry.descriptor(ClosureId::AL_SURFACE_LAYER).unwrap();
  assert_eq!(layer.params[0].ty, ClosureParamType::Closure);
}
