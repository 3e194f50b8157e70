//! Morph Component Tests
//!
//! Tests for:
//! - Construction: part matching, per-part textures, registry ownership
//! - Construction errors: every variant, with nothing registered on failure
//! - Weight API: requested vs. current weights, per-frame updates
//! - MorphSystem batch updates

use std::cell::Cell;
use std::sync::Arc;

use glam::Vec3;

use morpher::{
    HeadlessTextureFactory, Keyframe, KeyframeCurve, MeshModel, MeshPart, MorphComponent,
    MorphError, MorphOptions, MorphSettings, MorphSystem, MorphTexture, MorphWeights, PartId,
    SubModel, TextureFactory, TextureKey, TextureRegistry,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn part(positions: Vec<Vec3>) -> MeshPart {
    let normals = vec![Vec3::Y; positions.len()];
    MeshPart::new("part", positions, normals)
}

fn strip(count: usize, lift: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| Vec3::new(i as f32, lift * i as f32, 0.0))
        .collect()
}

/// A model with an unmorphed "Head" and a two-part "Body".
fn model(id_suffix: &str, lift: f32) -> MeshModel {
    MeshModel::new(vec![
        SubModel::new(format!("/Root/Head{id_suffix}"), vec![part(strip(4, 0.0))]),
        SubModel::new(
            format!("/Root/Body{id_suffix}"),
            vec![part(strip(3, lift)), part(strip(5, lift * 2.0))],
        ),
    ])
}

/// Records every texture it realizes.
#[derive(Default)]
struct CountingFactory {
    created: Cell<usize>,
}

impl TextureFactory for CountingFactory {
    type Texture = (usize, usize);
    type Error = String;

    fn create_texture(&self, _key: &TextureKey, packed: &MorphTexture) -> Result<(usize, usize), String> {
        self.created.set(self.created.get() + 1);
        Ok((packed.width(), packed.height()))
    }
}

/// Fails on the second texture.
#[derive(Default)]
struct FlakyFactory {
    calls: Cell<usize>,
}

impl TextureFactory for FlakyFactory {
    type Texture = ();
    type Error = &'static str;

    fn create_texture(&self, _key: &TextureKey, _packed: &MorphTexture) -> Result<(), &'static str> {
        self.calls.set(self.calls.get() + 1);
        if self.calls.get() > 1 { Err("out of memory") } else { Ok(()) }
    }
}

fn build(
    base: Option<&MeshModel>,
    targets: &[MeshModel],
    settings: &MorphSettings,
    registry: &TextureRegistry<()>,
) -> morpher::Result<MorphComponent<()>> {
    MorphComponent::new(
        base,
        "BODY",
        targets,
        MorphWeights::ZERO,
        settings,
        &HeadlessTextureFactory,
        registry,
    )
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn builds_one_texture_per_matching_part() {
    init_logger();
    let base = model("", 0.0);
    let targets = [model("_Target", 1.0), model("_Target", -1.0)];
    let factory = CountingFactory::default();
    let registry = TextureRegistry::new();

    let component = MorphComponent::new(
        Some(&base),
        "body",
        &targets,
        MorphWeights::ZERO,
        &MorphSettings::default(),
        &factory,
        &registry,
    )
    .unwrap();

    assert_eq!(factory.created.get(), 2);
    assert_eq!(registry.len(), 2);

    let textures = component.textures();
    assert_eq!(textures.len(), 2);
    assert_eq!(textures[0].key.part_index, 0);
    assert_eq!(textures[0].key.submodel, "/Root/Body");
    // 3 vertices x 2 targets x 2 pixels on 3-wide rows
    assert_eq!(textures[0].handle, (3, 4));
    assert_eq!(textures[1].handle, (5, 4));

    let (offset, _) = textures[1].packed.sample(2, 1).unwrap();
    assert_eq!(offset, Vec3::new(0.0, -4.0, 0.0));
}

#[test]
fn part_id_is_case_insensitive() {
    let base = model("", 0.0);
    let targets = [model("_target", 1.0)];
    let registry = TextureRegistry::new();

    let component = build(Some(&base), &targets, &MorphSettings::default(), &registry).unwrap();
    assert_eq!(component.part_id(), &PartId::new("body"));
    assert_eq!(registry.get_part(&PartId::new("Body")).len(), 2);
}

#[test]
fn unmatched_part_id_builds_nothing() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let registry: TextureRegistry<()> = TextureRegistry::new();

    let component = MorphComponent::new(
        Some(&base),
        "tail",
        &targets,
        MorphWeights::ZERO,
        &MorphSettings::default(),
        &HeadlessTextureFactory,
        &registry,
    )
    .unwrap();
    assert!(component.textures().is_empty());
    assert!(registry.is_empty());
}

#[test]
fn options_are_passed_through() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let settings = MorphSettings::default().with_options(MorphOptions::DEBUG_NORMALS);

    let component = build(Some(&base), &targets, &settings, &TextureRegistry::new()).unwrap();
    assert!(component.options().contains(MorphOptions::DEBUG_NORMALS));
}

// ============================================================================
// Construction Errors
// ============================================================================

#[test]
fn missing_base_mesh() {
    let targets = [model("", 1.0)];
    let result = build(None, &targets, &MorphSettings::default(), &TextureRegistry::new());
    assert_eq!(result.unwrap_err(), MorphError::MissingBaseMesh);
}

#[test]
fn target_count_out_of_range() {
    let base = model("", 0.0);
    let registry = TextureRegistry::new();

    let err = build(Some(&base), &[], &MorphSettings::default(), &registry).unwrap_err();
    assert_eq!(err, MorphError::InvalidTargetCount { count: 0, max: 4 });

    let five: Vec<MeshModel> = (0..5).map(|i| model("", i as f32)).collect();
    let err = build(Some(&base), &five, &MorphSettings::default(), &registry).unwrap_err();
    assert_eq!(err, MorphError::InvalidTargetCount { count: 5, max: 4 });

    let settings = MorphSettings::default().with_max_target_count(2);
    let err = build(Some(&base), &five[..3], &settings, &registry).unwrap_err();
    assert_eq!(err, MorphError::InvalidTargetCount { count: 3, max: 2 });
    assert!(registry.is_empty());
}

#[test]
fn geometry_too_large_counts_whole_model() {
    // 12 base vertices x 1 target x 2 = 24 pixels > 4 x 4
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let settings = MorphSettings::default().with_max_texture_width(4);

    let err = build(Some(&base), &targets, &settings, &TextureRegistry::new()).unwrap_err();
    assert_eq!(err, MorphError::GeometryTooLarge { elements: 24, max: 16 });
}

#[test]
fn topology_mismatch_registers_nothing() {
    init_logger();
    let base = model("", 0.0);
    let mut bad = model("", 1.0);
    bad.submodels[1].parts[1].positions.pop();
    bad.submodels[1].parts[1].normals.pop();
    let targets = [model("", 1.0), bad];
    let registry = TextureRegistry::new();

    let err = build(Some(&base), &targets, &MorphSettings::default(), &registry).unwrap_err();
    assert_eq!(
        err,
        MorphError::TopologyMismatch {
            part: "body".to_string(),
            expected: 5,
            actual: 4,
        }
    );
    assert!(registry.is_empty());
}

#[test]
fn target_without_matching_part_is_an_error() {
    let base = model("", 0.0);
    let headless = MeshModel::new(vec![SubModel::new("Head", vec![part(strip(4, 0.0))])]);
    let targets = [model("", 1.0), headless];

    let err = build(Some(&base), &targets, &MorphSettings::default(), &TextureRegistry::new())
        .unwrap_err();
    assert_eq!(
        err,
        MorphError::MissingTargetPart {
            part: "body".to_string(),
            target: 1,
        }
    );
}

#[test]
fn target_missing_normals_is_an_error() {
    let base = model("", 0.0);
    let mut target = model("", 1.0);
    target.submodels[1].parts[0].normals.clear();

    let err = build(Some(&base), &[target], &MorphSettings::default(), &TextureRegistry::new())
        .unwrap_err();
    assert_eq!(
        err,
        MorphError::NormalCountMismatch {
            positions: 3,
            normals: 0,
        }
    );
}

#[test]
fn texture_creation_failure_is_terminal() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let registry = TextureRegistry::new();

    let result = MorphComponent::new(
        Some(&base),
        "body",
        &targets,
        MorphWeights::ZERO,
        &MorphSettings::default(),
        &FlakyFactory::default(),
        &registry,
    );

    match result {
        Err(MorphError::TextureCreationFailed(message)) => {
            assert!(message.contains("out of memory"), "{message}");
        }
        other => panic!("expected TextureCreationFailed, got {other:?}"),
    }
    assert!(registry.is_empty());
}

// ============================================================================
// Registry Ownership
// ============================================================================

#[test]
fn registry_releases_textures_after_component_drops() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let registry = TextureRegistry::new();

    let component = build(Some(&base), &targets, &MorphSettings::default(), &registry).unwrap();
    let held = Arc::clone(&component.textures()[0]);
    assert_eq!(registry.collect_unused(), 0);

    drop(component);
    // `held` still references the first texture
    assert_eq!(registry.collect_unused(), 1);
    assert_eq!(registry.len(), 1);
    assert!(registry.get(&held.key).is_some());

    drop(held);
    assert_eq!(registry.collect_unused(), 1);
    assert!(registry.is_empty());
}

#[test]
fn registry_remove_part() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let registry = TextureRegistry::new();

    let _component = build(Some(&base), &targets, &MorphSettings::default(), &registry).unwrap();
    assert_eq!(registry.remove_part(&PartId::new("head")), 0);
    assert_eq!(registry.remove_part(&PartId::new("body")), 2);
    assert!(registry.is_empty());
}

// ============================================================================
// Weights
// ============================================================================

#[test]
fn requested_weights_update_immediately() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let mut component =
        build(Some(&base), &targets, &MorphSettings::default(), &TextureRegistry::new()).unwrap();

    assert_eq!(component.update(0.016), None);

    let target = MorphWeights::new([1.0, 0.0, 0.0, 0.0]);
    component.set_target_weights(target, 2.0);
    assert_eq!(component.weights(), target);
    assert_eq!(component.current_weights(), MorphWeights::ZERO);

    let weights = component.update(1.0).unwrap();
    assert!((weights[0] - 0.5).abs() < 1e-5);
    assert_eq!(component.current_weights(), weights);

    assert_eq!(component.update(1.0), Some(target));
    assert_eq!(component.update(1.0), None);
    assert!(!component.is_animating());
}

#[test]
fn keyframes_set_final_weights() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let mut component =
        build(Some(&base), &targets, &MorphSettings::default(), &TextureRegistry::new()).unwrap();

    let end = MorphWeights::new([0.0, 0.0, 0.0, 1.0]);
    component.set_keyframes(KeyframeCurve::new([Keyframe::new(1.0, end)]), 1.0);
    assert_eq!(component.weights(), end);
    assert!(component.is_animating());
}

// ============================================================================
// MorphSystem
// ============================================================================

#[test]
fn system_reports_only_changed_components() {
    let base = model("", 0.0);
    let targets = [model("", 1.0)];
    let registry = TextureRegistry::new();
    let mut components: Vec<_> = (0..3)
        .map(|_| build(Some(&base), &targets, &MorphSettings::default(), &registry).unwrap())
        .collect();

    components[1].set_target_weights(MorphWeights::splat(1.0), 0.0);

    let changed = MorphSystem::update(&mut components, 0.016);
    assert_eq!(changed, vec![(1, MorphWeights::splat(1.0))]);
    assert!(MorphSystem::update(&mut components, 0.016).is_empty());

    components[2].set_target_weights(MorphWeights::splat(0.5), 0.0);
    let mut applied = Vec::new();
    MorphSystem::update_with(&mut components, 0.016, |component, weights| {
        applied.push((component.part_id().clone(), weights));
    });
    assert_eq!(applied, vec![(PartId::new("body"), MorphWeights::splat(0.5))]);
}
