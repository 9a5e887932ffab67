//! Selection-aware requests

use super::{quarry, valley};
use approx::assert_abs_diff_eq;
use crate::foundation::math::Vec3;
use crate::foundation::random::seeded_rng;
use crate::pool::{HeadlessBackend, WeightedTemplate};
use crate::spatial::RegionId;
use crate::spawning::{Placement, RegionPlacement, SpawnCoordinator, SpawnError, SpawnRequest, TemplateSource};

#[test]
fn test_common_rare_distribution() {
    let regions = quarry();
    let mut coordinator = SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(1000)).unwrap();
    let common = coordinator.register_template("Common").unwrap();
    let rare = coordinator.register_template("Rare").unwrap();
    let drops = [WeightedTemplate::new(common, 9.0), WeightedTemplate::new(rare.clone(), 1.0)];

    let request = SpawnRequest::new(TemplateSource::Weighted(&drops), Placement::RegionCenter(RegionId(0)))
        .with_count(1000);
    let report = coordinator.spawn(&request).unwrap();

    let rare_count = report.spawned.iter().filter(|s| s.template == rare).count();
    let frequency = rare_count as f64 / 1000.0;
    assert_abs_diff_eq!(frequency, 0.10, epsilon = 0.03);
    assert_eq!(coordinator.pool().count_of(&rare), rare_count);
}

#[test]
fn test_uniform_selection_per_spawn() {
    let regions = valley();
    let mut coordinator = SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(31)).unwrap();
    let kinds = [
        coordinator.register_template("Bush").unwrap(),
        coordinator.register_template("Stone").unwrap(),
        coordinator.register_template("Log").unwrap(),
    ];

    let request = SpawnRequest::new(TemplateSource::Uniform(&kinds), Placement::AllRegions(RegionPlacement::Random))
        .with_count(40);
    let report = coordinator.spawn(&request).unwrap();

    assert_eq!(report.len(), 120);
    for kind in &kinds {
        assert!(coordinator.pool().count_of(kind) > 0, "{kind} never selected");
    }
}

#[test]
fn test_empty_candidate_sets_spawn_nothing() {
    let regions = quarry();
    let mut coordinator = SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(0)).unwrap();

    let uniform = SpawnRequest::new(TemplateSource::Uniform(&[]), Placement::RegionRandom(RegionId(0)));
    assert_eq!(coordinator.spawn(&uniform), Err(SpawnError::EmptyInput));

    let weighted = SpawnRequest::new(TemplateSource::Weighted(&[]), Placement::AllRegions(RegionPlacement::Center));
    assert_eq!(coordinator.spawn(&weighted), Err(SpawnError::EmptyInput));

    assert!(coordinator.pool().is_empty());
    assert_eq!(coordinator.last_sampled_position(), None);
}

#[test]
fn test_weighted_reuse_respects_template_identity() {
    let regions = quarry();
    let mut coordinator = SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(8)).unwrap();
    let gold = coordinator.register_template("Gold").unwrap();
    let iron = coordinator.register_template("Iron").unwrap();
    let only_iron = [WeightedTemplate::new(gold.clone(), 0.0), WeightedTemplate::new(iron.clone(), 5.0)];

    let g = coordinator.spawn_at(&gold, Vec3::zeros()).unwrap();
    coordinator.deactivate(g).unwrap();

    let request = SpawnRequest::new(TemplateSource::Weighted(&only_iron), Placement::RegionCenter(RegionId(0)));
    let report = coordinator.spawn(&request).unwrap();

    assert!(!report.spawned[0].reused);
    assert_eq!(report.spawned[0].template, iron);
    assert_eq!(coordinator.pool().count_of(&gold), 1);
    assert!(!coordinator.pool().entry(g).unwrap().is_active());
}

#[test]
fn test_overflowing_drop_table_rejected_before_spawning() {
    let regions = quarry();
    let mut coordinator = SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(4)).unwrap();
    let boulder = coordinator.register_template("Boulder").unwrap();
    let pebble = coordinator.register_template("Pebble").unwrap();
    let drops = [WeightedTemplate::new(boulder, f32::MAX), WeightedTemplate::new(pebble, f32::MAX)];

    let request = SpawnRequest::new(TemplateSource::Weighted(&drops), Placement::RegionCenter(RegionId(0)));

    assert!(matches!(coordinator.spawn(&request), Err(SpawnError::InvalidArgument(_))));
    assert!(coordinator.pool().is_empty());
    assert_eq!(coordinator.stats().rejected, 1);
}
