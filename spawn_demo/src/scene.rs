//! Scene description for the demo
//!
//! A scene names its regions, the templates that can be spawned, and the
//! weighted drop table used by the `rare` command.

use serde::{Deserialize, Serialize};
use spawn_engine::config::{Config, ConfigError, SpawnerConfig};
use spawn_engine::foundation::math::Vec3;
use spawn_engine::pool::{EntityBackend, TemplateRef, WeightedTemplate};
use spawn_engine::spatial::{Aabb, RegionError, RegionId, SpatialRegion};
use spawn_engine::spawning::{SpawnCoordinator, SpawnError};

/// Errors raised while turning a [`SceneConfig`] into live objects
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("Failed to load scene: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid region '{name}': {source}")]
    Region {
        name: String,
        #[source]
        source: RegionError,
    },

    #[error("Scene declares no templates")]
    NoTemplates,

    #[error("Drop '{drop}' refers to unknown template '{template}'")]
    UnknownTemplate { drop: String, template: String },

    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

/// One region of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Explicit id; defaults to the region's index in the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    pub min: [f32; 3],
    pub max: [f32; 3],
    /// Height used for placements; defaults to the vertical center of the bounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_height: Option<f32>,
}

/// One row of the drop table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropConfig {
    pub name: String,
    pub template: String,
    pub weight: f32,
}

/// Complete demo scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub templates: Vec<String>,
    /// Template used by the single-template commands; defaults to the first one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_template: Option<String>,
    /// Entities placed in every region at startup
    pub initial_count_per_region: i32,
    pub spawner: SpawnerConfig,
    pub regions: Vec<RegionConfig>,
    pub drops: Vec<DropConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let region = |name: &str, min: [f32; 3], max: [f32; 3]| RegionConfig {
            id: None,
            name: name.to_string(),
            min,
            max,
            reference_height: None,
        };
        let drop = |name: &str, template: &str, weight: f32| DropConfig {
            name: name.to_string(),
            template: template.to_string(),
            weight,
        };

        Self {
            spawner: SpawnerConfig::default(),
            regions: vec![
                region("meadow", [0.0, 0.0, 0.0], [20.0, 0.0, 20.0]),
                region("ridge", [40.0, 5.0, 0.0], [60.0, 5.0, 20.0]),
                region("hollow", [-30.0, -2.0, -30.0], [-10.0, -2.0, -10.0]),
            ],
            templates: vec!["Rock".to_string(), "Tree".to_string(), "Crystal".to_string()],
            focus_template: None,
            drops: vec![
                drop("Common", "Rock", 9.0),
                drop("Uncommon", "Tree", 3.0),
                drop("Rare", "Crystal", 1.0),
            ],
            initial_count_per_region: 2,
        }
    }
}

impl Config for SceneConfig {}

/// Templates registered for a scene
#[derive(Debug, Clone)]
pub struct Catalog {
    pub templates: Vec<TemplateRef>,
    pub focus: TemplateRef,
    pub drops: Vec<WeightedTemplate>,
}

impl SceneConfig {
    /// Build validated regions, in declaration order
    pub fn build_regions(&self) -> Result<Vec<SpatialRegion>, SceneError> {
        self.regions
            .iter()
            .enumerate()
            .map(|(index, config)| {
                let invalid = |source: RegionError| SceneError::Region {
                    name: config.name.clone(),
                    source,
                };
                let id = RegionId(config.id.unwrap_or(index as u32));
                let bounds = Aabb::new(Vec3::from(config.min), Vec3::from(config.max)).map_err(invalid)?;
                let region = SpatialRegion::new(id, config.name.clone(), bounds);
                match config.reference_height {
                    Some(height) => region.with_reference_height(height).map_err(invalid),
                    None => Ok(region),
                }
            })
            .collect()
    }

    /// Register every template with the coordinator and resolve the drop table
    pub fn register_catalog<B: EntityBackend>(
        &self,
        coordinator: &mut SpawnCoordinator<'_, B>,
    ) -> Result<Catalog, SceneError> {
        let templates = self
            .templates
            .iter()
            .map(|name| coordinator.register_template(name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let find = |name: &str| templates.iter().find(|t| t.name() == name).cloned();

        let focus = match &self.focus_template {
            Some(name) => find(name).ok_or_else(|| SceneError::UnknownTemplate {
                drop: "focus".to_string(),
                template: name.clone(),
            })?,
            None => templates.first().cloned().ok_or(SceneError::NoTemplates)?,
        };

        let drops = self
            .drops
            .iter()
            .map(|drop| {
                find(&drop.template)
                    .map(|template| WeightedTemplate::new(template, drop.weight).with_name(drop.name.as_str()))
                    .ok_or_else(|| SceneError::UnknownTemplate {
                        drop: drop.name.clone(),
                        template: drop.template.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Registered {} templates and {} drops (focus: {})",
            templates.len(),
            drops.len(),
            focus
        );
        Ok(Catalog { templates, focus, drops })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spawn_engine::foundation::random::seeded_rng;
    use spawn_engine::pool::HeadlessBackend;

    #[test]
    fn test_default_scene_builds() {
        let config = SceneConfig::default();
        let regions = config.build_regions().unwrap();
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[1].id(), RegionId(1));
        assert_eq!(regions[1].reference_height(), 5.0);

        let mut coordinator = SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(1)).unwrap();
        let catalog = config.register_catalog(&mut coordinator).unwrap();
        assert_eq!(catalog.focus.name(), "Rock");
        assert_eq!(catalog.drops.len(), 3);
        assert_eq!(catalog.drops[2].name, "Rare");
    }

    #[test]
    fn test_ron_scene_with_explicit_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");
        std::fs::write(
            &path,
            r#"(
                regions: [
                    (id: Some(7), name: "pit", min: (0.0, 0.0, 0.0), max: (4.0, 2.0, 4.0), reference_height: Some(0.5)),
                ],
                templates: ["Barrel"],
            )"#,
        )
        .unwrap();

        let config = SceneConfig::load_from_file(&path).unwrap();
        let regions = config.build_regions().unwrap();
        assert_eq!(regions[0].id(), RegionId(7));
        assert_eq!(regions[0].reference_height(), 0.5);
        assert_eq!(config.initial_count_per_region, SceneConfig::default().initial_count_per_region);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = SceneConfig::default();
        config.regions[1].min = [70.0, 5.0, 0.0];

        match config.build_regions() {
            Err(SceneError::Region { name, source }) => {
                assert_eq!(name, "ridge");
                assert!(matches!(source, RegionError::Inverted { .. }));
            }
            other => panic!("Expected region error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_reference_height_rejected() {
        let mut config = SceneConfig::default();
        config.regions[0].reference_height = Some(f32::NAN);

        assert!(matches!(config.build_regions(), Err(SceneError::Region { .. })));
    }

    #[test]
    fn test_drop_with_unknown_template() {
        let mut config = SceneConfig::default();
        config.drops.push(DropConfig {
            name: "Legendary".to_string(),
            template: "Dragon".to_string(),
            weight: 0.1,
        });
        let regions = config.build_regions().unwrap();
        let mut coordinator = SpawnCoordinator::new(&regions, HeadlessBackend::new(), seeded_rng(1)).unwrap();

        match config.register_catalog(&mut coordinator) {
            Err(SceneError::UnknownTemplate { drop, template }) => {
                assert_eq!(drop, "Legendary");
                assert_eq!(template, "Dragon");
            }
            other => panic!("Expected unknown template, got {other:?}"),
        }
    }

    #[test]
    fn test_toml_scene_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");

        let config = SceneConfig::default();
        config.save_to_file(&path).unwrap();
        assert_eq!(SceneConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_sample_scene_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scene.ron");
        let config = SceneConfig::load_from_file(path).unwrap();
        let regions = config.build_regions().unwrap();
        assert_eq!(regions[2].id(), RegionId(10));

        let mut coordinator = SpawnCoordinator::from_config(&regions, HeadlessBackend::new(), &config.spawner).unwrap();
        let catalog = config.register_catalog(&mut coordinator).unwrap();
        assert_eq!(catalog.focus.name(), "Tree");
        assert_eq!(catalog.templates.len(), 4);
    }
}
