//! Configuration loading.
//!
//! Layered from an optional `digit-viz.default.toml`, an optional user file,
//! and `DIGIT_VIZ__SECTION__KEY` environment variables, in that order.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::layers::LayerSizes;
use crate::layout::{GeneratorKind, Geometry, LayoutPass, SeedPolicy};
use crate::session::OrderingPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "digit-viz.default.toml";
pub const ENV_PREFIX: &str = "DIGIT_VIZ";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VizConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub predict: PredictConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub layers: LayerSizes,

    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Side of one grid cell in CSS pixels.
    #[serde(default = "default_cell_px")]
    pub cell_px: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            cell_px: default_cell_px(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:7878".to_string()
}

fn default_cell_px() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub ordering: OrderingPolicy,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: None,
            ordering: OrderingPolicy::default(),
        }
    }
}

impl PredictConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5000/predict".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_size")]
    pub size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: default_grid_size() }
    }
}

fn default_grid_size() -> usize {
    28
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_seed")]
    pub seed: i64,

    #[serde(default)]
    pub policy: SeedPolicy,

    #[serde(default)]
    pub generator: GeneratorKind,

    #[serde(default)]
    pub geometry: Geometry,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            policy: SeedPolicy::default(),
            generator: GeneratorKind::default(),
            geometry: Geometry::default(),
        }
    }
}

impl LayoutConfig {
    pub fn pass(&self) -> LayoutPass {
        LayoutPass::new(self.seed)
            .with_policy(self.policy)
            .with_generator(self.generator)
    }
}

fn default_seed() -> i64 {
    42
}

impl VizConfig {
    /// Loads the layered configuration. Missing files are skipped; a file
    /// that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
