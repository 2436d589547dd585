use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::edge::Topology;
use crate::error::{LifeError, Result};
use crate::pattern::Pattern;

/// Tunable parameters. Loaded from TOML, overridden by CLI flags or request fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub seed: u64,

    // World
    pub width: usize,
    pub height: usize,
    pub topology: Topology,

    // Seeding: a named pattern centred in the world, or random cells.
    pub pattern: Option<String>,
    pub density: f64,

    // Run
    pub generations: usize,

    // Rendering
    pub cell_size: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 64,
            height: 48,
            topology: Topology::Bounded,
            pattern: None,
            density: 0.25,
            generations: 32,
            cell_size: 8,
        }
    }
}

impl Params {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let params: Params = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::invalid_config(format!(
                "world must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(LifeError::invalid_config(format!(
                "density {} is outside [0, 1]",
                self.density
            )));
        }
        if self.cell_size == 0 {
            return Err(LifeError::invalid_config("cell_size must be positive"));
        }
        if let Some(name) = &self.pattern {
            let p = Pattern::by_name(name)?;
            let dims = p.dims();
            if dims.width > self.width || dims.height > self.height {
                return Err(LifeError::invalid_config(format!(
                    "pattern '{}' is {}x{}, larger than the {}x{} world",
                    p.name, dims.width, dims.height, self.width, self.height
                )));
            }
        }
        Ok(())
    }
}
