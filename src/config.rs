//! Application configuration
//!
//! Settings come from a preset, then an optional JSON file, then CLI flags.

use crate::error::RenderError;
use crate::render::RenderMode;
use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_POINT_RADIUS: u32 = 5;

/// Grid and canvas parameters shared by the generator and the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub width: u32,
    pub height: u32,
    /// The canvas is split into `sections x sections` cells
    pub sections: u32,
    /// Seed points scattered in each cell
    pub amount_per_cell: u32,
}

impl FieldConfig {
    pub fn new(width: u32, height: u32, sections: u32, amount_per_cell: u32) -> Self {
        Self {
            width,
            height,
            sections,
            amount_per_cell,
        }
    }

    /// Reject anything that would produce an empty cell or an empty field
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfiguration(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.sections == 0 {
            return Err(RenderError::InvalidConfiguration(
                "sections must be at least 1".into(),
            ));
        }
        if self.amount_per_cell == 0 {
            return Err(RenderError::InvalidConfiguration(
                "amount per cell must be at least 1".into(),
            ));
        }
        if self.sections > self.width || self.sections > self.height {
            return Err(RenderError::InvalidConfiguration(format!(
                "{} sections do not fit a {}x{} canvas",
                self.sections, self.width, self.height
            )));
        }
        if self.checked_seed_count().is_none() {
            return Err(RenderError::InvalidConfiguration(format!(
                "{} sections with {} seeds each overflows",
                self.sections, self.amount_per_cell
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn cell_width(&self) -> u32 {
        self.width / self.sections
    }

    #[inline]
    pub fn cell_height(&self) -> u32 {
        self.height / self.sections
    }

    fn checked_seed_count(&self) -> Option<usize> {
        let sections = self.sections as usize;
        sections
            .checked_mul(sections)?
            .checked_mul(self.amount_per_cell as usize)
    }

    /// Total number of seed points in the field
    pub fn seed_count(&self) -> usize {
        self.checked_seed_count().unwrap_or(usize::MAX)
    }
}

/// Built-in setups matching the two demo variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 100x100 noise field with a 25x25 grid
    Noise,
    /// 1000x1000 grid, line and seed overlay with a 10x10 grid
    Diagnostic,
}

impl Preset {
    pub fn config(self) -> AppConfig {
        match self {
            Preset::Noise => AppConfig {
                field: FieldConfig::new(100, 100, 25, 1),
                mode: RenderMode::NoiseField,
                ..AppConfig::default()
            },
            Preset::Diagnostic => AppConfig {
                field: FieldConfig::new(1000, 1000, 10, 1),
                mode: RenderMode::DiagnosticOverlay,
                ..AppConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub field: FieldConfig,
    pub mode: RenderMode,
    /// Fixed RNG seed; a fresh one is drawn per render when absent
    pub seed: Option<u64>,
    pub point_radius: u32,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::new(100, 100, 25, 1),
            mode: RenderMode::NoiseField,
            seed: None,
            point_radius: DEFAULT_POINT_RADIUS,
            vsync: true,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        self.field.validate()?;
        if self.point_radius == 0 {
            return Err(RenderError::InvalidConfiguration(
                "point radius must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Load config from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }
}
