//! Worley noise generator with a small software rasterizer
//!
//! The core modules work on plain byte slices; `display` adapts an SDL2
//! window to them.

pub mod config;
pub mod display;
pub mod error;
pub mod raster;
pub mod render;
pub mod worley;

pub use config::{AppConfig, FieldConfig, Preset};
pub use error::RenderError;
pub use raster::{Canvas, Color};
pub use render::{render, render_seeded, RenderMode, RenderStats};
pub use worley::{PointField, SeedPoint, WorleyField};
