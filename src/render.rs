//! Frame pipeline: clear, scatter seeds, then shade or overlay

use crate::config::{AppConfig, FieldConfig};
use crate::error::RenderError;
use crate::raster::{Canvas, Color};
use crate::worley::{PointField, WorleyField};
use clap::ValueEnum;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Red test segments as fractions of the canvas size
const TEST_SEGMENTS: [(f64, f64, f64, f64); 4] = [
    (0.3, 0.3, 0.9, 0.4),
    (0.3, 0.3, 0.4, 0.9),
    (0.0, 0.0, 1.0, 1.0),
    (0.5, 0.1, 0.4, 0.01),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Grayscale Worley noise over every pixel
    #[default]
    NoiseField,
    /// Grid lines, test segments and seed markers on black
    DiagnosticOverlay,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::NoiseField => Self::DiagnosticOverlay,
            Self::DiagnosticOverlay => Self::NoiseField,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::NoiseField => "noise field",
            Self::DiagnosticOverlay => "diagnostic overlay",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    pub mode: RenderMode,
    /// Number of seed points scattered
    pub seeds: usize,
    /// RNG seed used, for reproducing the frame
    pub rng_seed: u64,
    pub elapsed: Duration,
}

/// Render one frame into `canvas`.
///
/// Uses `config.seed` when set, otherwise a fresh random seed. The canvas
/// must match the configured field size. On error after the clear, the
/// canvas is left black.
pub fn render(canvas: &mut Canvas, config: &AppConfig) -> Result<RenderStats, RenderError> {
    let rng_seed = config.seed.unwrap_or_else(rand::random);
    render_seeded(canvas, config, rng_seed)
}

pub fn render_seeded(
    canvas: &mut Canvas,
    config: &AppConfig,
    rng_seed: u64,
) -> Result<RenderStats, RenderError> {
    render_with(canvas, config, rng_seed, |field_config, rng| {
        PointField::generate(field_config, rng)
    })
}

/// Pipeline body with the seed generator passed in
fn render_with<G>(
    canvas: &mut Canvas,
    config: &AppConfig,
    rng_seed: u64,
    generate: G,
) -> Result<RenderStats, RenderError>
where
    G: FnOnce(FieldConfig, &mut StdRng) -> Result<PointField, RenderError>,
{
    let start = Instant::now();
    config.validate()?;

    let field_config = config.field;
    if canvas.width() != field_config.width || canvas.height() != field_config.height {
        return Err(RenderError::InvalidConfiguration(format!(
            "field is {}x{} but canvas is {}x{}",
            field_config.width,
            field_config.height,
            canvas.width(),
            canvas.height()
        )));
    }

    debug!(
        "canvas {}x{}, stride {}, {} bytes per pixel, {} bytes total",
        canvas.width(),
        canvas.height(),
        canvas.stride(),
        canvas.bytes_per_pixel(),
        canvas.byte_len()
    );

    canvas.clear();

    let mut rng = StdRng::seed_from_u64(rng_seed);
    let field = generate(field_config, &mut rng)?;

    match config.mode {
        RenderMode::NoiseField => shade_noise(canvas, &field)?,
        RenderMode::DiagnosticOverlay => draw_overlay(canvas, &field, config.point_radius),
    }

    Ok(RenderStats {
        mode: config.mode,
        seeds: field.len(),
        rng_seed,
        elapsed: start.elapsed(),
    })
}

fn shade_noise(canvas: &mut Canvas, field: &PointField) -> Result<(), RenderError> {
    let eval = WorleyField::new(field);
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let value = eval.intensity(x, y);
            canvas.set_pixel(x as i32, y as i32, Color::gray(value))?;
        }
    }
    Ok(())
}

fn draw_overlay(canvas: &mut Canvas, field: &PointField, point_radius: u32) {
    let config = field.config();
    let w = canvas.width() as i32;
    let h = canvas.height() as i32;

    // Interior cell boundaries
    for i in 1..config.sections as i32 {
        let y = i * config.cell_height() as i32;
        canvas.draw_line(0, y, w - 1, y, Color::GREEN);
    }
    for i in 1..config.sections as i32 {
        let x = i * config.cell_width() as i32;
        canvas.draw_line(x, 0, x, h - 1, Color::GREEN);
    }

    for (fx1, fy1, fx2, fy2) in TEST_SEGMENTS {
        canvas.draw_line(
            (fx1 * w as f64) as i32,
            (fy1 * h as f64) as i32,
            (fx2 * w as f64) as i32,
            (fy2 * h as f64) as i32,
            Color::RED,
        );
    }

    for seed in field.points() {
        canvas.draw_point(seed.x as i32, seed.y as i32, point_radius as i32, Color::YELLOW);
    }
}
